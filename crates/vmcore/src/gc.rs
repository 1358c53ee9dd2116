//! Stop-the-world, non-incremental, non-moving mark-and-sweep collector over
//! the size-classed [`Heap`]. Deliberately simpler than a production
//! generational/incremental collector: one `collect()` call walks every
//! root to completion before sweeping, matching the spec's non-goals.

use crate::error::VmResult;
use crate::heap::object::{BigObject, HeapValue, ObjectId, SmallObject};
use crate::heap::Heap;
use crate::value::Variant;

/// Read-only collection counters, exposed so hosts and tests can assert on
/// collector behavior without reaching into GC internals.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcStats {
    pub collections: u64,
    pub last_reclaimed: usize,
    pub alive: usize,
}

pub struct Gc {
    heap: Heap,
    gc_max_count: usize,
    initial_threshold: usize,
    collections: u64,
    last_reclaimed: usize,
}

impl Gc {
    pub fn new(pool_granularity: usize, initial_threshold: usize) -> Self {
        Self {
            heap: Heap::new(pool_granularity),
            gc_max_count: initial_threshold,
            initial_threshold,
            collections: 0,
            last_reclaimed: 0,
        }
    }

    pub fn alloc(&mut self, value: impl Into<HeapValue>) -> VmResult<ObjectId> {
        self.heap.alloc(value)
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    pub fn alive_count(&self) -> usize {
        self.heap.alive_count()
    }

    /// `true` iff `alive_count() >= gc_max_count`. Checked only at safe
    /// points (function return, the `GcCollect` opcode) — never mid-opcode.
    pub fn needs_collect(&self) -> bool {
        self.heap.alive_count() >= self.gc_max_count
    }

    pub fn gc_max_count(&self) -> usize {
        self.gc_max_count
    }

    pub fn stats(&self) -> GcStats {
        GcStats { collections: self.collections, last_reclaimed: self.last_reclaimed, alive: self.heap.alive_count() }
    }

    /// Walk the intrusive live-object list. Used only by diagnostics
    /// (`gc.print(os)`); never by mark/sweep, which address the list
    /// directly through `Heap`.
    pub fn iter_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        let mut cur = self.heap.gc_list_head();
        std::iter::from_fn(move || {
            let id = cur?;
            cur = self.heap.header(id).gc_next;
            Some(id)
        })
    }

    /// Mark every object reachable from `roots`, then sweep the unreached.
    /// Returns the number of objects freed. Raises `gc_max_count` to
    /// `max(initial_threshold, 2 * survivors)` afterward so a large live set
    /// does not thrash the next collection.
    pub fn collect<'a>(&mut self, roots: impl IntoIterator<Item = &'a Variant>) -> usize {
        let mut worklist: Vec<ObjectId> = roots.into_iter().filter_map(Variant::heap_id).collect();

        while let Some(id) = worklist.pop() {
            if self.heap.header(id).marked {
                continue;
            }
            self.heap.header_mut(id).marked = true;
            trace_references(&self.heap, id, &mut worklist);
        }

        let before = self.heap.alive_count();
        let mut cur = self.heap.gc_list_head();
        let mut new_head = None;
        let mut tail: Option<ObjectId> = None;
        while let Some(id) = cur {
            let next = self.heap.header(id).gc_next;
            if self.heap.header(id).marked {
                self.heap.header_mut(id).marked = false;
                self.heap.header_mut(id).gc_next = None;
                match tail {
                    None => new_head = Some(id),
                    Some(t) => self.heap.header_mut(t).gc_next = Some(id),
                }
                tail = Some(id);
            } else {
                self.heap.free(id);
            }
            cur = next;
        }
        self.heap.set_gc_list_head(new_head);

        let reclaimed = before - self.heap.alive_count();
        self.collections += 1;
        self.last_reclaimed = reclaimed;
        self.gc_max_count = self.initial_threshold.max(2 * self.heap.alive_count());
        reclaimed
    }
}

fn trace_references(heap: &Heap, id: ObjectId, worklist: &mut Vec<ObjectId>) {
    let push = |v: &Variant, worklist: &mut Vec<ObjectId>| {
        if let Some(id) = v.heap_id() {
            worklist.push(id);
        }
    };
    if heap.header(id).is_small {
        match heap.small(id) {
            SmallObject::Object(o) => {
                for v in o.fields.values() {
                    push(v, worklist);
                }
            }
            SmallObject::Struct(s) => {
                for v in &s.fields {
                    push(v, worklist);
                }
            }
            SmallObject::Enum(e) => {
                for v in &e.payload {
                    push(v, worklist);
                }
            }
        }
    } else {
        match heap.big(id) {
            BigObject::Str(_) => {}
            BigObject::Array(a) => {
                for v in &a.elements {
                    push(v, worklist);
                }
            }
        }
    }
}
