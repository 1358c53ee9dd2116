pub mod object;

use crate::error::{VmError, VmResult};
use crate::pool::BlockPool;
use object::{BigObject, GcCell, HeapValue, ObjectHeader, ObjectId, SmallObject};

/// Two size-classed block pools dispatched by which variant group a value
/// belongs to: `LsObject`/`LsStruct`/`LsEnum` share the small pool,
/// `LsStr`/`LsArray` share the big pool. Every live object is additionally
/// threaded onto a single intrusive list (`gc_list_head`) via its header's
/// `gc_next`, which the GC walks during sweep regardless of which pool
/// backs the cell.
pub struct Heap {
    small: BlockPool<GcCell<SmallObject>>,
    big: BlockPool<GcCell<BigObject>>,
    gc_list_head: Option<ObjectId>,
    alive_count: usize,
}

impl Heap {
    pub fn new(granularity: usize) -> Self {
        Self {
            small: BlockPool::new(granularity),
            big: BlockPool::new(granularity),
            gc_list_head: None,
            alive_count: 0,
        }
    }

    /// Allocate and construct a heap object, linking it to the head of the
    /// live-object list. The only failure mode named by the spec —
    /// `BadGcAllocSize` — cannot occur for this crate's closed variant set,
    /// since every variant is pre-classified into small or big at the type
    /// level; the `Result` return is kept so the signature matches the
    /// general `alloc<T>()` contract a future variant would have to honor.
    pub fn alloc(&mut self, value: impl Into<HeapValue>) -> VmResult<ObjectId> {
        let id = match value.into() {
            HeapValue::Small(small) => {
                let ptr = self.small.allocate();
                let header = ObjectHeader { is_small: true, marked: false, gc_next: self.gc_list_head };
                unsafe {
                    std::ptr::write(ptr, GcCell { header, value: small });
                }
                ObjectId(std::ptr::NonNull::new(ptr as *mut ObjectHeader).unwrap())
            }
            HeapValue::Big(big) => {
                let ptr = self.big.allocate();
                let header = ObjectHeader { is_small: false, marked: false, gc_next: self.gc_list_head };
                unsafe {
                    std::ptr::write(ptr, GcCell { header, value: big });
                }
                ObjectId(std::ptr::NonNull::new(ptr as *mut ObjectHeader).unwrap())
            }
        };
        self.gc_list_head = Some(id);
        self.alive_count += 1;
        Ok(id)
    }

    pub fn small(&self, id: ObjectId) -> &SmallObject {
        debug_assert!(self.header(id).is_small);
        unsafe { &(*(id.0.as_ptr() as *const GcCell<SmallObject>)).value }
    }

    pub fn small_mut(&mut self, id: ObjectId) -> &mut SmallObject {
        debug_assert!(self.header(id).is_small);
        unsafe { &mut (*(id.0.as_ptr() as *mut GcCell<SmallObject>)).value }
    }

    pub fn big(&self, id: ObjectId) -> &BigObject {
        debug_assert!(!self.header(id).is_small);
        unsafe { &(*(id.0.as_ptr() as *const GcCell<BigObject>)).value }
    }

    pub fn big_mut(&mut self, id: ObjectId) -> &mut BigObject {
        debug_assert!(!self.header(id).is_small);
        unsafe { &mut (*(id.0.as_ptr() as *mut GcCell<BigObject>)).value }
    }

    pub(crate) fn header(&self, id: ObjectId) -> &ObjectHeader {
        unsafe { id.0.as_ref() }
    }

    pub(crate) fn header_mut(&mut self, id: ObjectId) -> &mut ObjectHeader {
        unsafe { &mut *id.0.as_ptr() }
    }

    pub(crate) fn gc_list_head(&self) -> Option<ObjectId> {
        self.gc_list_head
    }

    pub(crate) fn set_gc_list_head(&mut self, head: Option<ObjectId>) {
        self.gc_list_head = head;
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Destruct and return `id`'s cell to its owning pool. Caller must have
    /// already unlinked `id` from the live-object list.
    pub(crate) fn free(&mut self, id: ObjectId) {
        let is_small = self.header(id).is_small;
        if is_small {
            let ptr = id.0.as_ptr() as *mut GcCell<SmallObject>;
            unsafe {
                std::ptr::drop_in_place(ptr);
            }
            self.small.deallocate(ptr);
        } else {
            let ptr = id.0.as_ptr() as *mut GcCell<BigObject>;
            unsafe {
                std::ptr::drop_in_place(ptr);
            }
            self.big.deallocate(ptr);
        }
        self.alive_count -= 1;
    }

    /// Destruct and free every remaining live object, then drain both pools.
    /// Called from `Gc::drop`.
    pub(crate) fn drain(&mut self) {
        let mut cur = self.gc_list_head.take();
        while let Some(id) = cur {
            let next = self.header(id).gc_next;
            self.free(id);
            cur = next;
        }
        self.small.drain();
        self.big.drain();
        self.alive_count = 0;
    }

    pub fn small_pool_stats(&self) -> (u64, u64, u64, usize) {
        (self.small.total_allocs(), self.small.total_frees(), self.small.objects_alive(), self.small.block_count())
    }

    pub fn big_pool_stats(&self) -> (u64, u64, u64, usize) {
        (self.big.total_allocs(), self.big.total_frees(), self.big.objects_alive(), self.big.block_count())
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        self.drain();
    }
}

/// Never actually constructed today — kept so a caller reaching for the
/// general `alloc::<T>()` contract in the spec has a concrete error value to
/// name if a future non-closed variant set needs it.
#[allow(dead_code)]
pub(crate) fn bad_alloc_size() -> VmError {
    VmError::BadGcAllocSize
}
