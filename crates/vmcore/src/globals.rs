//! Optional name→data-slot index over the VM's `data` vector. Gated behind
//! the `globals_table` feature; without it, globals are addressed
//! positionally by the compiler and this module is simply not compiled in.

use std::rc::Rc;

use ahash::AHashMap;

use crate::value::Variant;

/// `names` maps an interned global name to its slot in `Vm::data`. The
/// table owns no storage of its own — it is purely an index, matching the
/// spec's framing of globals as `data` entries with a name attached.
///
/// The source's "interned pointer equality, falling back to string
/// compare" lookup collapses into a single `HashMap` lookup here: hashing
/// the `str` content already handles both the interned and non-interned
/// case uniformly, so there is no separate fast path to preserve.
#[derive(Default)]
pub struct Globals {
    names: AHashMap<Rc<str>, u32>,
}

impl Globals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` at `index`. Asserts if `name` is already registered —
    /// a duplicate global is a programming error (malformed compiler output),
    /// not a recoverable runtime condition.
    pub fn add(&mut self, name: Rc<str>, index: u32) {
        assert!(!self.names.contains_key(&name), "duplicate global: {name}");
        self.names.insert(name, index);
    }

    pub fn get<'a>(&self, data: &'a [Variant], name: &str) -> Option<&'a Variant> {
        self.names.get(name).map(|&i| &data[i as usize])
    }

    /// Overwrite an existing global. Returns `false` without creating one if
    /// `name` is not registered.
    pub fn set(&self, data: &mut [Variant], name: &str, value: Variant) -> bool {
        match self.names.get(name) {
            Some(&i) => {
                data[i as usize] = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }
}
