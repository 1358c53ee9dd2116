use std::rc::Rc;

use ahash::AHashMap;

use crate::value::Variant;

/// Embedded in every heap-managed cell. `is_small` records which pool owns
/// the cell's storage (needed by `free()` to route the cell back to the
/// right pool without re-deriving it from the value's type); `gc_next`
/// threads the cell into the GC's intrusive live-object list; `marked` is
/// scratch space used only during a mark phase and is always `false`
/// between collections.
#[repr(C)]
pub struct ObjectHeader {
    pub(crate) is_small: bool,
    pub(crate) marked: bool,
    pub(crate) gc_next: Option<ObjectId>,
}

/// A handle to a heap object. Never dereferenced directly by VM code outside
/// `heap`/`gc` — those modules are the only ones that know how to route a
/// header pointer back to its owning pool.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct ObjectId(pub(crate) std::ptr::NonNull<ObjectHeader>);

/// Dynamic field-named object: `{ name -> Variant }`.
pub struct LsObject {
    pub fields: AHashMap<Rc<str>, Variant>,
}

/// Fixed-layout struct instance: declared type index plus positional fields.
pub struct LsStruct {
    pub type_index: u32,
    pub fields: Vec<Variant>,
}

/// Enum instance: a discriminant tag plus an optional payload.
pub struct LsEnum {
    pub type_index: u32,
    pub tag: u32,
    pub payload: Vec<Variant>,
}

/// Heap-managed, mutable string buffer. Distinct from [`Variant::Str`], which
/// is a refcounted immutable handle outside GC entirely (akin to an interned
/// short string) and never occupies a pool cell.
pub struct LsStr {
    pub data: String,
}

pub struct LsArray {
    pub elements: Vec<Variant>,
}

/// The three small-class variants, grouped so they share one pool sized to
/// their common maximum.
pub enum SmallObject {
    Object(LsObject),
    Struct(LsStruct),
    Enum(LsEnum),
}

/// The two big-class variants.
pub enum BigObject {
    Str(LsStr),
    Array(LsArray),
}

#[repr(C)]
pub(crate) struct GcCell<V> {
    pub header: ObjectHeader,
    pub value: V,
}

/// Which pool a to-be-allocated payload belongs in, and the payload itself.
pub enum HeapValue {
    Small(SmallObject),
    Big(BigObject),
}

impl From<LsObject> for HeapValue {
    fn from(v: LsObject) -> Self {
        HeapValue::Small(SmallObject::Object(v))
    }
}
impl From<LsStruct> for HeapValue {
    fn from(v: LsStruct) -> Self {
        HeapValue::Small(SmallObject::Struct(v))
    }
}
impl From<LsEnum> for HeapValue {
    fn from(v: LsEnum) -> Self {
        HeapValue::Small(SmallObject::Enum(v))
    }
}
impl From<LsStr> for HeapValue {
    fn from(v: LsStr) -> Self {
        HeapValue::Big(BigObject::Str(v))
    }
}
impl From<LsArray> for HeapValue {
    fn from(v: LsArray) -> Self {
        HeapValue::Big(BigObject::Array(v))
    }
}
