use std::rc::Rc;

use crate::function::FunctionTable;
use crate::opcode::Instruction;
use crate::value::Variant;

/// Built-in type kinds a `TypeDescriptor` can name. Closed, mirroring the
/// closed `Variant`/heap-object variant sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Array,
    Object,
    Struct,
    Enum,
    Any,
}

pub struct TypeDescriptor {
    pub name: Rc<str>,
    pub kind: TypeKind,
    /// Positional field count for `Struct` kinds; `0` for every other kind.
    /// Consulted by `NewStruct` to know how many stack slots to consume.
    pub field_count: u32,
}

/// Flat, append-only table of type descriptors referenced by `operandIndex`
/// from `TYPE`-addressing opcodes and `Function::return_type`. Populated by
/// the compiler/host before `execute()`; the VM never mutates it.
#[derive(Default)]
pub struct TypeTable {
    types: Vec<TypeDescriptor>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: Rc<str>, kind: TypeKind, field_count: u32) -> u32 {
        let index = self.types.len() as u32;
        self.types.push(TypeDescriptor { name, kind, field_count });
        index
    }

    pub fn get(&self, index: u32) -> &TypeDescriptor {
        &self.types[index as usize]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// The VM's load-time input: the in-memory analogue of a compiled chunk.
/// No serialized/persisted form is defined — a persistent compiled-program
/// format is an explicit non-goal — so `Program` is always constructed
/// directly by a compiler crate or host code, never parsed from bytes here.
pub struct Program {
    pub code: Vec<Instruction>,
    pub data: Vec<Variant>,
    pub functions: FunctionTable,
    pub types: TypeTable,
    /// First instruction index `execute()` starts at. Defaults to 0.
    pub entry: u32,
}

impl Program {
    pub fn new(code: Vec<Instruction>, data: Vec<Variant>) -> Self {
        Self { code, data, functions: FunctionTable::new(), types: TypeTable::new(), entry: 0 }
    }
}
