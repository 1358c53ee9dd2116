use std::rc::Rc;

use ahash::AHashMap;

use crate::stack::Slice;
use crate::value::Variant;
use crate::vm::Vm;

/// A native handler bridging the VM to host-provided functionality. Plain
/// `fn` pointers, not boxed closures, so a `Function` stays `Copy`-ish and
/// registering one costs no allocation.
pub type NativeFn = fn(&mut Vm, Slice) -> crate::error::VmResult<Variant>;

#[derive(Clone, Copy)]
pub enum FunctionBody {
    /// Instruction index of the function's first opcode, plus its locals
    /// count (the locals stack region the call protocol reserves for it).
    Script { entry: u32, locals_count: u32 },
    Native(NativeFn),
}

pub struct Function {
    pub name: Rc<str>,
    pub arity: usize,
    pub return_type: Option<u32>,
    pub body: FunctionBody,
}

/// Interned name → function descriptor. Lookup by name is only used from
/// the host `call()` entry point and `CALL`/`CALL_NATIVE` opcodes, both of
/// which resolve once per call and then address by index thereafter.
#[derive(Default)]
pub struct FunctionTable {
    by_name: AHashMap<Rc<str>, u32>,
    functions: Vec<Function>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, f: Function) -> u32 {
        let index = self.functions.len() as u32;
        self.by_name.insert(f.name.clone(), index);
        self.functions.push(f);
        index
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, index: u32) -> &Function {
        &self.functions[index as usize]
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// A script call's saved state, pushed when a `Call` opcode (or the host's
/// `call()`) enters a script function and popped on the matching `Ret`.
/// Grounded in the call-frame-per-invocation pattern of a register VM's
/// call-info stack, trimmed down to only what this stack machine needs to
/// resume the caller: which function was running, where its locals began,
/// and where to resume in `code`.
#[derive(Clone, Copy)]
pub(crate) struct CallFrame {
    pub function_index: u32,
    pub locals_base: usize,
    pub return_pc: u32,
}

/// Sentinel `pc`/`return_pc` value meaning "there is no caller frame to
/// resume — control returns to the host". Out of range for any real `code`
/// vector, so the dispatch loop's `pc != HOST_RETURN` check doubles as the
/// top-level termination test.
pub const HOST_RETURN: u32 = u32::MAX;
