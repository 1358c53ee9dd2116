//! Diagnostic dumps named in the external interface: `print`, `print_stack_trace`,
//! and `gc::print`. None of these affect VM state; they exist purely to let a
//! host or test inspect what's going on.

use std::fmt::{self, Write};

use crate::heap::object::{BigObject, SmallObject};
use crate::vm::Vm;

/// Dumps `pc`, the data vector's length, and every occupied evaluation-stack
/// slot.
pub fn print(vm: &Vm, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "pc = {}", vm.program_counter())?;
    writeln!(out, "data: {} entries", vm.data().len())?;
    writeln!(out, "stack ({} / {}):", vm.stack().len(), vm.stack().capacity())?;
    for (i, v) in vm.stack().iter().enumerate() {
        writeln!(out, "  [{i}] {v:?}")?;
    }
    Ok(())
}

#[cfg(feature = "save_callstack")]
pub fn print_stack_trace(vm: &Vm, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "callstack ({} frames):", vm.callstack().len())?;
    for (depth, name) in vm.callstack().iter().rev().enumerate() {
        writeln!(out, "  #{depth} {name}")?;
    }
    Ok(())
}

/// Lists every currently-live heap object with its variant kind.
pub fn print_gc(vm: &Vm, out: &mut impl Write) -> fmt::Result {
    let heap = vm.heap();
    writeln!(out, "gc: {} live objects", vm.alive_objects_count())?;
    for id in vm.iter_object_ids() {
        let kind = if heap.header(id).is_small {
            match heap.small(id) {
                SmallObject::Object(_) => "object",
                SmallObject::Struct(_) => "struct",
                SmallObject::Enum(_) => "enum",
            }
        } else {
            match heap.big(id) {
                BigObject::Str(_) => "str",
                BigObject::Array(_) => "array",
            }
        };
        writeln!(out, "  {kind}")?;
    }
    Ok(())
}
