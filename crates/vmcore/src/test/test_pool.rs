//! VM-level pool behavior not already covered by `pool`'s own unit tests:
//! the heap's two independent size-classed pools as seen through `Vm`.

use vmcore::{Instruction, LsObject, LsStr, OpCode, Program, Vm, VmConfig};

fn bare_vm() -> Vm {
    let program = Program::new(vec![Instruction::new(OpCode::Halt, 0)], vec![]);
    Vm::new(program, VmConfig::default())
}

#[test]
fn big_pool_tracks_allocations_independently_of_the_small_pool() {
    let mut vm = bare_vm();
    for i in 0..5 {
        vm.alloc(LsStr { data: format!("s{i}") }).unwrap();
    }
    let (allocs, frees, alive, _blocks) = vm.heap().big_pool_stats();
    assert_eq!(allocs, 5);
    assert_eq!(frees, 0);
    assert_eq!(alive, 5);

    let (small_allocs, ..) = vm.heap().small_pool_stats();
    assert_eq!(small_allocs, 0);
}

#[test]
fn small_and_big_pools_each_count_only_their_own_variant_group() {
    let mut vm = bare_vm();
    vm.alloc(LsObject { fields: Default::default() }).unwrap();
    vm.alloc(LsStr { data: "x".into() }).unwrap();

    let (small_allocs, ..) = vm.heap().small_pool_stats();
    let (big_allocs, ..) = vm.heap().big_pool_stats();
    assert_eq!(small_allocs, 1);
    assert_eq!(big_allocs, 1);
}

#[test]
fn collecting_unreferenced_objects_returns_their_cells_to_the_pool() {
    let mut vm = bare_vm();
    for i in 0..10 {
        vm.alloc(LsStr { data: format!("s{i}") }).unwrap();
    }
    let (_, frees_before, alive_before, _) = vm.heap().big_pool_stats();
    assert_eq!(frees_before, 0);
    assert_eq!(alive_before, 10);

    vm.collect_garbage();

    let (_, frees_after, alive_after, _) = vm.heap().big_pool_stats();
    assert_eq!(alive_after, 0);
    assert_eq!(frees_after, 10);
}
