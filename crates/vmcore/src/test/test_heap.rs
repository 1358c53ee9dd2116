//! Heap-construction opcodes (`NewObject`, `NewStruct`, `NewEnum`,
//! `FieldGet`/`FieldSet`, `ArraySet`) and the type-confusion guards that
//! keep them from reinterpret-casting a handle into the wrong pool.

use vmcore::{Instruction, OpCode, Program, SmallObject, TypeKind, Variant, Vm, VmConfig, VmError};

#[test]
fn new_object_field_set_then_get_round_trips() {
    let data = vec![Variant::Str("x".into()), Variant::Int(99)];
    let code = vec![
        /* 0 */ Instruction::new(OpCode::NewObject, 0),
        /* 1 */ Instruction::new(OpCode::Dup, 0),
        /* 2 */ Instruction::new(OpCode::PushConst, 1),
        /* 3 */ Instruction::new(OpCode::FieldSet, 0),
        /* 4 */ Instruction::new(OpCode::FieldGet, 0),
        /* 5 */ Instruction::new(OpCode::Halt, 0),
    ];
    let program = Program::new(code, data);
    let mut vm = Vm::new(program, VmConfig::default());
    vm.execute_limited(0, 5).unwrap();
    assert_eq!(*vm.stack().top().unwrap(), Variant::Int(99));
}

#[test]
fn field_get_on_a_name_never_set_yields_null() {
    let data = vec![Variant::Str("missing".into())];
    let code = vec![
        Instruction::new(OpCode::NewObject, 0),
        Instruction::new(OpCode::FieldGet, 0),
        Instruction::new(OpCode::Halt, 0),
    ];
    let program = Program::new(code, data);
    let mut vm = Vm::new(program, VmConfig::default());
    vm.execute_limited(0, 2).unwrap();
    assert_eq!(*vm.stack().top().unwrap(), Variant::Null);
}

#[test]
fn new_struct_holds_positional_fields_in_push_order() {
    let data = vec![Variant::Int(1), Variant::Int(2)];
    let code = vec![
        Instruction::new(OpCode::PushConst, 0),
        Instruction::new(OpCode::PushConst, 1),
        Instruction::new(OpCode::NewStruct, 0),
        Instruction::new(OpCode::Halt, 0),
    ];
    let mut program = Program::new(code, data);
    program.types.register("Point".into(), TypeKind::Struct, 2);
    let mut vm = Vm::new(program, VmConfig::default());
    vm.execute_limited(0, 3).unwrap();

    let id = vm.stack().top().unwrap().heap_id().unwrap();
    match vm.heap().small(id) {
        SmallObject::Struct(s) => {
            assert_eq!(s.type_index, 0);
            assert_eq!(s.fields, vec![Variant::Int(1), Variant::Int(2)]);
        }
        _ => panic!("expected a struct"),
    }
}

#[test]
fn new_enum_carries_its_tag_and_single_payload_value() {
    let data = vec![Variant::Int(7)];
    let code = vec![
        Instruction::new(OpCode::PushConst, 0),
        Instruction::new(OpCode::NewEnum, 3), // type_index 0, tag 3
        Instruction::new(OpCode::Halt, 0),
    ];
    let mut program = Program::new(code, data);
    program.types.register("Maybe".into(), TypeKind::Enum, 0);
    let mut vm = Vm::new(program, VmConfig::default());
    vm.execute_limited(0, 2).unwrap();

    let id = vm.stack().top().unwrap().heap_id().unwrap();
    match vm.heap().small(id) {
        SmallObject::Enum(e) => {
            assert_eq!(e.type_index, 0);
            assert_eq!(e.tag, 3);
            assert_eq!(e.payload, vec![Variant::Int(7)]);
        }
        _ => panic!("expected an enum"),
    }
}

#[test]
fn array_set_then_array_get_observes_the_overwritten_element() {
    let data = vec![Variant::Int(10), Variant::Int(20), Variant::Int(1), Variant::Int(99)];
    let code = vec![
        /* 0 */ Instruction::new(OpCode::PushConst, 0),
        /* 1 */ Instruction::new(OpCode::PushConst, 1),
        /* 2 */ Instruction::new(OpCode::NewArray, 2),
        /* 3 */ Instruction::new(OpCode::Dup, 0),
        /* 4 */ Instruction::new(OpCode::PushConst, 2), // index 1
        /* 5 */ Instruction::new(OpCode::PushConst, 3), // value 99
        /* 6 */ Instruction::new(OpCode::ArraySet, 0),
        /* 7 */ Instruction::new(OpCode::PushConst, 2), // index 1 again
        /* 8 */ Instruction::new(OpCode::ArrayGet, 0),
        /* 9 */ Instruction::new(OpCode::Halt, 0),
    ];
    let program = Program::new(code, data);
    let mut vm = Vm::new(program, VmConfig::default());
    vm.execute_limited(0, 9).unwrap();
    assert_eq!(*vm.stack().top().unwrap(), Variant::Int(99));
}

#[test]
fn array_get_on_a_small_pool_handle_is_a_type_error_not_ub() {
    // `NewObject` yields a small-pool handle; `ArrayGet` must reject it
    // rather than reinterpret-cast it as a big-pool array cell.
    let data = vec![Variant::Int(0)];
    let code = vec![
        Instruction::new(OpCode::NewObject, 0),
        Instruction::new(OpCode::PushConst, 0),
        Instruction::new(OpCode::ArrayGet, 0),
        Instruction::new(OpCode::Halt, 0),
    ];
    let program = Program::new(code, data);
    let mut vm = Vm::new(program, VmConfig::default());
    let err = vm.execute_limited(0, 3).unwrap_err();
    assert_eq!(err, VmError::TypeError);
}

#[test]
fn field_get_on_a_big_pool_handle_is_a_type_error_not_ub() {
    // `NewArray` yields a big-pool handle; `FieldGet` must reject it
    // rather than reinterpret-cast it as a small-pool object cell.
    let data = vec![Variant::Str("x".into()), Variant::Int(5)];
    let code = vec![
        Instruction::new(OpCode::PushConst, 1),
        Instruction::new(OpCode::NewArray, 1),
        Instruction::new(OpCode::FieldGet, 0),
        Instruction::new(OpCode::Halt, 0),
    ];
    let program = Program::new(code, data);
    let mut vm = Vm::new(program, VmConfig::default());
    let err = vm.execute_limited(0, 3).unwrap_err();
    assert_eq!(err, VmError::TypeError);
}

#[test]
fn field_set_on_a_big_pool_handle_is_a_type_error_not_ub() {
    let data = vec![Variant::Str("x".into()), Variant::Int(5), Variant::Int(1)];
    let code = vec![
        Instruction::new(OpCode::PushConst, 1),
        Instruction::new(OpCode::NewArray, 1),
        Instruction::new(OpCode::PushConst, 2),
        Instruction::new(OpCode::FieldSet, 0),
        Instruction::new(OpCode::Halt, 0),
    ];
    let program = Program::new(code, data);
    let mut vm = Vm::new(program, VmConfig::default());
    let err = vm.execute_limited(0, 4).unwrap_err();
    assert_eq!(err, VmError::TypeError);
}

#[test]
fn array_set_on_a_small_pool_handle_is_a_type_error_not_ub() {
    let data = vec![Variant::Int(0), Variant::Int(1)];
    let code = vec![
        Instruction::new(OpCode::NewObject, 0),
        Instruction::new(OpCode::PushConst, 0),
        Instruction::new(OpCode::PushConst, 1),
        Instruction::new(OpCode::ArraySet, 0),
        Instruction::new(OpCode::Halt, 0),
    ];
    let program = Program::new(code, data);
    let mut vm = Vm::new(program, VmConfig::default());
    let err = vm.execute_limited(0, 4).unwrap_err();
    assert_eq!(err, VmError::TypeError);
}
