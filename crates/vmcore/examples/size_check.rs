use std::mem::size_of;

use vmcore::Variant;

fn main() {
    println!("=== Size Check ===");
    println!("Variant: {} bytes", size_of::<Variant>());
    println!("Instruction: {} bytes", size_of::<vmcore::Instruction>());
}
