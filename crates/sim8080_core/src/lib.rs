pub mod cpu;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod touched;

pub use cpu::{Bus8080, Cpu8080, Flags, RunState};
pub use machine::{Engine, RunOutcome, StateView};
pub use memory::Memory;
pub use opcode::{Condition, Opcode, Reg};
pub use touched::Touched;

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;
/// Stack pointer value after construction and reset.
pub const INITIAL_SP: u16 = 0xffff;
