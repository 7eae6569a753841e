use std::fmt;

use crate::cpu::{Cpu8080, Flags, RunState};
use crate::memory::Memory;
use crate::touched::Touched;

/// Read-only copy of the architectural state, for display and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateView {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub pc: u16,
    pub sp: u16,
    pub ir: u8,
    pub flags: Flags,
}

impl fmt::Display for StateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A={:02X} B={:02X} C={:02X} D={:02X} E={:02X} H={:02X} L={:02X} \
             PC={:04X} SP={:04X} IR={:02X} Z={} S={} P={} CY={}",
            self.a,
            self.b,
            self.c,
            self.d,
            self.e,
            self.h,
            self.l,
            self.pc,
            self.sp,
            self.ir,
            self.flags.z as u8,
            self.flags.s as u8,
            self.flags.p as u8,
            self.flags.cy as u8,
        )
    }
}

/// How a bounded [`Engine::run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// An HLT was executed; `steps` includes it.
    Halted { steps: u64 },
    /// The step budget ran out before any HLT.
    StepLimit { steps: u64 },
}

impl RunOutcome {
    pub fn steps(&self) -> u64 {
        match *self {
            RunOutcome::Halted { steps } | RunOutcome::StepLimit { steps } => steps,
        }
    }
}

/// The execution engine: one CPU and the 64 KiB it executes from.
///
/// State and memory are created, reset and dropped together. Nothing here is
/// fallible; addresses wrap and unknown opcodes are skipped.
#[derive(Default)]
pub struct Engine {
    cpu: Cpu8080,
    memory: Memory,
}

impl Engine {
    /// Construct an engine in reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore every register, flag and pointer to its initial value and
    /// zero-fill memory.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.memory.clear();
        log::debug!("engine reset");
    }

    /// Write `bytes` into memory starting at the current PC.
    ///
    /// PC is not moved, so a following `step` executes the first loaded byte.
    pub fn load(&mut self, bytes: &[u8]) {
        self.memory.load_at(self.cpu.pc, bytes);
        log::debug!("loaded {} bytes at {:04X}", bytes.len(), self.cpu.pc);
    }

    /// Perform exactly one fetch-decode-execute cycle.
    pub fn step(&mut self) -> RunState {
        self.cpu.step(&mut self.memory)
    }

    /// Step until HLT or until `max_steps` instructions have executed.
    pub fn run(&mut self, max_steps: u64) -> RunOutcome {
        let mut steps = 0;
        while steps < max_steps {
            steps += 1;
            if self.step() == RunState::Halted {
                return RunOutcome::Halted { steps };
            }
        }
        RunOutcome::StepLimit { steps }
    }

    pub fn snapshot(&self) -> StateView {
        let cpu = &self.cpu;
        StateView {
            a: cpu.a,
            b: cpu.b,
            c: cpu.c,
            d: cpu.d,
            e: cpu.e,
            h: cpu.h,
            l: cpu.l,
            pc: cpu.pc,
            sp: cpu.sp,
            ir: cpu.ir,
            flags: cpu.flags,
        }
    }

    /// Registers touched by the most recent `step`.
    pub fn touched(&self) -> Touched {
        self.cpu.touched()
    }

    pub fn peek_memory(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub fn poke_memory(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    /// The whole address space, for memory-map displays.
    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    /// Direct access to the CPU registers for test setup.
    pub fn cpu_mut(&mut self) -> &mut Cpu8080 {
        &mut self.cpu
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, RunOutcome};
    use crate::cpu::RunState;
    use crate::touched::Touched;

    #[test]
    fn load_writes_at_current_pc() {
        let mut engine = Engine::new();
        engine.cpu_mut().pc = 0x0040;
        engine.load(&[0x3e, 0x07, 0x76]);
        assert_eq!(engine.peek_memory(0x0040), 0x3e);
        assert_eq!(engine.peek_memory(0x0042), 0x76);
        assert_eq!(engine.peek_memory(0x0000), 0x00);
        assert_eq!(engine.snapshot().pc, 0x0040);

        assert_eq!(engine.run(10), RunOutcome::Halted { steps: 2 });
        assert_eq!(engine.snapshot().a, 0x07);
    }

    #[test]
    fn snapshot_does_not_mutate() {
        let mut engine = Engine::new();
        engine.load(&[0x06, 0x09]);
        engine.step();
        let first = engine.snapshot();
        let second = engine.snapshot();
        assert_eq!(first, second);
        assert_eq!(first.b, 0x09);
        assert_eq!(first.ir, 0x06);
    }

    #[test]
    fn poke_bypasses_fetch() {
        let mut engine = Engine::new();
        engine.poke_memory(0xffff, 0x42);
        assert_eq!(engine.peek_memory(0xffff), 0x42);
        assert_eq!(engine.snapshot().pc, 0);
        assert_eq!(engine.memory()[0xffff], 0x42);
    }

    #[test]
    fn run_stops_at_step_limit() {
        let mut engine = Engine::new();
        // JMP 0000
        engine.load(&[0xc3, 0x00, 0x00]);
        assert_eq!(engine.run(25), RunOutcome::StepLimit { steps: 25 });
        assert_eq!(engine.run(0), RunOutcome::StepLimit { steps: 0 });
    }

    #[test]
    fn touched_is_reported_per_step() {
        let mut engine = Engine::new();
        engine.load(&[0x2e, 0x01, 0x76]);
        assert_eq!(engine.step(), RunState::Continue);
        assert_eq!(engine.touched(), Touched::PC | Touched::L);
        assert_eq!(engine.step(), RunState::Halted);
        assert_eq!(engine.touched(), Touched::PC);
    }

    #[test]
    fn display_formats_one_line() {
        let mut engine = Engine::new();
        engine.load(&[0x3e, 0xab]);
        engine.step();
        let line = engine.snapshot().to_string();
        assert_eq!(
            line,
            "A=AB B=00 C=00 D=00 E=00 H=00 L=00 PC=0002 SP=FFFF IR=3E Z=0 S=0 P=0 CY=0"
        );
    }
}
