use crate::opcode::{Condition, Opcode, Reg};
use crate::touched::Touched;
use crate::INITIAL_SP;

/// Memory interface for the 8080 core.
///
/// The CPU uses this trait to read and write memory without knowing who owns
/// the backing store.
pub trait Bus8080 {
    fn mem_read(&mut self, addr: u16) -> u8;
    fn mem_write(&mut self, addr: u16, value: u8);
}

/// Result of a single fetch-decode-execute cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Continue,
    Halted,
}

/// Condition flags.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flags {
    pub z: bool,  // zero
    pub s: bool,  // sign
    pub p: bool,  // parity
    pub cy: bool, // carry
}

impl Flags {
    /// Derive flags from an arithmetic result.
    ///
    /// Z, S and P look at the low byte only. CY looks at the unmasked value:
    /// it is set whenever the result does not fit in 0..=0xff, which covers
    /// sums above 0xff as well as negative differences from CPI.
    pub fn from_result(value: i32) -> Flags {
        let masked = (value & 0xff) as u8;
        Flags {
            z: masked == 0,
            s: (masked & 0x80) != 0,
            p: masked.count_ones() % 2 == 0,
            cy: !(0..=0xff).contains(&value),
        }
    }

    fn holds(self, cond: Condition) -> bool {
        match cond {
            Condition::NotZero => !self.z,
            Condition::Zero => self.z,
            Condition::NoCarry => !self.cy,
            Condition::Carry => self.cy,
        }
    }
}

/// Intel 8080 register file for the supported instruction subset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cpu8080 {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    /// Most recently fetched opcode byte.
    pub ir: u8,
    pub flags: Flags,
    touched: Touched,
}

impl Default for Cpu8080 {
    fn default() -> Self {
        Self {
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            sp: INITIAL_SP,
            pc: 0,
            ir: 0,
            flags: Flags::default(),
            touched: Touched::empty(),
        }
    }
}

impl Cpu8080 {
    /// Create a new CPU instance in reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all registers to their power-on values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Registers touched by the last call to [`Cpu8080::step`].
    pub fn touched(&self) -> Touched {
        self.touched
    }

    pub fn reg(&self, reg: Reg) -> u8 {
        match reg {
            Reg::A => self.a,
            Reg::B => self.b,
            Reg::C => self.c,
            Reg::D => self.d,
            Reg::E => self.e,
            Reg::H => self.h,
            Reg::L => self.l,
        }
    }

    fn reg_mut(&mut self, reg: Reg) -> &mut u8 {
        match reg {
            Reg::A => &mut self.a,
            Reg::B => &mut self.b,
            Reg::C => &mut self.c,
            Reg::D => &mut self.d,
            Reg::E => &mut self.e,
            Reg::H => &mut self.h,
            Reg::L => &mut self.l,
        }
    }

    fn fetch_byte<B: Bus8080>(&mut self, bus: &mut B) -> u8 {
        let b = bus.mem_read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    /// Little-endian 16-bit read at `addr`, `addr + 1`.
    pub fn read16<B: Bus8080>(&self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.mem_read(addr) as u16;
        let hi = bus.mem_read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Address operand stored at PC, PC+1. PC itself is left untouched; the
    /// caller decides whether to jump to it or skip over it.
    pub fn fetch_address_operand<B: Bus8080>(&self, bus: &mut B) -> u16 {
        self.read16(bus, self.pc)
    }

    pub fn update_flags(&mut self, value: i32) {
        self.flags = Flags::from_result(value);
    }

    fn push<B: Bus8080>(&mut self, bus: &mut B, value: u16) {
        self.sp = self.sp.wrapping_sub(2);
        let addr = self.sp;
        bus.mem_write(addr, (value & 0x00ff) as u8);
        bus.mem_write(addr.wrapping_add(1), (value >> 8) as u8);
        self.touched |= Touched::SP;
    }

    fn pop<B: Bus8080>(&mut self, bus: &mut B) -> u16 {
        let value = self.read16(bus, self.sp);
        self.sp = self.sp.wrapping_add(2);
        self.touched |= Touched::SP;
        value
    }

    /// Execute a single instruction.
    ///
    /// Bytes outside the supported subset are skipped as one-byte no-ops.
    pub fn step<B: Bus8080>(&mut self, bus: &mut B) -> RunState {
        self.touched = Touched::PC;
        let at = self.pc;
        self.ir = self.fetch_byte(bus);

        let Some(op) = Opcode::decode(self.ir) else {
            log::trace!("{:04X}: {:02X} unsupported, skipped", at, self.ir);
            return RunState::Continue;
        };
        log::trace!("{:04X}: {:02X} {}", at, self.ir, op.mnemonic());

        match op {
            Opcode::Mvi(r) => {
                let v = self.fetch_byte(bus);
                *self.reg_mut(r) = v;
                self.touched |= Touched::from(r);
            }
            Opcode::Inr(r) => {
                let v = self.reg(r).wrapping_add(1);
                *self.reg_mut(r) = v;
                self.touched |= Touched::from(r);
                self.update_flags(i32::from(v));
            }
            Opcode::Hlt => return RunState::Halted,
            Opcode::Cpi => {
                let operand = self.fetch_byte(bus);
                self.touched |= Touched::A;
                self.update_flags(i32::from(self.a) - i32::from(operand));
            }
            Opcode::Jmp => {
                self.pc = self.fetch_address_operand(bus);
            }
            Opcode::Jcond(cc) => {
                let addr = self.fetch_address_operand(bus);
                if self.flags.holds(cc) {
                    self.pc = addr;
                } else {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Opcode::Call => {
                // The return address is PC as it stands after the opcode
                // fetch, i.e. it still points at the operand.
                let addr = self.fetch_address_operand(bus);
                self.push(bus, self.pc);
                self.pc = addr;
            }
            Opcode::Ret => {
                self.pc = self.pop(bus);
            }
        }
        RunState::Continue
    }
}
