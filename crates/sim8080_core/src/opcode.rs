//! Closed decode table for the supported 8080 subset.
//!
//! Any byte outside this table decodes to `None` and is executed by the CPU
//! as a single-byte no-op.

/// 8-bit register named by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Reg {
    pub const ALL: [Reg; 7] = [Reg::A, Reg::B, Reg::C, Reg::D, Reg::E, Reg::H, Reg::L];

    /// Standard 8080 register encoding (the `ddd`/`sss` field).
    ///
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 7=A. Index 6 is `M` (memory via HL),
    /// which this subset does not support.
    fn from_index(index: u8) -> Option<Reg> {
        match index {
            0 => Some(Reg::B),
            1 => Some(Reg::C),
            2 => Some(Reg::D),
            3 => Some(Reg::E),
            4 => Some(Reg::H),
            5 => Some(Reg::L),
            7 => Some(Reg::A),
            _ => None,
        }
    }

    fn index(self) -> u8 {
        match self {
            Reg::B => 0,
            Reg::C => 1,
            Reg::D => 2,
            Reg::E => 3,
            Reg::H => 4,
            Reg::L => 5,
            Reg::A => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Reg::A => "A",
            Reg::B => "B",
            Reg::C => "C",
            Reg::D => "D",
            Reg::E => "E",
            Reg::H => "H",
            Reg::L => "L",
        }
    }
}

/// Flag condition tested by the conditional jumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
}

impl Condition {
    /// The `cc` field of the conditional jump encodings (bits 3..=5).
    fn from_index(index: u8) -> Option<Condition> {
        match index {
            0 => Some(Condition::NotZero),
            1 => Some(Condition::Zero),
            2 => Some(Condition::NoCarry),
            3 => Some(Condition::Carry),
            _ => None,
        }
    }

    fn index(self) -> u8 {
        match self {
            Condition::NotZero => 0,
            Condition::Zero => 1,
            Condition::NoCarry => 2,
            Condition::Carry => 3,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NoCarry => "NC",
            Condition::Carry => "C",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// MVI r,data
    Mvi(Reg),
    /// INR r
    Inr(Reg),
    /// HLT
    Hlt,
    /// CPI data
    Cpi,
    /// JMP addr
    Jmp,
    /// JZ / JNZ / JC / JNC addr
    Jcond(Condition),
    /// CALL addr
    Call,
    /// RET
    Ret,
}

impl Opcode {
    pub fn decode(byte: u8) -> Option<Opcode> {
        match byte {
            0x76 => Some(Opcode::Hlt),
            0xfe => Some(Opcode::Cpi),
            0xc3 => Some(Opcode::Jmp),
            0xcd => Some(Opcode::Call),
            0xc9 => Some(Opcode::Ret),
            // 00ddd110
            b if b & 0xc7 == 0x06 => Reg::from_index((b >> 3) & 0x07).map(Opcode::Mvi),
            // 00ddd100
            b if b & 0xc7 == 0x04 => Reg::from_index((b >> 3) & 0x07).map(Opcode::Inr),
            // 11ccc010, only the Z and CY conditions
            b if b & 0xc7 == 0xc2 => Condition::from_index((b >> 3) & 0x07).map(Opcode::Jcond),
            _ => None,
        }
    }

    pub fn encode(self) -> u8 {
        match self {
            Opcode::Mvi(r) => 0x06 | (r.index() << 3),
            Opcode::Inr(r) => 0x04 | (r.index() << 3),
            Opcode::Hlt => 0x76,
            Opcode::Cpi => 0xfe,
            Opcode::Jmp => 0xc3,
            Opcode::Jcond(cc) => 0xc2 | (cc.index() << 3),
            Opcode::Call => 0xcd,
            Opcode::Ret => 0xc9,
        }
    }

    /// Instruction length in bytes, opcode included.
    pub fn size(self) -> u16 {
        match self {
            Opcode::Inr(_) | Opcode::Hlt | Opcode::Ret => 1,
            Opcode::Mvi(_) | Opcode::Cpi => 2,
            Opcode::Jmp | Opcode::Jcond(_) | Opcode::Call => 3,
        }
    }

    pub fn mnemonic(self) -> String {
        match self {
            Opcode::Mvi(r) => format!("MVI {}", r.name()),
            Opcode::Inr(r) => format!("INR {}", r.name()),
            Opcode::Hlt => "HLT".to_string(),
            Opcode::Cpi => "CPI".to_string(),
            Opcode::Jmp => "JMP".to_string(),
            Opcode::Jcond(cc) => format!("J{}", cc.suffix()),
            Opcode::Call => "CALL".to_string(),
            Opcode::Ret => "RET".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Condition, Opcode, Reg};

    #[test]
    fn decodes_standard_encodings() {
        let table = [
            (0x3e, Opcode::Mvi(Reg::A)),
            (0x06, Opcode::Mvi(Reg::B)),
            (0x0e, Opcode::Mvi(Reg::C)),
            (0x16, Opcode::Mvi(Reg::D)),
            (0x1e, Opcode::Mvi(Reg::E)),
            (0x26, Opcode::Mvi(Reg::H)),
            (0x2e, Opcode::Mvi(Reg::L)),
            (0x3c, Opcode::Inr(Reg::A)),
            (0x04, Opcode::Inr(Reg::B)),
            (0x0c, Opcode::Inr(Reg::C)),
            (0x14, Opcode::Inr(Reg::D)),
            (0x1c, Opcode::Inr(Reg::E)),
            (0x24, Opcode::Inr(Reg::H)),
            (0x2c, Opcode::Inr(Reg::L)),
            (0x76, Opcode::Hlt),
            (0xfe, Opcode::Cpi),
            (0xc3, Opcode::Jmp),
            (0xca, Opcode::Jcond(Condition::Zero)),
            (0xc2, Opcode::Jcond(Condition::NotZero)),
            (0xda, Opcode::Jcond(Condition::Carry)),
            (0xd2, Opcode::Jcond(Condition::NoCarry)),
            (0xcd, Opcode::Call),
            (0xc9, Opcode::Ret),
        ];
        for (byte, op) in table {
            assert_eq!(Opcode::decode(byte), Some(op), "byte {byte:02X}");
            assert_eq!(op.encode(), byte, "{op:?}");
        }
    }

    #[test]
    fn table_has_exactly_the_supported_subset() {
        let supported = (0..=255u8).filter_map(Opcode::decode).count();
        assert_eq!(supported, 23);
    }

    #[test]
    fn memory_operand_and_parity_forms_are_unsupported() {
        // MVI M, INR M, NOP, JPO/JPE/JP/JM
        for byte in [0x36, 0x34, 0x00, 0xe2, 0xea, 0xf2, 0xfa] {
            assert_eq!(Opcode::decode(byte), None, "byte {byte:02X}");
        }
    }

    #[test]
    fn lengths_and_mnemonics() {
        assert_eq!(Opcode::Mvi(Reg::H).size(), 2);
        assert_eq!(Opcode::Inr(Reg::L).size(), 1);
        assert_eq!(Opcode::Call.size(), 3);
        assert_eq!(Opcode::Jcond(Condition::NoCarry).mnemonic(), "JNC");
        assert_eq!(Opcode::Mvi(Reg::E).mnemonic(), "MVI E");
    }
}
