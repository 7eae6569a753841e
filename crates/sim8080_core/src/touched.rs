use bitflags::bitflags;

use crate::opcode::Reg;

bitflags! {
    /// Architectural registers read or written by the last executed step.
    ///
    /// The engine only reports the set. Frontends decide how long a register
    /// stays highlighted.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Touched: u16 {
        const A = 1 << 0;
        const B = 1 << 1;
        const C = 1 << 2;
        const D = 1 << 3;
        const E = 1 << 4;
        const H = 1 << 5;
        const L = 1 << 6;
        const PC = 1 << 7;
        const SP = 1 << 8;
    }
}

impl From<Reg> for Touched {
    fn from(reg: Reg) -> Self {
        match reg {
            Reg::A => Touched::A,
            Reg::B => Touched::B,
            Reg::C => Touched::C,
            Reg::D => Touched::D,
            Reg::E => Touched::E,
            Reg::H => Touched::H,
            Reg::L => Touched::L,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Touched;
    use crate::opcode::Reg;

    #[test]
    fn every_register_maps_to_a_distinct_bit() {
        let all = Reg::ALL
            .iter()
            .fold(Touched::empty(), |acc, &r| acc | Touched::from(r));
        assert_eq!(all.bits().count_ones(), 7);
        assert!(!all.contains(Touched::PC));
        assert!(!all.contains(Touched::SP));
    }
}
