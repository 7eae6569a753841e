use proptest::prelude::*;
use sim8080_core::Flags;

#[test]
fn every_byte_value_derives_z_s_p_and_no_carry() {
    for v in 0..=0xffi32 {
        let f = Flags::from_result(v);
        assert_eq!(f.z, v == 0, "Z for {v:#04x}");
        assert_eq!(f.s, v & 0x80 != 0, "S for {v:#04x}");
        assert_eq!(f.p, (v as u8).count_ones() % 2 == 0, "P for {v:#04x}");
        assert!(!f.cy, "CY for {v:#04x}");
    }
}

proptest! {
    #[test]
    fn values_above_a_byte_set_carry(v in 0x100i32..=0x1ff_ff) {
        let f = Flags::from_result(v);
        prop_assert!(f.cy);
        let masked = (v & 0xff) as u8;
        prop_assert_eq!(f.z, masked == 0);
        prop_assert_eq!(f.s, masked & 0x80 != 0);
        prop_assert_eq!(f.p, masked.count_ones() % 2 == 0);
    }

    #[test]
    fn negative_compare_results_set_carry(a in any::<u8>(), operand in any::<u8>()) {
        let diff = i32::from(a) - i32::from(operand);
        let f = Flags::from_result(diff);
        prop_assert_eq!(f.cy, a < operand);
        prop_assert_eq!(f.z, a == operand);
        prop_assert_eq!(f.s, a.wrapping_sub(operand) & 0x80 != 0);
    }
}
