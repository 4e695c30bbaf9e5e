//! Property-based tests for command encoding and reply decoding.

use proptest::prelude::*;
use smcdrive::smc::{
    decode_signed, decode_variable, encode_get_variable, encode_set_target_speed,
    CMD_MOTOR_FORWARD, CMD_MOTOR_REVERSE,
};
use smcdrive::VariableId;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_read_command_shape(id in any::<u8>()) {
        prop_assert_eq!(encode_get_variable(VariableId(id)), [0xA1, id]);
    }

    /// Reply bytes arrive low byte first.
    #[test]
    fn prop_reply_is_little_endian(low in any::<u8>(), high in any::<u8>()) {
        let value = decode_variable([low, high]);
        prop_assert_eq!(u32::from(value), u32::from(low) + 256 * u32::from(high));
    }

    #[test]
    fn prop_every_word_has_one_reply(value in any::<u16>()) {
        let reply = [(value & 0xFF) as u8, (value >> 8) as u8];
        prop_assert_eq!(decode_variable(reply), value);
    }

    #[test]
    fn prop_forward_speed_packing(m in 0i16..=3200) {
        let bytes = encode_set_target_speed(m);
        let m = m as u16;
        prop_assert_eq!(
            bytes,
            [CMD_MOTOR_FORWARD, (m & 0x1F) as u8, ((m >> 5) & 0x7F) as u8]
        );
    }

    #[test]
    fn prop_reverse_speed_packing(m in 1i16..=3200) {
        let bytes = encode_set_target_speed(-m);
        let m = m as u16;
        prop_assert_eq!(
            bytes,
            [CMD_MOTOR_REVERSE, (m & 0x1F) as u8, ((m >> 5) & 0x7F) as u8]
        );
    }

    /// Data bytes never carry the top bit, whatever the input.
    #[test]
    fn prop_speed_data_bytes_below_0x80(speed in any::<i16>()) {
        let bytes = encode_set_target_speed(speed);
        prop_assert!(bytes[1] < 0x20);
        prop_assert!(bytes[2] < 0x80);
    }

    #[test]
    fn prop_in_range_speed_unpacks(speed in -3200i16..=3200) {
        let [opcode, low, high] = encode_set_target_speed(speed);
        let magnitude = i16::from(low) | (i16::from(high) << 5);
        let decoded = if opcode == CMD_MOTOR_REVERSE { -magnitude } else { magnitude };
        prop_assert_eq!(decoded, speed);
    }

    #[test]
    fn prop_signed_reinterpretation(raw in any::<u16>()) {
        let expected = if raw <= 32767 { i32::from(raw) } else { i32::from(raw) - 65536 };
        prop_assert_eq!(i32::from(decode_signed(raw)), expected);
    }

    #[test]
    fn prop_signed_round_trip(speed in any::<i16>()) {
        let reply = speed.to_le_bytes();
        prop_assert_eq!(decode_signed(decode_variable(reply)), speed);
    }
}

#[test]
fn full_reverse_bytes() {
    assert_eq!(encode_set_target_speed(-3200), [0x86, 0x00, 0x64]);
}

#[test]
fn out_of_device_range_reply_still_decodes() {
    assert_eq!(decode_signed(decode_variable([0x40, 0x1F])), 8000);
}
