use std::num::ParseIntError;

fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

pub(crate) fn u16_from_hex(value: &str) -> Result<u16, ParseIntError> {
    u16::from_str_radix(strip_hex_prefix(value), 16)
}

pub(crate) fn u8_from_hex(value: &str) -> Result<u8, ParseIntError> {
    u8::from_str_radix(strip_hex_prefix(value), 16)
}

/// Parse a byte given in decimal, or in hexadecimal with a `0x` prefix.
pub(crate) fn byte_from_str(value: &str) -> Result<u32, ParseIntError> {
    let stripped = strip_hex_prefix(value);
    if stripped.len() == value.len() {
        value.parse()
    } else {
        u32::from_str_radix(stripped, 16)
    }
}
