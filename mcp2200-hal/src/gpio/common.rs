use bit_field::BitField;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// GPIO pin level.
pub enum LogicLevel {
    /// Logic high.
    High,
    /// Logic low.
    Low,
}

impl LogicLevel {
    /// Returns true if the level is high.
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Returns true if the level is low.
    pub fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl From<bool> for LogicLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl From<LogicLevel> for bool {
    fn from(value: LogicLevel) -> Self {
        value.is_high()
    }
}

impl From<LogicLevel> for u8 {
    /// Convert a [`LogicLevel`] to 1 (if high) or 0 (if low).
    fn from(value: LogicLevel) -> Self {
        match value {
            LogicLevel::High => 1,
            LogicLevel::Low => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// GPIO pin direction.
///
/// In the `IO_bmap` configuration byte a set bit is an input.
pub enum GpioDirection {
    /// Pin is read.
    Input,
    /// Pin is driven.
    Output,
}

impl GpioDirection {
    /// Returns true if the pin is an input.
    pub fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    /// Returns true if the pin is an output.
    pub fn is_output(self) -> bool {
        matches!(self, Self::Output)
    }
}

impl From<bool> for GpioDirection {
    fn from(value: bool) -> Self {
        if value { Self::Input } else { Self::Output }
    }
}

impl From<GpioDirection> for bool {
    fn from(value: GpioDirection) -> Self {
        value.is_input()
    }
}

/// Number of one of the GP pins, checked to be in `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinNumber(u8);

impl PinNumber {
    /// All eight pins, GP0 first.
    pub const ALL: [PinNumber; 8] = [
        PinNumber(0),
        PinNumber(1),
        PinNumber(2),
        PinNumber(3),
        PinNumber(4),
        PinNumber(5),
        PinNumber(6),
        PinNumber(7),
    ];

    /// The pin's number, `0..=7`.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Bitmap with only this pin's bit set.
    pub fn mask(self) -> u8 {
        1 << self.0
    }

    /// This pin's bit in a port or direction bitmap.
    pub fn bit_of(self, bitmap: u8) -> bool {
        bitmap.get_bit(self.0.into())
    }

    /// Set or clear this pin's bit in a port or direction bitmap.
    pub fn set_bit_in(self, bitmap: &mut u8, value: bool) {
        bitmap.set_bit(self.0.into(), value);
    }
}

impl TryFrom<u8> for PinNumber {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < 8 {
            Ok(Self(value))
        } else {
            Err(Error::PinOutOfRange(value))
        }
    }
}

impl TryFrom<u32> for PinNumber {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| Error::PinOutOfRange(u8::MAX))
            .and_then(PinNumber::try_from)
    }
}

impl std::fmt::Display for PinNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GP{}", self.0)
    }
}
