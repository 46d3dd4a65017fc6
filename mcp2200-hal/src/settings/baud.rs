use crate::Error;
use crate::constants::BAUD_CLOCK_HZ;

/// 16-bit UART baud rate divisor.
///
/// The MCP2200 derives its UART clock from a 12 MHz reference, giving an effective
/// rate of `12_000_000 / (divisor + 1)`. Not every rate can be reached exactly, and
/// no rounding towards the nearest achievable rate is done here.
///
/// ## Datasheet
///
/// The `Baud_H` and `Baud_L` bytes of the CONFIGURE and READ_ALL commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaudDivisor(u16);

impl BaudDivisor {
    /// Compute the divisor for the requested baud rate.
    ///
    /// The divisor is `floor(12_000_000 / baud) - 1`.
    ///
    /// # Errors
    ///
    /// [`Error::BaudRateOutOfRange`] if the rate is zero, above 12 MBd, or so low
    /// that the divisor does not fit in 16 bits (below 184 Bd).
    pub fn from_baud_rate(baud: u32) -> Result<Self, Error> {
        if baud == 0 || baud > BAUD_CLOCK_HZ {
            return Err(Error::BaudRateOutOfRange(baud));
        }
        let divisor = BAUD_CLOCK_HZ / baud - 1;
        u16::try_from(divisor)
            .map(Self)
            .map_err(|_| Error::BaudRateOutOfRange(baud))
    }

    /// Reassemble the divisor from the `Baud_H` and `Baud_L` register bytes.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Self(u16::from_be_bytes([high, low]))
    }

    /// `Baud_H`.
    pub fn high(&self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// `Baud_L`.
    pub fn low(&self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Raw divisor value.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Effective baud rate produced by this divisor (rounded down).
    pub fn baud_rate(&self) -> u32 {
        BAUD_CLOCK_HZ / (u32::from(self.0) + 1)
    }
}

impl std::fmt::Display for BaudDivisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Bd (divisor {})", self.baud_rate(), self.0)
    }
}
