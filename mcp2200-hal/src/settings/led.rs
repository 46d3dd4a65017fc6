/// One of the two UART activity LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    /// Receive LED on GP6.
    Rx,
    /// Transmit LED on GP7.
    Tx,
}

/// Behaviour of a UART activity LED.
///
/// The numeric codes match Microchip's SimpleIO library; 1 and 2 are not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    /// LED function disabled, the pin is a plain GPIO.
    Off,
    /// The LED changes state on every transfer.
    Toggle,
    /// The LED blinks for 200 ms on every transfer.
    BlinkSlow,
    /// The LED blinks for 100 ms on every transfer.
    BlinkFast,
}

impl LedMode {
    /// SimpleIO code for `Off`.
    pub const OFF: u32 = 0;
    /// SimpleIO code for `Toggle`.
    pub const TOGGLE: u32 = 3;
    /// SimpleIO code for `BlinkSlow`.
    pub const BLINKSLOW: u32 = 4;
    /// SimpleIO code for `BlinkFast`.
    pub const BLINKFAST: u32 = 5;
}

impl TryFrom<u32> for LedMode {
    type Error = u32;

    /// Parse a SimpleIO mode code, returning the code unchanged if it is not a mode.
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            Self::OFF => Ok(Self::Off),
            Self::TOGGLE => Ok(Self::Toggle),
            Self::BLINKSLOW => Ok(Self::BlinkSlow),
            Self::BLINKFAST => Ok(Self::BlinkFast),
            other => Err(other),
        }
    }
}

impl From<LedMode> for u32 {
    fn from(value: LedMode) -> Self {
        match value {
            LedMode::Off => LedMode::OFF,
            LedMode::Toggle => LedMode::TOGGLE,
            LedMode::BlinkSlow => LedMode::BLINKSLOW,
            LedMode::BlinkFast => LedMode::BLINKFAST,
        }
    }
}

impl std::fmt::Display for LedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LedMode::Off => "off",
            LedMode::Toggle => "toggle",
            LedMode::BlinkSlow => "blink (slow)",
            LedMode::BlinkFast => "blink (fast)",
        };
        f.write_str(name)
    }
}
