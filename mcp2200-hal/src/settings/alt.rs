//! Bitfields for the alternate pin functions and options.

use bit_field::BitField;

/// Assignment of GP pins to their alternate dedicated functions.
///
/// A pin assigned to an alternate function is no longer driven by the GPIO
/// commands: Set/Clear Outputs leaves it untouched.
///
/// ## Datasheet
///
/// The `Config_Alt_Pins` byte of the CONFIGURE and READ_ALL commands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AltPins(u8);

impl AltPins {
    const TX_LED: usize = 2;
    const RX_LED: usize = 3;
    const USBCFG: usize = 6;
    const SUSPEND: usize = 7;

    /// GP7 blinks or toggles on UART transmit.
    pub fn tx_led(&self) -> bool {
        self.0.get_bit(Self::TX_LED)
    }

    /// Assign GP7 to the Tx LED function.
    pub fn set_tx_led(&mut self, enabled: bool) -> &mut Self {
        self.0.set_bit(Self::TX_LED, enabled);
        self
    }

    /// GP6 blinks or toggles on UART receive.
    pub fn rx_led(&self) -> bool {
        self.0.get_bit(Self::RX_LED)
    }

    /// Assign GP6 to the Rx LED function.
    pub fn set_rx_led(&mut self, enabled: bool) -> &mut Self {
        self.0.set_bit(Self::RX_LED, enabled);
        self
    }

    /// GP1 goes high once the device has been configured by the USB host.
    pub fn usbcfg(&self) -> bool {
        self.0.get_bit(Self::USBCFG)
    }

    /// Assign GP1 to the USBCFG function.
    pub fn set_usbcfg(&mut self, enabled: bool) -> &mut Self {
        self.0.set_bit(Self::USBCFG, enabled);
        self
    }

    /// GP0 reflects the USB suspend state.
    pub fn suspend(&self) -> bool {
        self.0.get_bit(Self::SUSPEND)
    }

    /// Assign GP0 to the SSPND function.
    pub fn set_suspend(&mut self, enabled: bool) -> &mut Self {
        self.0.set_bit(Self::SUSPEND, enabled);
        self
    }

    /// Bitmap of the GP pins currently taken over by an alternate function.
    ///
    /// Bits set here are ignored by Set/Clear Outputs.
    pub fn gpio_claimed(&self) -> u8 {
        let mut claimed = 0u8;
        claimed.set_bit(0, self.suspend());
        claimed.set_bit(1, self.usbcfg());
        claimed.set_bit(6, self.rx_led());
        claimed.set_bit(7, self.tx_led());
        claimed
    }
}

#[doc(hidden)]
impl From<u8> for AltPins {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

#[doc(hidden)]
impl From<AltPins> for u8 {
    fn from(value: AltPins) -> Self {
        value.0
    }
}

/// How long a LED stays lit after a blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkSpeed {
    /// Short (100 ms) blink.
    Fast,
    /// Long (200 ms) blink.
    Slow,
}

/// Options for the alternate functions.
///
/// ## Datasheet
///
/// The `Config_Alt_Options` byte of the CONFIGURE and READ_ALL commands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AltOptions(u8);

impl AltOptions {
    const HW_FLOW: usize = 0;
    const BLINK_SLOW: usize = 5;
    const TX_TOGGLE: usize = 6;
    const RX_TOGGLE: usize = 7;

    /// RTS/CTS hardware flow control is enabled.
    pub fn hardware_flow_control(&self) -> bool {
        self.0.get_bit(Self::HW_FLOW)
    }

    /// Enable or disable RTS/CTS hardware flow control.
    pub fn set_hardware_flow_control(&mut self, enabled: bool) -> &mut Self {
        self.0.set_bit(Self::HW_FLOW, enabled);
        self
    }

    /// Blink duration shared by both LEDs.
    pub fn blink_speed(&self) -> BlinkSpeed {
        if self.0.get_bit(Self::BLINK_SLOW) {
            BlinkSpeed::Slow
        } else {
            BlinkSpeed::Fast
        }
    }

    /// Set the blink duration of both LEDs.
    pub fn set_blink_speed(&mut self, speed: BlinkSpeed) -> &mut Self {
        self.0.set_bit(Self::BLINK_SLOW, speed == BlinkSpeed::Slow);
        self
    }

    /// The Tx LED toggles on each transmission instead of blinking.
    pub fn tx_led_toggle(&self) -> bool {
        self.0.get_bit(Self::TX_TOGGLE)
    }

    /// Make the Tx LED toggle (true) or blink (false).
    pub fn set_tx_led_toggle(&mut self, toggle: bool) -> &mut Self {
        self.0.set_bit(Self::TX_TOGGLE, toggle);
        self
    }

    /// The Rx LED toggles on each reception instead of blinking.
    pub fn rx_led_toggle(&self) -> bool {
        self.0.get_bit(Self::RX_TOGGLE)
    }

    /// Make the Rx LED toggle (true) or blink (false).
    pub fn set_rx_led_toggle(&mut self, toggle: bool) -> &mut Self {
        self.0.set_bit(Self::RX_TOGGLE, toggle);
        self
    }
}

#[doc(hidden)]
impl From<u8> for AltOptions {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

#[doc(hidden)]
impl From<AltOptions> for u8 {
    fn from(value: AltOptions) -> Self {
        value.0
    }
}
