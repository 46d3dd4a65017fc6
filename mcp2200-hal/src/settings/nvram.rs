use super::{AltOptions, AltPins, BaudDivisor, BlinkSpeed, Led, LedMode};
use crate::commands::Report;

/// The six NVRAM configuration fields written by the CONFIGURE command.
///
/// The same fields, at the same byte offsets, come back in the READ_ALL response.
///
/// ## Datasheet
///
/// Bytes 4 to 9 of the CONFIGURE and READ_ALL reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    /// GPIO direction bitmap (`IO_bmap`). A set bit makes the pin an input.
    pub io_map: u8,
    /// Alternate pin function assignment (`Config_Alt_Pins`).
    pub alt_pins: AltPins,
    /// Output level of each GPIO at power-up (`IO_Default_Val_bmap`).
    pub io_default: u8,
    /// Alternate function options (`Config_Alt_Options`).
    pub alt_options: AltOptions,
    /// UART baud rate divisor (`Baud_H`, `Baud_L`).
    pub baud_divisor: BaudDivisor,
}

impl Configuration {
    pub(crate) fn from_buffer(buf: &Report) -> Self {
        Self {
            io_map: buf[4],
            alt_pins: buf[5].into(),
            io_default: buf[6],
            alt_options: buf[7].into(),
            baud_divisor: BaudDivisor::from_bytes(buf[8], buf[9]),
        }
    }

    pub(crate) fn apply_to_buffer(&self, buf: &mut Report) {
        buf[4] = self.io_map;
        buf[5] = self.alt_pins.into();
        buf[6] = self.io_default;
        buf[7] = self.alt_options.into();
        buf[8] = self.baud_divisor.high();
        buf[9] = self.baud_divisor.low();
    }

    /// Change how one of the activity LEDs behaves.
    ///
    /// `Off` only releases the pin; the toggle and blink options are kept. `Toggle`
    /// leaves the (shared) blink speed alone. The blink modes switch toggling off
    /// and set the blink speed, which also changes it for the other LED.
    pub fn set_led_mode(&mut self, led: Led, mode: LedMode) -> &mut Self {
        let enabled = mode != LedMode::Off;
        match led {
            Led::Rx => self.alt_pins.set_rx_led(enabled),
            Led::Tx => self.alt_pins.set_tx_led(enabled),
        };
        let speed = match mode {
            LedMode::Off => return self,
            LedMode::Toggle => None,
            LedMode::BlinkSlow => Some(BlinkSpeed::Slow),
            LedMode::BlinkFast => Some(BlinkSpeed::Fast),
        };
        let toggle = speed.is_none();
        match led {
            Led::Rx => self.alt_options.set_rx_led_toggle(toggle),
            Led::Tx => self.alt_options.set_tx_led_toggle(toggle),
        };
        if let Some(speed) = speed {
            self.alt_options.set_blink_speed(speed);
        }
        self
    }

    /// Current behaviour of one of the activity LEDs.
    pub fn led_mode(&self, led: Led) -> LedMode {
        let (enabled, toggle) = match led {
            Led::Rx => (self.alt_pins.rx_led(), self.alt_options.rx_led_toggle()),
            Led::Tx => (self.alt_pins.tx_led(), self.alt_options.tx_led_toggle()),
        };
        match (enabled, toggle, self.alt_options.blink_speed()) {
            (false, _, _) => LedMode::Off,
            (true, true, _) => LedMode::Toggle,
            (true, false, BlinkSpeed::Slow) => LedMode::BlinkSlow,
            (true, false, BlinkSpeed::Fast) => LedMode::BlinkFast,
        }
    }
}

/// A single user EEPROM location and its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EepromCell {
    /// Address, `0..=255`.
    pub address: u8,
    /// Stored byte.
    pub value: u8,
}

/// Everything returned by the READ_ALL command.
///
/// This is a snapshot: nothing is cached, and the device may change underneath it.
///
/// ## Datasheet
///
/// See the READ_ALL command response layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NvramSettings {
    /// Last EEPROM location read or written (`EEP_Addr`, `EEP_Val`).
    pub eeprom: EepromCell,
    /// NVRAM configuration.
    pub configuration: Configuration,
    /// Current logic level of every GP pin (`IO_Port_Val_bmap`).
    pub port_value: u8,
}

impl NvramSettings {
    pub(crate) fn from_buffer(buf: &Report) -> Self {
        Self {
            eeprom: EepromCell {
                address: buf[1],
                value: buf[3],
            },
            configuration: Configuration::from_buffer(buf),
            port_value: buf[10],
        }
    }
}
