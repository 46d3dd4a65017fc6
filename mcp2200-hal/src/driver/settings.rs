use tracing::debug;

use super::MCP2200;
use crate::Error;
use crate::settings::{BaudDivisor, Configuration, Led, LedMode};
use crate::transport::Transport;

/// # Configuration changes
///
/// The MCP2200 can only write its whole configuration at once, so each of these
/// reads the current configuration, changes one field and writes it all back.
impl<T: Transport> MCP2200<T> {
    /// Read the configuration, let `change` alter it, and write it back.
    ///
    /// The configuration is always written, even if `change` leaves it as it was.
    /// Returns the configuration that was written.
    pub fn modify_configuration<F>(&self, change: F) -> Result<Configuration, Error>
    where
        F: FnOnce(&mut Configuration),
    {
        let before = self.read_all()?.configuration;
        let mut after = before;
        change(&mut after);
        debug!(?before, ?after, "configuration read-modify-write");
        self.configure(&after)?;
        Ok(after)
    }

    /// Set the direction of every GP pin. A set bit makes the pin an input.
    pub fn set_io_map(&self, io_map: u8) -> Result<(), Error> {
        self.modify_configuration(|c| c.io_map = io_map).map(drop)
    }

    /// Set the direction of every GP pin and the output levels they take at power-up.
    pub fn set_io_map_with_defaults(&self, io_map: u8, io_default: u8) -> Result<(), Error> {
        self.modify_configuration(|c| {
            c.io_map = io_map;
            c.io_default = io_default;
        })
        .map(drop)
    }

    /// Change the behaviour of the Rx or Tx activity LED.
    ///
    /// See [`Configuration::set_led_mode`] for exactly which bits change.
    pub fn set_led_mode(&self, led: Led, mode: LedMode) -> Result<(), Error> {
        self.modify_configuration(|c| {
            c.set_led_mode(led, mode);
        })
        .map(drop)
    }

    /// Enable or disable RTS/CTS hardware flow control.
    pub fn set_hardware_flow_control(&self, enabled: bool) -> Result<(), Error> {
        self.modify_configuration(|c| {
            c.alt_options.set_hardware_flow_control(enabled);
        })
        .map(drop)
    }

    /// Assign GP1 to the USBCFG function, or release it for GPIO.
    pub fn set_usbcfg(&self, enabled: bool) -> Result<(), Error> {
        self.modify_configuration(|c| {
            c.alt_pins.set_usbcfg(enabled);
        })
        .map(drop)
    }

    /// Assign GP0 to the SSPND function, or release it for GPIO.
    pub fn set_suspend(&self, enabled: bool) -> Result<(), Error> {
        self.modify_configuration(|c| {
            c.alt_pins.set_suspend(enabled);
        })
        .map(drop)
    }

    /// Set the UART baud rate.
    ///
    /// The divisor is computed with [`BaudDivisor::from_baud_rate`], so the rate
    /// actually produced may be slightly different.
    ///
    /// # Errors
    ///
    /// [`Error::BaudRateOutOfRange`] is returned before anything is sent to the
    /// device if the rate cannot be produced at all.
    pub fn set_baud_rate(&self, baud: u32) -> Result<(), Error> {
        let divisor = BaudDivisor::from_baud_rate(baud)?;
        self.modify_configuration(|c| c.baud_divisor = divisor)
            .map(drop)
    }

    /// The baud rate currently configured.
    pub fn baud_rate(&self) -> Result<u32, Error> {
        Ok(self.read_all()?.configuration.baud_divisor.baud_rate())
    }
}
