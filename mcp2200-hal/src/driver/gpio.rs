use super::MCP2200;
use crate::Error;
use crate::gpio::{GpioDirection, LogicLevel, PinNumber, Pins};
use crate::settings::Configuration;
use crate::transport::Transport;

/// # GPIO
impl<T: Transport> MCP2200<T> {
    /// Take the GP pin structs for use with [`embedded_hal::digital`] traits.
    ///
    /// The pins can only be taken once; later calls return `None`.
    pub fn take_pins(&self) -> Option<Pins<'_, T>> {
        if self.pins_taken.get() {
            None
        } else {
            self.pins_taken.set(true);
            Some(Pins::new(self))
        }
    }

    /// Drive a single output pin high or low. Other pins are left unchanged.
    ///
    /// The pin's direction is not checked. A pin configured as an input, or
    /// assigned to an alternate function, does not change.
    pub fn gpio_write_pin(&self, pin: PinNumber, level: LogicLevel) -> Result<(), Error> {
        match level {
            LogicLevel::High => self.set_clear_outputs(pin.mask(), 0),
            LogicLevel::Low => self.set_clear_outputs(0, pin.mask()),
        }
    }

    /// Read the current level of a single pin.
    ///
    /// For an output this is the level it is driven to.
    pub fn gpio_read_pin(&self, pin: PinNumber) -> Result<LogicLevel, Error> {
        Ok(pin.bit_of(self.gpio_read_port()?).into())
    }

    /// Drive every output pin at once: bits set in `value` high, the rest low.
    pub fn gpio_write_port(&self, value: u8) -> Result<(), Error> {
        self.set_clear_outputs(value, !value)
    }

    /// Read the current level of every pin as a bitmap, GP0 in bit 0.
    ///
    /// # Datasheet
    ///
    /// `IO_Port_Val_bmap` of the READ_ALL response.
    pub fn gpio_read_port(&self) -> Result<u8, Error> {
        Ok(self.read_all()?.port_value)
    }

    /// Change the direction of a single pin, leaving every other setting alone.
    ///
    /// Returns the configuration that was written.
    pub fn gpio_set_direction(
        &self,
        pin: PinNumber,
        direction: GpioDirection,
    ) -> Result<Configuration, Error> {
        self.modify_configuration(|c| pin.set_bit_in(&mut c.io_map, direction.into()))
    }
}
