use tracing::warn;

use super::{GpioDirection, LogicLevel, PinNumber};
use crate::transport::{HidTransport, Transport};
use crate::{Error, MCP2200};

/// One of the eight GP pins, before it is made an input or an output.
#[derive(Debug)]
pub struct GpPin<'a, T = HidTransport> {
    driver: &'a MCP2200<T>,
    pin_number: PinNumber,
}

impl<'a, T: Transport> GpPin<'a, T> {
    /// The number of this pin.
    pub fn pin_number(&self) -> PinNumber {
        self.pin_number
    }

    /// Make the pin an input. Only the pin's bit of `IO_bmap` changes.
    ///
    /// [`Input::destroy`] gives the pin back.
    pub fn configure_as_digital_input(self) -> Result<Input<'a, T>, Error> {
        self.driver
            .gpio_set_direction(self.pin_number, GpioDirection::Input)?;
        Ok(Input(self))
    }

    /// Make the pin an output. Only the pin's bit of `IO_bmap` changes.
    ///
    /// <div class="warning">
    ///
    /// A pin assigned to an alternate function (Rx/Tx LED, USBCFG, SSPND) is not
    /// driven by the GPIO commands even when it is an output. A warning is logged if
    /// that is the case, but the pin is still returned.
    ///
    /// </div>
    ///
    /// [`Output::destroy`] gives the pin back.
    pub fn configure_as_digital_output(self) -> Result<Output<'a, T>, Error> {
        let configuration = self
            .driver
            .gpio_set_direction(self.pin_number, GpioDirection::Output)?;
        if self
            .pin_number
            .bit_of(configuration.alt_pins.gpio_claimed())
        {
            warn!(
                pin = %self.pin_number,
                "pin is assigned to an alternate function and will not follow GPIO writes"
            );
        }
        Ok(Output(self))
    }

    /// Read the pin's configured direction from the device.
    fn direction(&self) -> Result<GpioDirection, Error> {
        let io_map = self.driver.read_all()?.configuration.io_map;
        Ok(self.pin_number.bit_of(io_map).into())
    }

    /// Fail if the pin's direction was changed behind this wrapper's back.
    fn ensure_direction(&self, expected: GpioDirection) -> Result<(), Error> {
        if self.direction()? == expected {
            Ok(())
        } else {
            Err(Error::PinModeChanged(self.pin_number.number()))
        }
    }
}

impl<'a, T: Transport> TryFrom<GpPin<'a, T>> for Input<'a, T> {
    type Error = Error;
    fn try_from(pin: GpPin<'a, T>) -> Result<Self, Self::Error> {
        pin.configure_as_digital_input()
    }
}

impl<'a, T: Transport> TryFrom<GpPin<'a, T>> for Output<'a, T> {
    type Error = Error;
    fn try_from(pin: GpPin<'a, T>) -> Result<Self, Self::Error> {
        pin.configure_as_digital_output()
    }
}

impl<'a, T> From<Input<'a, T>> for GpPin<'a, T> {
    fn from(value: Input<'a, T>) -> Self {
        value.0
    }
}

impl<'a, T> From<Output<'a, T>> for GpPin<'a, T> {
    fn from(value: Output<'a, T>) -> Self {
        value.0
    }
}

/// A GP pin configured as an input.
#[derive(Debug)]
pub struct Input<'a, T = HidTransport>(GpPin<'a, T>);

impl<'a, T: Transport> Input<'a, T> {
    /// Level currently seen on the pin.
    ///
    /// # Errors
    ///
    /// [`Error::PinModeChanged`] if the pin is no longer an input.
    pub fn get_level(&self) -> Result<LogicLevel, Error> {
        let settings = self.0.driver.read_all()?;
        if !self.0.pin_number.bit_of(settings.configuration.io_map) {
            return Err(Error::PinModeChanged(self.0.pin_number.number()));
        }
        Ok(self.0.pin_number.bit_of(settings.port_value).into())
    }

    /// Give back the pin without touching the device.
    pub fn destroy(self) -> GpPin<'a, T> {
        self.0
    }

    /// Turn the input into an output.
    pub fn try_into_output(self) -> Result<Output<'a, T>, Error> {
        self.0.ensure_direction(GpioDirection::Input)?;
        self.0.configure_as_digital_output()
    }
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl<T> embedded_hal::digital::ErrorType for Input<'_, T> {
    type Error = Error;
}

impl<T: Transport> embedded_hal::digital::InputPin for Input<'_, T> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.get_level().map(LogicLevel::is_high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.get_level().map(LogicLevel::is_low)
    }
}

/// A GP pin configured as an output.
#[derive(Debug)]
pub struct Output<'a, T = HidTransport>(GpPin<'a, T>);

impl<'a, T: Transport> Output<'a, T> {
    /// Drive the pin high or low.
    ///
    /// # Errors
    ///
    /// [`Error::PinModeChanged`] if the pin is no longer an output.
    pub fn set_level(&self, level: LogicLevel) -> Result<(), Error> {
        self.0.ensure_direction(GpioDirection::Output)?;
        self.0.driver.gpio_write_pin(self.0.pin_number, level)
    }

    /// Level the pin is driven to.
    pub fn get_output_level(&self) -> Result<LogicLevel, Error> {
        let settings = self.0.driver.read_all()?;
        if self.0.pin_number.bit_of(settings.configuration.io_map) {
            return Err(Error::PinModeChanged(self.0.pin_number.number()));
        }
        Ok(self.0.pin_number.bit_of(settings.port_value).into())
    }

    /// Give back the pin without touching the device.
    pub fn destroy(self) -> GpPin<'a, T> {
        self.0
    }

    /// Turn the output into an input.
    pub fn try_into_input(self) -> Result<Input<'a, T>, Error> {
        self.0.ensure_direction(GpioDirection::Output)?;
        self.0.configure_as_digital_input()
    }
}

impl<T> embedded_hal::digital::ErrorType for Output<'_, T> {
    type Error = Error;
}

impl<T: Transport> embedded_hal::digital::OutputPin for Output<'_, T> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_level(LogicLevel::High)
    }
}

impl<T: Transport> embedded_hal::digital::StatefulOutputPin for Output<'_, T> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.get_output_level().map(LogicLevel::is_high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.get_output_level().map(LogicLevel::is_low)
    }
}

impl<'a, T: Transport> TryFrom<Output<'a, T>> for Input<'a, T> {
    type Error = Error;

    fn try_from(value: Output<'a, T>) -> Result<Self, Self::Error> {
        value.try_into_input()
    }
}

impl<'a, T: Transport> TryFrom<Input<'a, T>> for Output<'a, T> {
    type Error = Error;

    fn try_from(value: Input<'a, T>) -> Result<Self, Self::Error> {
        value.try_into_output()
    }
}

/// The eight MCP2200 GP pins.
#[derive(Debug)]
pub struct Pins<'a, T = HidTransport> {
    /// Pin GP0 (SSPND)
    pub gp0: GpPin<'a, T>,
    /// Pin GP1 (USBCFG)
    pub gp1: GpPin<'a, T>,
    /// Pin GP2
    pub gp2: GpPin<'a, T>,
    /// Pin GP3
    pub gp3: GpPin<'a, T>,
    /// Pin GP4
    pub gp4: GpPin<'a, T>,
    /// Pin GP5
    pub gp5: GpPin<'a, T>,
    /// Pin GP6 (Rx LED)
    pub gp6: GpPin<'a, T>,
    /// Pin GP7 (Tx LED)
    pub gp7: GpPin<'a, T>,
}

impl<'a, T> Pins<'a, T> {
    pub(crate) fn new(driver: &'a MCP2200<T>) -> Self {
        let [gp0, gp1, gp2, gp3, gp4, gp5, gp6, gp7] =
            PinNumber::ALL.map(|pin_number| GpPin { driver, pin_number });
        Self {
            gp0,
            gp1,
            gp2,
            gp3,
            gp4,
            gp5,
            gp6,
            gp7,
        }
    }
}
