use tracing::{debug, info, warn};

use crate::constants::{
    DEVICE_INDEX_ERROR, E_CANNOT_SEND_DATA, E_WRONG_ADDRESS, E_WRONG_DEVICE_ID, READ_ERROR,
};
use crate::gpio::{LogicLevel, PinNumber};
use crate::registry::DeviceRegistry;
use crate::settings::{BaudDivisor, Configuration, Led, LedMode};
use crate::transport::{HidBus, UsbBus};
use crate::{Error, MCP2200};

/// Named operations over a selectable MCP2200, in the style of Microchip's
/// SimpleIO library.
///
/// # Quick start
///
/// ```no_run
/// use mcp2200_hal::SimpleIo;
/// use mcp2200_hal::constants::{MCP2200_PID, MICROCHIP_VID};
///
/// let mut io = SimpleIo::init(MICROCHIP_VID, MCP2200_PID)?;
/// io.select_device(0)?;
/// io.set_pin(3)?;
/// io.set_baud_rate(115_200)?;
/// # Ok::<(), mcp2200_hal::Error>(())
/// ```
///
/// # Results
///
/// Values out of range for the MCP2200 (pin numbers, port values, LED modes,
/// baud rates, EEPROM addresses and data) are reported as `Ok(false)` or as one
/// of the status codes in [`constants`](crate::constants). Nothing is sent to the
/// device in that case.
///
/// `Err` is kept for failures talking to the device, and for calling a device
/// operation when no device is selected ([`Error::NotConnected`]).
///
/// Every setting change is a read-modify-write of the whole configuration.
pub struct SimpleIo<B: UsbBus = HidBus> {
    bus: B,
    vendor_id: u16,
    product_id: u16,
    registry: DeviceRegistry,
    device: Option<MCP2200<B::Transport>>,
}

impl SimpleIo<HidBus> {
    /// Find every attached MCP2200 with the given vendor and product ID.
    ///
    /// No device is opened; call [`SimpleIo::select_device`] next.
    pub fn init(vendor_id: u16, product_id: u16) -> Result<Self, Error> {
        SimpleIo::init_with_bus(HidBus::new()?, vendor_id, product_id)
    }
}

impl<B: UsbBus> SimpleIo<B> {
    ////////////////////////////////////////////////////////////////////////////////
    // Device discovery and selection
    ////////////////////////////////////////////////////////////////////////////////

    /// Find every MCP2200 on `bus` with the given vendor and product ID.
    pub fn init_with_bus(mut bus: B, vendor_id: u16, product_id: u16) -> Result<Self, Error> {
        let handles = bus.discover(vendor_id, product_id)?;
        Ok(Self {
            bus,
            vendor_id,
            product_id,
            registry: DeviceRegistry::new(handles),
            device: None,
        })
    }

    /// Discover devices again, for example after one was plugged in.
    ///
    /// The selected device is disconnected first. Returns the number of devices found.
    pub fn rescan(&mut self) -> Result<usize, Error> {
        self.disconnect();
        let handles = self.bus.discover(self.vendor_id, self.product_id)?;
        self.registry = DeviceRegistry::new(handles);
        Ok(self.registry.len())
    }

    /// Disconnect from the selected device and connect to the one at `index`.
    ///
    /// Returns 0 once connected, or [`E_WRONG_DEVICE_ID`] without changing
    /// anything if there is no device at `index`.
    ///
    /// # Errors
    ///
    /// If the new device cannot be opened the error is returned and no device is
    /// selected, as the previous one has already been released.
    pub fn select_device(&mut self, index: usize) -> Result<i32, Error> {
        let Some(handle) = self.registry.get(index).cloned() else {
            debug!(index, available = self.registry.len(), "no device at index");
            return Ok(E_WRONG_DEVICE_ID);
        };
        self.disconnect();
        match self.bus.open(&handle) {
            Ok(transport) => {
                self.device = Some(MCP2200::from_transport(transport));
                self.registry.select(index);
                Ok(0)
            }
            Err(e) => {
                warn!(index, error = %e, "selected device could not be opened");
                Err(e)
            }
        }
    }

    /// Release the selected device, if any, and clear the selection.
    ///
    /// Always succeeds, and can be called any number of times.
    pub fn disconnect(&mut self) -> bool {
        if let Some(device) = self.device.take() {
            info!(device = %device.usb_device_handle(), "disconnecting");
            device.disconnect();
        }
        self.registry.clear_selection();
        true
    }

    /// Returns true if a device is selected and open.
    pub fn is_connected(&self) -> bool {
        self.device.is_some()
    }

    /// Number of devices found by the last scan.
    pub fn device_count(&self) -> usize {
        self.registry.len()
    }

    /// Description of the device at `index`, or [`DEVICE_INDEX_ERROR`].
    pub fn device_info(&self, index: usize) -> String {
        self.registry
            .get(index)
            .map_or_else(|| DEVICE_INDEX_ERROR.to_owned(), ToString::to_string)
    }

    /// Index of the selected device.
    pub fn selected_device(&self) -> Option<usize> {
        self.registry.selected()
    }

    /// Description of the selected device, or [`DEVICE_INDEX_ERROR`] if none is.
    pub fn selected_device_info(&self) -> String {
        self.registry
            .selected_handle()
            .map_or_else(|| DEVICE_INDEX_ERROR.to_owned(), ToString::to_string)
    }

    /// The devices found and the selection.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// The driver for the selected device, for operations not covered here.
    pub fn driver(&self) -> Result<&MCP2200<B::Transport>, Error> {
        self.device.as_ref().ok_or(Error::NotConnected)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // GPIO
    ////////////////////////////////////////////////////////////////////////////////

    /// Drive `pin` high. Returns false for a pin outside `0..=7`.
    pub fn set_pin(&self, pin: u32) -> Result<bool, Error> {
        self.write_pin(pin, LogicLevel::High)
    }

    /// Drive `pin` low. Returns false for a pin outside `0..=7`.
    pub fn clear_pin(&self, pin: u32) -> Result<bool, Error> {
        self.write_pin(pin, LogicLevel::Low)
    }

    fn write_pin(&self, pin: u32, level: LogicLevel) -> Result<bool, Error> {
        let Ok(pin) = PinNumber::try_from(pin) else {
            return Ok(false);
        };
        self.driver()?.gpio_write_pin(pin, level)?;
        Ok(true)
    }

    /// Read the level of `pin` as 0 or 1. Returns `None` for a pin outside `0..=7`.
    pub fn read_pin(&self, pin: u32) -> Result<Option<u8>, Error> {
        let Ok(pin) = PinNumber::try_from(pin) else {
            return Ok(None);
        };
        let level = self.driver()?.gpio_read_pin(pin)?;
        Ok(Some(level.into()))
    }

    /// Read the level of `pin` as 0 or 1, or [`READ_ERROR`] for a pin outside `0..=7`.
    pub fn read_pin_value(&self, pin: u32) -> Result<u32, Error> {
        Ok(self.read_pin(pin)?.map_or(READ_ERROR, u32::from))
    }

    /// Drive all eight pins at once. Returns false for a value above 255.
    pub fn write_port(&self, value: u32) -> Result<bool, Error> {
        let Ok(value) = u8::try_from(value) else {
            return Ok(false);
        };
        self.driver()?.gpio_write_port(value)?;
        Ok(true)
    }

    /// Read the level of all eight pins, GP0 in bit 0.
    pub fn read_port(&self) -> Result<u8, Error> {
        self.driver()?.gpio_read_port()
    }

    /// Read the level of all eight pins as a `u32`.
    ///
    /// The value is never [`READ_ERROR`]: failures are returned as `Err`.
    pub fn read_port_value(&self) -> Result<u32, Error> {
        self.read_port().map(u32::from)
    }

    /// Set the direction of every pin. A set bit makes the pin an input.
    pub fn configure_io(&self, io_map: u8) -> Result<bool, Error> {
        self.driver()?.set_io_map(io_map)?;
        Ok(true)
    }

    /// Set the direction of every pin and the level outputs take at power-up.
    pub fn configure_io_default_output(&self, io_map: u8, io_default: u8) -> Result<bool, Error> {
        self.driver()?.set_io_map_with_defaults(io_map, io_default)?;
        Ok(true)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Alternate functions and UART
    ////////////////////////////////////////////////////////////////////////////////

    /// Set the Rx LED mode: [`LedMode::OFF`], [`LedMode::TOGGLE`],
    /// [`LedMode::BLINKSLOW`] or [`LedMode::BLINKFAST`].
    ///
    /// Returns false for any other value.
    pub fn rx_led(&self, mode: u32) -> Result<bool, Error> {
        self.led(Led::Rx, mode)
    }

    /// Set the Tx LED mode. See [`SimpleIo::rx_led`].
    pub fn tx_led(&self, mode: u32) -> Result<bool, Error> {
        self.led(Led::Tx, mode)
    }

    fn led(&self, led: Led, mode: u32) -> Result<bool, Error> {
        let Ok(mode) = LedMode::try_from(mode) else {
            debug!(?led, mode, "invalid LED mode");
            return Ok(false);
        };
        self.driver()?.set_led_mode(led, mode)?;
        Ok(true)
    }

    /// Read back the whole configuration, for display.
    pub fn configuration(&self) -> Result<Configuration, Error> {
        Ok(self.driver()?.read_all()?.configuration)
    }

    /// Enable or disable RTS/CTS hardware flow control.
    pub fn hardware_flow_control(&self, on: bool) -> Result<bool, Error> {
        self.driver()?.set_hardware_flow_control(on)?;
        Ok(true)
    }

    /// Enable or disable the USBCFG function on GP1.
    pub fn uload(&self, on: bool) -> Result<bool, Error> {
        self.driver()?.set_usbcfg(on)?;
        Ok(true)
    }

    /// Enable or disable the SSPND function on GP0.
    pub fn suspend(&self, on: bool) -> Result<bool, Error> {
        self.driver()?.set_suspend(on)?;
        Ok(true)
    }

    /// Set the UART baud rate, using the divisor `12 MHz / baud - 1`.
    ///
    /// No rounding to a nearby achievable rate is done. Returns false for a rate
    /// the MCP2200 cannot produce (0, above 12 MBd, or below 184 Bd).
    pub fn set_baud_rate(&self, baud: u32) -> Result<bool, Error> {
        let Ok(divisor) = BaudDivisor::from_baud_rate(baud) else {
            return Ok(false);
        };
        self.driver()?
            .modify_configuration(|c| c.baud_divisor = divisor)?;
        Ok(true)
    }

    /// The baud rate produced by the current divisor.
    pub fn baud_rate(&self) -> Result<u32, Error> {
        self.driver()?.baud_rate()
    }

    /// Apply the pin directions, baud rate, both LED modes, flow control, USBCFG and
    /// SSPND in turn.
    ///
    /// Returns true only if every setting was accepted. A rejected setting does not
    /// stop the others being applied, and settings already applied are not undone.
    #[allow(clippy::too_many_arguments)]
    pub fn configure_mcp2200(
        &self,
        io_map: u8,
        baud: u32,
        rx_led_mode: u32,
        tx_led_mode: u32,
        flow_control: bool,
        uload: bool,
        suspend: bool,
    ) -> Result<bool, Error> {
        let accepted = [
            self.configure_io(io_map)?,
            self.set_baud_rate(baud)?,
            self.rx_led(rx_led_mode)?,
            self.tx_led(tx_led_mode)?,
            self.hardware_flow_control(flow_control)?,
            self.uload(uload)?,
            self.suspend(suspend)?,
        ];
        Ok(accepted.iter().all(|&ok| ok))
    }

    ////////////////////////////////////////////////////////////////////////////////
    // EEPROM
    ////////////////////////////////////////////////////////////////////////////////

    /// Read the EEPROM byte at `address`, or [`E_WRONG_ADDRESS`] for an address
    /// above 255.
    pub fn read_eeprom(&self, address: u32) -> Result<i32, Error> {
        let Ok(address) = u8::try_from(address) else {
            return Ok(E_WRONG_ADDRESS);
        };
        let cell = self.driver()?.read_ee(address)?;
        Ok(cell.value.into())
    }

    /// Write `value` to the EEPROM at `address`.
    ///
    /// Returns 0 once written, [`E_WRONG_ADDRESS`] for an address above 255, or
    /// [`E_CANNOT_SEND_DATA`] for a value above 255.
    pub fn write_eeprom(&self, address: u32, value: u32) -> Result<i32, Error> {
        let Ok(address) = u8::try_from(address) else {
            return Ok(E_WRONG_ADDRESS);
        };
        let Ok(value) = u8::try_from(value) else {
            return Ok(E_CANNOT_SEND_DATA);
        };
        self.driver()?.write_ee(address, value)?;
        Ok(0)
    }
}

impl<B: UsbBus> Drop for SimpleIo<B> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl<B: UsbBus> std::fmt::Debug for SimpleIo<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleIo")
            .field("vendor_id", &self.vendor_id)
            .field("product_id", &self.product_id)
            .field("registry", &self.registry)
            .field("connected", &self.is_connected())
            .finish()
    }
}
