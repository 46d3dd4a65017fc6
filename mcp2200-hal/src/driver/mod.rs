use std::cell::Cell;

use tracing::trace;

use crate::Error;
use crate::commands::{McpCommand, Report, UsbReport};
use crate::constants::{MCP2200_PID, MICROCHIP_VID};
use crate::settings::{Configuration, EepromCell, NvramSettings};
use crate::transport::{DeviceHandle, HidBus, HidTransport, Transport, UsbBus};

mod eeprom;
mod gpio;
mod settings;

/// Driver for the MCP2200.
///
/// # Quick start
///
/// Create the driver by calling [`MCP2200::connect`], or
/// [`MCP2200::connect_with_vid_and_pid`] if you have changed either of the USB vendor
/// ID (VID) or product ID (PID). With several MCP2200s attached, use
/// [`MCP2200::connect_index`], or manage them through [`SimpleIo`].
///
/// [`SimpleIo`]: crate::SimpleIo
///
/// # Overview
///
/// The MCP2200 is controlled with five fixed-size HID commands. Each has a method
/// here that maps directly onto it:
///
/// - [`MCP2200::set_clear_outputs`] drives GPIO pins.
/// - [`MCP2200::configure`] writes the NVRAM configuration.
/// - [`MCP2200::read_ee`] and [`MCP2200::write_ee`] access the 256-byte user EEPROM.
/// - [`MCP2200::read_all`] reads back configuration, GPIO levels and the last
///   EEPROM cell touched.
///
/// Built on these are read-modify-write helpers for single settings
/// ([`MCP2200::modify_configuration`]) and [`embedded_hal`] digital pins
/// ([`MCP2200::take_pins`]).
///
/// Nothing is cached: every query goes to the device.
#[derive(Debug)]
pub struct MCP2200<T = HidTransport> {
    /// Connection to the device.
    ///
    /// The driver has no other mutable state, so all methods take `&self`.
    transport: T,
    /// Marker for whether the pin structs have been taken from the driver.
    ///
    /// The `Cell` keeps [`Self::take_pins`] usable through a shared reference.
    pins_taken: Cell<bool>,
}

impl MCP2200<HidTransport> {
    ////////////////////////////////////////////////////////////////////////////////
    // Constructors - USB methods
    ////////////////////////////////////////////////////////////////////////////////

    /// Connect to the first USB device found with the default vendor and product ID.
    ///
    /// The default VID is 1240 (0x4D8) and PID 223 (0xDF).
    ///
    /// # Errors
    ///
    /// An error will be returned if no device is found or it cannot be opened.
    pub fn connect() -> Result<Self, Error> {
        MCP2200::connect_with_vid_and_pid(MICROCHIP_VID, MCP2200_PID)
    }

    /// Connect to the first USB device found with the given vendor and product ID.
    ///
    /// Use this constructor if you have changed the USB VID or PID of your MCP2200.
    ///
    /// # Errors
    ///
    /// An error will be returned if no device is found or it cannot be opened.
    pub fn connect_with_vid_and_pid(vendor_id: u16, product_id: u16) -> Result<Self, Error> {
        MCP2200::connect_index(vendor_id, product_id, 0)
    }

    /// Connect to the `index`-th USB device found with the given vendor and product ID.
    ///
    /// # Errors
    ///
    /// [`Error::DeviceIndex`] if there are not enough devices attached, or
    /// [`Error::Open`] if the device cannot be opened.
    pub fn connect_index(vendor_id: u16, product_id: u16, index: usize) -> Result<Self, Error> {
        let mut bus = HidBus::new()?;
        let transport = bus.connect(vendor_id, product_id, index)?;
        Ok(MCP2200::from_transport(transport))
    }
}

impl<T: Transport> MCP2200<T> {
    /// Wrap an already-open transport.
    pub fn from_transport(transport: T) -> Self {
        Self {
            transport,
            pins_taken: Cell::new(false),
        }
    }

    /// Release the device.
    ///
    /// Dropping the driver has the same effect; this exists to make the point of
    /// release explicit.
    pub fn disconnect(self) {
        self.transport.close();
    }

    /// The USB device this driver is connected to.
    pub fn usb_device_handle(&self) -> &DeviceHandle {
        self.transport.handle()
    }

    ////////////////////////////////////////////////////////////////////////////////
    // USB report exchange with the MCP2200
    ////////////////////////////////////////////////////////////////////////////////

    /// Write the given command to the MCP2200 and, if it has one, read the response.
    ///
    /// The response must echo the command code.
    fn transfer(&self, command: &UsbReport) -> Result<Option<Report>, Error> {
        trace!(
            opcode = format_args!("{:#04X}", command.opcode()),
            report = format_args!("{:02X?}", command.write_buffer),
            "MCP2200 TX"
        );
        self.transport.write_report(&command.write_buffer)?;
        if !command.has_response() {
            return Ok(None);
        }

        let response = self.transport.read_report()?;
        trace!(report = format_args!("{:02X?}", response), "MCP2200 RX");
        if response[0] != command.opcode() {
            return Err(Error::MismatchedCommandCodeEcho {
                sent: command.opcode(),
                received: response[0],
            });
        }
        Ok(Some(response))
    }

    /// Transfer a command that always has a response.
    fn query(&self, command: McpCommand) -> Result<Report, Error> {
        let report = UsbReport::new(command);
        debug_assert!(report.has_response(), "{:?} has no response", report.command());
        self.transfer(&report)?.ok_or(Error::ShortRead { read: 0 })
    }

    /// Transfer a command that never has a response.
    fn send(&self, command: McpCommand) -> Result<(), Error> {
        self.transfer(&UsbReport::new(command)).map(|_| ())
    }

    ////////////////////////////////////////////////////////////////////////////////
    // MCP2200 HID commands
    ////////////////////////////////////////////////////////////////////////////////

    /// Drive GPIO outputs high and low.
    ///
    /// Pins whose bit is set in `set` are driven high, then pins whose bit is set in
    /// `clear` are driven low. What happens to a pin named in both is up to the
    /// device firmware; the bitmaps are sent as given.
    ///
    /// <div class="warning">
    ///
    /// Pins assigned to an alternate function (Rx/Tx LED, USBCFG, SSPND) are not
    /// affected. Release them first (see [`AltPins`]) if you need to drive them
    /// directly.
    ///
    /// </div>
    ///
    /// [`AltPins`]: crate::settings::AltPins
    ///
    /// # Datasheet
    ///
    /// See the SET_CLEAR_OUTPUTS command (0x08).
    pub fn set_clear_outputs(&self, set: u8, clear: u8) -> Result<(), Error> {
        self.send(McpCommand::SetClearOutputs { set, clear })
    }

    /// Write the NVRAM configuration.
    ///
    /// Every field is written. To change one setting, read the current
    /// configuration first, or use [`MCP2200::modify_configuration`].
    ///
    /// # Datasheet
    ///
    /// See the CONFIGURE command (0x10).
    pub fn configure(&self, configuration: &Configuration) -> Result<(), Error> {
        self.send(McpCommand::Configure(*configuration))
    }

    /// Read one byte of user EEPROM.
    ///
    /// # Errors
    ///
    /// [`Error::MismatchedAddressEcho`] if the device answers for a different address.
    ///
    /// # Datasheet
    ///
    /// See the READ_EE command (0x20).
    pub fn read_ee(&self, address: u8) -> Result<EepromCell, Error> {
        let buf = self.query(McpCommand::ReadEe { address })?;
        if buf[1] != address {
            return Err(Error::MismatchedAddressEcho {
                sent: address,
                received: buf[1],
            });
        }
        Ok(EepromCell {
            address,
            value: buf[3],
        })
    }

    /// Write one byte of user EEPROM.
    ///
    /// # Datasheet
    ///
    /// See the WRITE_EE command (0x40).
    pub fn write_ee(&self, address: u8, value: u8) -> Result<(), Error> {
        self.send(McpCommand::WriteEe { address, value })
    }

    /// Read the NVRAM configuration and current GPIO levels.
    ///
    /// # Datasheet
    ///
    /// See the READ_ALL command (0x80).
    pub fn read_all(&self) -> Result<NvramSettings, Error> {
        let buf = self.query(McpCommand::ReadAll)?;
        Ok(NvramSettings::from_buffer(&buf))
    }
}
