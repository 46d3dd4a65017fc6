//! USB identifiers and fixed protocol parameters.

/// Microchip's USB vendor ID, used by the MCP2200 out of the box.
pub const MICROCHIP_VID: u16 = 0x04D8;

/// Default USB product ID of the MCP2200.
pub const MCP2200_PID: u16 = 0x00DF;

/// USB interface number of the MCP2200's HID function.
///
/// Interfaces 0 and 1 belong to the CDC (serial port) function.
pub const HID_INTERFACE: i32 = 2;

/// Size in bytes of every HID report exchanged with the MCP2200, in both directions.
pub const REPORT_SIZE: usize = 16;

/// Clock from which the UART baud rate is derived.
///
/// The effective rate is `BAUD_CLOCK_HZ / (divisor + 1)`.
pub const BAUD_CLOCK_HZ: u32 = 12_000_000;

/// Number of addressable bytes in the user EEPROM.
pub const EEPROM_SIZE: usize = 256;

/// Status returned by [`SimpleIo::select_device`] for an index with no device.
///
/// [`SimpleIo::select_device`]: crate::SimpleIo::select_device
pub const E_WRONG_DEVICE_ID: i32 = -1;

/// Status returned by the [`SimpleIo`] EEPROM methods for an address outside `0..=255`.
///
/// [`SimpleIo`]: crate::SimpleIo
pub const E_WRONG_ADDRESS: i32 = -2;

/// Status returned by [`SimpleIo::write_eeprom`] for a value outside `0..=255`.
///
/// [`SimpleIo::write_eeprom`]: crate::SimpleIo::write_eeprom
pub const E_CANNOT_SEND_DATA: i32 = -3;

/// Value returned by the `*_value` read methods of [`SimpleIo`] when the read fails.
///
/// [`SimpleIo`]: crate::SimpleIo
pub const READ_ERROR: u32 = 0x8000;

/// Device description returned by [`SimpleIo`] for an index with no device.
///
/// [`SimpleIo`]: crate::SimpleIo
pub const DEVICE_INDEX_ERROR: &str = "Device Index Error";
