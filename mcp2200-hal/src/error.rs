use thiserror::Error;

/// Wrapper for problems when communicating with the MCP2200.
#[derive(Debug, Error)]
pub enum Error {
    /// An error occured in the underlying USB HID library while talking to a device.
    #[error("USB HID error: {0}")]
    HidApi(#[from] hidapi::HidError),
    /// The MCP2200 USB device could not be opened.
    ///
    /// This is usually a permissions problem, or another process holding the device.
    #[error("could not open {path}: {source}")]
    Open {
        /// Platform path of the device that could not be opened.
        path: String,
        /// Error reported by the USB HID library.
        source: hidapi::HidError,
    },
    /// No device was found at the requested position in the device list.
    #[error("no device at index {index} ({available} found)")]
    DeviceIndex {
        /// Index that was requested.
        index: usize,
        /// Number of matching devices found.
        available: usize,
    },
    /// Fewer than 16 bytes were accepted when writing a report.
    #[error("short write: {written} of {expected} bytes accepted")]
    ShortWrite {
        /// Bytes the transport reported as written.
        written: usize,
        /// Bytes that should have been written.
        expected: usize,
    },
    /// Fewer than 16 bytes were received when reading a report.
    #[error("short read: {read} of 16 bytes received")]
    ShortRead {
        /// Bytes the transport reported as read.
        read: usize,
    },
    /// The command code echoed by the MCP2200 was not the command code written to it.
    ///
    /// In practice this should not occur(!). Please report any occurrences.
    #[error("command code echo mismatch: sent {sent:#04X}, received {received:#04X}")]
    MismatchedCommandCodeEcho {
        /// Command code that was sent to the MCP2200.
        sent: u8,
        /// Command code echoed from the MCP2200.
        received: u8,
    },
    /// The EEPROM address echoed in a READ_EE response was not the one requested.
    #[error("EEPROM address echo mismatch: sent {sent:#04X}, received {received:#04X}")]
    MismatchedAddressEcho {
        /// Address that was requested.
        sent: u8,
        /// Address echoed from the MCP2200.
        received: u8,
    },
    /// An operation needing a device was attempted before one was selected.
    #[error("no MCP2200 selected")]
    NotConnected,
    /// A GPIO pin wrapper found its pin no longer has the direction it was given.
    ///
    /// This happens if the direction was changed through another route (for
    /// example [`MCP2200::set_io_map`]) while the wrapper was alive.
    ///
    /// [`MCP2200::set_io_map`]: crate::MCP2200::set_io_map
    #[error("GP{0} direction changed outside the pin wrapper")]
    PinModeChanged(u8),
    /// GPIO pin number outside `0..=7`.
    #[error("pin {0} out of range 0..=7")]
    PinOutOfRange(u8),
    /// A multi-byte EEPROM access would run past the last address (255).
    #[error("EEPROM range of {len} bytes from {start:#04X} runs past address 0xFF")]
    EepromRange {
        /// First address of the access.
        start: u8,
        /// Number of bytes requested.
        len: usize,
    },
    /// A baud rate for which no 16-bit divisor exists.
    #[error("baud rate {0} cannot be produced by the MCP2200")]
    BaudRateOutOfRange(u32),
}
