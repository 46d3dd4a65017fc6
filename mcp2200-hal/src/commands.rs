use crate::constants::REPORT_SIZE;
use crate::settings::Configuration;

/// A fixed-size HID report, as written to or read from the MCP2200.
pub type Report = [u8; REPORT_SIZE];

/// The HID commands understood by the MCP2200.
///
/// Each variant carries exactly the fields its report layout needs, so a command
/// cannot be built with a field missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum McpCommand {
    /// Drive GPIO outputs high (`set`) and low (`clear`).
    ///
    /// Pins assigned to an alternate function (LEDs, USBCFG, SSPND) are not
    /// affected. The device applies the set bitmap before the clear bitmap.
    SetClearOutputs { set: u8, clear: u8 },
    /// Write the configuration parameters held in NVRAM.
    ///
    /// No response is returned.
    Configure(Configuration),
    /// Read a single byte of user EEPROM.
    ReadEe { address: u8 },
    /// Write a single byte of user EEPROM.
    WriteEe { address: u8, value: u8 },
    /// Read back the NVRAM parameters, the last-touched EEPROM cell, and the
    /// current GPIO port levels.
    ReadAll,
}

impl McpCommand {
    /// Command code placed in byte 0 of the report.
    pub(crate) fn opcode(&self) -> u8 {
        match self {
            McpCommand::SetClearOutputs { .. } => 0x08,
            McpCommand::Configure(_) => 0x10,
            McpCommand::ReadEe { .. } => 0x20,
            McpCommand::WriteEe { .. } => 0x40,
            McpCommand::ReadAll => 0x80,
        }
    }

    /// Returns true if the MCP2200 answers this command with a report.
    pub(crate) fn has_response(&self) -> bool {
        matches!(self, McpCommand::ReadEe { .. } | McpCommand::ReadAll)
    }
}

pub(crate) struct UsbReport {
    /// Underlying HID command.
    command: McpCommand,
    /// Outgoing buffer, zero everywhere the command does not define a field.
    pub(crate) write_buffer: Report,
}

impl UsbReport {
    /// Lay out the command in a fresh zeroed report.
    pub(crate) fn new(command: McpCommand) -> Self {
        let mut buf = [0u8; REPORT_SIZE];
        buf[0] = command.opcode();
        match command {
            McpCommand::SetClearOutputs { set, clear } => {
                buf[11] = set;
                buf[12] = clear;
            }
            McpCommand::Configure(configuration) => configuration.apply_to_buffer(&mut buf),
            McpCommand::ReadEe { address } => buf[1] = address,
            McpCommand::WriteEe { address, value } => {
                buf[1] = address;
                buf[2] = value;
            }
            McpCommand::ReadAll => {}
        }
        Self {
            command,
            write_buffer: buf,
        }
    }

    pub(crate) fn command(&self) -> &McpCommand {
        &self.command
    }

    pub(crate) fn opcode(&self) -> u8 {
        self.write_buffer[0]
    }

    /// Returns true if a response report should be read after writing this one.
    pub(crate) fn has_response(&self) -> bool {
        self.command.has_response()
    }
}
