use anyhow::bail;
use clap::Parser;
use mcp2200_hal::SimpleIo;
use mcp2200_hal::constants::{E_CANNOT_SEND_DATA, E_WRONG_ADDRESS};

use crate::util;

#[derive(Debug, Parser)]
pub(crate) enum EepromCommand {
    /// Print bytes from the EEPROM in hexadecimal.
    Read {
        /// First address, decimal or 0x-prefixed hexadecimal.
        #[arg(value_parser = util::byte_from_str)]
        address: u32,
        /// Number of bytes to read.
        #[arg(default_value_t = 1)]
        count: u32,
    },
    /// Write bytes to consecutive EEPROM addresses.
    Write {
        /// First address, decimal or 0x-prefixed hexadecimal.
        #[arg(value_parser = util::byte_from_str)]
        address: u32,
        /// Bytes to write, decimal or 0x-prefixed hexadecimal.
        #[arg(required = true, value_parser = util::byte_from_str)]
        values: Vec<u32>,
    },
}

pub(crate) fn action(io: &SimpleIo, command: EepromCommand) -> anyhow::Result<()> {
    match command {
        EepromCommand::Read { address, count } => {
            let mut bytes = Vec::new();
            for address in address..address.saturating_add(count) {
                bytes.push(status(address, io.read_eeprom(address)?)?);
            }
            let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
            println!("{}", hex.join(" "));
        }
        EepromCommand::Write { address, values } => {
            for (offset, value) in (0u32..).zip(values) {
                let address = address.saturating_add(offset);
                status(address, io.write_eeprom(address, value)?)?;
            }
        }
    }
    Ok(())
}

/// Turn a SimpleIo EEPROM status into an error message.
fn status(address: u32, code: i32) -> anyhow::Result<i32> {
    match code {
        E_WRONG_ADDRESS => bail!("address {address} out of range 0..=255"),
        E_CANNOT_SEND_DATA => bail!("value for address {address} out of range 0..=255"),
        code => Ok(code),
    }
}
