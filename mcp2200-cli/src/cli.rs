use crate::eeprom::EepromCommand;
use crate::pins::{PinCommand, PortCommand};
use crate::settings::{LedCommand, Switch};
use crate::util;

use clap::Parser;

/// CLI for the MCP2200 USB to UART converter
///
/// This exposes the MCP2200's configuration via the command line: the eight GP
/// pins, the Rx and Tx activity LEDs, hardware flow control, the USBCFG and SSPND
/// pin functions, the UART baud rate and the 256-byte user EEPROM.
///
/// All settings are stored in the MCP2200's NVRAM and persist across power cycles.
/// The UART itself is a normal serial port and is not handled here.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// Device vendor ID in hexadecimal
    #[arg(long = "vid", default_value = "0x04D8", value_parser = util::u16_from_hex)]
    pub(crate) vid: u16,
    /// Device product ID in hexadecimal
    #[arg(long = "pid", default_value = "0x00DF", value_parser = util::u16_from_hex)]
    pub(crate) pid: u16,
    /// Which of several attached devices to use, as numbered by the list command
    #[arg(short, long, default_value_t = 0)]
    pub(crate) index: usize,
    /// Log more (repeat for more detail). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Parser)]
pub(crate) enum Commands {
    /// List attached devices.
    List,
    /// Show the current configuration and pin levels.
    Status,
    /// Drive or read a single GP pin.
    #[command(subcommand)]
    Pin(PinCommand),
    /// Drive or read all eight GP pins at once.
    #[command(subcommand)]
    Port(PortCommand),
    /// Set pin directions, and optionally their power-up output levels.
    Io {
        /// Direction bitmap in hexadecimal. A set bit makes the pin an input.
        #[arg(value_parser = util::u8_from_hex)]
        map: u8,
        /// Power-up output levels in hexadecimal.
        #[arg(short, long, value_parser = util::u8_from_hex)]
        defaults: Option<u8>,
    },
    /// Set the behaviour of the Rx or Tx activity LED.
    Led(LedCommand),
    /// Enable or disable RTS/CTS hardware flow control.
    Flow { state: Switch },
    /// Enable or disable the USBCFG function on GP1.
    Usbcfg { state: Switch },
    /// Enable or disable the SSPND function on GP0.
    Suspend { state: Switch },
    /// Show the UART baud rate, or set it.
    Baud {
        /// New baud rate. No rounding is done: the rate set is 12 MHz divided by
        /// a whole number.
        rate: Option<u32>,
    },
    /// Read or write the user EEPROM.
    #[command(subcommand)]
    Eeprom(EepromCommand),
}
