use anyhow::bail;
use clap::Parser;
use mcp2200_hal::SimpleIo;

use crate::settings::check;
use crate::util;

#[derive(Debug, Parser)]
pub(crate) enum PinCommand {
    /// Drive the pin high.
    Set { pin: u32 },
    /// Drive the pin low.
    Clear { pin: u32 },
    /// Print the pin's level, 0 or 1.
    Read { pin: u32 },
}

#[derive(Debug, Parser)]
pub(crate) enum PortCommand {
    /// Print the level of every pin as a bitmap, GP7 first.
    Read,
    /// Drive every output pin: set bits high, clear bits low.
    Write {
        /// Port value in hexadecimal.
        #[arg(value_parser = util::u8_from_hex)]
        value: u8,
    },
}

pub(crate) fn pin_action(io: &SimpleIo, command: PinCommand) -> anyhow::Result<()> {
    match command {
        PinCommand::Set { pin } => check_pin(pin, io.set_pin(pin)?),
        PinCommand::Clear { pin } => check_pin(pin, io.clear_pin(pin)?),
        PinCommand::Read { pin } => match io.read_pin(pin)? {
            Some(level) => {
                println!("{level}");
                Ok(())
            }
            None => bail!("pin {pin} out of range 0..=7"),
        },
    }
}

fn check_pin(pin: u32, accepted: bool) -> anyhow::Result<()> {
    if !accepted {
        bail!("pin {pin} out of range 0..=7");
    }
    Ok(())
}

pub(crate) fn port_action(io: &SimpleIo, command: PortCommand) -> anyhow::Result<()> {
    match command {
        PortCommand::Read => println!("{:08b}", io.read_port()?),
        PortCommand::Write { value } => check(io.write_port(value.into())?)?,
    }
    Ok(())
}

pub(crate) fn configure_io(io: &SimpleIo, map: u8, defaults: Option<u8>) -> anyhow::Result<()> {
    let accepted = match defaults {
        Some(defaults) => io.configure_io_default_output(map, defaults)?,
        None => io.configure_io(map)?,
    };
    check(accepted)
}
