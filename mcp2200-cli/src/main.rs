use anyhow::{Context, bail};
use clap::Parser;
use mcp2200_hal::SimpleIo;
use mcp2200_hal::constants::E_WRONG_DEVICE_ID;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::Commands;

mod cli;
mod eeprom;
mod pins;
mod settings;
mod usb;
mod util;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let mut io = SimpleIo::init(cli.vid, cli.pid).context("could not scan for devices")?;
    if !matches!(cli.command, Commands::List) {
        if io.select_device(cli.index)? == E_WRONG_DEVICE_ID {
            bail!(
                "no device at index {} ({} found with ID {:04X}:{:04X})",
                cli.index,
                io.device_count(),
                cli.vid,
                cli.pid
            );
        }
        tracing::debug!(device = %io.selected_device_info(), "selected");
    }

    match cli.command {
        Commands::List => usb::list(&io),
        Commands::Status => settings::status(&io)?,
        Commands::Pin(command) => pins::pin_action(&io, command)?,
        Commands::Port(command) => pins::port_action(&io, command)?,
        Commands::Io { map, defaults } => pins::configure_io(&io, map, defaults)?,
        Commands::Led(command) => settings::led_action(&io, command)?,
        Commands::Flow { state } => settings::check(io.hardware_flow_control(state.into())?)?,
        Commands::Usbcfg { state } => settings::check(io.uload(state.into())?)?,
        Commands::Suspend { state } => settings::check(io.suspend(state.into())?)?,
        Commands::Baud { rate } => settings::baud_action(&io, rate)?,
        Commands::Eeprom(command) => eeprom::action(&io, command)?,
    }
    io.disconnect();
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod test {
    use crate::cli::Cli;

    use clap::CommandFactory;

    #[test]
    fn check_cli_debug_asserts() {
        Cli::command().debug_assert();
    }
}
