use anyhow::bail;
use clap::{Parser, ValueEnum};
use mcp2200_hal::SimpleIo;
use mcp2200_hal::settings::{Led, LedMode};

/// Baud rates offered by common serial terminals.
const STANDARD_BAUD_RATES: [u32; 10] = [
    300, 1200, 2400, 4800, 9600, 19_200, 38_400, 57_600, 76_800, 115_200,
];

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Switch {
    On,
    Off,
}

impl From<Switch> for bool {
    fn from(value: Switch) -> Self {
        matches!(value, Switch::On)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum WhichLed {
    Rx,
    Tx,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Mode {
    Off,
    Toggle,
    BlinkSlow,
    BlinkFast,
}

impl From<Mode> for u32 {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Off => LedMode::OFF,
            Mode::Toggle => LedMode::TOGGLE,
            Mode::BlinkSlow => LedMode::BLINKSLOW,
            Mode::BlinkFast => LedMode::BLINKFAST,
        }
    }
}

#[derive(Debug, Parser)]
pub(crate) struct LedCommand {
    /// Which LED: rx (GP6) or tx (GP7).
    led: WhichLed,
    /// Off releases the pin for GPIO; toggle flips it on each transfer; the blink
    /// modes pulse it. The blink speed is shared by both LEDs.
    mode: Mode,
}

/// Fail if SimpleIo rejected the request.
pub(crate) fn check(accepted: bool) -> anyhow::Result<()> {
    if !accepted {
        bail!("the MCP2200 cannot take that setting");
    }
    Ok(())
}

pub(crate) fn led_action(io: &SimpleIo, command: LedCommand) -> anyhow::Result<()> {
    let accepted = match command.led {
        WhichLed::Rx => io.rx_led(command.mode.into())?,
        WhichLed::Tx => io.tx_led(command.mode.into())?,
    };
    check(accepted)
}

pub(crate) fn baud_action(io: &SimpleIo, rate: Option<u32>) -> anyhow::Result<()> {
    if let Some(rate) = rate {
        if !io.set_baud_rate(rate)? {
            bail!("baud rate {rate} cannot be produced by the MCP2200");
        }
    }
    print_baud_rate(io.baud_rate()?);
    Ok(())
}

fn print_baud_rate(actual: u32) {
    let nearest = nearest_standard_baud_rate(actual);
    if nearest == actual {
        println!("{actual} Bd");
    } else {
        println!("{actual} Bd (nearest standard rate {nearest})");
    }
}

/// The standard rate closest to `actual`.
pub(crate) fn nearest_standard_baud_rate(actual: u32) -> u32 {
    STANDARD_BAUD_RATES
        .into_iter()
        .min_by_key(|rate| rate.abs_diff(actual))
        .unwrap_or(actual)
}

pub(crate) fn status(io: &SimpleIo) -> anyhow::Result<()> {
    let configuration = io.configuration()?;
    println!("Device:       {}", io.selected_device_info());
    println!("Directions:   {:08b} (1 = input)", configuration.io_map);
    println!("Defaults:     {:08b}", configuration.io_default);
    println!("Levels:       {:08b}", io.read_port()?);
    println!("Rx LED:       {}", configuration.led_mode(Led::Rx));
    println!("Tx LED:       {}", configuration.led_mode(Led::Tx));
    println!(
        "Flow control: {}",
        on_off(configuration.alt_options.hardware_flow_control())
    );
    println!("USBCFG:       {}", on_off(configuration.alt_pins.usbcfg()));
    println!("SSPND:        {}", on_off(configuration.alt_pins.suspend()));
    print!("Baud rate:    ");
    print_baud_rate(configuration.baud_divisor.baud_rate());
    Ok(())
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
