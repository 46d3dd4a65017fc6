//! End-to-end behaviour of [`SimpleIo`] against simulated devices.

use crate::constants::{
    DEVICE_INDEX_ERROR, E_CANNOT_SEND_DATA, E_WRONG_ADDRESS, E_WRONG_DEVICE_ID, MCP2200_PID,
    MICROCHIP_VID, READ_ERROR,
};
use crate::settings::LedMode;
use crate::transport::mock::SimulatedBus;
use crate::{Error, SimpleIo};

const SET_CLEAR_OUTPUTS: u8 = 0x08;
const CONFIGURE: u8 = 0x10;

/// A session over `count` simulated devices with the first one selected.
fn session(count: usize) -> (SimulatedBus, SimpleIo<SimulatedBus>) {
    let bus = SimulatedBus::with_devices(count);
    let mut io = SimpleIo::init_with_bus(bus.clone(), MICROCHIP_VID, MCP2200_PID).unwrap();
    assert_eq!(io.select_device(0).unwrap(), 0);
    (bus, io)
}

#[test]
fn set_then_read_every_pin() {
    let (_bus, io) = session(1);
    for pin in 0..8 {
        assert!(io.set_pin(pin).unwrap());
        assert_eq!(io.read_pin(pin).unwrap(), Some(1), "GP{pin} after set");
        assert_eq!(io.read_pin_value(pin).unwrap(), 1);
        assert!(io.clear_pin(pin).unwrap());
        assert_eq!(io.read_pin(pin).unwrap(), Some(0), "GP{pin} after clear");
    }
}

#[test]
fn single_pin_writes_only_name_their_pin() {
    let (bus, io) = session(1);
    io.set_pin(5).unwrap();
    io.clear_pin(2).unwrap();
    let device = bus.device(0);
    let state = device.borrow();
    assert_eq!(state.written[0][11..13], [0x20, 0x00]);
    assert_eq!(state.written[1][11..13], [0x00, 0x04]);
}

#[test]
fn out_of_range_pins_are_rejected_without_io() {
    let (bus, io) = session(1);
    for pin in [8, 9, 255, 256, u32::MAX] {
        assert!(!io.set_pin(pin).unwrap());
        assert!(!io.clear_pin(pin).unwrap());
        assert_eq!(io.read_pin(pin).unwrap(), None);
        assert_eq!(io.read_pin_value(pin).unwrap(), READ_ERROR);
    }
    assert!(bus.device(0).borrow().written.is_empty());
}

#[test]
fn port_round_trip() {
    let (bus, io) = session(1);
    for value in 0..=255u32 {
        assert!(io.write_port(value).unwrap());
        assert_eq!(u32::from(io.read_port().unwrap()), value);
        assert_eq!(io.read_port_value().unwrap(), value);
    }
    let last = *bus.device(0).borrow().written.last().unwrap();
    assert_eq!(last[0], 0x80);
    assert_eq!(bus.device(0).borrow().count(SET_CLEAR_OUTPUTS), 256);
}

#[test]
fn port_write_drives_every_bit() {
    let (bus, io) = session(1);
    io.write_port(0b1100_0011).unwrap();
    assert_eq!(
        bus.device(0).borrow().written[0][11..13],
        [0b1100_0011, 0b0011_1100]
    );
}

#[test]
fn out_of_range_port_value_changes_nothing() {
    let (bus, io) = session(1);
    io.write_port(0x5A).unwrap();
    let writes = bus.device(0).borrow().written.len();
    assert!(!io.write_port(256).unwrap());
    assert!(!io.write_port(u32::MAX).unwrap());
    assert_eq!(bus.device(0).borrow().written.len(), writes);
    assert_eq!(io.read_port().unwrap(), 0x5A);
}

#[test]
fn eeprom_round_trip() {
    let (_bus, io) = session(1);
    for address in 0..=255u32 {
        let value = address ^ 0x5A;
        assert_eq!(io.write_eeprom(address, value).unwrap(), 0);
        assert_eq!(io.read_eeprom(address).unwrap(), value as i32);
    }
    for value in [0, 1, 0x7F, 0x80, 0xFF] {
        assert_eq!(io.write_eeprom(0x10, value).unwrap(), 0);
        assert_eq!(io.read_eeprom(0x10).unwrap(), value as i32);
    }
}

#[test]
fn eeprom_range_checks_come_first() {
    let (bus, io) = session(1);
    assert_eq!(io.write_eeprom(256, 1).unwrap(), E_WRONG_ADDRESS);
    assert_eq!(io.write_eeprom(0, 300).unwrap(), E_CANNOT_SEND_DATA);
    assert_eq!(io.write_eeprom(1000, 1000).unwrap(), E_WRONG_ADDRESS);
    assert_eq!(io.read_eeprom(256).unwrap(), E_WRONG_ADDRESS);
    assert!(bus.device(0).borrow().written.is_empty());
}

#[test]
fn rx_led_modes_set_documented_bits() {
    let (bus, io) = session(1);
    let device = bus.device(0);

    assert!(io.rx_led(LedMode::TOGGLE).unwrap());
    assert_eq!(device.borrow().alt_pins() & 0x08, 0x08);
    assert_eq!(device.borrow().alt_options() & 0x80, 0x80);

    assert!(io.rx_led(LedMode::OFF).unwrap());
    assert_eq!(device.borrow().alt_pins() & 0x08, 0);
    // Options are left as they were.
    assert_eq!(device.borrow().alt_options() & 0x80, 0x80);

    assert!(io.rx_led(LedMode::BLINKSLOW).unwrap());
    assert_eq!(device.borrow().alt_pins() & 0x08, 0x08);
    assert_eq!(device.borrow().alt_options() & 0xA0, 0x20);

    assert!(io.rx_led(LedMode::BLINKFAST).unwrap());
    assert_eq!(device.borrow().alt_pins() & 0x08, 0x08);
    assert_eq!(device.borrow().alt_options() & 0xA0, 0x00);
}

#[test]
fn tx_led_modes_set_documented_bits() {
    let (bus, io) = session(1);
    let device = bus.device(0);

    assert!(io.tx_led(LedMode::TOGGLE).unwrap());
    assert_eq!(device.borrow().alt_pins() & 0x04, 0x04);
    assert_eq!(device.borrow().alt_options() & 0x40, 0x40);

    assert!(io.tx_led(LedMode::BLINKSLOW).unwrap());
    assert_eq!(device.borrow().alt_options() & 0x60, 0x20);

    assert!(io.tx_led(LedMode::BLINKFAST).unwrap());
    assert_eq!(device.borrow().alt_options() & 0x60, 0x00);

    assert!(io.tx_led(LedMode::OFF).unwrap());
    assert_eq!(device.borrow().alt_pins() & 0x04, 0);
    // The Rx LED was never touched.
    assert_eq!(device.borrow().alt_pins() & 0x08, 0);
}

#[test]
fn invalid_led_modes_change_nothing() {
    let (bus, io) = session(1);
    for mode in [1, 2, 6, u32::MAX] {
        assert!(!io.rx_led(mode).unwrap());
        assert!(!io.tx_led(mode).unwrap());
    }
    assert!(bus.device(0).borrow().written.is_empty());
}

#[test]
fn single_bit_switches() {
    let (bus, io) = session(1);
    let device = bus.device(0);
    io.hardware_flow_control(true).unwrap();
    io.uload(true).unwrap();
    io.suspend(true).unwrap();
    assert_eq!(device.borrow().alt_options(), 0x01);
    assert_eq!(device.borrow().alt_pins(), 0xC0);
    io.uload(false).unwrap();
    assert_eq!(device.borrow().alt_pins(), 0x80);
    io.hardware_flow_control(false).unwrap();
    assert_eq!(device.borrow().alt_options(), 0x00);
}

#[test]
fn baud_rate_9600() {
    let (bus, io) = session(1);
    io.set_baud_rate(19_200).unwrap();
    assert!(io.set_baud_rate(9600).unwrap());
    let divisor = 12_000_000 / 9600 - 1;
    let configuration = bus.device(0).borrow().configuration;
    assert_eq!(configuration[4], (divisor / 256) as u8);
    assert_eq!(configuration[5], (divisor % 256) as u8);
    assert_eq!(configuration[4..6], [4, 225]);
    assert_eq!(io.baud_rate().unwrap(), 9600);
}

#[test]
fn unachievable_baud_rates_are_rejected() {
    let (bus, io) = session(1);
    for baud in [0, 100, 183, 12_000_001] {
        assert!(!io.set_baud_rate(baud).unwrap());
    }
    assert!(bus.device(0).borrow().written.is_empty());
}

#[test]
fn io_direction_and_defaults() {
    let (bus, io) = session(1);
    io.set_baud_rate(57_600).unwrap();
    assert!(io.configure_io(0xF0).unwrap());
    assert_eq!(bus.device(0).borrow().configuration[0], 0xF0);
    assert!(io.configure_io_default_output(0x0F, 0xA5).unwrap());
    let configuration = bus.device(0).borrow().configuration;
    assert_eq!(configuration[0], 0x0F);
    assert_eq!(configuration[2], 0xA5);
    // Baud divisor survives the read-modify-write.
    assert_eq!(configuration[4..6], [0, 207]);
}

#[test]
fn outputs_on_claimed_pins_do_not_move() {
    let (bus, io) = session(1);
    io.rx_led(LedMode::TOGGLE).unwrap();
    io.tx_led(LedMode::TOGGLE).unwrap();
    io.write_port(0xFF).unwrap();
    assert_eq!(io.read_port().unwrap(), 0x3F);
    assert_eq!(bus.device(0).borrow().latch, 0x3F);
}

#[test]
fn bad_device_index_keeps_selection() {
    let (bus, mut io) = session(2);
    assert_eq!(io.select_device(2).unwrap(), E_WRONG_DEVICE_ID);
    assert_eq!(io.select_device(usize::MAX).unwrap(), E_WRONG_DEVICE_ID);
    assert_eq!(io.selected_device(), Some(0));
    assert!(io.is_connected());
    assert_eq!(bus.opened(), 1);
    assert_eq!(bus.closed(), 0);
}

#[test]
fn selecting_releases_previous_device() {
    let (bus, mut io) = session(2);
    assert_eq!(io.select_device(1).unwrap(), 0);
    assert_eq!(bus.closed(), 1);
    assert_eq!(io.selected_device(), Some(1));
    io.set_pin(0).unwrap();
    assert_eq!(bus.device(0).borrow().latch, 0);
    assert_eq!(bus.device(1).borrow().latch, 1);
}

#[test]
fn failed_open_leaves_session_disconnected() {
    let (bus, mut io) = session(2);
    bus.fail_next_open();
    assert!(matches!(io.select_device(1), Err(Error::Open { .. })));
    assert!(!io.is_connected());
    assert_eq!(io.selected_device(), None);
    assert!(matches!(io.set_pin(0), Err(Error::NotConnected)));
    assert_eq!(io.select_device(1).unwrap(), 0);
}

#[test]
fn configure_mcp2200_applies_everything_it_can() {
    let (bus, io) = session(1);
    let accepted = io
        .configure_mcp2200(0x0F, 19_200, 2, LedMode::TOGGLE, true, true, false)
        .unwrap();
    assert!(!accepted);
    let device = bus.device(0);
    let state = device.borrow();
    assert_eq!(state.configuration, [0x0F, 0x44, 0x00, 0x41, 0x02, 0x70]);
    // One configure per accepted setter.
    assert_eq!(state.count(CONFIGURE), 6);
}

#[test]
fn configure_mcp2200_all_valid() {
    let (bus, io) = session(1);
    let accepted = io
        .configure_mcp2200(
            0x00,
            9600,
            LedMode::BLINKSLOW,
            LedMode::BLINKSLOW,
            false,
            false,
            true,
        )
        .unwrap();
    assert!(accepted);
    assert_eq!(
        bus.device(0).borrow().configuration,
        [0x00, 0x8C, 0x00, 0x20, 0x04, 0xE1]
    );
}

#[test]
fn io_errors_propagate() {
    let (bus, io) = session(1);
    bus.device(0).borrow_mut().fail_writes = true;
    assert!(matches!(io.set_pin(1), Err(Error::HidApi(_))));
    assert!(matches!(io.read_eeprom(1), Err(Error::HidApi(_))));
    assert!(matches!(
        io.configure_mcp2200(0, 9600, 0, 0, false, false, false),
        Err(Error::HidApi(_))
    ));
}

#[test]
fn nothing_selected_after_init() {
    let bus = SimulatedBus::with_devices(2);
    let io = SimpleIo::init_with_bus(bus.clone(), MICROCHIP_VID, MCP2200_PID).unwrap();
    assert_eq!(io.device_count(), 2);
    assert_eq!(io.selected_device(), None);
    assert!(!io.is_connected());
    assert_eq!(io.selected_device_info(), DEVICE_INDEX_ERROR);
    assert!(matches!(io.read_port(), Err(Error::NotConnected)));
    // Validation still comes first.
    assert!(!io.set_pin(8).unwrap());
    assert_eq!(bus.opened(), 0);
}

#[test]
fn device_info_strings() {
    let (_bus, io) = session(2);
    assert_eq!(
        io.device_info(1),
        "Simulated MCP2200 (04D8:00DF, serial 0001) at sim-1"
    );
    assert_eq!(io.device_info(2), DEVICE_INDEX_ERROR);
    assert_eq!(io.selected_device_info(), io.device_info(0));
}

#[test]
fn no_devices_for_other_ids() {
    let bus = SimulatedBus::with_devices(2);
    let mut io = SimpleIo::init_with_bus(bus, MICROCHIP_VID, 0x1234).unwrap();
    assert_eq!(io.device_count(), 0);
    assert_eq!(io.select_device(0).unwrap(), E_WRONG_DEVICE_ID);
}

#[test]
fn disconnect_is_idempotent() {
    let (bus, mut io) = session(1);
    assert!(io.disconnect());
    assert!(io.disconnect());
    assert_eq!(bus.closed(), 1);
    assert_eq!(io.selected_device(), None);
    drop(io);
    assert_eq!(bus.closed(), 1);
}

#[test]
fn dropping_the_session_releases_the_device() {
    let (bus, io) = session(1);
    drop(io);
    assert_eq!(bus.closed(), 1);
}

#[test]
fn rescan_disconnects() {
    let (bus, mut io) = session(2);
    assert_eq!(io.rescan().unwrap(), 2);
    assert!(!io.is_connected());
    assert_eq!(bus.closed(), 1);
}
