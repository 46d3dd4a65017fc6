//! A simulated MCP2200 for tests.
//!
//! The simulation keeps an in-memory register file and EEPROM per device and
//! answers reports the way the chip does, including leaving pins claimed by an
//! alternate function alone on Set/Clear Outputs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hidapi::HidError;

use super::{DeviceHandle, Transport, UsbBus};
use crate::Error;
use crate::commands::Report;
use crate::constants::{EEPROM_SIZE, MCP2200_PID, MICROCHIP_VID, REPORT_SIZE};
use crate::settings::AltPins;

/// Register file and EEPROM of one simulated chip.
#[derive(Debug)]
pub(crate) struct DeviceState {
    /// `IO_bmap`, `Config_Alt_Pins`, `IO_Default_Val_bmap`, `Config_Alt_Options`,
    /// `Baud_H`, `Baud_L`.
    pub(crate) configuration: [u8; 6],
    /// Output latch.
    pub(crate) latch: u8,
    /// Levels applied from outside to pins configured as inputs.
    pub(crate) input_levels: u8,
    pub(crate) eeprom: [u8; EEPROM_SIZE],
    pub(crate) last_eeprom: (u8, u8),
    /// Every report written to the device, in order.
    pub(crate) written: Vec<Report>,
    pending: Option<Report>,
    /// Fail every write once set.
    pub(crate) fail_writes: bool,
    /// Answer queries with the wrong command code.
    pub(crate) corrupt_echo: bool,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            // All outputs, no alternate functions, 9600 Bd.
            configuration: [0x00, 0x00, 0x00, 0x00, 0x04, 0xE1],
            latch: 0,
            input_levels: 0,
            eeprom: [0xFF; EEPROM_SIZE],
            last_eeprom: (0, 0xFF),
            written: Vec::new(),
            pending: None,
            fail_writes: false,
            corrupt_echo: false,
        }
    }
}

impl DeviceState {
    pub(crate) fn port_value(&self) -> u8 {
        let io_map = self.configuration[0];
        (self.latch & !io_map) | (self.input_levels & io_map)
    }

    pub(crate) fn alt_pins(&self) -> u8 {
        self.configuration[1]
    }

    pub(crate) fn alt_options(&self) -> u8 {
        self.configuration[3]
    }

    /// Count of reports written with the given command code.
    pub(crate) fn count(&self, opcode: u8) -> usize {
        self.written.iter().filter(|r| r[0] == opcode).count()
    }

    fn process(&mut self, report: &Report) {
        self.written.push(*report);
        let mut response = [0u8; REPORT_SIZE];
        response[0] = if self.corrupt_echo { 0xFF } else { report[0] };
        match report[0] {
            0x08 => {
                let writable = !AltPins::from(self.alt_pins()).gpio_claimed();
                self.latch |= report[11] & writable;
                self.latch &= !(report[12] & writable);
            }
            0x10 => self.configuration.copy_from_slice(&report[4..10]),
            0x20 => {
                let address = report[1];
                let value = self.eeprom[address as usize];
                self.last_eeprom = (address, value);
                response[1] = address;
                response[3] = value;
                self.pending = Some(response);
            }
            0x40 => {
                self.eeprom[report[1] as usize] = report[2];
                self.last_eeprom = (report[1], report[2]);
            }
            0x80 => {
                response[1] = self.last_eeprom.0;
                response[3] = self.last_eeprom.1;
                response[4..10].copy_from_slice(&self.configuration);
                response[10] = self.port_value();
                self.pending = Some(response);
            }
            _ => {}
        }
    }
}

pub(crate) type SimulatedDevice = Rc<RefCell<DeviceState>>;

/// A bus with a fixed set of simulated devices.
///
/// Clones share the devices and counters, so a test can keep one to inspect
/// the bus after moving another into the code under test.
#[derive(Debug, Clone, Default)]
pub(crate) struct SimulatedBus {
    devices: Rc<Vec<SimulatedDevice>>,
    opened: Rc<Cell<usize>>,
    closed: Rc<Cell<usize>>,
    fail_next_open: Rc<Cell<bool>>,
}

impl SimulatedBus {
    pub(crate) fn with_devices(count: usize) -> Self {
        Self {
            devices: Rc::new((0..count).map(|_| SimulatedDevice::default()).collect()),
            ..Default::default()
        }
    }

    pub(crate) fn device(&self, index: usize) -> SimulatedDevice {
        Rc::clone(&self.devices[index])
    }

    pub(crate) fn opened(&self) -> usize {
        self.opened.get()
    }

    pub(crate) fn closed(&self) -> usize {
        self.closed.get()
    }

    pub(crate) fn fail_next_open(&self) {
        self.fail_next_open.set(true);
    }

    fn handle(index: usize) -> DeviceHandle {
        DeviceHandle {
            path: format!("sim-{index}"),
            vendor_id: MICROCHIP_VID,
            product_id: MCP2200_PID,
            interface_number: 2,
            serial_number: Some(format!("{index:04}")),
            product: Some("Simulated MCP2200".into()),
        }
    }
}

impl UsbBus for SimulatedBus {
    type Transport = SimulatedTransport;

    fn discover(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceHandle>, Error> {
        if (vendor_id, product_id) != (MICROCHIP_VID, MCP2200_PID) {
            return Ok(Vec::new());
        }
        Ok((0..self.devices.len()).map(Self::handle).collect())
    }

    fn open(&self, handle: &DeviceHandle) -> Result<SimulatedTransport, Error> {
        if self.fail_next_open.replace(false) {
            return Err(Error::Open {
                path: handle.path.clone(),
                source: HidError::HidApiError {
                    message: "simulated claim failure".into(),
                },
            });
        }
        let index = (0..self.devices.len())
            .find(|&i| Self::handle(i) == *handle)
            .ok_or(Error::DeviceIndex {
                index: usize::MAX,
                available: self.devices.len(),
            })?;
        self.opened.set(self.opened.get() + 1);
        Ok(SimulatedTransport {
            state: self.device(index),
            handle: handle.clone(),
            closed: Rc::clone(&self.closed),
        })
    }
}

#[derive(Debug)]
pub(crate) struct SimulatedTransport {
    state: SimulatedDevice,
    handle: DeviceHandle,
    closed: Rc<Cell<usize>>,
}

impl Transport for SimulatedTransport {
    fn read_report(&self) -> Result<Report, Error> {
        self.state.borrow_mut().pending.take().ok_or(Error::ShortRead { read: 0 })
    }

    fn write_report(&self, report: &Report) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(Error::HidApi(HidError::HidApiError {
                message: "simulated write failure".into(),
            }));
        }
        state.process(report);
        Ok(())
    }

    fn handle(&self) -> &DeviceHandle {
        &self.handle
    }

    fn close(self) {
        self.closed.set(self.closed.get() + 1);
    }
}
