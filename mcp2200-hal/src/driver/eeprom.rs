use super::MCP2200;
use crate::Error;
use crate::constants::EEPROM_SIZE;
use crate::transport::Transport;

/// # Multi-byte EEPROM access
///
/// The MCP2200 only reads and writes its EEPROM one byte per command, so these
/// issue one command per byte.
impl<T: Transport> MCP2200<T> {
    /// Read `len` consecutive bytes starting at `start`.
    ///
    /// # Errors
    ///
    /// [`Error::EepromRange`] before any I/O if the range runs past address 255.
    pub fn eeprom_read_bytes(&self, start: u8, len: usize) -> Result<Vec<u8>, Error> {
        check_range(start, len)?;
        (0..len)
            .map(|offset| {
                let address = start + offset as u8;
                self.read_ee(address).map(|cell| cell.value)
            })
            .collect()
    }

    /// Write `data` to consecutive addresses starting at `start`.
    ///
    /// # Errors
    ///
    /// [`Error::EepromRange`] before any I/O if the data would run past address 255.
    /// An I/O error part way through leaves the bytes before it written.
    pub fn eeprom_write_bytes(&self, start: u8, data: &[u8]) -> Result<(), Error> {
        check_range(start, data.len())?;
        for (offset, &value) in data.iter().enumerate() {
            self.write_ee(start + offset as u8, value)?;
        }
        Ok(())
    }
}

fn check_range(start: u8, len: usize) -> Result<(), Error> {
    if usize::from(start) + len > EEPROM_SIZE {
        Err(Error::EepromRange { start, len })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MCP2200_PID, MICROCHIP_VID};
    use crate::transport::UsbBus;
    use crate::transport::mock::SimulatedBus;

    #[test]
    fn range_check() {
        assert!(check_range(0, 256).is_ok());
        assert!(check_range(255, 1).is_ok());
        assert!(check_range(200, 0).is_ok());
        assert!(matches!(
            check_range(255, 2),
            Err(Error::EepromRange { start: 255, len: 2 })
        ));
        assert!(check_range(0, 257).is_err());
    }

    #[test]
    fn string_into_eeprom_and_back() {
        let mut bus = SimulatedBus::with_devices(1);
        let device = MCP2200::from_transport(bus.connect(MICROCHIP_VID, MCP2200_PID, 0).unwrap());
        device.eeprom_write_bytes(0xFA, b"hello!").unwrap();
        assert_eq!(device.eeprom_read_bytes(0xFA, 6).unwrap(), b"hello!");
        assert_eq!(bus.device(0).borrow().eeprom[0xFF], b'!');
    }

    #[test]
    fn overflowing_write_sends_nothing() {
        let mut bus = SimulatedBus::with_devices(1);
        let device = MCP2200::from_transport(bus.connect(MICROCHIP_VID, MCP2200_PID, 0).unwrap());
        assert!(device.eeprom_write_bytes(0xFB, b"hello!").is_err());
        assert!(bus.device(0).borrow().written.is_empty());
    }
}
