//! USB HID transport to the MCP2200.
//!
//! The driver only needs two things from the USB stack: a way to find and open
//! devices ([`UsbBus`]) and a way to exchange 16-byte reports with an open device
//! ([`Transport`]). [`HidBus`] and [`HidTransport`] implement these on top of
//! [`hidapi`].

use crate::Error;
use crate::commands::Report;

mod hid;
#[cfg(test)]
pub(crate) mod mock;

pub use hid::{HidBus, HidTransport};

/// Identity of one physical MCP2200, as found during discovery.
///
/// Two handles are equal when they refer to the same platform device path,
/// whatever else differs between them.
#[derive(Debug, Clone)]
pub struct DeviceHandle {
    /// Platform-specific device path, used as the device's identity.
    pub path: String,
    /// USB vendor ID.
    pub vendor_id: u16,
    /// USB product ID.
    pub product_id: u16,
    /// USB interface number of the HID function, or -1 if the platform does not
    /// report it.
    pub interface_number: i32,
    /// USB serial number string, if the device has one.
    pub serial_number: Option<String>,
    /// USB product string, if the device has one.
    pub product: Option<String>,
}

impl PartialEq for DeviceHandle {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DeviceHandle {}

impl std::hash::Hash for DeviceHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl std::fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:04X}:{:04X}",
            self.product.as_deref().unwrap_or("MCP2200"),
            self.vendor_id,
            self.product_id
        )?;
        if let Some(serial) = &self.serial_number {
            write!(f, ", serial {serial}")?;
        }
        write!(f, ") at {}", self.path)
    }
}

/// Blocking exchange of fixed-size reports with one open device.
///
/// The MCP2200 protocol is strictly request/response, so implementations never
/// need to handle a read and a write in flight at the same time. There is no
/// timeout: a read blocks until the device answers.
pub trait Transport {
    /// Read exactly one 16-byte report.
    fn read_report(&self) -> Result<Report, Error>;

    /// Write exactly one 16-byte report.
    ///
    /// Fails unless the whole report was accepted.
    fn write_report(&self, report: &Report) -> Result<(), Error>;

    /// The device this transport is connected to.
    fn handle(&self) -> &DeviceHandle;

    /// Release the device.
    ///
    /// Never fails: any error while releasing is logged and dropped.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

/// Discovery of MCP2200 devices and opening of a [`Transport`] to one of them.
pub trait UsbBus {
    /// Transport produced when a device is opened.
    type Transport: Transport;

    /// List every device with the given vendor and product ID, in a stable order.
    ///
    /// No device is opened. Finding nothing is not an error.
    fn discover(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceHandle>, Error>;

    /// Open and claim the given device.
    ///
    /// If this fails nothing is left claimed.
    fn open(&self, handle: &DeviceHandle) -> Result<Self::Transport, Error>;

    /// Open the `index`-th device with the given vendor and product ID.
    ///
    /// # Errors
    ///
    /// [`Error::DeviceIndex`] if fewer than `index + 1` devices are present.
    fn connect(
        &mut self,
        vendor_id: u16,
        product_id: u16,
        index: usize,
    ) -> Result<Self::Transport, Error> {
        let handles = self.discover(vendor_id, product_id)?;
        let handle = handles.get(index).ok_or(Error::DeviceIndex {
            index,
            available: handles.len(),
        })?;
        self.open(handle)
    }
}
