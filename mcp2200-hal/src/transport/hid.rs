use hidapi::{DeviceInfo, HidApi, HidDevice, HidError};
use tracing::{debug, info};

use super::{DeviceHandle, Transport, UsbBus};
use crate::Error;
use crate::commands::Report;
use crate::constants::{HID_INTERFACE, REPORT_SIZE};

/// Device discovery through the host's HID stack.
///
/// The C hidapi library is not thread safe and the `hidapi` types are
/// appropriately `!Sync`, so keep one `HidBus` per thread.
pub struct HidBus {
    api: HidApi,
}

impl HidBus {
    /// Initialise the HID library.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            api: HidApi::new()?,
        })
    }

    fn find_info(&self, handle: &DeviceHandle) -> Option<&DeviceInfo> {
        self.api
            .device_list()
            .find(|info| info.path().to_string_lossy() == handle.path)
    }
}

impl From<&DeviceInfo> for DeviceHandle {
    fn from(info: &DeviceInfo) -> Self {
        Self {
            path: info.path().to_string_lossy().into_owned(),
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            interface_number: info.interface_number(),
            serial_number: info.serial_number().map(str::to_owned),
            product: info.product_string().map(str::to_owned),
        }
    }
}

impl UsbBus for HidBus {
    type Transport = HidTransport;

    fn discover(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceHandle>, Error> {
        self.api.refresh_devices()?;
        let mut handles: Vec<DeviceHandle> = Vec::new();
        for info in self.api.device_list() {
            // Backends that cannot report the interface number give -1.
            let is_hid_interface = matches!(info.interface_number(), HID_INTERFACE | -1);
            if info.vendor_id() != vendor_id || info.product_id() != product_id || !is_hid_interface
            {
                continue;
            }
            let handle = DeviceHandle::from(info);
            // Some platforms list one entry per HID usage of the same device.
            if !handles.contains(&handle) {
                handles.push(handle);
            }
        }
        debug!(
            vendor_id = format_args!("{vendor_id:#06X}"),
            product_id = format_args!("{product_id:#06X}"),
            found = handles.len(),
            "HID discovery"
        );
        Ok(handles)
    }

    fn open(&self, handle: &DeviceHandle) -> Result<HidTransport, Error> {
        let open_error = |source| Error::Open {
            path: handle.path.clone(),
            source,
        };
        let info = self.find_info(handle).ok_or_else(|| {
            open_error(HidError::HidApiError {
                message: "device is no longer present".into(),
            })
        })?;
        // Opening claims the interface, detaching the kernel driver first where the
        // backend needs to. Both are undone when the device is dropped.
        let device = info.open_device(&self.api).map_err(open_error)?;
        info!(path = %handle.path, "opened MCP2200");
        Ok(HidTransport {
            device,
            handle: handle.clone(),
        })
    }
}

/// An open MCP2200 HID interface.
#[derive(Debug)]
pub struct HidTransport {
    device: HidDevice,
    handle: DeviceHandle,
}

impl Transport for HidTransport {
    fn read_report(&self) -> Result<Report, Error> {
        let mut report = [0u8; REPORT_SIZE];
        let read = self.device.read(&mut report)?;
        if read != REPORT_SIZE {
            return Err(Error::ShortRead { read });
        }
        Ok(report)
    }

    fn write_report(&self, report: &Report) -> Result<(), Error> {
        // hidapi expects the report number first; the MCP2200 only uses report 0.
        let mut out = [0u8; REPORT_SIZE + 1];
        out[1..].copy_from_slice(report);
        let written = self.device.write(&out)?;
        if written != out.len() {
            return Err(Error::ShortWrite {
                written,
                expected: out.len(),
            });
        }
        Ok(())
    }

    fn handle(&self) -> &DeviceHandle {
        &self.handle
    }

    fn close(self) {
        info!(path = %self.handle.path, "closing MCP2200");
    }
}
