use crate::transport::DeviceHandle;

/// The MCP2200s found for one vendor and product ID, and which of them is selected.
///
/// The registry only records the selection. Opening and closing the selected
/// device is left to its owner, [`SimpleIo`](crate::SimpleIo).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistry {
    handles: Vec<DeviceHandle>,
    selected: Option<usize>,
}

impl DeviceRegistry {
    /// Registry over the given devices, none selected.
    pub fn new(handles: Vec<DeviceHandle>) -> Self {
        Self {
            handles,
            selected: None,
        }
    }

    /// Number of devices found.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no devices were found.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The device at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&DeviceHandle> {
        self.handles.get(index)
    }

    /// Every device found, in discovery order.
    pub fn handles(&self) -> &[DeviceHandle] {
        &self.handles
    }

    /// Index of the selected device.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected device.
    pub fn selected_handle(&self) -> Option<&DeviceHandle> {
        self.selected.and_then(|index| self.handles.get(index))
    }

    /// Mark the device at `index` as selected.
    ///
    /// An index with no device leaves the selection as it was and returns `None`.
    pub(crate) fn select(&mut self, index: usize) -> Option<&DeviceHandle> {
        let handle = self.handles.get(index)?;
        self.selected = Some(index);
        Some(handle)
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }
}
