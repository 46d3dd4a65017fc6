//! Digital input and output on the eight GP pins.
//!
//! Single pins and the whole port can be driven through methods on
//! [`MCP2200`](crate::MCP2200) directly. For [`embedded_hal::digital`] support,
//! take the [`Pins`] from the driver and convert each [`GpPin`] into an [`Input`] or
//! [`Output`].

mod common;
mod pins;

pub use common::{GpioDirection, LogicLevel, PinNumber};
pub use pins::{GpPin, Input, Output, Pins};
