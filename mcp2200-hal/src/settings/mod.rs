//! The MCP2200 configuration register file.
//!
//! The MCP2200 keeps its configuration in NVRAM and restores it at power-up. The
//! whole register file is read back with one command ([`MCP2200::read_all`]) and
//! written with another ([`MCP2200::configure`]); there is no way to write a single
//! field, so every change is a read-modify-write of a [`Configuration`].
//!
//! [`MCP2200::read_all`]: crate::MCP2200::read_all
//! [`MCP2200::configure`]: crate::MCP2200::configure

mod alt;
mod baud;
mod led;
mod nvram;

pub use alt::{AltOptions, AltPins, BlinkSpeed};
pub use baud::BaudDivisor;
pub use led::{Led, LedMode};
pub use nvram::{Configuration, EepromCell, NvramSettings};
