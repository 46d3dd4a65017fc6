#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod commands;
pub mod constants;
mod driver;
mod error;
pub mod gpio;
mod registry;
pub mod settings;
mod simple_io;
pub mod transport;

#[cfg(test)]
mod integration_tests;

pub use driver::MCP2200;
pub use error::Error;
pub use registry::DeviceRegistry;
pub use simple_io::SimpleIo;
