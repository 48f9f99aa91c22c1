#![doc = include_str!("../README.md")]
#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod channel;
mod driver;
mod error;
mod registers;
pub mod settings;

pub use channel::{CHANNEL_COUNT, Channel, ChannelRange};
pub use driver::{Address, Is31fl3236, NoPin};
pub use error::{Error, ParameterError};
pub use settings::{ChannelSettings, ChannelSettingsChanges, CurrentDivisor, OutputFrequency};
