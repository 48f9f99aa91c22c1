//! Hardware shutdown through the SDB pin.
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::i2c::I2c;
use log::debug;

use super::{DriverError, Is31fl3236};
use crate::error::Error;

/// How long SDB is held low by [`Is31fl3236::hard_reset`].
const HARD_RESET_HOLD_MS: u32 = 1;

/// Placeholder SDB pin type for drivers created without one.
///
/// This is the default `SDB` type of [`Is31fl3236`], so drivers created with
/// [`Is31fl3236::new`] can be named as `Is31fl3236<I2C>`.
#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<I2C: I2c, SDB: OutputPin> Is31fl3236<I2C, SDB> {
    /// Shut the chip down by pulling SDB low.
    ///
    /// This does nothing if the driver was created without an SDB pin. No I2C
    /// traffic is generated.
    pub fn hard_shutdown(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        debug!("IS31FL3236 {:#04X}: hardware shutdown", self.address.0);
        self.sdb_low()
    }

    /// Release hardware shutdown by driving SDB high.
    ///
    /// This does nothing if the driver was created without an SDB pin. It does not
    /// leave software shutdown; use [`Is31fl3236::enable`] for that.
    pub fn hard_enable(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        debug!("IS31FL3236 {:#04X}: hardware enable", self.address.0);
        self.sdb_high()
    }

    /// Pulse SDB low for 1 ms to recover the chip's I2C interface after a bus hang.
    ///
    /// Register contents and the channel cache are kept. This does nothing if the
    /// driver was created without an SDB pin.
    pub fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DriverError<I2C, SDB>> {
        if self.sdb.is_none() {
            debug!(
                "IS31FL3236 {:#04X}: hard reset skipped, no SDB pin",
                self.address.0
            );
            return Ok(());
        }
        debug!("IS31FL3236 {:#04X}: hard reset", self.address.0);
        self.sdb_low()?;
        delay.delay_ms(HARD_RESET_HOLD_MS);
        self.sdb_high()
    }

    pub(super) fn sdb_high(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        match self.sdb.as_mut() {
            Some(pin) => pin.set_high().map_err(Error::Pin),
            None => Ok(()),
        }
    }

    fn sdb_low(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        match self.sdb.as_mut() {
            Some(pin) => pin.set_low().map_err(Error::Pin),
            None => Ok(()),
        }
    }
}
