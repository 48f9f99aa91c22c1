//! Per-channel and channel-range register writes.
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use super::{DriverError, Is31fl3236, validated};
use crate::channel::{Channel, ChannelRange};
use crate::error::ParameterError;
use crate::registers::{Register, RegisterWrite};
use crate::settings::{ChannelSettings, ChannelSettingsChanges};

impl<I2C: I2c, SDB: OutputPin> Is31fl3236<I2C, SDB> {
    /// Cached LED control settings of a channel.
    ///
    /// This is what the driver last wrote to the channel, not a reading from the chip.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::ChannelOutOfRange`] if `channel` is not in `1..=36`.
    pub fn channel_settings(&self, channel: u8) -> Result<ChannelSettings, ParameterError> {
        let channel = Channel::new(channel)?;
        Ok(self.cache[channel.index()])
    }

    /// Change the output state and/or current divisor of one channel.
    ///
    /// Only the fields set in `changes` are altered; the rest of the channel's
    /// settings are taken from the cache. The new value is written to the channel's
    /// LED control register and takes effect on the next update, or immediately if
    /// `update` is true.
    ///
    /// # Errors
    ///
    /// A channel outside `1..=36` is rejected before anything is written or cached.
    pub fn configure(
        &mut self,
        channel: u8,
        changes: ChannelSettingsChanges,
        update: bool,
    ) -> Result<(), DriverError<I2C, SDB>> {
        let channel = validated(Channel::new(channel))?;

        let settings = &mut self.cache[channel.index()];
        changes.apply_to(settings);
        let value = u8::from(*settings);

        self.write_registers(&RegisterWrite::single(Register::LedControl(channel), value))?;
        self.update_if(update)
    }

    /// Change the output state and/or current divisor of a range of channels.
    ///
    /// `first` and `last` are inclusive and may be given in either order. The changes
    /// are applied to each channel's cached settings as in [`Is31fl3236::configure`],
    /// and the whole range is then written in a single I2C transfer.
    ///
    /// # Errors
    ///
    /// If either endpoint is outside `1..=36` nothing is written or cached.
    pub fn multiconfigure(
        &mut self,
        first: u8,
        last: u8,
        changes: ChannelSettingsChanges,
        update: bool,
    ) -> Result<(), DriverError<I2C, SDB>> {
        let range = validated(ChannelRange::new(first, last))?;

        let cached = &mut self.cache[range.indices()];
        cached.iter_mut().for_each(|settings| changes.apply_to(settings));
        let mut write = RegisterWrite::new(Register::LedControl(range.first()));
        write.extend(cached.iter().copied().map(u8::from));

        self.write_registers(&write)?;
        self.update_if(update)
    }

    /// Set the PWM duty cycle of one channel.
    ///
    /// # Errors
    ///
    /// A channel outside `1..=36` is rejected before anything is written.
    pub fn write(
        &mut self,
        channel: u8,
        duty_cycle: u8,
        update: bool,
    ) -> Result<(), DriverError<I2C, SDB>> {
        let channel = validated(Channel::new(channel))?;
        self.write_registers(&RegisterWrite::single(Register::Pwm(channel), duty_cycle))?;
        self.update_if(update)
    }

    /// Set the same PWM duty cycle on a range of channels in one I2C transfer.
    ///
    /// `first` and `last` are inclusive and may be given in either order.
    ///
    /// # Errors
    ///
    /// If either endpoint is outside `1..=36` nothing is written.
    pub fn multiwrite(
        &mut self,
        first: u8,
        last: u8,
        duty_cycle: u8,
        update: bool,
    ) -> Result<(), DriverError<I2C, SDB>> {
        let range = validated(ChannelRange::new(first, last))?;
        let mut write = RegisterWrite::new(Register::Pwm(range.first()));
        write.repeat(duty_cycle, range.channel_count());
        self.write_registers(&write)?;
        self.update_if(update)
    }

    /// Set a different PWM duty cycle on each channel of a range in one I2C transfer.
    ///
    /// `duty_cycles[0]` goes to the lower of `first` and `last`, and so on upwards,
    /// whichever order the endpoints are given in.
    ///
    /// # Errors
    ///
    /// Nothing is written if either endpoint is outside `1..=36`, or if
    /// `duty_cycles` does not hold exactly one value per channel in the range
    /// ([`ParameterError::DutyCycleLengthMismatch`]).
    pub fn buffered_multiwrite(
        &mut self,
        first: u8,
        last: u8,
        duty_cycles: &[u8],
        update: bool,
    ) -> Result<(), DriverError<I2C, SDB>> {
        let range = validated(ChannelRange::new(first, last))?;
        if duty_cycles.len() != range.channel_count() {
            validated::<()>(Err(ParameterError::DutyCycleLengthMismatch {
                expected: range.channel_count(),
                actual: duty_cycles.len(),
            }))?;
        }

        let mut write = RegisterWrite::new(Register::Pwm(range.first()));
        write.extend(duty_cycles.iter().copied());
        self.write_registers(&write)?;
        self.update_if(update)
    }
}
