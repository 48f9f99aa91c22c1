use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, I2c, SevenBitAddress};
use log::{debug, trace, warn};

use crate::channel::{CHANNEL_COUNT, Channel};
use crate::error::{Error, ParameterError};
use crate::registers::{
    NORMAL_OPERATION_VALUE, RESET_VALUE, Register, RegisterWrite, SHUTDOWN_VALUE, UPDATE_VALUE,
};
use crate::settings::{ChannelSettings, CurrentDivisor, OutputFrequency};

mod channels;
mod pins;

pub use pins::NoPin;

/// Error returned by the driver methods, for a given bus and SDB pin.
pub(crate) type DriverError<I2C, SDB> =
    Error<<I2C as i2c::ErrorType>::Error, <SDB as digital::ErrorType>::Error>;

/// Log and pass on a rejected parameter.
fn validated<T>(result: Result<T, ParameterError>) -> Result<T, ParameterError> {
    result.inspect_err(|e| warn!("IS31FL3236 call rejected: {e}"))
}

/// 7-bit I2C address of an IS31FL3236.
///
/// The chip's AD pin selects one of four addresses. Use the associated constants for
/// those, or [`Address::new`] for anything else (for example behind an address
/// translator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(SevenBitAddress);

impl Address {
    /// AD pin connected to GND.
    pub const AD_GND: Self = Self(0x3C);
    /// AD pin connected to SCL.
    pub const AD_SCL: Self = Self(0x3D);
    /// AD pin connected to SDA.
    pub const AD_SDA: Self = Self(0x3E);
    /// AD pin connected to VCC.
    pub const AD_VCC: Self = Self(0x3F);

    /// Use an arbitrary 7-bit address.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidAddress`] if `address` is above `0x7F`.
    pub const fn new(address: u8) -> Result<Self, ParameterError> {
        if address <= 0x7F {
            Ok(Self(address))
        } else {
            Err(ParameterError::InvalidAddress(address))
        }
    }

    /// The address as written on the bus.
    pub const fn value(self) -> SevenBitAddress {
        self.0
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::AD_GND
    }
}

impl TryFrom<u8> for Address {
    type Error = ParameterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for u8 {
    fn from(value: Address) -> Self {
        value.0
    }
}

/// Driver for the IS31FL3236.
///
/// # Quick start
///
/// Create the driver with [`Is31fl3236::new`], or [`Is31fl3236::with_shutdown_pin`]
/// if the chip's SDB line is wired to a GPIO. Nothing is written to the chip until
/// you call a method, and the first call should normally be
/// [`Is31fl3236::initialize`].
///
/// Duty cycle ([`write`](Is31fl3236::write) and friends) and channel settings
/// ([`configure`](Is31fl3236::configure) and friends) are only applied by the chip
/// once [`Is31fl3236::update`] is called. Each of those methods takes an `update`
/// flag to do this straight away.
///
/// # Channel cache
///
/// The chip's registers cannot be read, so the driver keeps a copy of what it last
/// wrote to each LED control register. The copy is updated before the I2C write, so
/// if a write fails the cache is ahead of the chip until the channel is configured
/// again. [`Is31fl3236::reset`] does not clear the cache.
#[derive(Debug)]
pub struct Is31fl3236<I2C, SDB = NoPin> {
    /// Bus the chip is attached to.
    i2c: I2C,
    /// Output driving the chip's active-low SDB (hardware shutdown) line.
    sdb: Option<SDB>,
    /// Bus address of the chip.
    address: Address,
    /// Last value written to each LED control register, indexed by channel - 1.
    cache: [ChannelSettings; CHANNEL_COUNT],
}

impl<I2C: I2c> Is31fl3236<I2C, NoPin> {
    /// Create a driver for a chip whose SDB line is not controlled by the host.
    ///
    /// The hardware shutdown methods do nothing on this driver.
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self::from_parts(i2c, None, address)
    }
}

impl<I2C: I2c, SDB: OutputPin> Is31fl3236<I2C, SDB> {
    ////////////////////////////////////////////////////////////////////////////////
    // Constructors
    ////////////////////////////////////////////////////////////////////////////////

    /// Create a driver that also controls the chip's SDB line through `sdb`.
    ///
    /// The pin is not driven until [`Is31fl3236::initialize`], [`Is31fl3236::enable`]
    /// or one of the hardware shutdown methods is called.
    pub fn with_shutdown_pin(i2c: I2C, address: Address, sdb: SDB) -> Self {
        Self::from_parts(i2c, Some(sdb), address)
    }

    fn from_parts(i2c: I2C, sdb: Option<SDB>, address: Address) -> Self {
        Self {
            i2c,
            sdb,
            address,
            cache: [ChannelSettings::default(); CHANNEL_COUNT],
        }
    }

    /// Bus address of the chip.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Destroy the driver, returning the I2C bus and the SDB pin (if any).
    pub fn release(self) -> (I2C, Option<SDB>) {
        (self.i2c, self.sdb)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Register access
    ////////////////////////////////////////////////////////////////////////////////

    /// Perform one I2C write of the register address and its data bytes.
    fn write_registers(&mut self, write: &RegisterWrite) -> Result<(), DriverError<I2C, SDB>> {
        trace!(
            "IS31FL3236 {:#04X}: write {:?}, {} byte(s)",
            self.address.0,
            write.register(),
            write.data_length()
        );
        self.i2c
            .write(self.address.0, write.as_bytes())
            .map_err(Error::I2c)
    }

    fn write_register(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), DriverError<I2C, SDB>> {
        self.write_registers(&RegisterWrite::single(register, value))
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Chip-wide control
    ////////////////////////////////////////////////////////////////////////////////

    /// Bring every channel to a known state.
    ///
    /// Releases hardware shutdown (if the driver has an SDB pin), sets all 36 channels
    /// to the given output state and current divisor, sets all duty cycles to
    /// `duty_cycle`, and latches the new values.
    ///
    /// This performs three I2C writes: one covering every LED control register, one
    /// covering every PWM register, and the update. The software shutdown state is
    /// not changed; after a power-on or [`Is31fl3236::reset`] the chip is in software
    /// shutdown, so call [`Is31fl3236::enable`] to light the outputs.
    pub fn initialize(
        &mut self,
        enabled: bool,
        current_divisor: CurrentDivisor,
        duty_cycle: u8,
    ) -> Result<(), DriverError<I2C, SDB>> {
        debug!(
            "IS31FL3236 {:#04X}: initialize (enabled: {enabled}, divisor: {}, duty cycle: {duty_cycle})",
            self.address.0,
            current_divisor.divisor()
        );
        self.sdb_high()?;

        let settings = ChannelSettings::new(enabled, current_divisor);
        self.cache = [settings; CHANNEL_COUNT];
        let mut led_control = RegisterWrite::new(Register::LedControl(Channel::FIRST));
        led_control.repeat(settings.into(), CHANNEL_COUNT);
        self.write_registers(&led_control)?;

        let mut pwm = RegisterWrite::new(Register::Pwm(Channel::FIRST));
        pwm.repeat(duty_cycle, CHANNEL_COUNT);
        self.write_registers(&pwm)?;

        self.update()
    }

    /// Latch every PWM and LED control register written since the last update.
    ///
    /// # Datasheet
    ///
    /// See the PWM update register (25h).
    pub fn update(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        self.write_register(Register::Update, UPDATE_VALUE)
    }

    /// Set the PWM output frequency of all channels.
    pub fn set_frequency(
        &mut self,
        frequency: OutputFrequency,
    ) -> Result<(), DriverError<I2C, SDB>> {
        debug!(
            "IS31FL3236 {:#04X}: output frequency {} kHz",
            self.address.0,
            frequency.khz()
        );
        self.write_register(Register::OutputFrequency, frequency.into())
    }

    /// Set the PWM output frequency from a value in kHz, either 3 or 22.
    ///
    /// # Errors
    ///
    /// Any other value is rejected with [`ParameterError::UnsupportedFrequency`] and
    /// nothing is written.
    pub fn set_frequency_khz(&mut self, khz: u16) -> Result<(), DriverError<I2C, SDB>> {
        let frequency = validated(OutputFrequency::try_from_khz(khz))?;
        self.set_frequency(frequency)
    }

    /// Turn off all outputs with the software shutdown register.
    ///
    /// Register contents are kept and the chip still accepts writes.
    pub fn shutdown(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        debug!("IS31FL3236 {:#04X}: software shutdown", self.address.0);
        self.write_register(Register::Shutdown, SHUTDOWN_VALUE)
    }

    /// Leave software shutdown.
    ///
    /// The SDB pin (if any) is driven high first, as a hardware shutdown would
    /// otherwise keep the outputs off.
    pub fn enable(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        debug!("IS31FL3236 {:#04X}: enable", self.address.0);
        self.sdb_high()?;
        self.write_register(Register::Shutdown, NORMAL_OPERATION_VALUE)
    }

    /// Return every register on the chip to its power-on default.
    ///
    /// <div class="warning">
    ///
    /// The driver's channel cache is not cleared, so it no longer matches the chip.
    /// Call [`Is31fl3236::initialize`] afterwards to bring the two back in line.
    ///
    /// </div>
    pub fn reset(&mut self) -> Result<(), DriverError<I2C, SDB>> {
        debug!("IS31FL3236 {:#04X}: register reset", self.address.0);
        self.write_register(Register::Reset, RESET_VALUE)
    }

    /// Write `update` to the update register if requested.
    fn update_if(&mut self, update: bool) -> Result<(), DriverError<I2C, SDB>> {
        if update { self.update() } else { Ok(()) }
    }
}
