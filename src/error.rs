use core::fmt;

/// A parameter passed to the driver was outside the range the IS31FL3236 accepts.
///
/// These are always detected before any I2C traffic or change to the driver's
/// channel cache, so a rejected call leaves both the chip and the driver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterError {
    /// Channel number not in the range `1..=36`.
    ChannelOutOfRange(u8),
    /// Current divisor not in the range `1..=4`.
    InvalidCurrentDivisor(u8),
    /// Output frequency other than 3 kHz or 22 kHz.
    UnsupportedFrequency(u16),
    /// The number of duty cycle values given for a buffered write did not match
    /// the number of channels in the range.
    DutyCycleLengthMismatch {
        /// Number of channels in the requested range.
        expected: usize,
        /// Number of duty cycle values supplied.
        actual: usize,
    },
    /// I2C address does not fit in 7 bits.
    InvalidAddress(u8),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelOutOfRange(channel) => {
                write!(f, "channel {channel} is outside the range 1..=36")
            }
            Self::InvalidCurrentDivisor(divisor) => {
                write!(f, "current divisor {divisor} is outside the range 1..=4")
            }
            Self::UnsupportedFrequency(khz) => {
                write!(f, "output frequency {khz} kHz is not 3 or 22 kHz")
            }
            Self::DutyCycleLengthMismatch { expected, actual } => write!(
                f,
                "expected {expected} duty cycle values for the channel range, got {actual}"
            ),
            Self::InvalidAddress(address) => {
                write!(f, "I2C address {address:#04X} is not a 7-bit address")
            }
        }
    }
}

impl core::error::Error for ParameterError {}

/// Wrapper for problems when communicating with the IS31FL3236.
///
/// `I2cE` is the error type of the I2C bus and `PinE` the error type of the SDB
/// pin. When the driver has no SDB pin, `PinE` is [`core::convert::Infallible`].
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<I2cE, PinE> {
    /// The I2C write failed.
    ///
    /// The IS31FL3236 registers are write-only, so a failed write to an LED control
    /// register leaves the driver's channel cache ahead of the chip. Calling
    /// `initialize` again brings the two back in line.
    I2c(I2cE),
    /// Setting the level of the SDB pin failed.
    Pin(PinE),
    /// A parameter was rejected before anything was written.
    Parameter(ParameterError),
}

impl<I2cE, PinE> From<ParameterError> for Error<I2cE, PinE> {
    fn from(value: ParameterError) -> Self {
        Self::Parameter(value)
    }
}

impl<I2cE: fmt::Debug, PinE: fmt::Debug> fmt::Display for Error<I2cE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
            Self::Pin(e) => write!(f, "SDB pin error: {e:?}"),
            Self::Parameter(e) => write!(f, "invalid parameter: {e}"),
        }
    }
}

impl<I2cE: fmt::Debug, PinE: fmt::Debug> core::error::Error for Error<I2cE, PinE> {}
