//! Per-channel LED control settings and the global output frequency.

use bit_field::BitField;

use crate::ParameterError;

/// Bit in an LED control register that switches the channel output on.
const ENABLE_BIT: usize = 0;
/// Bits in an LED control register holding `divisor - 1`.
const CURRENT_BITS: core::ops::RangeInclusive<usize> = 1..=2;

/// Scaling of a channel's maximum output current.
///
/// The maximum current I<sub>max</sub> is set by the external R<sub>EXT</sub>
/// resistor; each channel can be limited to I<sub>max</sub> divided by 1 to 4.
///
/// ## Datasheet
///
/// See the LED control register (26h~49h) for the SL bits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurrentDivisor {
    /// Full I<sub>max</sub> (power-on default).
    #[default]
    One,
    /// I<sub>max</sub> / 2.
    Two,
    /// I<sub>max</sub> / 3.
    Three,
    /// I<sub>max</sub> / 4.
    Four,
}

impl CurrentDivisor {
    /// The divisor as a number from 1 to 4.
    pub const fn divisor(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Two-bit pattern stored in the LED control register.
    const fn bits(self) -> u8 {
        self.divisor() - 1
    }

    /// # Panics
    ///
    /// Panics if `bits` is wider than two bits.
    fn from_bits(bits: u8) -> Self {
        assert!(bits <= 0b11, "Invalid bit pattern for current divisor.");
        match bits {
            0b00 => Self::One,
            0b01 => Self::Two,
            0b10 => Self::Three,
            0b11 => Self::Four,
            _ => unreachable!("Precondition assert covers > 3."),
        }
    }
}

impl TryFrom<u8> for CurrentDivisor {
    type Error = ParameterError;

    /// Create a divisor from a number in the range `1..=4`.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(ParameterError::InvalidCurrentDivisor(other)),
        }
    }
}

impl From<CurrentDivisor> for u8 {
    fn from(value: CurrentDivisor) -> Self {
        value.divisor()
    }
}

/// PWM output frequency shared by all channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputFrequency {
    /// 3 kHz (power-on default).
    #[default]
    ThreeKhz,
    /// 22 kHz, above the audible range.
    TwentyTwoKhz,
}

impl OutputFrequency {
    /// Select the frequency from a value in kHz.
    ///
    /// # Errors
    ///
    /// Only 3 and 22 are accepted; anything else returns
    /// [`ParameterError::UnsupportedFrequency`].
    pub fn try_from_khz(khz: u16) -> Result<Self, ParameterError> {
        match khz {
            3 => Ok(Self::ThreeKhz),
            22 => Ok(Self::TwentyTwoKhz),
            other => Err(ParameterError::UnsupportedFrequency(other)),
        }
    }

    /// The frequency in kHz.
    pub const fn khz(self) -> u16 {
        match self {
            Self::ThreeKhz => 3,
            Self::TwentyTwoKhz => 22,
        }
    }
}

#[doc(hidden)]
impl From<OutputFrequency> for u8 {
    /// Value written to the output frequency register (4Bh).
    fn from(value: OutputFrequency) -> Self {
        match value {
            OutputFrequency::ThreeKhz => 0x00,
            OutputFrequency::TwentyTwoKhz => 0x01,
        }
    }
}

/// Contents of one channel's LED control register.
///
/// | Bit | Meaning |
/// |-----|---------|
/// | 0   | Output enabled |
/// | 1-2 | Current divisor - 1 |
/// | 3-7 | Reserved |
///
/// The reserved bits are carried through unchanged when the settings are modified.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSettings(u8);

impl ChannelSettings {
    /// Settings with the given output state and current divisor.
    pub fn new(enabled: bool, current_divisor: CurrentDivisor) -> Self {
        let mut byte = 0u8;
        byte.set_bit(ENABLE_BIT, enabled);
        byte.set_bits(CURRENT_BITS, current_divisor.bits());
        Self(byte)
    }

    /// Whether the channel output is switched on.
    pub fn enabled(&self) -> bool {
        self.0.get_bit(ENABLE_BIT)
    }

    /// Current divisor of the channel.
    pub fn current_divisor(&self) -> CurrentDivisor {
        CurrentDivisor::from_bits(self.0.get_bits(CURRENT_BITS))
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.0.set_bit(ENABLE_BIT, enabled);
    }

    fn set_current_divisor(&mut self, divisor: CurrentDivisor) {
        self.0.set_bits(CURRENT_BITS, divisor.bits());
    }
}

#[doc(hidden)]
impl From<u8> for ChannelSettings {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

#[doc(hidden)]
impl From<ChannelSettings> for u8 {
    fn from(value: ChannelSettings) -> Self {
        value.0
    }
}

/// Changes to be applied to one or more channels' LED control settings.
///
/// Fields left as `None` keep their current value, so the output can be switched on
/// or off without knowing the channel's current divisor, and vice versa.
///
/// ```rust
/// # use is31fl3236_hal::{ChannelSettingsChanges, CurrentDivisor};
/// // Switch on, keeping the current divisor.
/// let on = ChannelSettingsChanges::new().with_enabled(true);
///
/// // Both at once.
/// let dim = ChannelSettingsChanges::new()
///     .with_enabled(true)
///     .with_current_divisor(CurrentDivisor::Four);
/// # let _ = (on, dim);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSettingsChanges {
    /// If `Some`, switch the output on or off.
    enabled: Option<bool>,
    /// If `Some`, change the current divisor.
    current_divisor: Option<CurrentDivisor>,
}

impl ChannelSettingsChanges {
    /// Create an empty set of changes.
    pub const fn new() -> Self {
        Self {
            enabled: None,
            current_divisor: None,
        }
    }

    /// Switch the output on or off.
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Change the current divisor.
    pub const fn with_current_divisor(mut self, divisor: CurrentDivisor) -> Self {
        self.current_divisor = Some(divisor);
        self
    }

    /// The output state change, if any.
    pub const fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// The current divisor change, if any.
    pub const fn current_divisor(&self) -> Option<CurrentDivisor> {
        self.current_divisor
    }

    /// Overwrite only the fields that are set, leaving all other bits alone.
    pub fn apply_to(&self, settings: &mut ChannelSettings) {
        if let Some(enabled) = self.enabled {
            settings.set_enabled(enabled);
        }
        if let Some(divisor) = self.current_divisor {
            settings.set_current_divisor(divisor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_matches_register_layout() {
        for divisor in 1..=4u8 {
            for enabled in [false, true] {
                let settings = ChannelSettings::new(enabled, divisor.try_into().unwrap());
                let expected = ((divisor - 1) << 1) | enabled as u8;
                assert_eq!(u8::from(settings), expected);
                assert_eq!(settings.enabled(), enabled);
                assert_eq!(settings.current_divisor().divisor(), divisor);
            }
        }
    }

    #[test]
    fn divisor_bounds() {
        assert_eq!(
            CurrentDivisor::try_from(0),
            Err(ParameterError::InvalidCurrentDivisor(0))
        );
        assert_eq!(
            CurrentDivisor::try_from(5),
            Err(ParameterError::InvalidCurrentDivisor(5))
        );
        assert_eq!(CurrentDivisor::try_from(3), Ok(CurrentDivisor::Three));
    }

    #[test]
    fn frequency_from_khz() {
        assert_eq!(OutputFrequency::try_from_khz(3), Ok(OutputFrequency::ThreeKhz));
        assert_eq!(
            OutputFrequency::try_from_khz(22),
            Ok(OutputFrequency::TwentyTwoKhz)
        );
        assert_eq!(
            OutputFrequency::try_from_khz(5),
            Err(ParameterError::UnsupportedFrequency(5))
        );
        assert_eq!(u8::from(OutputFrequency::TwentyTwoKhz), 0x01);
    }

    #[test]
    fn empty_changes_leave_settings_alone() {
        let mut settings = ChannelSettings::from(0b1010_0101);
        ChannelSettingsChanges::new().apply_to(&mut settings);
        assert_eq!(u8::from(settings), 0b1010_0101);
    }

    #[test]
    fn state_change_keeps_divisor_and_reserved_bits() {
        let mut settings = ChannelSettings::from(0b1111_1101);
        ChannelSettingsChanges::new()
            .with_enabled(false)
            .apply_to(&mut settings);
        assert_eq!(u8::from(settings), 0b1111_1100);
        assert_eq!(settings.current_divisor(), CurrentDivisor::Three);
    }

    #[test]
    fn divisor_change_keeps_state_and_reserved_bits() {
        let mut settings = ChannelSettings::from(0b1111_1001);
        ChannelSettingsChanges::new()
            .with_current_divisor(CurrentDivisor::Two)
            .apply_to(&mut settings);
        assert_eq!(u8::from(settings), 0b1111_1011);
        assert!(settings.enabled());
    }
}
