//! Channel numbers and ranges of channels.
//!
//! Channels are numbered from 1 to 36, matching the OUT1 to OUT36 pins in the
//! datasheet. Their PWM and LED control registers are laid out contiguously, so a
//! [`ChannelRange`] maps directly onto a run of registers that can be written in one
//! I2C transfer using the chip's register address auto-increment.

use crate::ParameterError;

/// Number of output channels on the IS31FL3236.
pub const CHANNEL_COUNT: usize = 36;

/// A channel number in the range `1..=36`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// The first channel, OUT1.
    pub const FIRST: Self = Self(1);
    /// The last channel, OUT36.
    pub const LAST: Self = Self(CHANNEL_COUNT as u8);

    /// Create a channel from its 1-based number.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::ChannelOutOfRange`] if `number` is 0 or above 36.
    pub const fn new(number: u8) -> Result<Self, ParameterError> {
        if number >= 1 && number as usize <= CHANNEL_COUNT {
            Ok(Self(number))
        } else {
            Err(ParameterError::ChannelOutOfRange(number))
        }
    }

    /// The 1-based channel number.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Position of this channel's entry in a 36-element array.
    pub(crate) const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u8> for Channel {
    type Error = ParameterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Channel> for u8 {
    fn from(value: Channel) -> Self {
        value.0
    }
}

/// An inclusive range of channels, always ordered low to high.
///
/// The endpoints may be given in either order; `ChannelRange::new(5, 2)` and
/// `ChannelRange::new(2, 5)` are the same range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelRange {
    first: Channel,
    last: Channel,
}

impl ChannelRange {
    /// Create a range from two channel numbers given in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::ChannelOutOfRange`] if either endpoint is outside
    /// `1..=36`. The first endpoint is checked first.
    pub fn new(a: u8, b: u8) -> Result<Self, ParameterError> {
        let a = Channel::new(a)?;
        let b = Channel::new(b)?;
        Ok(Self::from_channels(a, b))
    }

    /// Create a range from two channels given in any order.
    pub fn from_channels(a: Channel, b: Channel) -> Self {
        Self {
            first: a.min(b),
            last: a.max(b),
        }
    }

    /// Every channel, OUT1 through OUT36.
    pub const fn all() -> Self {
        Self {
            first: Channel::FIRST,
            last: Channel::LAST,
        }
    }

    /// Lowest channel in the range.
    pub const fn first(&self) -> Channel {
        self.first
    }

    /// Highest channel in the range.
    pub const fn last(&self) -> Channel {
        self.last
    }

    /// Number of channels in the range (at least 1).
    pub const fn channel_count(&self) -> usize {
        (self.last.0 - self.first.0) as usize + 1
    }

    /// Array indices covered by the range, for slicing a 36-element array.
    pub(crate) fn indices(&self) -> core::ops::RangeInclusive<usize> {
        self.first.index()..=self.last.index()
    }

    /// Channels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Channel> + use<> {
        (self.first.0..=self.last.0).map(Channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bounds() {
        assert_eq!(Channel::new(0), Err(ParameterError::ChannelOutOfRange(0)));
        assert_eq!(Channel::new(37), Err(ParameterError::ChannelOutOfRange(37)));
        assert_eq!(Channel::new(1).map(Channel::number), Ok(1));
        assert_eq!(Channel::new(36).map(Channel::number), Ok(36));
        assert_eq!(Channel::LAST.index(), 35);
    }

    #[test]
    fn range_endpoints_are_normalised() {
        let forwards = ChannelRange::new(2, 5).unwrap();
        let backwards = ChannelRange::new(5, 2).unwrap();
        assert_eq!(forwards, backwards);
        assert_eq!(backwards.first().number(), 2);
        assert_eq!(backwards.last().number(), 5);
        assert_eq!(backwards.channel_count(), 4);
        assert_eq!(backwards.indices(), 1..=4);
    }

    #[test]
    fn single_channel_range() {
        let range = ChannelRange::new(36, 36).unwrap();
        assert_eq!(range.channel_count(), 1);
        assert!(range.iter().map(Channel::number).eq([36]));
    }

    #[test]
    fn range_rejects_either_endpoint() {
        assert_eq!(
            ChannelRange::new(0, 4),
            Err(ParameterError::ChannelOutOfRange(0))
        );
        assert_eq!(
            ChannelRange::new(4, 40),
            Err(ParameterError::ChannelOutOfRange(40))
        );
    }

    #[test]
    fn all_channels() {
        let all = ChannelRange::all();
        assert_eq!(all.channel_count(), CHANNEL_COUNT);
        assert_eq!(all.indices(), 0..=35);
    }
}
