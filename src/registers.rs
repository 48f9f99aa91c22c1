use crate::channel::{CHANNEL_COUNT, Channel};

/// Register on the IS31FL3236.
///
/// All registers are write-only.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Register {
    /// Software shutdown (00h). 0 shuts the outputs down, 1 is normal operation.
    Shutdown,
    /// PWM duty cycle of a channel (01h~24h).
    Pwm(Channel),
    /// Latches the PWM and LED control registers (25h).
    ///
    /// Writes to those registers are held until any value is written here.
    Update,
    /// Output state and current divisor of a channel (26h~49h).
    LedControl(Channel),
    /// PWM output frequency (4Bh).
    OutputFrequency,
    /// Returns every register to its power-on default (4Fh).
    Reset,
}

impl Register {
    const PWM_BASE: u8 = 0x01;
    const LED_CONTROL_BASE: u8 = 0x26;

    /// Address written as the first byte of an I2C transfer.
    pub(crate) fn address(&self) -> u8 {
        match self {
            Self::Shutdown => 0x00,
            Self::Pwm(channel) => Self::PWM_BASE + channel.index() as u8,
            Self::Update => 0x25,
            Self::LedControl(channel) => Self::LED_CONTROL_BASE + channel.index() as u8,
            Self::OutputFrequency => 0x4B,
            Self::Reset => 0x4F,
        }
    }
}

/// Value written to the update register. The chip ignores it.
pub(crate) const UPDATE_VALUE: u8 = 0x00;
/// Value written to the reset register. The chip ignores it.
pub(crate) const RESET_VALUE: u8 = 0x00;
/// Software shutdown register value for shutdown.
pub(crate) const SHUTDOWN_VALUE: u8 = 0x00;
/// Software shutdown register value for normal operation.
pub(crate) const NORMAL_OPERATION_VALUE: u8 = 0x01;

/// Largest transfer: register address plus one byte for each channel.
const MAX_WRITE_LENGTH: usize = CHANNEL_COUNT + 1;

/// An outgoing I2C write of one or more consecutive registers.
///
/// The IS31FL3236 increments its register address after each data byte, so the data
/// bytes after the first land in the following registers.
pub(crate) struct RegisterWrite {
    register: Register,
    buffer: [u8; MAX_WRITE_LENGTH],
    length: usize,
}

impl RegisterWrite {
    /// Start a write at the given register, with no data bytes yet.
    pub(crate) fn new(register: Register) -> Self {
        let mut buffer = [0u8; MAX_WRITE_LENGTH];
        buffer[0] = register.address();
        Self {
            register,
            buffer,
            length: 1,
        }
    }

    /// Write a single byte to a single register.
    pub(crate) fn single(register: Register, value: u8) -> Self {
        let mut write = Self::new(register);
        write.push(value);
        write
    }

    /// Append a data byte.
    ///
    /// At most 36 data bytes fit, one for every channel.
    pub(crate) fn push(&mut self, value: u8) {
        assert!(
            self.length < MAX_WRITE_LENGTH,
            "Register write longer than {CHANNEL_COUNT} data bytes."
        );
        self.buffer[self.length] = value;
        self.length += 1;
    }

    /// Append every byte from `values`.
    pub(crate) fn extend(&mut self, values: impl IntoIterator<Item = u8>) {
        for value in values {
            self.push(value);
        }
    }

    /// Append `count` copies of `value`.
    pub(crate) fn repeat(&mut self, value: u8, count: usize) {
        self.extend(core::iter::repeat_n(value, count));
    }

    pub(crate) fn register(&self) -> Register {
        self.register
    }

    /// Number of data bytes, not counting the register address.
    pub(crate) fn data_length(&self) -> usize {
        self.length - 1
    }

    /// Register address followed by the data bytes.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.length]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(n: u8) -> Channel {
        Channel::new(n).unwrap()
    }

    #[test]
    fn channel_register_addresses() {
        assert_eq!(Register::Pwm(channel(1)).address(), 0x01);
        assert_eq!(Register::Pwm(channel(36)).address(), 0x24);
        assert_eq!(Register::LedControl(channel(1)).address(), 0x26);
        assert_eq!(Register::LedControl(channel(36)).address(), 0x49);
    }

    #[test]
    fn single_byte_write() {
        let write = RegisterWrite::single(Register::OutputFrequency, 0x01);
        assert_eq!(write.as_bytes(), &[0x4B, 0x01]);
        assert_eq!(write.data_length(), 1);
    }

    #[test]
    fn full_length_write() {
        let mut write = RegisterWrite::new(Register::Pwm(channel(1)));
        write.repeat(0xAA, CHANNEL_COUNT);
        assert_eq!(write.as_bytes().len(), 37);
        assert_eq!(write.as_bytes()[0], 0x01);
        assert!(write.as_bytes()[1..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    #[should_panic(expected = "Register write longer than")]
    fn overlong_write_panics() {
        let mut write = RegisterWrite::new(Register::Pwm(channel(1)));
        write.repeat(0, CHANNEL_COUNT + 1);
    }
}
