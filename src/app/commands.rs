//! Inbound commands to the application core.
//!
//! One ASCII byte per command, read from the serial link.  Anything that is
//! not one of the four letters (line endings included) decodes to
//! [`Command::Invalid`] so the dispatch `match` stays exhaustive.

/// Commands the controller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `o`: raise the barrier.
    Open,
    /// `c`: lower the barrier.
    Close,
    /// `s`: report occupancy.
    Status,
    /// `r`: force AVAILABLE + CLOSED.
    Reset,
    /// Any other byte, carried for logging.
    Invalid(u8),
}

impl Command {
    pub const OPEN: u8 = b'o';
    pub const CLOSE: u8 = b'c';
    pub const STATUS: u8 = b's';
    pub const RESET: u8 = b'r';

    pub fn from_byte(byte: u8) -> Self {
        match byte {
            Self::OPEN => Self::Open,
            Self::CLOSE => Self::Close,
            Self::STATUS => Self::Status,
            Self::RESET => Self::Reset,
            other => Self::Invalid(other),
        }
    }

    /// The wire byte for this command.
    pub fn byte(self) -> u8 {
        match self {
            Self::Open => Self::OPEN,
            Self::Close => Self::CLOSE,
            Self::Status => Self::STATUS,
            Self::Reset => Self::RESET,
            Self::Invalid(b) => b,
        }
    }
}
