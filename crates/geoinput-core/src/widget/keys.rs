/// Keys the widget intercepts, identified by browser key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    /// Anything else; always passed through to ordinary text editing.
    Other(u32),
}

impl NavKey {
    pub const DOWN_CODE: u32 = 40;
    pub const UP_CODE: u32 = 38;
    pub const ENTER_CODE: u32 = 13;

    pub fn from_code(code: u32) -> Self {
        match code {
            Self::DOWN_CODE => Self::Down,
            Self::UP_CODE => Self::Up,
            Self::ENTER_CODE => Self::Enter,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::Down => Self::DOWN_CODE,
            Self::Up => Self::UP_CODE,
            Self::Enter => Self::ENTER_CODE,
            Self::Other(code) => code,
        }
    }
}

/// What the host should do with the key after the widget saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Handled by the widget; suppress the default behavior.
    Consumed,
    PassThrough,
}

impl KeyOutcome {
    pub fn prevents_default(self) -> bool {
        self == Self::Consumed
    }
}
