/// How a key press was decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressKind {
    /// Released before the long-press threshold
    Short,
    /// Held until the long-press threshold
    Long,
}

/// A decoded key press, as published to the event channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// `row * COL + col` of the key
    pub key_code: u16,
    /// The decoded character
    pub symbol: char,
    pub kind: PressKind,
}

impl KeyEvent {
    pub const fn short(key_code: u16, symbol: char) -> Self {
        Self {
            key_code,
            symbol,
            kind: PressKind::Short,
        }
    }

    pub const fn long(key_code: u16, symbol: char) -> Self {
        Self {
            key_code,
            symbol,
            kind: PressKind::Long,
        }
    }

    pub fn is_long(&self) -> bool {
        self.kind == PressKind::Long
    }
}
