use core::fmt;

/// Errors raised while building a scanner.
///
/// Every variant is a misconfiguration. They are reported by the constructors, before the
/// first row is ever asserted, so a running scanner never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadError {
    /// The matrix has no rows or no columns
    EmptyMatrix,
    /// The short symbol table doesn't have one entry per key
    ShortSymbolCount { expected: usize, actual: usize },
    /// The long symbol table doesn't have one entry per key
    LongSymbolCount { expected: usize, actual: usize },
    /// The matrix has more keys than a key code can address
    TooManyKeys(usize),
    /// A long-press threshold of zero samples
    ZeroLongPressThreshold,
    /// A periodic tick rate of 0 Hz
    ZeroTickRate,
    /// A cooperative scan cycle budget of 0 ms
    ZeroCycleBudget,
    /// The channel handed to the scanner doesn't have the configured capacity
    ChannelCapacityMismatch { configured: usize, actual: usize },
    /// The interrupt scanner can only publish through the overwrite channel
    OverwriteChannelRequired,
}

impl fmt::Display for KeypadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeypadError::EmptyMatrix => write!(f, "keypad matrix must have at least one row and one column"),
            KeypadError::ShortSymbolCount { expected, actual } => {
                write!(f, "expected {} short symbols, got {}", expected, actual)
            }
            KeypadError::LongSymbolCount { expected, actual } => {
                write!(f, "expected {} long symbols, got {}", expected, actual)
            }
            KeypadError::TooManyKeys(keys) => write!(f, "{} keys can't be addressed by a 16-bit key code", keys),
            KeypadError::ZeroLongPressThreshold => write!(f, "long keypress count must be at least 1"),
            KeypadError::ZeroTickRate => write!(f, "tick rate must be at least 1 Hz"),
            KeypadError::ZeroCycleBudget => write!(f, "scan cycle budget must be at least 1 ms"),
            KeypadError::ChannelCapacityMismatch { configured, actual } => write!(
                f,
                "channel capacity is configured as {} but the channel holds {}",
                configured, actual
            ),
            KeypadError::OverwriteChannelRequired => {
                write!(f, "the interrupt scanner requires channel capacity 0 (overwrite slot)")
            }
        }
    }
}

impl core::error::Error for KeypadError {}
