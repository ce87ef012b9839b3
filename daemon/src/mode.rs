//! The closed set of pointer-control modes.

use std::fmt;

/// The four mutually exclusive pointer-control behaviours.
///
/// `Normal` is the only mode whose terminating event selects the *next*
/// mode; the others always hand control back to `Normal` (or end the
/// activation run altogether).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Live pointer movement and drag.
    Normal,
    /// Overlay label selection.
    Hint,
    /// Recursive grid navigation.
    Grid,
    /// Multi-monitor region selection.
    ScreenSelection,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Normal => "normal",
            Mode::Hint => "hint",
            Mode::Grid => "grid",
            Mode::ScreenSelection => "screen-selection",
        })
    }
}
