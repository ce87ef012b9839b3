//! Input-event values exchanged with the platform layer.
//!
//! An [`InputEvent`] is an opaque token for one discrete key or button
//! chord. The core only ever compares events for equality; what a code
//! means, and how a binding string such as `"A-M-x"` maps onto one, is the
//! backend's business (see [`crate::platform::Platform::parse_binding`]).

use std::fmt;

pub const MOD_CTRL: u8 = 1 << 0;
pub const MOD_SHIFT: u8 = 1 << 1;
pub const MOD_ALT: u8 = 1 << 2;
pub const MOD_META: u8 = 1 << 3;

/// One discrete activation trigger (a key or button chord).
///
/// Two events are equal iff they denote the same physical trigger. The
/// distinguished "no event" value is `Option::<InputEvent>::None`, which
/// never compares equal to a concrete event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    /// Backend key code.
    pub code: u16,
    /// Bitmask of `MOD_*` values.
    pub mods: u8,
}

impl InputEvent {
    pub fn new(code: u16, mods: u8) -> Self {
        Self { code, mods }
    }
}

impl fmt::Display for InputEvent {
    /// Key names live behind the platform seam, so log lines render the
    /// modifier prefixes plus the raw code, e.g. `A-M-<56>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods & MOD_CTRL != 0 {
            write!(f, "C-")?;
        }
        if self.mods & MOD_SHIFT != 0 {
            write!(f, "S-")?;
        }
        if self.mods & MOD_ALT != 0 {
            write!(f, "A-")?;
        }
        if self.mods & MOD_META != 0 {
            write!(f, "M-")?;
        }
        write!(f, "<{}>", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_code_plus_mods() {
        assert_eq!(InputEvent::new(56, MOD_ALT), InputEvent::new(56, MOD_ALT));
        assert_ne!(InputEvent::new(56, MOD_ALT), InputEvent::new(56, 0));
        assert_ne!(InputEvent::new(56, MOD_ALT), InputEvent::new(57, MOD_ALT));
    }

    #[test]
    fn none_never_equals_a_concrete_event() {
        let ev = Some(InputEvent::new(1, 0));
        assert_ne!(ev, None);
        assert_eq!(None::<InputEvent>, None::<InputEvent>);
    }

    #[test]
    fn display_renders_modifier_prefixes() {
        let ev = InputEvent::new(56, MOD_ALT | MOD_META);
        assert_eq!(ev.to_string(), "A-M-<56>");
        assert_eq!(InputEvent::new(9, 0).to_string(), "<9>");
    }
}
