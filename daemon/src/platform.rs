//! Contracts between the activation core and a display-server backend.
//!
//! Everything the core cannot do portably (capturing input, drawing
//! overlays, warping the pointer) sits behind [`Platform`]. A frontend
//! crate implements the trait for its display server and calls
//! [`crate::app::run`] from inside whatever event-loop context the backend
//! needs. The core never blocks anywhere except inside these calls.

use anyhow::Result;

use crate::input::InputEvent;
use crate::state_machine::DragState;

/// Pointer buttons a drag toggle can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
}

/// Low-level pointer button control.
///
/// Split from [`Platform`] so the drag toggle can drive the buttons while
/// the owning backend is re-entered as a mode runner.
pub trait PointerOps {
    fn button_down(&mut self, button: Button);
    fn button_up(&mut self, button: Button);
}

/// A display-server backend: input capture, the four mode runners, and
/// the key and screen queries around them.
pub trait Platform: PointerOps {
    /// Resolves a configured binding string (e.g. `"A-M-x"`) against the
    /// backend's key table. `None` means the name is not recognised.
    fn parse_binding(&self, spec: &str) -> Option<InputEvent>;

    /// Human-readable name for a key code, if the backend knows one.
    /// Drives `--list-keys`.
    fn key_name(&self, code: u8) -> Option<String>;

    /// Pixel dimensions of the screen currently under the pointer.
    /// Positive for any existing display.
    fn active_screen_size(&mut self) -> (u32, u32);

    /// Blocks until one of `candidates` fires and returns it, or `None`
    /// on an aborted wait (the backend's shutdown signal).
    fn input_wait(&mut self, candidates: &[InputEvent]) -> Option<InputEvent>;

    /// Prepares pointer control before the first mode runs.
    fn init_pointer(&mut self) {}

    /// Prepares the hint engine before the first mode runs.
    fn init_hints(&mut self) {}

    /// Drives live pointer movement until an activation-class event ends
    /// it. `prev` is the event that terminated the previous mode, if any;
    /// the return value is this invocation's terminating event, or `None`
    /// on an aborted interaction. Drag gestures go through `drag` so the
    /// state machine can guarantee release when the run ends.
    fn normal_mode(&mut self, prev: Option<InputEvent>, drag: &mut DragState)
        -> Option<InputEvent>;

    /// Drives the hint overlay interaction. `Err` signals abnormal
    /// termination and ends the whole state-machine run.
    fn hint_mode(&mut self) -> Result<()>;

    /// Drives grid navigation; returns its terminating event, if any.
    fn grid_mode(&mut self) -> Option<InputEvent>;

    /// Drives screen selection. Its terminating event is not consumed.
    fn screen_selection_mode(&mut self);
}
