//! The activation state machine: one loop that cycles the process through
//! pointer-control modes and owns the drag invariant.

use crate::config::Snapshot;
use crate::input::InputEvent;
use crate::mode::Mode;
use crate::platform::{Button, Platform, PointerOps};

/// The button a toggle-drag gesture holds down.
pub const DRAG_BUTTON: Button = Button::Left;

/// Whether the primary button is currently held as part of a toggle-drag
/// gesture.
///
/// Owned by [`StateMachine`] and handed to the normal-mode runner by
/// reference; all mutation goes through [`DragState::toggle`], so a run
/// can never leak a held button into the next one.
#[derive(Debug, Default)]
pub struct DragState {
    held: bool,
}

impl DragState {
    /// Flips the gesture and emits the matching button transition.
    pub fn toggle<P: PointerOps + ?Sized>(&mut self, pointer: &mut P) {
        self.held = !self.held;
        if self.held {
            pointer.button_down(DRAG_BUTTON);
        } else {
            pointer.button_up(DRAG_BUTTON);
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Emits a button-up if the gesture is still active.
    fn release<P: PointerOps + ?Sized>(&mut self, pointer: &mut P) {
        if self.held {
            self.toggle(pointer);
        }
    }
}

/// Runs modes back to back until one of them decides the interaction is
/// over.
#[derive(Debug, Default)]
pub struct StateMachine {
    drag: DragState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a toggle-drag gesture started by a mode runner is live.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_held()
    }

    /// Runs the activation loop starting in `initial` until a mode ends
    /// it.
    ///
    /// `Normal` picks the next mode from its terminating event, matching
    /// the `hint`, `grid`, `screen` and `exit` bindings in that priority
    /// order. `Hint` ends the whole run on abnormal termination and
    /// otherwise discards its event; `Grid` swallows the `grid_exit` key
    /// and forwards any other terminating event into the next `Normal`
    /// pass; `ScreenSelection` carries nothing forward. A held drag is
    /// released on every exit path.
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P, cfg: &Snapshot, initial: Mode) {
        self.drag = DragState::default();

        let mut mode = initial;
        let mut ev: Option<InputEvent> = None;

        loop {
            match mode {
                Mode::Normal => {
                    ev = platform.normal_mode(ev, &mut self.drag);

                    let b = &cfg.bindings;
                    if ev == Some(b.hint) {
                        mode = Mode::Hint;
                    } else if ev == Some(b.grid) {
                        mode = Mode::Grid;
                    } else if ev == Some(b.screen) {
                        mode = Mode::ScreenSelection;
                    } else if ev == Some(b.exit) || ev.is_none() {
                        break;
                    }
                    // Any other event stays in normal mode and is handed
                    // back to the runner on the next pass.
                }
                Mode::Hint => {
                    if let Err(err) = platform.hint_mode() {
                        eprintln!("[activation] hint mode failed: {err:#}");
                        break;
                    }
                    ev = None;
                    mode = Mode::Normal;
                }
                Mode::Grid => {
                    ev = platform.grid_mode();
                    // The grid-exit key only ends the grid; it must not
                    // double as a decision input for normal mode.
                    if ev == Some(cfg.bindings.grid_exit) {
                        ev = None;
                    }
                    mode = Mode::Normal;
                }
                Mode::ScreenSelection => {
                    // Screen selection never carries its terminating
                    // event forward.
                    platform.screen_selection_mode();
                    ev = None;
                    mode = Mode::Normal;
                }
            }
        }

        self.drag.release(platform);
    }
}
