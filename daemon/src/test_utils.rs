//! Scripted platform fake shared by the unit tests.

use std::collections::{HashMap, VecDeque};

use anyhow::{anyhow, Result};

use crate::config::{
    Bindings, Snapshot, DEFAULT_CURSOR_SIZE, DEFAULT_GRID_BORDER_SIZE, DEFAULT_GRID_SIZE,
    DEFAULT_SPEED,
};
use crate::input::InputEvent;
use crate::platform::{Button, Platform, PointerOps};
use crate::state_machine::DragState;

/// Shorthand for an unmodified event with the given code.
pub fn ev(code: u16) -> InputEvent {
    InputEvent::new(code, 0)
}

/// A snapshot whose ten bindings are the distinct events produced by
/// [`ScriptedPlatform::new`]'s key table.
pub fn test_snapshot() -> Snapshot {
    Snapshot {
        bindings: Bindings {
            activation: ev(1),
            hint_activation: ev(2),
            grid_activation: ev(3),
            screen_activation: ev(4),
            hint_oneshot: ev(5),
            hint: ev(10),
            grid: ev(11),
            screen: ev(12),
            exit: ev(13),
            grid_exit: ev(14),
        },
        speed: DEFAULT_SPEED,
        cursor_size: DEFAULT_CURSOR_SIZE,
        grid_size: DEFAULT_GRID_SIZE,
        grid_border_size: DEFAULT_GRID_BORDER_SIZE,
    }
}

/// Everything the fake was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    InitPointer,
    InitHints,
    InputWait(Vec<InputEvent>),
    NormalMode(Option<InputEvent>),
    HintMode,
    GridMode,
    ScreenSelection,
    ButtonDown(Button),
    ButtonUp(Button),
}

/// One scripted normal-mode invocation.
pub struct NormalStep {
    /// Toggle the drag gesture this many times before returning.
    pub toggles: u32,
    pub returns: Option<InputEvent>,
}

impl NormalStep {
    pub fn ret(returns: Option<InputEvent>) -> Self {
        Self {
            toggles: 0,
            returns,
        }
    }

    pub fn toggled(toggles: u32, returns: Option<InputEvent>) -> Self {
        Self { toggles, returns }
    }
}

/// A platform whose collaborators replay scripted results and record
/// every call they see. Exhausted scripts return "no event" (or success,
/// for the hint runner), so a forgotten script entry ends a loop instead
/// of hanging a test.
pub struct ScriptedPlatform {
    pub keymap: HashMap<String, InputEvent>,
    pub key_names: HashMap<u8, String>,
    pub screen_size: (u32, u32),
    pub wait_script: VecDeque<Option<InputEvent>>,
    pub normal_script: VecDeque<NormalStep>,
    pub hint_script: VecDeque<bool>,
    pub grid_script: VecDeque<Option<InputEvent>>,
    pub calls: Vec<Call>,
}

impl ScriptedPlatform {
    /// A fake on a 1920x1080 screen whose key table resolves the default
    /// configuration bindings to the events of [`test_snapshot`].
    pub fn new() -> Self {
        let keymap = [
            ("A-M-c", ev(1)),
            ("A-M-x", ev(2)),
            ("A-M-g", ev(3)),
            ("A-M-s", ev(4)),
            ("A-M-l", ev(5)),
            ("x", ev(10)),
            ("g", ev(11)),
            ("s", ev(12)),
            ("esc", ev(13)),
            ("c", ev(14)),
        ]
        .into_iter()
        .map(|(name, event)| (name.to_string(), event))
        .collect();

        Self {
            keymap,
            key_names: HashMap::new(),
            screen_size: (1920, 1080),
            wait_script: VecDeque::new(),
            normal_script: VecDeque::new(),
            hint_script: VecDeque::new(),
            grid_script: VecDeque::new(),
            calls: Vec::new(),
        }
    }
}

impl Default for ScriptedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerOps for ScriptedPlatform {
    fn button_down(&mut self, button: Button) {
        self.calls.push(Call::ButtonDown(button));
    }

    fn button_up(&mut self, button: Button) {
        self.calls.push(Call::ButtonUp(button));
    }
}

impl Platform for ScriptedPlatform {
    fn parse_binding(&self, spec: &str) -> Option<InputEvent> {
        self.keymap.get(spec).copied()
    }

    fn key_name(&self, code: u8) -> Option<String> {
        self.key_names.get(&code).cloned()
    }

    fn active_screen_size(&mut self) -> (u32, u32) {
        self.screen_size
    }

    fn input_wait(&mut self, candidates: &[InputEvent]) -> Option<InputEvent> {
        self.calls.push(Call::InputWait(candidates.to_vec()));
        self.wait_script.pop_front().flatten()
    }

    fn init_pointer(&mut self) {
        self.calls.push(Call::InitPointer);
    }

    fn init_hints(&mut self) {
        self.calls.push(Call::InitHints);
    }

    fn normal_mode(
        &mut self,
        prev: Option<InputEvent>,
        drag: &mut DragState,
    ) -> Option<InputEvent> {
        self.calls.push(Call::NormalMode(prev));
        match self.normal_script.pop_front() {
            Some(step) => {
                for _ in 0..step.toggles {
                    drag.toggle(self);
                }
                step.returns
            }
            None => None,
        }
    }

    fn hint_mode(&mut self) -> Result<()> {
        self.calls.push(Call::HintMode);
        match self.hint_script.pop_front() {
            Some(false) => Err(anyhow!("hint backend gave up")),
            _ => Ok(()),
        }
    }

    fn grid_mode(&mut self) -> Option<InputEvent> {
        self.calls.push(Call::GridMode);
        self.grid_script.pop_front().flatten()
    }

    fn screen_selection_mode(&mut self) {
        self.calls.push(Call::ScreenSelection);
    }
}
