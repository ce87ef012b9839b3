//! The daemon and oneshot drivers around the state machine.

use crate::config::Snapshot;
use crate::mode::Mode;
use crate::platform::Platform;
use crate::state_machine::StateMachine;

/// Normalizes the tunables against the active screen and readies the two
/// collaborators every mode depends on.
fn prepare<P: Platform + ?Sized>(platform: &mut P, cfg: &mut Snapshot) {
    let (_, height) = platform.active_screen_size();
    cfg.normalize_dimensions(height);
    platform.init_pointer();
    platform.init_hints();
}

/// The persistent daemon loop.
///
/// Blocks until one of the configured activation chords fires, maps it to
/// an entry mode, runs the state machine, then goes back to waiting. The
/// wait is the daemon's sole suspension point. Returns only when the
/// input wait reports an aborted wait, which is the backend's shutdown
/// signal.
pub fn main_loop<P: Platform + ?Sized>(platform: &mut P, cfg: &mut Snapshot) {
    prepare(platform, cfg);

    let b = cfg.bindings;
    let activations = [
        b.activation,
        b.hint_activation,
        b.grid_activation,
        b.hint_oneshot,
        b.screen_activation,
    ];

    let mut machine = StateMachine::new();

    loop {
        let Some(ev) = platform.input_wait(&activations) else {
            println!("[dispatch] input wait aborted, shutting down");
            return;
        };

        let mode = if ev == b.activation {
            Mode::Normal
        } else if ev == b.grid_activation {
            Mode::Grid
        } else if ev == b.hint_activation {
            Mode::Hint
        } else if ev == b.screen_activation {
            Mode::ScreenSelection
        } else if ev == b.hint_oneshot {
            // A one-off hint selection never engages the state machine.
            if let Err(err) = platform.hint_mode() {
                eprintln!("[dispatch] hint mode failed: {err:#}");
            }
            continue;
        } else {
            Mode::Normal
        };

        println!("[dispatch] {ev} activated {mode} mode");
        machine.run(platform, cfg, mode);
    }
}

/// A single non-persistent invocation of `mode`: the same preparation as
/// the daemon path, one state-machine run, no lock and no detach.
pub fn oneshot<P: Platform + ?Sized>(platform: &mut P, cfg: &mut Snapshot, mode: Mode) {
    prepare(platform, cfg);
    StateMachine::new().run(platform, cfg, mode);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SPEED;
    use crate::test_utils::{ev, test_snapshot, Call, NormalStep, ScriptedPlatform};

    // ── oneshot ───────────────────────────────────────────────────────────────

    #[test]
    fn oneshot_prepares_and_runs_the_requested_mode_once() {
        let mut cfg = test_snapshot();
        let mut p = ScriptedPlatform::new();
        p.screen_size = (3840, 2160);
        p.normal_script.push_back(NormalStep::ret(None));

        oneshot(&mut p, &mut cfg, Mode::Normal);

        assert_eq!(cfg.speed, 2 * DEFAULT_SPEED);
        assert_eq!(
            p.calls,
            vec![Call::InitPointer, Call::InitHints, Call::NormalMode(None)]
        );
    }

    #[test]
    fn oneshot_hint_entry_drives_the_hint_runner() {
        let mut cfg = test_snapshot();
        let mut p = ScriptedPlatform::new();
        p.hint_script.push_back(true);
        p.normal_script.push_back(NormalStep::ret(None));

        oneshot(&mut p, &mut cfg, Mode::Hint);

        assert!(p.calls.contains(&Call::HintMode));
    }

    // ── main loop ─────────────────────────────────────────────────────────────

    #[test]
    fn main_loop_registers_the_activations_in_declaration_order() {
        let mut cfg = test_snapshot();
        let b = cfg.bindings;
        let mut p = ScriptedPlatform::new();

        main_loop(&mut p, &mut cfg);

        assert_eq!(
            p.calls,
            vec![
                Call::InitPointer,
                Call::InitHints,
                Call::InputWait(vec![
                    b.activation,
                    b.hint_activation,
                    b.grid_activation,
                    b.hint_oneshot,
                    b.screen_activation,
                ]),
            ]
        );
    }

    #[test]
    fn main_loop_maps_each_activation_to_its_mode() {
        let mut cfg = test_snapshot();
        let b = cfg.bindings;
        let mut p = ScriptedPlatform::new();
        p.wait_script.push_back(Some(b.activation));
        p.normal_script.push_back(NormalStep::ret(None));
        p.wait_script.push_back(Some(b.grid_activation));
        p.grid_script.push_back(None);
        p.normal_script.push_back(NormalStep::ret(None));
        p.wait_script.push_back(Some(b.screen_activation));
        p.normal_script.push_back(NormalStep::ret(None));

        main_loop(&mut p, &mut cfg);

        let modes: Vec<&Call> = p
            .calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::NormalMode(_) | Call::GridMode | Call::ScreenSelection
                )
            })
            .collect();
        assert_eq!(
            modes,
            vec![
                &Call::NormalMode(None),
                &Call::GridMode,
                &Call::NormalMode(None),
                &Call::ScreenSelection,
                &Call::NormalMode(None),
            ]
        );
    }

    #[test]
    fn main_loop_keeps_waiting_after_each_run() {
        let mut cfg = test_snapshot();
        let mut p = ScriptedPlatform::new();
        p.wait_script.push_back(Some(cfg.bindings.activation));
        p.normal_script.push_back(NormalStep::ret(None));

        main_loop(&mut p, &mut cfg);

        let waits = p
            .calls
            .iter()
            .filter(|c| matches!(c, Call::InputWait(_)))
            .count();
        assert_eq!(waits, 2);
    }

    #[test]
    fn hint_oneshot_activation_bypasses_the_state_machine() {
        let mut cfg = test_snapshot();
        let mut p = ScriptedPlatform::new();
        p.wait_script.push_back(Some(cfg.bindings.hint_oneshot));
        p.hint_script.push_back(true);

        main_loop(&mut p, &mut cfg);

        assert!(p.calls.contains(&Call::HintMode));
        assert!(!p.calls.iter().any(|c| matches!(c, Call::NormalMode(_))));
    }

    #[test]
    fn hint_oneshot_failure_does_not_kill_the_daemon() {
        let mut cfg = test_snapshot();
        let mut p = ScriptedPlatform::new();
        p.wait_script.push_back(Some(cfg.bindings.hint_oneshot));
        p.hint_script.push_back(false);
        p.wait_script.push_back(Some(cfg.bindings.activation));
        p.normal_script.push_back(NormalStep::ret(None));

        main_loop(&mut p, &mut cfg);

        // The loop went back to waiting and served the next activation.
        assert!(p.calls.contains(&Call::NormalMode(None)));
    }

    #[test]
    fn resolution_prefers_grid_over_hint_for_an_ambiguous_chord() {
        let mut cfg = test_snapshot();
        cfg.bindings.hint_activation = cfg.bindings.grid_activation;
        let mut p = ScriptedPlatform::new();
        p.wait_script.push_back(Some(cfg.bindings.grid_activation));
        p.grid_script.push_back(None);
        p.normal_script.push_back(NormalStep::ret(None));

        main_loop(&mut p, &mut cfg);

        assert!(p.calls.contains(&Call::GridMode));
        assert!(!p.calls.contains(&Call::HintMode));
    }

    #[test]
    fn unmatched_event_falls_back_to_normal_mode() {
        let mut cfg = test_snapshot();
        let mut p = ScriptedPlatform::new();
        p.wait_script.push_back(Some(ev(99)));
        p.normal_script.push_back(NormalStep::ret(None));

        main_loop(&mut p, &mut cfg);

        assert!(p.calls.contains(&Call::NormalMode(None)));
    }

    #[test]
    fn normalization_happens_once_before_the_first_wait() {
        let mut cfg = test_snapshot();
        let mut p = ScriptedPlatform::new();
        p.screen_size = (3840, 2160);

        main_loop(&mut p, &mut cfg);

        assert_eq!(cfg.speed, 2 * DEFAULT_SPEED);
    }
}
