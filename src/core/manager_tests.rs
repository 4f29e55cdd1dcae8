// Author: Dustin Pilgrim
// License: MIT

use crate::core::action::Action;
use crate::core::config::Config;
use crate::core::events::Event;
use crate::core::manager::Manager;
use crate::core::state::{Status, TimerSession};

fn cfg_quiet() -> Config {
    Config {
        notify_on_complete: false,
        on_complete: None,
        ..Config::default()
    }
}

fn idle_with(duration: u64) -> (Manager, TimerSession) {
    let mut mgr = Manager::new(cfg_quiet());
    let mut state = TimerSession::new(0);
    mgr.handle_event(&mut state, Event::SetDuration { seconds: duration, now_ms: 0 });
    (mgr, state)
}

fn assert_end_iff_running(state: &TimerSession) {
    assert_eq!(
        state.end_ms().is_some(),
        state.status() == Status::Running,
        "end_ms {:?} with status {}",
        state.end_ms(),
        state.status()
    );
}

#[test]
fn set_duration_while_idle_sets_both_fields() {
    for d in [0, 1, 59, 3600, 99 * 3600 + 59 * 60 + 59] {
        let (_, state) = idle_with(d);
        assert_eq!(state.duration(), d);
        assert_eq!(state.remaining(), d);
        assert_eq!(state.status(), Status::Idle);
    }
}

#[test]
fn start_then_immediate_tick_stays_within_a_second() {
    let (mut mgr, mut state) = idle_with(25);

    mgr.handle_event(&mut state, Event::Start { now_ms: 10_000 });
    let before = state.remaining();

    mgr.handle_event(&mut state, Event::Tick { now_ms: 10_000 });
    assert!(before - state.remaining() <= 1);

    mgr.handle_event(&mut state, Event::Tick { now_ms: 10_400 });
    assert!(before - state.remaining() <= 1);
}

#[test]
fn irregular_ticks_do_not_drift() {
    let (mut mgr, mut state) = idle_with(10);
    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });

    // Late and bunched ticks still land on the wall-clock answer.
    for now_ms in [1_700, 1_750, 4_990, 5_001, 8_350] {
        mgr.handle_event(&mut state, Event::Tick { now_ms });
    }

    assert_eq!(state.remaining(), 2);
    assert_eq!(state.status(), Status::Running);
}

#[test]
fn end_time_present_only_while_running() {
    let (mut mgr, mut state) = idle_with(5);
    assert_end_iff_running(&state);

    let script = [
        Event::Start { now_ms: 0 },
        Event::Tick { now_ms: 1_000 },
        Event::Pause { now_ms: 1_500 },
        Event::Tick { now_ms: 2_000 },
        Event::Start { now_ms: 3_000 },
        Event::SetDuration { seconds: 9, now_ms: 3_100 },
        Event::Tick { now_ms: 9_000 },
        Event::Start { now_ms: 9_100 },
        Event::Pause { now_ms: 9_200 },
        Event::Reset { now_ms: 9_300 },
        Event::Pause { now_ms: 9_400 },
        Event::Start { now_ms: 9_500 },
        Event::Reset { now_ms: 9_600 },
    ];

    for ev in script {
        mgr.handle_event(&mut state, ev);
        assert_end_iff_running(&state);
    }
}

#[test]
fn pausing_twice_matches_pausing_once() {
    let (mut mgr, mut state) = idle_with(30);
    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });

    mgr.handle_event(&mut state, Event::Pause { now_ms: 4_200 });
    let once = state.clone();

    let actions = mgr.handle_event(&mut state, Event::Pause { now_ms: 7_000 });
    assert!(actions.is_empty());
    assert_eq!(state, once);
}

#[test]
fn countdown_completes_after_duration() {
    let (mut mgr, mut state) = idle_with(5);
    mgr.handle_event(&mut state, Event::Start { now_ms: 1_000 });

    mgr.handle_event(&mut state, Event::Tick { now_ms: 5_999 });
    assert_eq!(state.status(), Status::Running);
    assert_eq!(state.remaining(), 1);

    let actions = mgr.handle_event(&mut state, Event::Tick { now_ms: 6_000 });
    assert_eq!(state.status(), Status::Completed);
    assert_eq!(state.remaining(), 0);
    assert_eq!(state.end_ms(), None);
    assert_eq!(
        actions,
        vec![Action::StatusChanged {
            from: Status::Running,
            to: Status::Completed
        }]
    );
}

#[test]
fn reset_while_idle_keeps_remaining() {
    let (mut mgr, mut state) = idle_with(42);
    let actions = mgr.handle_event(&mut state, Event::Reset { now_ms: 100 });

    assert!(actions.is_empty());
    assert_eq!(state.remaining(), 42);
    assert_eq!(state.duration(), 42);
    assert_eq!(state.status(), Status::Idle);
}

#[test]
fn resume_recomputes_end_from_remaining() {
    let (mut mgr, mut state) = idle_with(60);
    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });
    mgr.handle_event(&mut state, Event::Pause { now_ms: 20_000 });
    assert_eq!(state.remaining(), 40);

    // Time spent paused does not count.
    mgr.handle_event(&mut state, Event::Start { now_ms: 500_000 });
    assert_eq!(state.status(), Status::Running);
    assert_eq!(state.end_ms(), Some(540_000));

    mgr.handle_event(&mut state, Event::Tick { now_ms: 539_999 });
    assert_eq!(state.status(), Status::Running);
    mgr.handle_event(&mut state, Event::Tick { now_ms: 540_000 });
    assert_eq!(state.status(), Status::Completed);
}

#[test]
fn resume_only_continues_a_paused_countdown() {
    let (mut mgr, mut state) = idle_with(60);

    let actions = mgr.handle_event(&mut state, Event::Resume { now_ms: 0 });
    assert!(actions.is_empty());
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(state.end_ms(), None);

    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });
    mgr.handle_event(&mut state, Event::Pause { now_ms: 10_000 });
    mgr.handle_event(&mut state, Event::Resume { now_ms: 100_000 });
    assert_eq!(state.status(), Status::Running);
    assert_eq!(state.end_ms(), Some(150_000));

    // Nothing to resume while already running.
    let actions = mgr.handle_event(&mut state, Event::Resume { now_ms: 120_000 });
    assert!(actions.is_empty());
    assert_eq!(state.end_ms(), Some(150_000));
}

#[test]
fn start_with_zero_duration_is_ignored() {
    let (mut mgr, mut state) = idle_with(0);
    let actions = mgr.handle_event(&mut state, Event::Start { now_ms: 0 });

    assert!(actions.is_empty());
    assert_eq!(state.status(), Status::Idle);
    assert_eq!(state.end_ms(), None);
}

#[test]
fn set_duration_outside_idle_is_ignored() {
    let (mut mgr, mut state) = idle_with(10);
    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });
    let end = state.end_ms();

    mgr.handle_event(&mut state, Event::SetDuration { seconds: 999, now_ms: 1_000 });
    assert_eq!(state.duration(), 10);
    assert_eq!(state.end_ms(), end);

    mgr.handle_event(&mut state, Event::Tick { now_ms: 10_000 });
    mgr.handle_event(&mut state, Event::SetDuration { seconds: 999, now_ms: 11_000 });
    assert_eq!(state.status(), Status::Completed);
    assert_eq!(state.duration(), 10);
}

#[test]
fn tick_outside_running_is_a_no_op() {
    let (mut mgr, mut state) = idle_with(10);
    let idle = state.clone();
    assert!(mgr.handle_event(&mut state, Event::Tick { now_ms: 50_000 }).is_empty());
    assert_eq!(state, idle);

    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });
    mgr.handle_event(&mut state, Event::Pause { now_ms: 3_000 });
    let paused = state.clone();
    assert!(mgr.handle_event(&mut state, Event::Tick { now_ms: 50_000 }).is_empty());
    assert_eq!(state, paused);
}

#[test]
fn completed_requires_reset_before_starting_again() {
    let (mut mgr, mut state) = idle_with(1);
    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });
    mgr.handle_event(&mut state, Event::Tick { now_ms: 1_000 });
    assert_eq!(state.status(), Status::Completed);

    assert!(mgr.handle_event(&mut state, Event::Start { now_ms: 2_000 }).is_empty());
    assert_eq!(state.status(), Status::Completed);

    let actions = mgr.handle_event(&mut state, Event::Reset { now_ms: 3_000 });
    assert_eq!(
        actions,
        vec![Action::StatusChanged {
            from: Status::Completed,
            to: Status::Idle
        }]
    );
    assert_eq!(state.remaining(), 1);
    assert_eq!(state.started_ms(), None);
}

#[test]
fn completion_emits_configured_side_effects() {
    let cfg = Config {
        notify_on_complete: true,
        on_complete: Some("paplay bell.oga".to_string()),
        ..Config::default()
    };
    let mut mgr = Manager::new(cfg);
    let mut state = TimerSession::new(90);

    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });
    let actions = mgr.handle_event(&mut state, Event::Tick { now_ms: 95_000 });

    assert_eq!(actions.len(), 3);
    assert!(matches!(actions[0], Action::StatusChanged { to: Status::Completed, .. }));
    assert_eq!(
        actions[1],
        Action::Notify {
            message: "Countdown complete (00:01:30)".to_string()
        }
    );
    assert_eq!(
        actions[2],
        Action::RunCommand {
            command: "paplay bell.oga".to_string()
        }
    );
}

#[test]
fn focus_is_independent_of_timer_state() {
    let (mut mgr, mut state) = idle_with(10);
    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });

    let actions = mgr.handle_event(
        &mut state,
        Event::SetFocus { id: Some("saturn".to_string()), now_ms: 100 },
    );
    assert!(actions.is_empty());
    assert_eq!(state.focused(), Some("saturn"));
    assert_eq!(state.status(), Status::Running);

    mgr.handle_event(&mut state, Event::Reset { now_ms: 200 });
    assert_eq!(state.focused(), Some("saturn"));

    mgr.handle_event(&mut state, Event::SetFocus { id: None, now_ms: 300 });
    assert_eq!(state.focused(), None);
}

#[test]
fn snapshot_reports_live_remaining_between_ticks() {
    let (mut mgr, mut state) = idle_with(120);
    mgr.handle_event(&mut state, Event::Start { now_ms: 0 });

    let snap = mgr.snapshot(&state, 30_500);
    assert_eq!(snap.remaining, 90);
    assert_eq!(snap.waybar.text, "00:01:30");
    assert_eq!(snap.waybar.class, "running");
    assert!(snap.pretty_text.contains("Status: running"));
}

#[test]
fn info_describes_the_focused_body() {
    let (mut mgr, mut state) = idle_with(60);
    mgr.handle_event(&mut state, Event::SetFocus { id: Some("saturn".to_string()), now_ms: 0 });

    let snap = mgr.snapshot(&state, 0);
    assert!(snap.pretty_text.contains("Focus: saturn\n  The jewel of the system."));
}
