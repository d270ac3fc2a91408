//! Use-Cases für Gesten-Primitive: leiten an den Zustandsautomaten der Session
//! weiter und aktualisieren danach Anzeige und Kamera-Pan synchron.

use crate::app::gesture::{GestureOutcome, GestureTarget, InputKind};
use crate::app::{route_assembler, AppState};
use glam::DVec2;
use std::time::Duration;

/// Nachlauf jedes Primitivs: Pan-Status spiegeln, bei Änderung neu zeichnen.
fn settle(state: &mut AppState, outcome: GestureOutcome) -> GestureOutcome {
    state.view.pan_enabled = !state
        .session
        .as_ref()
        .is_some_and(|s| s.gesture.is_dragging());

    match outcome {
        GestureOutcome::DeleteRefused(point) => {
            state.notify(format!("Punkt {point:?} kann nicht gelöscht werden"));
        }
        o if o.changed_model() => route_assembler::refresh(state),
        _ => {}
    }
    outcome
}

/// Zeiger gedrückt.
pub fn press(
    state: &mut AppState,
    target: Option<GestureTarget>,
    position: DVec2,
    input: InputKind,
    touch_count: u8,
    at: Duration,
) -> GestureOutcome {
    let Some(session) = state.session.as_mut() else {
        return GestureOutcome::Ignored;
    };
    let outcome = session.gesture.pointer_down(
        &session.model,
        target,
        position,
        input,
        touch_count,
        at,
        &state.options,
    );
    settle(state, outcome)
}

/// Zeiger bewegt.
pub fn move_to(state: &mut AppState, position: DVec2, at: Duration) -> GestureOutcome {
    let Some(session) = state.session.as_mut() else {
        return GestureOutcome::Ignored;
    };
    let outcome = session
        .gesture
        .pointer_moved(&mut session.model, position, at, &state.options);
    settle(state, outcome)
}

/// Zeiger losgelassen.
pub fn release(state: &mut AppState, at: Duration) -> GestureOutcome {
    let Some(session) = state.session.as_mut() else {
        return GestureOutcome::Ignored;
    };
    let outcome = session.gesture.pointer_up(&mut session.model, at);
    settle(state, outcome)
}

/// Klick oder Tap.
pub fn activate(
    state: &mut AppState,
    target: GestureTarget,
    position: DVec2,
    input: InputKind,
    at: Duration,
) -> GestureOutcome {
    let Some(session) = state.session.as_mut() else {
        return GestureOutcome::Ignored;
    };
    let branch_drawing = session.branch_drawing;
    let outcome = session.gesture.activate(
        &mut session.model,
        target,
        position,
        input,
        at,
        branch_drawing,
        &state.options,
    );
    settle(state, outcome)
}

/// Uhr-Tick für den Halte-Timer.
pub fn tick(state: &mut AppState, now: Duration) -> GestureOutcome {
    let Some(session) = state.session.as_mut() else {
        return GestureOutcome::Ignored;
    };
    let outcome = session.gesture.tick(&mut session.model, now);
    settle(state, outcome)
}
