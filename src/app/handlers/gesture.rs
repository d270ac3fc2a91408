//! Handler für Gesten-Primitive (Zeiger, Touch, Aktivierung, Tick).

use crate::app::gesture::{GestureTarget, InputKind};
use crate::app::use_cases;
use crate::app::AppState;
use glam::DVec2;
use std::time::Duration;

/// Zeiger gedrückt.
pub fn press(
    state: &mut AppState,
    target: Option<GestureTarget>,
    position: DVec2,
    input: InputKind,
    touch_count: u8,
    at: Duration,
) {
    use_cases::gesture::press(state, target, position, input, touch_count, at);
}

/// Zeiger bewegt.
pub fn move_to(state: &mut AppState, position: DVec2, at: Duration) {
    use_cases::gesture::move_to(state, position, at);
}

/// Zeiger losgelassen.
pub fn release(state: &mut AppState, at: Duration) {
    use_cases::gesture::release(state, at);
}

/// Klick oder Tap.
pub fn activate(
    state: &mut AppState,
    target: GestureTarget,
    position: DVec2,
    input: InputKind,
    at: Duration,
) {
    use_cases::gesture::activate(state, target, position, input, at);
}

/// Uhr-Tick.
pub fn tick(state: &mut AppState, now: Duration) {
    use_cases::gesture::tick(state, now);
}
