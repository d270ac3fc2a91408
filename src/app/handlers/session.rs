//! Handler für Session-Lebenszyklus und Abzweig-Zeichnen.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::RouteProperties;
use glam::DVec2;

/// Startet eine Bearbeitung aus einer frisch gezeichneten Linie.
pub fn begin(state: &mut AppState, points: Vec<DVec2>) {
    use_cases::session::start_new_line(state, points);
}

/// Öffnet eine gespeicherte Route zur Bearbeitung.
pub fn open(state: &mut AppState, id: &str) {
    use_cases::session::open_route(state, id);
}

/// Speichert die Bearbeitung.
pub fn save(state: &mut AppState, properties: RouteProperties) -> anyhow::Result<()> {
    use_cases::session::save_session(state, properties)
}

/// Verwirft die Bearbeitung.
pub fn discard(state: &mut AppState) {
    use_cases::session::cancel_session(state);
}

/// Schaltet den Kurvenmodus um.
pub fn toggle_curve_mode(state: &mut AppState) {
    use_cases::session::toggle_curve_mode(state);
}

/// Abzweig-Zeichnen beginnt.
pub fn begin_branch_draw(state: &mut AppState) {
    use_cases::branch::begin_branch_draw(state);
}

/// Gezeichnete Linie als Abzweig anhängen.
pub fn attach_branch(state: &mut AppState, points: &[DVec2]) {
    use_cases::branch::attach_branch(state, points);
}

/// Abzweig-Zeichnen abbrechen.
pub fn abort_branch_draw(state: &mut AppState) {
    use_cases::branch::abort_branch_draw(state);
}
