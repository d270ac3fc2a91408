//! Use-Cases für das Zeichnen von Abzweigen während einer Bearbeitung.

use crate::app::{route_assembler, AppState};
use crate::core::{ConnectionRef, VertexIndex};
use glam::DVec2;

/// Markiert, dass das externe Zeichenwerkzeug einen Abzweig zeichnet.
pub fn begin_branch_draw(state: &mut AppState) {
    if let Some(session) = state.session.as_mut() {
        session.branch_drawing = true;
        log::debug!("Abzweig-Zeichnen gestartet");
    }
}

/// Bricht das Abzweig-Zeichnen ab.
pub fn abort_branch_draw(state: &mut AppState) {
    if let Some(session) = state.session.as_mut() {
        session.branch_drawing = false;
        log::debug!("Abzweig-Zeichnen abgebrochen");
    }
}

/// Hängt eine gezeichnete Linie als Abzweig an.
///
/// Der erste Punkt rastet ohne Distanzgrenze auf den nächsten vorhandenen
/// Punkt (Hauptlinie oder Abzweig) ein und wird zum Anker; die übrigen
/// Punkte bilden den Abzweig.
pub fn attach_branch(state: &mut AppState, points: &[DVec2]) {
    let Some(session) = state.session.as_mut() else {
        state.notify("Keine Bearbeitung aktiv");
        return;
    };
    session.branch_drawing = false;

    let Some((first, rest)) = points.split_first() else {
        state.notify("Abzweig ohne Punkte verworfen");
        return;
    };
    if rest.is_empty() {
        state.notify("Abzweig braucht mindestens einen Punkt nach dem Anker");
        return;
    }

    let Some(snap) = VertexIndex::from_model(&session.model).nearest(*first) else {
        state.notify("Kein Punkt zum Andocken gefunden");
        return;
    };
    let connection = ConnectionRef::from_target(snap.point);

    match session.model.add_branch(connection, rest.to_vec()) {
        Some(index) => {
            log::info!(
                "Abzweig {} an {:?} angehängt ({} Punkte)",
                index,
                connection,
                rest.len()
            );
            route_assembler::refresh(state);
        }
        None => state.notify(format!("Abzweig an {connection:?} nicht möglich")),
    }
}
