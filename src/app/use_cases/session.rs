//! Use-Cases für den Lebenszyklus einer Editier-Session.

use crate::app::{route_assembler, AppState, EditSession};
use crate::core::RouteProperties;
use crate::shared::EditorOptions;
use glam::DVec2;

/// Startet eine Bearbeitung aus einer frisch gezeichneten Linie.
pub fn start_new_line(state: &mut AppState, points: Vec<DVec2>) {
    let count = points.len();
    let Some(session) = EditSession::start_new(points) else {
        state.notify(format!(
            "Linie braucht mindestens zwei Punkte (gezeichnet: {count})"
        ));
        return;
    };

    state.session = Some(session);
    state.view.pan_enabled = true;
    state.ui.status_message = None;
    log::info!("Neue Linie in Bearbeitung: {count} Punkte");
    route_assembler::refresh(state);
}

/// Öffnet eine gespeicherte Route zur Bearbeitung.
///
/// Unbekannte IDs, Flächen und unauflösbare Abzweig-Anker ergeben einen Hinweis.
pub fn open_route(state: &mut AppState, id: &str) {
    if state.session.is_some() {
        state.notify("Es läuft bereits eine Bearbeitung");
        return;
    }
    let Some(feature) = state.routes.get(id) else {
        state.notify(format!("Route '{id}' nicht gefunden"));
        return;
    };

    match route_assembler::deserialize(feature) {
        Ok(session) => {
            log::info!(
                "Route '{}' in Bearbeitung: {} Punkte, {} Abzweige",
                id,
                session.model.main().len(),
                session.model.branches().len()
            );
            state.session = Some(session);
            state.view.pan_enabled = true;
            state.ui.status_message = None;
            route_assembler::refresh(state);
        }
        Err(e) => state.notify(format!("{e:#}")),
    }
}

/// Speichert die aktive Bearbeitung in die Sammlung und beendet sie.
///
/// Bestehende Routen behalten ID und Position, neue erhalten eine UUID.
pub fn save_session(state: &mut AppState, edits: RouteProperties) -> anyhow::Result<()> {
    let Some(session) = state.session.take() else {
        state.notify("Keine Bearbeitung aktiv");
        return Ok(());
    };

    let id = session
        .route_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let properties = line_properties(&session.properties, edits, &state.options);
    let feature = route_assembler::serialize(&session, id.clone(), properties, &state.options);

    let replaced = state.routes.upsert(feature);
    log::info!(
        "Route '{}' {}",
        id,
        if replaced { "aktualisiert" } else { "angelegt" }
    );

    state.view.pan_enabled = true;
    state.ui.status_message = Some(format!("Route '{id}' gespeichert"));
    route_assembler::refresh(state);
    super::routes::persist(state)
}

/// Verwirft die aktive Bearbeitung; die Sammlung bleibt unverändert.
pub fn cancel_session(state: &mut AppState) {
    if let Some(session) = state.session.take() {
        log::info!(
            "Bearbeitung verworfen ({})",
            session.route_id.as_deref().unwrap_or("neue Linie")
        );
    }
    state.view.pan_enabled = true;
    route_assembler::refresh(state);
}

/// Schaltet den Kurvenmodus um und zeichnet neu.
pub fn toggle_curve_mode(state: &mut AppState) {
    state.options.smooth_curves = !state.options.smooth_curves;
    log::info!(
        "Kurvenmodus {}",
        if state.options.smooth_curves { "an" } else { "aus" }
    );
    route_assembler::refresh(state);
}

/// Legt Änderungen über die bisherigen Eigenschaften und füllt Linien-Standards.
fn line_properties(
    base: &RouteProperties,
    edits: RouteProperties,
    options: &EditorOptions,
) -> RouteProperties {
    let mut extra = base.extra.clone();
    extra.extend(edits.extra);

    RouteProperties {
        name: edits.name.or_else(|| base.name.clone()),
        description: edits.description.or_else(|| base.description.clone()),
        stroke: edits
            .stroke
            .or_else(|| base.stroke.clone())
            .or_else(|| Some(options.default_stroke.clone())),
        stroke_width: edits
            .stroke_width
            .or(base.stroke_width)
            .or(Some(f64::from(options.default_stroke_width))),
        stroke_opacity: edits
            .stroke_opacity
            .or(base.stroke_opacity)
            .or(Some(options.default_stroke_opacity)),
        fill: edits.fill.or_else(|| base.fill.clone()),
        fill_opacity: edits.fill_opacity.or(base.fill_opacity),
        extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_properties_keep_existing_and_fill_defaults() {
        let mut base = RouteProperties {
            name: Some("Alt".into()),
            stroke: Some("#00ff00".into()),
            ..RouteProperties::default()
        };
        base.extra.insert("operator".into(), "MTA".into());
        let edits = RouteProperties {
            name: Some("Neu".into()),
            ..RouteProperties::default()
        };

        let merged = line_properties(&base, edits, &EditorOptions::default());

        assert_eq!(merged.name.as_deref(), Some("Neu"));
        assert_eq!(merged.stroke.as_deref(), Some("#00ff00"));
        assert_eq!(merged.stroke_width, Some(6.0));
        assert_eq!(merged.stroke_opacity, Some(1.0));
        assert_eq!(merged.extra["operator"], "MTA");
    }
}
