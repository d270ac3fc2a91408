//! Route-Assembler: Modell → Anzeige-Ebene und Modell ↔ persistiertes Feature.

use super::{AppState, EditSession};
use crate::core::route::{from_positions, to_positions};
use crate::core::{
    Branch, ControlPointModel, PersistedBranch, PersistedRouteFeature, RouteGeometry,
    RouteProperties,
};
use crate::shared::geometry::{polyline_length_m, smooth_with_samples};
use crate::shared::{DisplayLayer, DisplayLine, DisplayVertex, EditorOptions, LineRole};
use anyhow::{bail, Context};
use glam::DVec2;

/// Glättet eine Linie, wenn der Kurvenmodus aktiv ist.
fn render_line(points: &[DVec2], options: &EditorOptions) -> Vec<DVec2> {
    if options.smooth_curves {
        smooth_with_samples(points, options.samples_per_segment)
    } else {
        points.to_vec()
    }
}

/// Gezeichnete Hauptlinie.
pub fn main_line(model: &ControlPointModel, options: &EditorOptions) -> Vec<DVec2> {
    render_line(model.main(), options)
}

/// Gezeichnete Abzweig-Linie, beginnend am Anker.
pub fn branch_line(
    model: &ControlPointModel,
    branch: usize,
    options: &EditorOptions,
) -> Option<Vec<DVec2>> {
    let anchor = model.anchor_position(branch)?;
    let points = &model.branch(branch)?.points;

    let mut line = Vec::with_capacity(points.len() + 1);
    line.push(anchor);
    line.extend_from_slice(points);
    Some(render_line(&line, options))
}

/// Baut die Anzeige-Ebene für ein Modell.
pub fn display_layer(model: &ControlPointModel, options: &EditorOptions) -> DisplayLayer {
    let mut lines = vec![DisplayLine {
        role: LineRole::Main,
        coordinates: main_line(model, options),
    }];
    lines.extend((0..model.branches().len()).filter_map(|b| {
        branch_line(model, b, options).map(|coordinates| DisplayLine {
            role: LineRole::Branch(b),
            coordinates,
        })
    }));

    let vertices = model
        .vertices()
        .map(|(point, position)| DisplayVertex {
            point,
            position,
            fixed: model.is_fixed(point),
            endpoint: model.is_endpoint_locked(point),
        })
        .collect();

    let length_m = lines
        .iter()
        .map(|l| polyline_length_m(&l.coordinates))
        .sum();

    DisplayLayer {
        lines,
        vertices,
        length_m,
    }
}

/// Berechnet `state.display` aus der aktiven Session neu (leer ohne Session).
pub fn refresh(state: &mut AppState) {
    state.display = match &state.session {
        Some(session) => display_layer(&session.model, &state.options),
        None => DisplayLayer::empty(),
    };
}

/// Serialisiert eine Session als Feature.
///
/// Ohne Abzweige ist die Geometrie ein `LineString`, sonst ein
/// `MultiLineString` aus Hauptlinie und Abzweig-Linien.
pub fn serialize(
    session: &EditSession,
    id: impl Into<String>,
    properties: RouteProperties,
    options: &EditorOptions,
) -> PersistedRouteFeature {
    let model = &session.model;
    let main = to_positions(&main_line(model, options));

    let geometry = if model.branches().is_empty() {
        RouteGeometry::LineString(main)
    } else {
        let mut lines = vec![main];
        lines.extend(
            (0..model.branches().len())
                .filter_map(|b| branch_line(model, b, options))
                .map(|line| to_positions(&line)),
        );
        RouteGeometry::MultiLineString(lines)
    };

    let mut feature = PersistedRouteFeature::new(id, geometry, properties);
    feature.control_points = Some(to_positions(model.main()));
    feature.branches = Some(
        model
            .branches()
            .iter()
            .map(|b| PersistedBranch {
                connection: b.connection,
                points: to_positions(&b.points),
            })
            .collect(),
    );
    feature
}

/// Stellt eine Session aus einem Feature wieder her.
///
/// Datensätze ohne `controlPoints` nutzen die Geometrie-Punkte (erste Linie)
/// als Kontrollpunkte und haben keine Abzweige.
pub fn deserialize(feature: &PersistedRouteFeature) -> anyhow::Result<EditSession> {
    if !feature.geometry.is_line() {
        bail!("Route '{}' ist keine Linie und nicht editierbar", feature.id);
    }

    let (main, branches) = match &feature.control_points {
        Some(control_points) => {
            let branches = feature
                .branches
                .iter()
                .flatten()
                .map(|b| Branch::new(b.connection, from_positions(&b.points)))
                .collect();
            (from_positions(control_points), branches)
        }
        None => {
            log::info!(
                "Route '{}' ohne Kontrollpunkte, nutze Geometrie-Punkte",
                feature.id
            );
            (feature.geometry.primary_line().unwrap_or_default(), Vec::new())
        }
    };

    let model = ControlPointModel::from_parts(main, branches)
        .with_context(|| format!("Route '{}' ist nicht editierbar", feature.id))?;

    Ok(EditSession::with_model(
        Some(feature.id.clone()),
        model,
        feature.properties.clone(),
    ))
}
