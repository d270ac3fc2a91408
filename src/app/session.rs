//! Editier-Session: transienter Zustand, solange eine Route bearbeitet wird.

use super::gesture::GestureMachine;
use crate::core::{ControlPointModel, RouteProperties};
use glam::DVec2;

/// Eine aktive Bearbeitung (neue Linie oder bestehende Route).
///
/// Wird beim Speichern oder Abbrechen verworfen; nur das daraus erzeugte
/// Feature wird persistiert.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// ID der bearbeiteten Route (`None` = neue Route)
    pub route_id: Option<String>,
    /// Kontrollpunkte, Abzweige und Fixpunkte
    pub model: ControlPointModel,
    /// Gestenzustand inkl. Unterdrückungs-Buchhaltung
    pub gesture: GestureMachine,
    /// Ein Abzweig wird gerade vom externen Zeichenwerkzeug gezeichnet
    pub branch_drawing: bool,
    /// Eigenschaften der Route beim Öffnen
    pub properties: RouteProperties,
}

impl EditSession {
    /// Startet eine Session für eine frisch gezeichnete Linie.
    ///
    /// Gibt `None` zurück bei weniger als zwei Punkten.
    pub fn start_new(points: Vec<DVec2>) -> Option<Self> {
        Some(Self::with_model(None, ControlPointModel::new(points)?, RouteProperties::default()))
    }

    /// Session für eine bestehende Route.
    pub fn with_model(
        route_id: Option<String>,
        model: ControlPointModel,
        properties: RouteProperties,
    ) -> Self {
        Self {
            route_id,
            model,
            gesture: GestureMachine::new(),
            branch_drawing: false,
            properties,
        }
    }

    /// Neue, noch nie gespeicherte Route?
    pub fn is_new(&self) -> bool {
        self.route_id.is_none()
    }
}
