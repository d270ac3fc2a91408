//! Anzeige-Ebene als expliziter Übergabevertrag zwischen App und externem Renderer.
//!
//! Wird nach jeder Modell-Mutation synchron neu berechnet.

use crate::core::PointRef;
use glam::DVec2;

/// Rolle einer Anzeige-Linie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Hauptlinie
    Main,
    /// Abzweig mit Index
    Branch(usize),
}

/// Eine gezeichnete Linie (geglättet oder roh).
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    /// Zugehörigkeit der Linie
    pub role: LineRole,
    /// Koordinaten in Zeichenreihenfolge
    pub coordinates: Vec<DVec2>,
}

/// Ein editierbarer Punkt mit Darstellungs-Flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayVertex {
    /// Referenz für Hit-Testing
    pub point: PointRef,
    /// Position
    pub position: DVec2,
    /// Fixiert (von der Kettenverformung ausgenommen)
    pub fixed: bool,
    /// Endpunkt (nur direkt verschiebbar)
    pub endpoint: bool,
}

/// Read-only Inhalt der Editier-Ebene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayLayer {
    /// Hauptlinie zuerst, danach Abzweige in Index-Reihenfolge
    pub lines: Vec<DisplayLine>,
    /// Alle editierbaren Punkte
    pub vertices: Vec<DisplayVertex>,
    /// Gesamtlänge aller Linien in Metern
    pub length_m: f64,
}

impl DisplayLayer {
    /// Leere Ebene (kein Editiermodus).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Gibt `true` zurück, wenn nichts zu zeichnen ist.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.vertices.is_empty()
    }

    /// Sucht den Anzeige-Punkt zu einer Referenz.
    pub fn vertex(&self, point: PointRef) -> Option<&DisplayVertex> {
        self.vertices.iter().find(|v| v.point == point)
    }
}
