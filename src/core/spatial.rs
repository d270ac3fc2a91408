//! Spatial-Index (KD-Tree) über alle editierbaren Punkte eines Modells.

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::{ControlPointModel, PointRef};

/// Ergebnis einer Distanzabfrage gegen den Vertex-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMatch {
    /// Gefundener Punkt
    pub point: PointRef,
    /// Position des Punkts
    pub position: DVec2,
    /// Planare Distanz zum Suchpunkt (Grad)
    pub distance: f64,
}

/// Read-only Spatial-Index über Hauptlinie und Abzweige.
///
/// Distanzen sind planar im Gradraum; auf Stadtebene reicht das für den Snap.
#[derive(Debug, Clone)]
pub struct VertexIndex {
    tree: KdTree<f64, 2>,
    points: Vec<(PointRef, DVec2)>,
}

impl VertexIndex {
    /// Baut einen neuen Index aus allen Punkten des Modells.
    pub fn from_model(model: &ControlPointModel) -> Self {
        let points: Vec<(PointRef, DVec2)> = model.vertices().collect();
        let entries: Vec<[f64; 2]> = points.iter().map(|(_, p)| [p.x, p.y]).collect();
        let tree: KdTree<f64, 2> = (&entries).into();

        Self { tree, points }
    }

    /// Gibt die Anzahl indexierter Punkte zurück.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Gibt `true` zurück, wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Findet den nächsten Punkt zur Position (ohne Distanz-Grenze).
    pub fn nearest(&self, query: DVec2) -> Option<VertexMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        let (point, position) = *self.points.get(result.item as usize)?;

        Some(VertexMatch {
            point,
            position,
            distance: result.distance.sqrt(),
        })
    }
}
