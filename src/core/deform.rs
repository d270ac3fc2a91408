//! Ketten-Verformung: gedämpfte lokale Weitergabe einer Drag-Verschiebung.
//!
//! Jeder Aufruf rechnet ausschließlich aus dem Snapshot zu Gestenbeginn und der
//! aktuellen Zielposition. Es gibt keinen Zustand zwischen Aufrufen, daher ist
//! die Verformung idempotent und aus demselben Snapshot wiederholbar.

use super::{ControlPointModel, ModelSnapshot, PointRef};
use glam::DVec2;

/// Parameter der Ketten-Verformung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainParams {
    /// Schritte pro Richtung entlang der Punktfolge
    pub steps: usize,
    /// Einflussfaktor pro Schritt
    pub falloff: f64,
    /// Kopplungsfaktor Hauptlinie ↔ Abzweig-Wurzel
    pub coupling: f64,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            steps: crate::shared::options::CHAIN_STEPS,
            falloff: crate::shared::options::CHAIN_FALLOFF,
            coupling: crate::shared::options::BRANCH_COUPLING,
        }
    }
}

/// Verschiebt `moved` auf `new_position` und verteilt die Verschiebung.
///
/// 1. Der gezogene Punkt bekommt die Zielposition direkt.
/// 2. Nachbarn in der eigenen Punktfolge bekommen `falloff^k` der Verschiebung,
///    bis ein Rand, ein endpunktgesperrter oder ein fixierter Punkt erreicht ist.
/// 3. Abzweige mit Anker am gezogenen Punkt: Wurzel mit `coupling`, danach Kette.
/// 4. Gezogene Abzweig-Wurzel: ihr Anker mit `coupling`, danach Kette.
///
/// Gibt `false` zurück, wenn der Punkt weder im Modell noch im Snapshot existiert.
pub fn propagate(
    model: &mut ControlPointModel,
    snapshot: &ModelSnapshot,
    moved: PointRef,
    new_position: DVec2,
    params: &ChainParams,
) -> bool {
    let Some(start) = snapshot.position(moved) else {
        return false;
    };
    if !model.set_position(moved, new_position) {
        return false;
    }

    let delta = new_position - start;
    walk_sequence(model, snapshot, moved, delta, 1.0, params);

    for branch in model.branches_anchored_at(moved) {
        push_coupled(model, snapshot, PointRef::Branch(branch, 0), delta, params);
    }

    if let PointRef::Branch(branch, 0) = moved {
        if let Some(anchor) = model.branch(branch).map(|b| b.connection.target()) {
            push_coupled(model, snapshot, anchor, delta, params);
        }
    }

    true
}

/// Gekoppelter Punkt: halber Einfluss, dann Kette mit bereits reduziertem Einfluss.
fn push_coupled(
    model: &mut ControlPointModel,
    snapshot: &ModelSnapshot,
    target: PointRef,
    delta: DVec2,
    params: &ChainParams,
) {
    if model.is_fixed(target) || model.is_endpoint_locked(target) {
        return;
    }
    let Some(base) = snapshot.position(target) else {
        return;
    };

    let influence = params.coupling;
    model.set_position(target, base + delta * influence);
    walk_sequence(model, snapshot, target, delta, influence, params);
}

/// Läuft von `origin` in beide Richtungen der eigenen Punktfolge.
fn walk_sequence(
    model: &mut ControlPointModel,
    snapshot: &ModelSnapshot,
    origin: PointRef,
    delta: DVec2,
    influence: f64,
    params: &ChainParams,
) {
    let len = model.sequence_len(origin.sequence());
    let origin_index = origin.index();

    for forward in [false, true] {
        let mut factor = influence;
        for step in 1..=params.steps {
            factor *= params.falloff;

            let index = if forward {
                origin_index + step
            } else {
                match origin_index.checked_sub(step) {
                    Some(i) => i,
                    None => break,
                }
            };
            if index >= len {
                break;
            }

            let neighbor = origin.with_index(index);
            if model.is_endpoint_locked(neighbor) || model.is_fixed(neighbor) {
                break;
            }
            let Some(base) = snapshot.position(neighbor) else {
                break;
            };
            model.set_position(neighbor, base + delta * factor);
        }
    }
}
