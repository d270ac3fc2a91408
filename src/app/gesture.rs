//! Gesten-Zustandsautomat für den Editiermodus.
//!
//! Übersetzt Zeiger-/Touch-Primitive (Down, Move, Up, Aktivierung, Tick) in
//! Modell-Operationen: Drag mit Ketten-Verformung, Halten zum Fixieren,
//! Doppel-Aktivierung zum Löschen bzw. Einfügen.
//!
//! Zeiten sind monotone `Duration`s seit einer beliebigen Host-Epoche. Der
//! Halte-Timer ist eine Deadline, die bei `tick`, `pointer_moved` und
//! `pointer_up` geprüft wird. Es ist immer höchstens eine Geste aktiv.

use crate::core::{propagate, ControlPointModel, ModelSnapshot, PointRef};
use crate::shared::EditorOptions;
use glam::DVec2;
use std::time::Duration;

/// Eingabeart eines Primitivs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Maus oder Stift
    Mouse,
    /// Touch
    Touch,
}

/// Vom externen Hit-Tester aufgelöstes Ziel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    /// Editierbarer Punkt
    Vertex(PointRef),
    /// Irgendein Liniensegment der bearbeiteten Route
    Line,
}

/// Warum eine Doppel-Aktivierung verworfen wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Direkt nach einem Drag mit Bewegung
    AfterDrag,
    /// Direkt nach dem Löschen eines Punkts
    AfterDelete,
    /// Während ein Abzweig gezeichnet wird
    BranchDrawing,
    /// Klick, der das Loslassen nach einem Halten begleitet
    AfterHold,
}

/// Ergebnis eines verarbeiteten Primitivs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Keine Wirkung
    Ignored,
    /// Druck auf einen Punkt registriert, Halte-Timer läuft
    PressPending(PointRef),
    /// Erste Bewegung: Drag hat begonnen
    DragStarted(PointRef),
    /// Drag-Update
    Dragged(PointRef),
    /// Drag durch Loslassen beendet
    DragEnded(PointRef),
    /// Loslassen ohne Bewegung
    Released,
    /// Halte-Geste hat den Fix-Status umgeschaltet
    FixedToggled { point: PointRef, fixed: bool },
    /// Erste Aktivierung gemerkt
    ActivationRecorded(GestureTarget),
    /// Punkt per Doppel-Aktivierung gelöscht
    PointDeleted(PointRef),
    /// Löschen abgelehnt (Mindestanzahl)
    DeleteRefused(PointRef),
    /// Punkt per Doppel-Aktivierung eingefügt
    PointInserted(PointRef),
    /// Doppel-Aktivierung unterdrückt
    Suppressed(SuppressReason),
}

impl GestureOutcome {
    /// Hat das Ergebnis das Modell verändert?
    pub fn changed_model(&self) -> bool {
        matches!(
            self,
            GestureOutcome::DragStarted(_)
                | GestureOutcome::Dragged(_)
                | GestureOutcome::FixedToggled { .. }
                | GestureOutcome::PointDeleted(_)
                | GestureOutcome::PointInserted(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Activation {
    target: GestureTarget,
    input: InputKind,
    at: Duration,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Pending {
        point: PointRef,
        snapshot: ModelSnapshot,
        origin: DVec2,
        hold_deadline: Duration,
    },
    Dragging {
        point: PointRef,
        snapshot: ModelSnapshot,
    },
}

/// Zustandsautomat einer Editier-Session.
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    phase: Phase,
    last_vertex_activation: Option<Activation>,
    last_line_activation: Option<Activation>,
    drag_released_at: Option<Duration>,
    deleted_at: Option<Duration>,
    swallow_activation: bool,
}

impl GestureMachine {
    /// Erstellt einen Automaten im Ruhezustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keine Geste aktiv?
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Läuft gerade ein Drag?
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Punkt der aktiven Geste (gedrückt oder gezogen).
    pub fn active_point(&self) -> Option<PointRef> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Pending { point, .. } | Phase::Dragging { point, .. } => Some(*point),
        }
    }

    /// Bricht eine laufende Geste ohne weitere Wirkung ab.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    // ── Zeiger-Primitive ────────────────────────────────────────────

    /// Zeiger gedrückt. Nur ein Punkt-Treffer startet eine Geste.
    pub fn pointer_down(
        &mut self,
        model: &ControlPointModel,
        target: Option<GestureTarget>,
        position: DVec2,
        input: InputKind,
        touch_count: u8,
        at: Duration,
        options: &EditorOptions,
    ) -> GestureOutcome {
        if !self.is_idle() {
            log::debug!("Zeiger-Down ignoriert: Geste bereits aktiv");
            return GestureOutcome::Ignored;
        }
        if input == InputKind::Touch && touch_count > 1 {
            return GestureOutcome::Ignored;
        }
        self.swallow_activation = false;

        let Some(GestureTarget::Vertex(point)) = target else {
            return GestureOutcome::Ignored;
        };
        if !model.contains(point) {
            return GestureOutcome::Ignored;
        }

        self.phase = Phase::Pending {
            point,
            snapshot: model.snapshot(),
            origin: position,
            hold_deadline: at + options.hold_duration(input == InputKind::Touch),
        };
        log::debug!("Geste: Pending auf {point:?}");
        GestureOutcome::PressPending(point)
    }

    /// Zeiger bewegt. Erste echte Bewegung bricht den Halte-Timer ab und startet den Drag.
    pub fn pointer_moved(
        &mut self,
        model: &mut ControlPointModel,
        position: DVec2,
        at: Duration,
        options: &EditorOptions,
    ) -> GestureOutcome {
        if let Some(outcome) = self.fire_due_hold(model, at) {
            return outcome;
        }

        let params = options.chain_params();
        let (phase, outcome) = match std::mem::take(&mut self.phase) {
            Phase::Idle => (Phase::Idle, GestureOutcome::Ignored),
            Phase::Pending {
                point,
                snapshot,
                origin,
                hold_deadline,
            } if origin == position => (
                Phase::Pending {
                    point,
                    snapshot,
                    origin,
                    hold_deadline,
                },
                GestureOutcome::Ignored,
            ),
            Phase::Pending {
                point, snapshot, ..
            } => {
                propagate(model, &snapshot, point, position, &params);
                log::debug!("Geste: Drag startet auf {point:?}");
                (
                    Phase::Dragging { point, snapshot },
                    GestureOutcome::DragStarted(point),
                )
            }
            Phase::Dragging { point, snapshot } => {
                propagate(model, &snapshot, point, position, &params);
                (
                    Phase::Dragging { point, snapshot },
                    GestureOutcome::Dragged(point),
                )
            }
        };
        self.phase = phase;
        outcome
    }

    /// Zeiger losgelassen: Geste endet immer im Ruhezustand.
    pub fn pointer_up(&mut self, model: &mut ControlPointModel, at: Duration) -> GestureOutcome {
        if let Some(outcome) = self.fire_due_hold(model, at) {
            return outcome;
        }

        match std::mem::take(&mut self.phase) {
            Phase::Idle => GestureOutcome::Ignored,
            Phase::Pending { .. } => GestureOutcome::Released,
            Phase::Dragging { point, .. } => {
                self.drag_released_at = Some(at);
                log::debug!("Geste: Drag endet auf {point:?}");
                GestureOutcome::DragEnded(point)
            }
        }
    }

    /// Uhr-Tick: löst einen fälligen Halte-Timer aus.
    pub fn tick(&mut self, model: &mut ControlPointModel, now: Duration) -> GestureOutcome {
        self.fire_due_hold(model, now)
            .unwrap_or(GestureOutcome::Ignored)
    }

    fn fire_due_hold(
        &mut self,
        model: &mut ControlPointModel,
        now: Duration,
    ) -> Option<GestureOutcome> {
        let Phase::Pending {
            point,
            hold_deadline,
            ..
        } = &self.phase
        else {
            return None;
        };
        if now < *hold_deadline {
            return None;
        }

        let point = *point;
        self.phase = Phase::Idle;
        self.swallow_activation = true;
        let fixed = model.toggle_fixed(point)?;
        log::debug!("Geste: Halten schaltet {point:?} auf fixed={fixed}");
        Some(GestureOutcome::FixedToggled { point, fixed })
    }

    // ── Aktivierung (Klick / Tap) ───────────────────────────────────

    /// Klick oder Tap. Die zweite Aktivierung auf dasselbe Ziel innerhalb des
    /// Zeitfensters ist eine Doppel-Aktivierung.
    pub fn activate(
        &mut self,
        model: &mut ControlPointModel,
        target: GestureTarget,
        position: DVec2,
        input: InputKind,
        at: Duration,
        branch_drawing: bool,
        options: &EditorOptions,
    ) -> GestureOutcome {
        if !self.is_idle() {
            return GestureOutcome::Ignored;
        }
        if std::mem::take(&mut self.swallow_activation) {
            return GestureOutcome::Suppressed(SuppressReason::AfterHold);
        }

        let window = options.double_activation_window();
        let slot = match target {
            GestureTarget::Vertex(_) => &mut self.last_vertex_activation,
            GestureTarget::Line => &mut self.last_line_activation,
        };
        let is_double = slot.is_some_and(|prev| {
            prev.target == target && prev.input == input && within(Some(prev.at), at, window)
        });
        if !is_double {
            *slot = Some(Activation { target, input, at });
            return GestureOutcome::ActivationRecorded(target);
        }
        *slot = None;

        match target {
            GestureTarget::Vertex(point) => self.delete_vertex(model, point, at, options),
            GestureTarget::Line => {
                self.insert_on_line(model, position, at, branch_drawing, options)
            }
        }
    }

    fn delete_vertex(
        &mut self,
        model: &mut ControlPointModel,
        point: PointRef,
        at: Duration,
        options: &EditorOptions,
    ) -> GestureOutcome {
        if within(self.drag_released_at.take(), at, options.suppression_window()) {
            log::debug!("Löschen von {point:?} nach Drag unterdrückt");
            return GestureOutcome::Suppressed(SuppressReason::AfterDrag);
        }

        if model.delete_point(point) {
            self.deleted_at = Some(at);
            log::debug!("Punkt {point:?} gelöscht");
            GestureOutcome::PointDeleted(point)
        } else {
            log::warn!("Löschen von {point:?} abgelehnt");
            GestureOutcome::DeleteRefused(point)
        }
    }

    fn insert_on_line(
        &mut self,
        model: &mut ControlPointModel,
        position: DVec2,
        at: Duration,
        branch_drawing: bool,
        options: &EditorOptions,
    ) -> GestureOutcome {
        if branch_drawing {
            return GestureOutcome::Suppressed(SuppressReason::BranchDrawing);
        }
        if within(self.drag_released_at.take(), at, options.suppression_window()) {
            log::debug!("Einfügen direkt nach Drag unterdrückt");
            return GestureOutcome::Suppressed(SuppressReason::AfterDrag);
        }
        if within(self.deleted_at.take(), at, options.suppression_window()) {
            log::debug!("Einfügen direkt nach Löschen unterdrückt");
            return GestureOutcome::Suppressed(SuppressReason::AfterDelete);
        }

        let Some(site) = model.nearest_insertion_segment(position) else {
            return GestureOutcome::Ignored;
        };
        match model.insert_at(&site, position) {
            Some(point) => {
                // Punkt-Indizes haben sich verschoben
                self.last_vertex_activation = None;
                log::debug!("Punkt {point:?} eingefügt");
                GestureOutcome::PointInserted(point)
            }
            None => GestureOutcome::Ignored,
        }
    }
}

/// `at` liegt höchstens `window` nach `since`.
fn within(since: Option<Duration>, at: Duration, window: Duration) -> bool {
    since.is_some_and(|t| at >= t && at - t <= window)
}
