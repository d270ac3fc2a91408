use crate::app::gesture::{GestureTarget, InputKind};
use crate::core::RouteProperties;
use crate::shared::EditorOptions;
use glam::DVec2;
use std::time::Duration;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Neue Bearbeitung aus einer frisch gezeichneten Linie starten
    BeginSession { points: Vec<DVec2> },
    /// Gespeicherte Route zur Bearbeitung öffnen
    OpenRoute { id: String },
    /// Bearbeitung speichern
    SaveSession { properties: RouteProperties },
    /// Bearbeitung verwerfen
    DiscardSession,
    /// Kurvenmodus umschalten
    ToggleCurveMode,

    /// Abzweig-Zeichnen beginnt (Einfügen per Doppel-Aktivierung gesperrt)
    BeginBranchDraw,
    /// Gezeichnete Linie als Abzweig anhängen
    AttachBranch { points: Vec<DVec2> },
    /// Abzweig-Zeichnen abbrechen
    AbortBranchDraw,

    /// Zeiger gedrückt
    PressPointer {
        target: Option<GestureTarget>,
        position: DVec2,
        input: InputKind,
        touch_count: u8,
        at: Duration,
    },
    /// Zeiger bewegt
    MovePointer { position: DVec2, at: Duration },
    /// Zeiger losgelassen
    ReleasePointer { at: Duration },
    /// Klick/Tap verarbeiten
    Activate {
        target: GestureTarget,
        position: DVec2,
        input: InputKind,
        at: Duration,
    },
    /// Halte-Timer gegen die Uhr prüfen
    AdvanceClock { now: Duration },

    /// Route aus der Sammlung entfernen
    DeleteRoute { id: String },
    /// Sammlung aus der Speicherdatei laden
    LoadRoutes,
    /// GeoJSON-Datei importieren
    ImportGeoJson { path: String },
    /// Sammlung als GeoJSON exportieren
    ExportGeoJson { path: String },
    /// Optionen übernehmen und persistieren
    ApplyOptions { options: EditorOptions },
}
