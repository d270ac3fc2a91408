use crate::app::gesture::{GestureTarget, InputKind};
use crate::core::RouteProperties;
use crate::shared::EditorOptions;
use glam::DVec2;
use std::time::Duration;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Externes Zeichenwerkzeug hat eine neue Linie begonnen
    LineDrawStarted,
    /// Externes Zeichenwerkzeug hat eine Linie abgeschlossen
    /// (neue Route, oder Abzweig falls bereits bearbeitet wird)
    StartEditNewLine { points: Vec<DVec2> },
    /// Zeichnen einer Linie abgebrochen
    LineDrawCancelled,
    /// Gespeicherte Route zur Bearbeitung öffnen
    StartEditRoute { id: String },
    /// Bearbeitung mit den angegebenen Eigenschaften speichern
    SaveEdit { properties: RouteProperties },
    /// Bearbeitung verwerfen
    CancelEdit,
    /// Kurvenmodus (Glättung) umschalten
    CurveModeToggled,

    /// Zeiger/Finger gedrückt
    PointerDown {
        target: Option<GestureTarget>,
        position: DVec2,
        input: InputKind,
        touch_count: u8,
        at: Duration,
    },
    /// Zeiger/Finger bewegt
    PointerMoved { position: DVec2, at: Duration },
    /// Zeiger/Finger losgelassen
    PointerUp { at: Duration },
    /// Klick oder Tap auf ein Ziel
    Activated {
        target: GestureTarget,
        position: DVec2,
        input: InputKind,
        at: Duration,
    },
    /// Uhr-Tick des Hosts (treibt den Halte-Timer)
    Tick { now: Duration },

    /// Gespeicherte Route löschen
    DeleteRouteRequested { id: String },
    /// Routen aus der konfigurierten Speicherdatei laden
    LoadRoutesRequested,
    /// GeoJSON-Datei für den Import gewählt
    ImportFileSelected { path: String },
    /// Zielpfad für den GeoJSON-Export gewählt
    ExportFileSelected { path: String },
    /// Optionen übernehmen
    OptionsChanged { options: EditorOptions },
}
