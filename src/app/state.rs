//! Application State: zentrale Datenhaltung.

use super::{CommandLog, EditSession};
use crate::core::RouteCollection;
use crate::shared::{DisplayLayer, EditorOptions};
use std::path::PathBuf;

/// UI-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Letzte Hinweis- oder Statusmeldung für den Nutzer
    pub status_message: Option<String>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (keine Meldung).
    pub fn new() -> Self {
        Self::default()
    }
}

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Darf die Karte mit dem Zeiger verschoben werden? (aus während eines Drags)
    pub pan_enabled: bool,
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self { pan_enabled: true }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Alle gespeicherten Routen
    pub routes: RouteCollection,
    /// Aktive Bearbeitung (None = kein Editiermodus)
    pub session: Option<EditSession>,
    /// Anzeige-Ebene der aktiven Bearbeitung
    pub display: DisplayLayer,
    /// View-State
    pub view: ViewState,
    /// UI-State
    pub ui: UiState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Pfad der Optionen-Datei (None = Optionen nicht persistieren)
    pub config_path: Option<PathBuf>,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit vorgegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            routes: RouteCollection::new(),
            session: None,
            display: DisplayLayer::empty(),
            view: ViewState::new(),
            ui: UiState::new(),
            command_log: CommandLog::new(),
            options,
            config_path: None,
        }
    }

    /// Läuft gerade eine Bearbeitung?
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// Anzahl gespeicherter Routen (für UI-Anzeige)
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Setzt einen Nutzer-Hinweis und loggt ihn als Warnung.
    pub fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.ui.status_message = Some(message);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
