//! Handler für die Routen-Sammlung (Löschen, Speicher, Import/Export, Optionen).

use crate::app::use_cases;
use crate::app::AppState;
use crate::shared::EditorOptions;

/// Löscht eine Route per ID.
pub fn delete(state: &mut AppState, id: &str) -> anyhow::Result<()> {
    use_cases::routes::delete_route(state, id)
}

/// Lädt die Sammlung aus der Speicherdatei.
pub fn load(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::routes::load_routes(state)
}

/// Importiert eine GeoJSON-Datei.
pub fn import(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    use_cases::routes::import_file(state, path)
}

/// Exportiert die Sammlung als GeoJSON-Datei.
pub fn export(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    use_cases::routes::export_file(state, path)
}

/// Übernimmt neue Optionen.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    use_cases::routes::apply_options(state, options)
}
