//! Use-Case-Funktionen für die Routen-Sammlung.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use crate::core::{parse_feature_collection, RouteCollection};
use crate::shared::EditorOptions;
use std::collections::HashSet;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Schreibt die Sammlung in die konfigurierte Speicherdatei (falls gesetzt).
pub fn persist(state: &AppState) -> anyhow::Result<()> {
    if let Some(path) = state.options.storage_file.as_deref() {
        state.routes.save_to_file(Path::new(path))?;
        log::debug!("{} Routen gespeichert nach {}", state.routes.len(), path);
    }
    Ok(())
}

/// Lädt die Sammlung aus der konfigurierten Speicherdatei.
pub fn load_routes(state: &mut AppState) -> anyhow::Result<()> {
    let Some(path) = state.options.storage_file.clone() else {
        state.notify("Keine Speicherdatei konfiguriert");
        return Ok(());
    };
    state.routes = RouteCollection::load_from_file(Path::new(&path))?;
    Ok(())
}

/// Löscht eine Route per ID. Unbekannte IDs ergeben einen Hinweis.
pub fn delete_route(state: &mut AppState, id: &str) -> anyhow::Result<()> {
    if state.routes.remove(id).is_none() {
        state.notify(format!("Route '{id}' nicht gefunden"));
        return Ok(());
    }
    log::info!("Route '{id}' gelöscht");
    state.ui.status_message = Some(format!("Route '{id}' gelöscht"));
    persist(state)
}

/// Importiert eine GeoJSON-FeatureCollection aus einem String.
///
/// Ungültige Eingaben ergeben einen Hinweis, die Sammlung bleibt dann unverändert.
/// Gibt die Anzahl importierter Routen zurück.
pub fn import_geojson_str(state: &mut AppState, json: &str) -> anyhow::Result<usize> {
    let now_millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let mut features = match parse_feature_collection(json, now_millis) {
        Ok(features) => features,
        Err(e) => {
            state.notify(format!("Import fehlgeschlagen: {e:#}"));
            return Ok(0);
        }
    };

    // Kollidierende IDs (Sammlung oder gleicher Import) bekommen eine neue
    let mut seen = HashSet::with_capacity(features.len());
    for feature in &mut features {
        if state.routes.contains(&feature.id) || seen.contains(&feature.id) {
            let fresh = uuid::Uuid::new_v4().to_string();
            log::warn!("Import: ID '{}' existiert bereits, neu vergeben als '{}'", feature.id, fresh);
            feature.id = fresh;
        }
        seen.insert(feature.id.clone());
    }

    let count = features.len();
    state.routes.extend(features);
    log::info!("{count} Routen importiert");
    state.ui.status_message = Some(format!("{count} Routen importiert"));
    persist(state)?;
    Ok(count)
}

/// Importiert eine GeoJSON-Datei.
pub fn import_file(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)?;
    import_geojson_str(state, &content)?;
    Ok(())
}

/// Exportiert alle Routen als GeoJSON-Datei.
pub fn export_file(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    let json = state.routes.to_feature_collection_json()?;
    std::fs::write(path, json)?;
    log::info!("{} Routen exportiert nach {}", state.routes.len(), path);
    state.ui.status_message = Some(format!("{} Routen exportiert", state.routes.len()));
    Ok(())
}

/// Übernimmt neue Optionen, zeichnet neu und persistiert sie (falls Pfad gesetzt).
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    state.options = options;
    crate::app::route_assembler::refresh(state);
    match state.config_path.as_deref() {
        Some(path) => state.options.save_to_file(path),
        None => Ok(()),
    }
}
