//! Routen-Sammlung: flache, geordnete Liste persistierter Features mit ID-Zugriff.
//!
//! Speicherformat ist ein JSON-Array; Import/Export nutzen eine GeoJSON-FeatureCollection.

use super::PersistedRouteFeature;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marker für `"type": "FeatureCollection"`.
#[derive(Debug, Clone, Copy, Serialize)]
enum CollectionTag {
    FeatureCollection,
}

#[derive(Serialize)]
struct FeatureCollectionOut<'a> {
    #[serde(rename = "type")]
    kind: CollectionTag,
    features: &'a [PersistedRouteFeature],
}

#[derive(Deserialize)]
struct FeatureCollectionIn {
    features: Vec<PersistedRouteFeature>,
}

/// Alle gespeicherten Routen in Einfüge-Reihenfolge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCollection {
    features: Vec<PersistedRouteFeature>,
}

impl RouteCollection {
    /// Erstellt eine leere Sammlung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt eine Sammlung aus vorhandenen Features.
    pub fn from_features(features: Vec<PersistedRouteFeature>) -> Self {
        Self { features }
    }

    /// Anzahl gespeicherter Routen.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Gibt `true` zurück, wenn keine Routen gespeichert sind.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iteriert über alle Routen.
    pub fn iter(&self) -> impl Iterator<Item = &PersistedRouteFeature> {
        self.features.iter()
    }

    /// Sucht eine Route per ID.
    pub fn get(&self, id: &str) -> Option<&PersistedRouteFeature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Prüft, ob eine Route mit der ID existiert.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ersetzt eine vorhandene Route an ihrer Position oder hängt sie an.
    ///
    /// Gibt `true` zurück, wenn eine vorhandene Route ersetzt wurde.
    pub fn upsert(&mut self, feature: PersistedRouteFeature) -> bool {
        match self.features.iter_mut().find(|f| f.id == feature.id) {
            Some(existing) => {
                *existing = feature;
                true
            }
            None => {
                self.features.push(feature);
                false
            }
        }
    }

    /// Entfernt eine Route per ID.
    pub fn remove(&mut self, id: &str) -> Option<PersistedRouteFeature> {
        let pos = self.features.iter().position(|f| f.id == id)?;
        Some(self.features.remove(pos))
    }

    /// Hängt importierte Features an (IDs müssen bereits vergeben sein).
    pub fn extend(&mut self, features: Vec<PersistedRouteFeature>) {
        self.features.extend(features);
    }

    // ── Speicher ────────────────────────────────────────────────────

    /// Lädt die Sammlung aus einer JSON-Datei.
    ///
    /// Eine fehlende Datei ergibt eine leere Sammlung, eine kaputte Datei einen Fehler.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!(
                "Keine Routen-Datei unter {}, starte leer",
                path.display()
            );
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Routen-Datei nicht lesbar: {}", path.display()))?;
        let features: Vec<PersistedRouteFeature> = serde_json::from_str(&content)
            .with_context(|| format!("Routen-Datei beschädigt: {}", path.display()))?;

        log::info!("{} Routen geladen aus {}", features.len(), path.display());
        Ok(Self { features })
    }

    /// Schreibt die Sammlung als JSON-Array.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string(&self.features)?;
        std::fs::write(path, content)
            .with_context(|| format!("Routen-Datei nicht schreibbar: {}", path.display()))?;
        Ok(())
    }

    // ── GeoJSON ─────────────────────────────────────────────────────

    /// Exportiert alle Routen als formatierte GeoJSON-FeatureCollection.
    pub fn to_feature_collection_json(&self) -> anyhow::Result<String> {
        let out = FeatureCollectionOut {
            kind: CollectionTag::FeatureCollection,
            features: &self.features,
        };
        Ok(serde_json::to_string_pretty(&out)?)
    }
}

/// Parst eine GeoJSON-FeatureCollection für den Import.
///
/// Alles-oder-nichts: schlägt ein Feature fehl, wird der ganze Import abgelehnt.
/// Features ohne ID erhalten `imported-<millis>-<index>`.
pub fn parse_feature_collection(
    json: &str,
    now_millis: u128,
) -> anyhow::Result<Vec<PersistedRouteFeature>> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("Import ist kein gültiges JSON")?;

    if value.get("type").and_then(|t| t.as_str()) != Some("FeatureCollection") {
        bail!("Import ist keine GeoJSON-FeatureCollection");
    }
    if !value.get("features").is_some_and(|f| f.is_array()) {
        bail!("FeatureCollection ohne 'features'-Array");
    }

    let parsed: FeatureCollectionIn =
        serde_json::from_value(value).context("Feature im Import ungültig")?;

    let mut features = parsed.features;
    for (index, feature) in features.iter_mut().enumerate() {
        if feature.id.is_empty() {
            feature.id = format!("imported-{now_millis}-{index}");
        }
    }
    Ok(features)
}
