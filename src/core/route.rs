//! Persistierte Routen-Features (GeoJSON-kompatibel).
//!
//! Ein Feature trägt die gerenderte Geometrie (abgeleiteter Cache) sowie
//! `controlPoints` und `branches` als Quelle der Wahrheit für die Nachbearbeitung.

use super::ConnectionRef;
use glam::DVec2;
use serde::{de, Deserialize, Deserializer, Serialize};

/// GeoJSON-Position `[x, y]`; zusätzliche Koordinaten (Höhe) werden verworfen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Position(pub DVec2);

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Self(DVec2::new(*x, *y))),
            [_, _, ..] => Err("Position enthält keine endlichen Koordinaten".to_string()),
            _ => Err(format!(
                "Position braucht mindestens 2 Koordinaten, gefunden: {}",
                value.len()
            )),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(value: Position) -> Self {
        [value.0.x, value.0.y]
    }
}

/// Wandelt Punkte in Positionen.
pub fn to_positions(points: &[DVec2]) -> Vec<Position> {
    points.iter().copied().map(Position).collect()
}

/// Wandelt Positionen in Punkte.
pub fn from_positions(positions: &[Position]) -> Vec<DVec2> {
    positions.iter().map(|p| p.0).collect()
}

/// GeoJSON-Geometrie eines Features.
///
/// Bekannte Koordinaten-Geometrien werden streng geprüft. Alles andere
/// (`MultiPolygon`, `GeometryCollection`, `null`, ...) bleibt als rohes JSON
/// erhalten und wird unverändert wieder exportiert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum RouteGeometry {
    /// Einzelner Punkt (nur Import/Export, nicht editierbar)
    Point(Position),
    /// Linie ohne Abzweige
    LineString(Vec<Position>),
    /// Hauptlinie gefolgt von den Abzweig-Linien
    MultiLineString(Vec<Vec<Position>>),
    /// Fläche (äußerer Ring zuerst)
    Polygon(Vec<Vec<Position>>),
    /// Sonstige Geometrie, nicht editierbar
    #[serde(untagged)]
    Other(serde_json::Value),
}

impl RouteGeometry {
    /// Ist das eine Linien-Geometrie?
    pub fn is_line(&self) -> bool {
        matches!(
            self,
            RouteGeometry::LineString(_) | RouteGeometry::MultiLineString(_)
        )
    }

    /// Punkte der (ersten) Linie, falls es eine Linien-Geometrie ist.
    pub fn primary_line(&self) -> Option<Vec<DVec2>> {
        match self {
            RouteGeometry::LineString(coords) => Some(from_positions(coords)),
            RouteGeometry::MultiLineString(lines) => lines.first().map(|l| from_positions(l)),
            RouteGeometry::Point(_) | RouteGeometry::Polygon(_) | RouteGeometry::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for RouteGeometry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value.get("type").and_then(|t| t.as_str());
        let coordinates = || {
            value
                .get("coordinates")
                .cloned()
                .unwrap_or(serde_json::Value::Null)
        };

        let geometry = match kind {
            Some("Point") => serde_json::from_value(coordinates()).map(RouteGeometry::Point),
            Some("LineString") => {
                serde_json::from_value(coordinates()).map(RouteGeometry::LineString)
            }
            Some("MultiLineString") => {
                serde_json::from_value(coordinates()).map(RouteGeometry::MultiLineString)
            }
            Some("Polygon") => serde_json::from_value(coordinates()).map(RouteGeometry::Polygon),
            _ => return Ok(RouteGeometry::Other(value)),
        };
        geometry.map_err(de::Error::custom)
    }
}

/// Marker für `"type": "Feature"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureTag {
    /// GeoJSON-Feature
    #[default]
    Feature,
}

/// Darstellungs- und Beschreibungs-Eigenschaften einer Route.
///
/// Unbekannte Eigenschaften aus importierten Dateien bleiben in `extra` erhalten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    /// Anzeigename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Freitext-Beschreibung
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Linienfarbe (nur Linien)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Linienbreite in Pixeln (nur Linien)
    #[serde(
        rename = "stroke-width",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_width: Option<f64>,
    /// Linien-Deckkraft (nur Linien)
    #[serde(
        rename = "stroke-opacity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stroke_opacity: Option<f64>,
    /// Füllfarbe (nur Flächen)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Füll-Deckkraft (nur Flächen)
    #[serde(
        rename = "fill-opacity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fill_opacity: Option<f64>,
    /// Alle übrigen Eigenschaften
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Serialisierter Abzweig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedBranch {
    /// Anker des Abzweigs
    pub connection: ConnectionRef,
    /// Punktfolge des Abzweigs
    pub points: Vec<Position>,
}

/// Persistierte Route als GeoJSON-Feature mit Editier-Daten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRouteFeature {
    /// Immer `"Feature"`
    #[serde(rename = "type", default)]
    pub kind: FeatureTag,
    /// Routen-ID (leer = noch nicht vergeben)
    #[serde(
        default,
        deserialize_with = "id_from_json",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    /// Gerenderte Geometrie (geglättet oder roh)
    pub geometry: RouteGeometry,
    /// Darstellungs-Eigenschaften
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: RouteProperties,
    /// Editierbare Punkte der Hauptlinie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_points: Option<Vec<Position>>,
    /// Abzweige
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<PersistedBranch>>,
}

impl PersistedRouteFeature {
    /// Erstellt ein Feature ohne Editier-Daten.
    pub fn new(id: impl Into<String>, geometry: RouteGeometry, properties: RouteProperties) -> Self {
        Self {
            kind: FeatureTag::Feature,
            id: id.into(),
            geometry,
            properties,
            control_points: None,
            branches: None,
        }
    }

    /// Hat das Feature eigene Editier-Daten (kein Legacy-Datensatz)?
    pub fn has_edit_data(&self) -> bool {
        self.control_points.is_some()
    }
}

/// GeoJSON erlaubt String- oder Zahl-IDs; beides wird als String geführt.
fn id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// `null` wird wie ein fehlendes Feld behandelt.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
