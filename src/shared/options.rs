//! Zentrale Konfiguration für den Routen-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Glättung ────────────────────────────────────────────────────────

/// Stützpunkte pro Catmull-Rom-Segment.
pub const SAMPLES_PER_SEGMENT: usize = super::geometry::DEFAULT_SAMPLES_PER_SEGMENT;

// ── Ketten-Verformung ───────────────────────────────────────────────

/// Anzahl Nachbarschritte pro Richtung.
pub const CHAIN_STEPS: usize = 3;
/// Einflussfaktor pro Schritt (Schritt k bekommt `CHAIN_FALLOFF^k`).
pub const CHAIN_FALLOFF: f64 = 0.5;
/// Kopplungsfaktor zwischen Hauptlinie und Abzweig-Wurzel.
pub const BRANCH_COUPLING: f64 = 0.5;

// ── Gesten-Timing ───────────────────────────────────────────────────

/// Halte-Dauer (Maus) bis ein Punkt fixiert/gelöst wird.
pub const HOLD_DURATION_MOUSE_MS: u64 = 500;
/// Halte-Dauer (Touch) bis ein Punkt fixiert/gelöst wird.
pub const HOLD_DURATION_TOUCH_MS: u64 = 700;
/// Maximaler Abstand zwischen zwei Aktivierungen für eine Doppel-Aktivierung.
pub const DOUBLE_ACTIVATION_WINDOW_MS: u64 = 300;
/// Lebensdauer der Unterdrückungs-Flags nach Löschen bzw. Drag.
pub const SUPPRESSION_WINDOW_MS: u64 = 400;

// ── Routen-Darstellung ──────────────────────────────────────────────

/// Standard-Linienfarbe neuer Routen.
pub const DEFAULT_STROKE: &str = "#ff0000";
/// Standard-Linienbreite neuer Routen (Pixel).
pub const DEFAULT_STROKE_WIDTH: u32 = 6;
/// Standard-Deckkraft neuer Routen.
pub const DEFAULT_STROKE_OPACITY: f64 = 1.0;

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `metro_route_editor.toml` gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorOptions {
    // ── Glättung ────────────────────────────────────────────────
    /// Kurvenmodus: Anzeige und gespeicherte Geometrie werden geglättet
    pub smooth_curves: bool,
    /// Catmull-Rom-Stützpunkte pro Segment
    pub samples_per_segment: usize,

    // ── Ketten-Verformung ───────────────────────────────────────
    /// Schritte pro Richtung
    pub chain_steps: usize,
    /// Einflussfaktor pro Schritt
    pub chain_falloff: f64,
    /// Kopplung Hauptlinie ↔ Abzweig-Wurzel
    pub branch_coupling: f64,

    // ── Gesten ──────────────────────────────────────────────────
    /// Halte-Dauer (Maus) in Millisekunden
    pub hold_duration_mouse_ms: u64,
    /// Halte-Dauer (Touch) in Millisekunden
    pub hold_duration_touch_ms: u64,
    /// Doppel-Aktivierungs-Fenster in Millisekunden
    pub double_activation_window_ms: u64,
    /// Lebensdauer der Unterdrückungs-Flags in Millisekunden
    pub suppression_window_ms: u64,

    // ── Routen ──────────────────────────────────────────────────
    /// Standard-Linienfarbe
    pub default_stroke: String,
    /// Standard-Linienbreite
    pub default_stroke_width: u32,
    /// Standard-Deckkraft
    pub default_stroke_opacity: f64,

    // ── Speicher ────────────────────────────────────────────────
    /// Datei der Routen-Sammlung (None = nur im Speicher)
    pub storage_file: Option<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            smooth_curves: false,
            samples_per_segment: SAMPLES_PER_SEGMENT,

            chain_steps: CHAIN_STEPS,
            chain_falloff: CHAIN_FALLOFF,
            branch_coupling: BRANCH_COUPLING,

            hold_duration_mouse_ms: HOLD_DURATION_MOUSE_MS,
            hold_duration_touch_ms: HOLD_DURATION_TOUCH_MS,
            double_activation_window_ms: DOUBLE_ACTIVATION_WINDOW_MS,
            suppression_window_ms: SUPPRESSION_WINDOW_MS,

            default_stroke: DEFAULT_STROKE.to_string(),
            default_stroke_width: DEFAULT_STROKE_WIDTH,
            default_stroke_opacity: DEFAULT_STROKE_OPACITY,

            storage_file: None,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Halte-Dauer für die jeweilige Eingabeart.
    pub fn hold_duration(&self, touch: bool) -> Duration {
        if touch {
            Duration::from_millis(self.hold_duration_touch_ms)
        } else {
            Duration::from_millis(self.hold_duration_mouse_ms)
        }
    }

    /// Doppel-Aktivierungs-Fenster als `Duration`.
    pub fn double_activation_window(&self) -> Duration {
        Duration::from_millis(self.double_activation_window_ms)
    }

    /// Lebensdauer der Unterdrückungs-Flags als `Duration`.
    pub fn suppression_window(&self) -> Duration {
        Duration::from_millis(self.suppression_window_ms)
    }

    /// Parameter der Ketten-Verformung.
    pub fn chain_params(&self) -> crate::core::ChainParams {
        crate::core::ChainParams {
            steps: self.chain_steps,
            falloff: self.chain_falloff,
            coupling: self.branch_coupling,
        }
    }
}
