//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Geometrie-Funktionen, Laufzeit-Optionen und die Anzeige-Ebene,
//! die `app` baut und der externe Renderer konsumiert.

mod display;
pub mod geometry;
pub mod options;

pub use display::{DisplayLayer, DisplayLine, DisplayVertex, LineRole};
pub use geometry::{geo_distance, smooth};
pub use options::EditorOptions;
