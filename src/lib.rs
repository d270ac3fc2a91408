//! Metro Route Editor Library.
//! Interaktive Bearbeitung von Routen-Linien: Kontrollpunkte, Abzweige,
//! Ketten-Verformung und Gesten-Erkennung, als Library für Host-Anwendungen.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, EditSession, GestureMachine, GestureOutcome,
    GestureTarget, InputKind, SuppressReason, UiState, ViewState,
};
pub use core::{
    Branch, ChainParams, ConnectionRef, ControlPointModel, PersistedRouteFeature, PointRef,
    RouteCollection, RouteGeometry, RouteProperties, SequenceId, VertexIndex,
};
pub use shared::{DisplayLayer, EditorOptions};
