//! Core-Domänentypen: Punkt-Referenzen, Kontrollpunkt-Modell, Ketten-Verformung,
//! Spatial-Index und persistierte Routen.

pub mod collection;
/// Kontrollpunkt-Modell einer Route im Editiermodus
///
/// Hauptlinie, Abzweige und Menge fixierter Punkte inkl. Index-Renummerierung.
pub mod control_points;
pub mod deform;
pub mod point_ref;
pub mod route;
pub mod spatial;

pub use collection::{parse_feature_collection, RouteCollection};
pub use control_points::{
    Branch, ControlPointModel, InsertionSite, ModelSnapshot, MIN_MAIN_POINTS,
};
pub use deform::{propagate, ChainParams};
pub use point_ref::{ConnectionRef, PointRef, SequenceId};
pub use route::{
    PersistedBranch, PersistedRouteFeature, Position, RouteGeometry, RouteProperties,
};
pub use spatial::{VertexIndex, VertexMatch};
