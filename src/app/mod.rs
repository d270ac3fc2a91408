//! Application-Layer: Controller, State, Events, Gesten und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod gesture;
pub mod handlers;
mod intent_mapping;
pub mod route_assembler;
pub mod session;
/// Application State und Controller
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Routen, Session, Anzeige).
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use gesture::{GestureMachine, GestureOutcome, GestureTarget, InputKind, SuppressReason};
pub use session::EditSession;
pub use state::{AppState, UiState, ViewState};
