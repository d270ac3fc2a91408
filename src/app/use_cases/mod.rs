//! Use-Cases der Application-Layer-Orchestrierung.

pub mod branch;
pub mod gesture;
pub mod routes;
pub mod session;
