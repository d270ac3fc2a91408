//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Host-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Session ===
            AppCommand::BeginSession { points } => handlers::session::begin(state, points),
            AppCommand::OpenRoute { id } => handlers::session::open(state, &id),
            AppCommand::SaveSession { properties } => handlers::session::save(state, properties)?,
            AppCommand::DiscardSession => handlers::session::discard(state),
            AppCommand::ToggleCurveMode => handlers::session::toggle_curve_mode(state),

            // === Abzweige ===
            AppCommand::BeginBranchDraw => handlers::session::begin_branch_draw(state),
            AppCommand::AttachBranch { points } => handlers::session::attach_branch(state, &points),
            AppCommand::AbortBranchDraw => handlers::session::abort_branch_draw(state),

            // === Gesten ===
            AppCommand::PressPointer {
                target,
                position,
                input,
                touch_count,
                at,
            } => handlers::gesture::press(state, target, position, input, touch_count, at),
            AppCommand::MovePointer { position, at } => {
                handlers::gesture::move_to(state, position, at)
            }
            AppCommand::ReleasePointer { at } => handlers::gesture::release(state, at),
            AppCommand::Activate {
                target,
                position,
                input,
                at,
            } => handlers::gesture::activate(state, target, position, input, at),
            AppCommand::AdvanceClock { now } => handlers::gesture::tick(state, now),

            // === Routen-Sammlung ===
            AppCommand::DeleteRoute { id } => handlers::routes::delete(state, &id)?,
            AppCommand::LoadRoutes => handlers::routes::load(state)?,
            AppCommand::ImportGeoJson { path } => handlers::routes::import(state, &path)?,
            AppCommand::ExportGeoJson { path } => handlers::routes::export(state, &path)?,
            AppCommand::ApplyOptions { options } => handlers::routes::apply_options(state, options)?,
        }

        Ok(())
    }
}
