//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
///
/// Gesten-Primitive ohne aktive Bearbeitung gehören der Karte und ergeben
/// keine Commands.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let editing = state.is_editing();

    match intent {
        AppIntent::LineDrawStarted if editing => vec![AppCommand::BeginBranchDraw],
        AppIntent::LineDrawStarted => vec![],
        AppIntent::StartEditNewLine { points } if editing => {
            vec![AppCommand::AttachBranch { points }]
        }
        AppIntent::StartEditNewLine { points } => vec![AppCommand::BeginSession { points }],
        AppIntent::LineDrawCancelled => {
            let drawing_branch = state.session.as_ref().is_some_and(|s| s.branch_drawing);
            if drawing_branch {
                vec![AppCommand::AbortBranchDraw]
            } else {
                vec![]
            }
        }
        AppIntent::StartEditRoute { id } => vec![AppCommand::OpenRoute { id }],
        AppIntent::SaveEdit { properties } => vec![AppCommand::SaveSession { properties }],
        AppIntent::CancelEdit => vec![AppCommand::DiscardSession],
        AppIntent::CurveModeToggled => vec![AppCommand::ToggleCurveMode],

        AppIntent::PointerDown { .. }
        | AppIntent::PointerMoved { .. }
        | AppIntent::PointerUp { .. }
        | AppIntent::Activated { .. }
        | AppIntent::Tick { .. }
            if !editing =>
        {
            vec![]
        }
        AppIntent::PointerDown {
            target,
            position,
            input,
            touch_count,
            at,
        } => vec![AppCommand::PressPointer {
            target,
            position,
            input,
            touch_count,
            at,
        }],
        AppIntent::PointerMoved { position, at } => {
            vec![AppCommand::MovePointer { position, at }]
        }
        AppIntent::PointerUp { at } => vec![AppCommand::ReleasePointer { at }],
        AppIntent::Activated {
            target,
            position,
            input,
            at,
        } => vec![AppCommand::Activate {
            target,
            position,
            input,
            at,
        }],
        AppIntent::Tick { now } => {
            // Ticks ohne laufende Geste nicht ins Command-Log schreiben
            let gesture_active = state.session.as_ref().is_some_and(|s| !s.gesture.is_idle());
            if gesture_active {
                vec![AppCommand::AdvanceClock { now }]
            } else {
                vec![]
            }
        }

        AppIntent::DeleteRouteRequested { id } => vec![AppCommand::DeleteRoute { id }],
        AppIntent::LoadRoutesRequested => vec![AppCommand::LoadRoutes],
        AppIntent::ImportFileSelected { path } => vec![AppCommand::ImportGeoJson { path }],
        AppIntent::ExportFileSelected { path } => vec![AppCommand::ExportGeoJson { path }],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
    }
}
