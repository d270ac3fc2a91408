use glam::DVec2;
use metro_route_editor::{AppCommand, AppController, AppIntent, AppState};
use metro_route_editor::{GestureTarget, InputKind, PointRef, RouteProperties};
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn line(points: &[[f64; 2]]) -> Vec<DVec2> {
    points.iter().map(|p| DVec2::new(p[0], p[1])).collect()
}

fn editing(points: &[[f64; 2]]) -> (AppController, AppState) {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_intent(
            &mut state,
            AppIntent::StartEditNewLine {
                points: line(points),
            },
        )
        .expect("StartEditNewLine sollte ohne Fehler durchlaufen");
    (controller, state)
}

fn main_points(state: &AppState) -> Vec<DVec2> {
    state
        .session
        .as_ref()
        .expect("Session erwartet")
        .model
        .main()
        .to_vec()
}

fn press(controller: &mut AppController, state: &mut AppState, point: PointRef, pos: DVec2, at: u64) {
    controller
        .handle_intent(
            state,
            AppIntent::PointerDown {
                target: Some(GestureTarget::Vertex(point)),
                position: pos,
                input: InputKind::Mouse,
                touch_count: 0,
                at: ms(at),
            },
        )
        .expect("PointerDown");
}

fn activate(
    controller: &mut AppController,
    state: &mut AppState,
    target: GestureTarget,
    pos: DVec2,
    input: InputKind,
    at: u64,
) {
    controller
        .handle_intent(
            state,
            AppIntent::Activated {
                target,
                position: pos,
                input,
                at: ms(at),
            },
        )
        .expect("Activated");
}

#[test]
fn test_new_line_starts_session_and_fills_display() {
    let (_, state) = editing(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);

    assert!(state.is_editing());
    assert_eq!(state.display.lines.len(), 1);
    assert_eq!(state.display.vertices.len(), 3);
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::BeginSession { .. })
    ));
}

#[test]
fn test_single_point_line_is_refused_with_notice() {
    let (_, state) = editing(&[[0.0, 0.0]]);

    assert!(!state.is_editing());
    assert!(state.ui.status_message.is_some());
}

#[test]
fn test_drag_scenario_through_controller() {
    let (mut controller, mut state) =
        editing(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]]);

    press(&mut controller, &mut state, PointRef::Main(2), DVec2::new(2.0, 0.0), 0);
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                position: DVec2::new(3.0, 1.0),
                at: ms(40),
            },
        )
        .expect("PointerMoved");

    assert!(!state.view.pan_enabled, "Pan muss während des Drags aus sein");
    assert_eq!(state.display.vertices[2].position, DVec2::new(3.0, 1.0));

    controller
        .handle_intent(&mut state, AppIntent::PointerUp { at: ms(60) })
        .expect("PointerUp");

    assert!(state.view.pan_enabled);
    assert_eq!(
        main_points(&state),
        line(&[[0.0, 0.0], [1.5, 0.5], [3.0, 1.0], [3.5, 0.5], [4.0, 0.0]])
    );
}

#[test]
fn test_double_click_deletes_interior_point() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
    let target = GestureTarget::Vertex(PointRef::Main(1));

    activate(&mut controller, &mut state, target, DVec2::X, InputKind::Mouse, 0);
    activate(&mut controller, &mut state, target, DVec2::X, InputKind::Mouse, 150);

    assert_eq!(main_points(&state), line(&[[0.0, 0.0], [2.0, 0.0]]));
    assert_eq!(state.display.vertices.len(), 2);
}

#[test]
fn test_double_tap_refused_at_minimum_sets_notice() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0]]);
    let target = GestureTarget::Vertex(PointRef::Main(0));

    activate(&mut controller, &mut state, target, DVec2::ZERO, InputKind::Touch, 0);
    activate(&mut controller, &mut state, target, DVec2::ZERO, InputKind::Touch, 200);

    assert_eq!(main_points(&state).len(), 2);
    assert!(state.ui.status_message.is_some());
}

#[test]
fn test_double_click_on_line_inserts_point() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
    let pos = DVec2::new(0.5, 0.01);

    activate(&mut controller, &mut state, GestureTarget::Line, pos, InputKind::Mouse, 0);
    activate(&mut controller, &mut state, GestureTarget::Line, pos, InputKind::Mouse, 100);

    assert_eq!(main_points(&state)[1], pos);
    assert_eq!(state.display.vertices.len(), 4);
}

#[test]
fn test_hold_toggles_fixed_via_tick() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);

    press(&mut controller, &mut state, PointRef::Main(1), DVec2::X, 1000);
    controller
        .handle_intent(&mut state, AppIntent::Tick { now: ms(1500) })
        .expect("Tick");
    controller
        .handle_intent(&mut state, AppIntent::PointerUp { at: ms(1550) })
        .expect("PointerUp");

    let session = state.session.as_ref().expect("Session erwartet");
    assert!(session.model.is_fixed(PointRef::Main(1)));
    assert!(state
        .display
        .vertex(PointRef::Main(1))
        .is_some_and(|v| v.fixed));
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::ReleasePointer { .. })
    ));
}

#[test]
fn test_double_click_right_after_drag_does_not_delete() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]);
    let target = GestureTarget::Vertex(PointRef::Main(1));

    press(&mut controller, &mut state, PointRef::Main(1), DVec2::X, 0);
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                position: DVec2::new(1.0, 1.0),
                at: ms(30),
            },
        )
        .expect("PointerMoved");
    controller
        .handle_intent(&mut state, AppIntent::PointerUp { at: ms(60) })
        .expect("PointerUp");

    activate(&mut controller, &mut state, target, DVec2::ONE, InputKind::Mouse, 60);
    activate(&mut controller, &mut state, target, DVec2::ONE, InputKind::Mouse, 200);

    assert_eq!(main_points(&state).len(), 4);
}

#[test]
fn test_gestures_without_session_are_ignored() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::PointerUp { at: ms(1) })
        .expect("PointerUp");

    assert!(state.command_log.is_empty());
    assert!(state.display.is_empty());
}

#[test]
fn test_save_new_route_assigns_id_and_applies_defaults() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0]]);

    controller
        .handle_intent(
            &mut state,
            AppIntent::SaveEdit {
                properties: RouteProperties {
                    name: Some("Linie A".into()),
                    ..RouteProperties::default()
                },
            },
        )
        .expect("SaveEdit");

    assert!(!state.is_editing());
    assert!(state.display.is_empty());
    assert_eq!(state.route_count(), 1);

    let feature = state.routes.iter().next().expect("Route erwartet");
    assert!(!feature.id.is_empty());
    assert_eq!(feature.properties.name.as_deref(), Some("Linie A"));
    assert_eq!(feature.properties.stroke.as_deref(), Some("#ff0000"));
    assert_eq!(feature.properties.stroke_width, Some(6.0));
}

#[test]
fn test_reedit_keeps_id_and_position() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0]]);
    controller
        .handle_intent(
            &mut state,
            AppIntent::SaveEdit {
                properties: RouteProperties::default(),
            },
        )
        .expect("SaveEdit");
    controller
        .handle_intent(
            &mut state,
            AppIntent::StartEditNewLine {
                points: line(&[[5.0, 5.0], [6.0, 5.0]]),
            },
        )
        .expect("zweite Linie");
    controller
        .handle_intent(
            &mut state,
            AppIntent::SaveEdit {
                properties: RouteProperties::default(),
            },
        )
        .expect("SaveEdit");

    let first_id = state.routes.iter().next().expect("Route").id.clone();
    controller
        .handle_intent(&mut state, AppIntent::StartEditRoute { id: first_id.clone() })
        .expect("StartEditRoute");
    let target = GestureTarget::Line;
    activate(&mut controller, &mut state, target, DVec2::new(0.5, 0.0), InputKind::Mouse, 0);
    activate(&mut controller, &mut state, target, DVec2::new(0.5, 0.0), InputKind::Mouse, 100);
    controller
        .handle_intent(
            &mut state,
            AppIntent::SaveEdit {
                properties: RouteProperties::default(),
            },
        )
        .expect("SaveEdit");

    let ids: Vec<&str> = state.routes.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], first_id);
    let control_points = state
        .routes
        .get(&first_id)
        .and_then(|f| f.control_points.as_ref())
        .expect("Kontrollpunkte erwartet");
    assert_eq!(control_points.len(), 3);
}

#[test]
fn test_cancel_discards_session_without_touching_routes() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 0.0]]);

    controller
        .handle_intent(&mut state, AppIntent::CancelEdit)
        .expect("CancelEdit");

    assert!(!state.is_editing());
    assert!(state.routes.is_empty());
    assert!(state.display.is_empty());
}

#[test]
fn test_unknown_route_id_produces_notice() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::StartEditRoute { id: "fehlt".into() })
        .expect("StartEditRoute");
    assert!(!state.is_editing());
    assert!(state.ui.status_message.is_some());

    state.ui.status_message = None;
    controller
        .handle_intent(
            &mut state,
            AppIntent::DeleteRouteRequested { id: "fehlt".into() },
        )
        .expect("DeleteRouteRequested");
    assert!(state.ui.status_message.is_some());
}

#[test]
fn test_curve_mode_smooths_display() {
    let (mut controller, mut state) = editing(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]);
    assert_eq!(state.display.lines[0].coordinates.len(), 3);

    controller
        .handle_intent(&mut state, AppIntent::CurveModeToggled)
        .expect("CurveModeToggled");

    assert!(state.options.smooth_curves);
    assert_eq!(state.display.lines[0].coordinates.len(), 21);
    assert_eq!(state.display.vertices.len(), 3);
}
