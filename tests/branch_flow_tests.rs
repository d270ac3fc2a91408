use approx::assert_relative_eq;
use glam::DVec2;
use metro_route_editor::{AppController, AppIntent, AppState, ConnectionRef};
use metro_route_editor::{GestureTarget, InputKind, PointRef, RouteGeometry, RouteProperties};
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn line(points: &[[f64; 2]]) -> Vec<DVec2> {
    points.iter().map(|p| DVec2::new(p[0], p[1])).collect()
}

fn draw(controller: &mut AppController, state: &mut AppState, points: &[[f64; 2]]) {
    controller
        .handle_intent(state, AppIntent::LineDrawStarted)
        .expect("LineDrawStarted sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(
            state,
            AppIntent::StartEditNewLine {
                points: line(points),
            },
        )
        .expect("StartEditNewLine sollte ohne Fehler durchlaufen");
}

/// Hauptlinie mit vier Punkten und einem Abzweig an `Main(1)`.
fn with_branch() -> (AppController, AppState) {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_intent(
            &mut state,
            AppIntent::StartEditNewLine {
                points: line(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]]),
            },
        )
        .expect("Hauptlinie");
    draw(
        &mut controller,
        &mut state,
        &[[1.02, 0.03], [1.0, 1.0], [1.0, 2.0]],
    );
    (controller, state)
}

fn double_activate(
    controller: &mut AppController,
    state: &mut AppState,
    target: GestureTarget,
    position: DVec2,
    start: u64,
) {
    for at in [start, start + 100] {
        controller
            .handle_intent(
                state,
                AppIntent::Activated {
                    target,
                    position,
                    input: InputKind::Mouse,
                    at: ms(at),
                },
            )
            .expect("Activated");
    }
}

#[test]
fn test_drawn_line_snaps_to_nearest_vertex_as_branch() {
    let (_, state) = with_branch();
    let session = state.session.as_ref().expect("Session erwartet");

    assert_eq!(session.model.main().len(), 4);
    assert_eq!(session.model.branches().len(), 1);
    let branch = &session.model.branches()[0];
    assert_eq!(branch.connection, ConnectionRef::ToMain(1));
    assert_eq!(branch.points, line(&[[1.0, 1.0], [1.0, 2.0]]));
    assert!(!session.branch_drawing);

    assert_eq!(state.display.lines.len(), 2);
    assert_eq!(state.display.lines[1].coordinates[0], DVec2::new(1.0, 0.0));
    assert_eq!(state.display.vertices.len(), 6);
}

#[test]
fn test_line_double_click_is_suppressed_while_drawing_branch() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_intent(
            &mut state,
            AppIntent::StartEditNewLine {
                points: line(&[[0.0, 0.0], [1.0, 0.0]]),
            },
        )
        .expect("Hauptlinie");
    controller
        .handle_intent(&mut state, AppIntent::LineDrawStarted)
        .expect("LineDrawStarted");

    double_activate(
        &mut controller,
        &mut state,
        GestureTarget::Line,
        DVec2::new(0.5, 0.0),
        0,
    );
    assert_eq!(
        state.session.as_ref().expect("Session").model.main().len(),
        2,
        "Einfügen muss während des Abzweig-Zeichnens unterdrückt sein"
    );

    controller
        .handle_intent(&mut state, AppIntent::LineDrawCancelled)
        .expect("LineDrawCancelled");
    assert!(!state.session.as_ref().expect("Session").branch_drawing);

    double_activate(
        &mut controller,
        &mut state,
        GestureTarget::Line,
        DVec2::new(0.5, 0.0),
        1000,
    );
    assert_eq!(state.session.as_ref().expect("Session").model.main().len(), 3);
}

#[test]
fn test_branch_without_points_after_anchor_is_refused() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    controller
        .handle_intent(
            &mut state,
            AppIntent::StartEditNewLine {
                points: line(&[[0.0, 0.0], [1.0, 0.0]]),
            },
        )
        .expect("Hauptlinie");

    draw(&mut controller, &mut state, &[[0.5, 0.5]]);

    let session = state.session.as_ref().expect("Session erwartet");
    assert!(session.model.branches().is_empty());
    assert!(!session.branch_drawing);
    assert!(state.ui.status_message.is_some());
}

#[test]
fn test_dragging_anchor_pulls_branch_root_with_coupling() {
    let (mut controller, mut state) = with_branch();

    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerDown {
                target: Some(GestureTarget::Vertex(PointRef::Main(1))),
                position: DVec2::new(1.0, 0.0),
                input: InputKind::Touch,
                touch_count: 1,
                at: ms(0),
            },
        )
        .expect("PointerDown");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                position: DVec2::new(1.0, 0.2),
                at: ms(50),
            },
        )
        .expect("PointerMoved");
    controller
        .handle_intent(&mut state, AppIntent::PointerUp { at: ms(80) })
        .expect("PointerUp");

    let model = &state.session.as_ref().expect("Session").model;
    let root = model.position(PointRef::Branch(0, 0)).expect("Wurzel");
    assert_relative_eq!(root.x, 1.0);
    assert_relative_eq!(root.y, 1.1, epsilon = 1e-12);
    assert_eq!(model.position(PointRef::Branch(0, 1)), Some(DVec2::new(1.0, 2.0)));
    assert_relative_eq!(model.main()[2].y, 0.1, epsilon = 1e-12);
    assert_eq!(model.main()[3], DVec2::new(3.0, 0.0));
}

#[test]
fn test_two_finger_touch_never_starts_drag() {
    let (mut controller, mut state) = with_branch();

    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerDown {
                target: Some(GestureTarget::Vertex(PointRef::Main(1))),
                position: DVec2::new(1.0, 0.0),
                input: InputKind::Touch,
                touch_count: 2,
                at: ms(0),
            },
        )
        .expect("PointerDown");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                position: DVec2::new(5.0, 5.0),
                at: ms(20),
            },
        )
        .expect("PointerMoved");

    assert!(state.view.pan_enabled);
    assert_eq!(
        state.session.as_ref().expect("Session").model.main()[1],
        DVec2::new(1.0, 0.0)
    );
}

#[test]
fn test_deleting_anchor_removes_nested_branches() {
    let (mut controller, mut state) = with_branch();
    // Zweiter Abzweig rastet auf die Wurzel des ersten ein
    draw(
        &mut controller,
        &mut state,
        &[[1.05, 1.02], [2.0, 1.0]],
    );
    {
        let model = &state.session.as_ref().expect("Session").model;
        assert_eq!(model.branches().len(), 2);
        assert_eq!(model.branches()[1].connection, ConnectionRef::ToBranch(0, 0));
    }

    double_activate(
        &mut controller,
        &mut state,
        GestureTarget::Vertex(PointRef::Main(1)),
        DVec2::new(1.0, 0.0),
        0,
    );

    let model = &state.session.as_ref().expect("Session").model;
    assert_eq!(model.main(), line(&[[0.0, 0.0], [2.0, 0.0], [3.0, 0.0]]).as_slice());
    assert!(model.branches().is_empty());
    assert_eq!(state.display.lines.len(), 1);
}

#[test]
fn test_branches_survive_save_and_reopen() {
    let (mut controller, mut state) = with_branch();

    controller
        .handle_intent(
            &mut state,
            AppIntent::SaveEdit {
                properties: RouteProperties::default(),
            },
        )
        .expect("SaveEdit");

    let feature = state.routes.iter().next().expect("Route erwartet");
    let RouteGeometry::MultiLineString(lines) = &feature.geometry else {
        panic!("MultiLineString erwartet, war {:?}", feature.geometry);
    };
    assert_eq!(lines.len(), 2);
    assert_eq!(feature.branches.as_ref().map(Vec::len), Some(1));
    let id = feature.id.clone();

    controller
        .handle_intent(&mut state, AppIntent::StartEditRoute { id })
        .expect("StartEditRoute");

    let session = state.session.as_ref().expect("Session erwartet");
    assert!(!session.is_new());
    assert_eq!(session.model.main().len(), 4);
    assert_eq!(session.model.branches().len(), 1);
    assert_eq!(session.model.branches()[0].connection, ConnectionRef::ToMain(1));
    assert!(session.model.fixed_points().is_empty());
}
