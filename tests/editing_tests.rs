use std::sync::{Arc, Mutex};
use std::time::Duration;

use approx::assert_abs_diff_eq;
use glam::{DVec2, IVec2};
use interactive_snake_editor::app::{snap_to_magnification_grid, PointEditor};
use interactive_snake_editor::{
    CanvasView, ControlNode, EditTool, HeadlessSurface, InteractionSession, LinearSplineModel,
    Modifiers, NodeLayout, SessionIntent, SessionPhase, SharedSnake, Surface,
};

fn pentagon() -> Vec<ControlNode> {
    vec![
        ControlNode::new(200.0, 120.0),
        ControlNode::new(280.0, 180.0),
        ControlNode::new(250.0, 270.0),
        ControlNode::new(150.0, 270.0),
        ControlNode::new(120.0, 180.0),
    ]
}

fn assert_nodes_close(actual: &[ControlNode], expected: &[ControlNode], epsilon: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(a.x, e.x, epsilon = epsilon);
        assert_abs_diff_eq!(a.y, e.y, epsilon = epsilon);
    }
}

#[test]
fn test_translate_forth_and_back_restores_nodes() {
    for magnification in [0.5, 1.0, 2.0, 4.0] {
        let canvas = CanvasView {
            magnification,
            ..CanvasView::new(512, 512)
        };
        let mut editor = PointEditor::new(pentagon(), NodeLayout::Positions, &canvas);
        let delta = IVec2::new(24, -16);
        editor.translate(delta, &canvas);
        editor.translate(-delta, &canvas);
        assert_eq!(editor.nodes(), pentagon().as_slice());
    }
}

#[test]
fn test_rotate_forth_and_back_restores_nodes() {
    let canvas = CanvasView::new(512, 512);
    let mut editor = PointEditor::new(pentagon(), NodeLayout::Positions, &canvas);
    for angle in [0.1, 1.3, -2.7, std::f64::consts::PI] {
        editor.rotate(angle, &canvas);
        editor.rotate(-angle, &canvas);
    }
    assert_nodes_close(editor.nodes(), &pentagon(), 1e-9);
}

#[test]
fn test_rotate_keeps_distances_to_hull_center() {
    let canvas = CanvasView::new(512, 512);
    let mut editor = PointEditor::new(pentagon(), NodeLayout::Positions, &canvas);
    let center = editor.hull().center;
    let before: Vec<f64> = editor
        .nodes()
        .iter()
        .map(|n| n.position().distance(center))
        .collect();
    editor.rotate(0.8, &canvas);
    for (node, distance) in editor.nodes().iter().zip(before) {
        assert_abs_diff_eq!(node.position().distance(center), distance, epsilon = 1e-9);
    }
}

#[test]
fn test_inverting_drags_are_no_ops() {
    let canvas = CanvasView::new(512, 512);
    let mut editor = PointEditor::new(pentagon(), NodeLayout::Positions, &canvas);
    let hull = *editor.hull();

    // Rechte Kante greifen und über das Zentrum bzw. die linke Kante hinaus ziehen
    editor.grab_hull_handle(hull.handle_position(1).as_ivec2());
    assert_eq!(editor.grabbed_handle(), 1);
    let beyond_center = IVec2::new(hull.center.x as i32 - 5, hull.center.y as i32);
    assert!(!editor.resize(beyond_center, &canvas));
    let beyond_anchor = IVec2::new(hull.corners[0].x as i32 - 5, hull.center.y as i32);
    assert!(!editor.stretch(beyond_anchor, &canvas));

    assert_eq!(editor.nodes(), pentagon().as_slice());
    assert_eq!(*editor.hull(), hull);
}

#[test]
fn test_frozen_nodes_survive_every_operation() {
    let canvas = CanvasView::new(512, 512);
    let mut nodes = pentagon();
    nodes[2].frozen = true;
    let frozen = nodes[2];
    let mut editor = PointEditor::new(nodes, NodeLayout::Positions, &canvas);

    editor.translate(IVec2::new(10, 10), &canvas);
    editor.rotate(0.5, &canvas);
    editor.grab_hull_handle(IVec2::new(300, 190));
    editor.resize(IVec2::new(320, 190), &canvas);
    editor.stretch(IVec2::new(340, 190), &canvas);
    editor.select_nearest(frozen.rounded(), &canvas);
    editor.move_current(IVec2::new(0, 0), &canvas);
    editor.nudge_current(IVec2::new(1, 0), &canvas);

    assert_eq!(editor.nodes()[2], frozen);
    assert_ne!(editor.nodes()[0], pentagon()[0]);
}

#[test]
fn test_hidden_nodes_are_still_edited() {
    let canvas = CanvasView::new(512, 512);
    let mut nodes = pentagon();
    nodes[0].hidden = true;
    let mut editor = PointEditor::new(nodes, NodeLayout::Positions, &canvas);
    editor.translate(IVec2::new(3, 4), &canvas);
    assert_eq!(editor.nodes()[0].position(), DVec2::new(203.0, 124.0));
    assert!(editor.is_handle_hidden(0));
}

#[test]
fn test_magnification_grid_snapping() {
    assert_eq!(snap_to_magnification_grid(IVec2::new(9, 14), 4.0), IVec2::new(8, 16));
    assert_eq!(snap_to_magnification_grid(IVec2::new(7, -3), 1.0), IVec2::new(7, -3));
    assert_eq!(snap_to_magnification_grid(IVec2::new(5, 6), 0.5), IVec2::new(6, 6));
}

#[test]
fn test_session_translate_drag_round_trip() {
    let model = Arc::new(Mutex::new(
        LinearSplineModel::new(5, 512, 512, None).expect("M = 5 ist gültig"),
    ));
    let session = Arc::new(InteractionSession::default());
    let handle = session.handle();
    let surface: Arc<dyn Surface> = Arc::new(HeadlessSurface::new(512, 512));
    let interaction = {
        let session = Arc::clone(&session);
        let snake: SharedSnake = model.clone();
        std::thread::spawn(move || session.interact(&snake, surface))
    };
    assert!(handle.wait_for_phase(SessionPhase::Editing, Duration::from_secs(10)));
    let before = handle.working_nodes().expect("Session läuft");

    let shift = Modifiers::SHIFT;
    let dispatch = |intent| handle.dispatch(intent).expect("Event sollte durchlaufen");
    dispatch(SessionIntent::PointerPressed {
        screen: IVec2::new(100, 100),
        modifiers: shift,
    });
    dispatch(SessionIntent::PointerDragged {
        screen: IVec2::new(130, 90),
        modifiers: shift,
    });
    let moved = handle.working_nodes().expect("Session läuft");
    assert_eq!(moved[0].position(), before[0].position() + DVec2::new(30.0, -10.0));

    dispatch(SessionIntent::PointerDragged {
        screen: IVec2::new(100, 100),
        modifiers: shift,
    });
    dispatch(SessionIntent::PointerReleased);
    assert_eq!(handle.working_nodes().expect("Session läuft"), before);

    dispatch(SessionIntent::ToolClicked {
        tool: EditTool::Accept,
    });
    let status = interaction.join().expect("Session-Thread sollte nicht abstürzen");
    assert!(!status.canceled_by_user);
}
