use glam::IVec2;

use crate::app::state::{EditTool, SessionPhase, SessionState};
use crate::app::{ArrowKey, Modifiers, SessionCommand, SessionIntent};
use crate::core::CanvasView;

use super::{map_intent_to_commands, snap_to_magnification_grid};

fn editing() -> SessionState {
    SessionState::editing(false)
}

fn optimizing() -> SessionState {
    SessionState {
        phase: SessionPhase::Optimizing,
        current_tool: EditTool::Start,
        ..SessionState::editing(false)
    }
}

fn canvas() -> CanvasView {
    CanvasView::new(512, 512)
}

fn click(state: &SessionState, tool: EditTool) -> Vec<SessionCommand> {
    map_intent_to_commands(state, &canvas(), SessionIntent::ToolClicked { tool })
}

#[test]
fn accept_maps_to_set_tool_and_accept_when_editing() {
    let commands = click(&editing(), EditTool::Accept);
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[1], SessionCommand::Accept));
}

#[test]
fn accept_is_ignored_while_optimizing() {
    let commands = click(&optimizing(), EditTool::Accept);
    assert_eq!(
        commands,
        vec![SessionCommand::ShowStatus {
            message: "Undefined operation"
        }]
    );
}

#[test]
fn cancel_is_always_honoured() {
    for state in [editing(), optimizing()] {
        let commands = click(&state, EditTool::Cancel);
        assert_eq!(commands.last(), Some(&SessionCommand::Cancel));
    }
}

#[test]
fn move_cross_stops_optimizer_while_optimizing() {
    assert_eq!(
        click(&optimizing(), EditTool::MoveCross),
        vec![SessionCommand::StopOptimizing]
    );
    assert_eq!(
        click(&editing(), EditTool::MoveCross),
        vec![SessionCommand::SetTool {
            tool: EditTool::MoveCross,
            reset_hull: false
        }]
    );
}

#[test]
fn resize_and_rotate_reset_hull_only_when_editing() {
    assert_eq!(
        click(&editing(), EditTool::Rotate),
        vec![SessionCommand::SetTool {
            tool: EditTool::Rotate,
            reset_hull: true
        }]
    );
    assert!(click(&optimizing(), EditTool::Resize).is_empty());
}

#[test]
fn start_requires_optimizer_and_idle_editing() {
    assert_eq!(
        click(&editing(), EditTool::Start),
        vec![SessionCommand::StartOptimizing]
    );
    assert!(click(&SessionState::editing(true), EditTool::Start).is_empty());
    assert!(click(&optimizing(), EditTool::Start).is_empty());
}

#[test]
fn drag_with_shift_translates_on_grid() {
    let state = editing();
    let canvas = CanvasView {
        magnification: 4.0,
        ..canvas()
    };
    let commands = map_intent_to_commands(
        &state,
        &canvas,
        SessionIntent::PointerDragged {
            screen: IVec2::new(9, 14),
            modifiers: Modifiers::SHIFT,
        },
    );
    assert_eq!(
        commands,
        vec![SessionCommand::TranslateTo {
            grid: IVec2::new(8, 16)
        }]
    );
}

#[test]
fn plain_resize_drag_stretches_and_shift_resizes() {
    let state = SessionState {
        current_tool: EditTool::Resize,
        ..editing()
    };
    let screen = IVec2::new(10, 10);
    let plain = map_intent_to_commands(
        &state,
        &canvas(),
        SessionIntent::PointerDragged {
            screen,
            modifiers: Modifiers::default(),
        },
    );
    assert_eq!(plain, vec![SessionCommand::StretchTo { screen }]);
    let shifted = map_intent_to_commands(
        &state,
        &canvas(),
        SessionIntent::PointerDragged {
            screen,
            modifiers: Modifiers::SHIFT,
        },
    );
    assert_eq!(shifted, vec![SessionCommand::ResizeTo { screen }]);
}

#[test]
fn drags_and_keys_are_ignored_while_optimizing() {
    let state = SessionState {
        current_tool: EditTool::MoveCross,
        ..optimizing()
    };
    let drag = map_intent_to_commands(
        &state,
        &canvas(),
        SessionIntent::PointerDragged {
            screen: IVec2::new(1, 1),
            modifiers: Modifiers::default(),
        },
    );
    assert!(drag.is_empty());
    let key = map_intent_to_commands(
        &state,
        &canvas(),
        SessionIntent::KeyPressed { key: ArrowKey::Up },
    );
    assert!(key.is_empty());
}

#[test]
fn arrow_keys_only_nudge_with_move_cross() {
    let commands = map_intent_to_commands(
        &editing(),
        &canvas(),
        SessionIntent::KeyPressed {
            key: ArrowKey::Left,
        },
    );
    assert_eq!(
        commands,
        vec![SessionCommand::NudgeSelectedNode {
            direction: IVec2::new(-1, 0)
        }]
    );
    let rotate = SessionState {
        current_tool: EditTool::Rotate,
        ..editing()
    };
    assert!(map_intent_to_commands(
        &rotate,
        &canvas(),
        SessionIntent::KeyPressed {
            key: ArrowKey::Left
        }
    )
    .is_empty());
}

#[test]
fn magnifier_press_zooms_out_with_modifier() {
    let state = SessionState {
        current_tool: EditTool::Magnify,
        ..editing()
    };
    let screen = IVec2::new(3, 4);
    let commands = map_intent_to_commands(
        &state,
        &canvas(),
        SessionIntent::PointerPressed {
            screen,
            modifiers: Modifiers {
                alt: true,
                ..Modifiers::default()
            },
        },
    );
    assert_eq!(
        commands,
        vec![SessionCommand::Zoom {
            screen,
            zoom_in: false
        }]
    );
}

#[test]
fn inactive_session_maps_nothing() {
    let state = SessionState::default();
    assert!(click(&state, EditTool::Accept).is_empty());
}

#[test]
fn grid_snapping_is_identity_at_unit_magnification() {
    assert_eq!(
        snap_to_magnification_grid(IVec2::new(7, -3), 1.0),
        IVec2::new(7, -3)
    );
}
