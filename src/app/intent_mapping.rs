//! Mapping von Host-Intents auf mutierende Session-Commands.

use glam::IVec2;

use super::state::{EditTool, SessionState};
use super::{SessionCommand, SessionIntent};
use crate::core::{round_half_up, CanvasView};

/// Übersetzt einen `SessionIntent` in eine Sequenz ausführbarer `SessionCommand`s.
///
/// Während der Optimierer läuft, erzeugen Zieh-Gesten und Pfeiltasten keine
/// Commands; Werkzeugklicks werden nach Phase unterschieden.
pub fn map_intent_to_commands(
    state: &SessionState,
    canvas: &CanvasView,
    intent: SessionIntent,
) -> Vec<SessionCommand> {
    if !state.is_active() {
        return Vec::new();
    }
    let optimizing = state.is_optimizing();

    match intent {
        SessionIntent::ToolClicked { tool } => map_tool_click(state, tool),
        SessionIntent::PointerPressed { screen, modifiers } => match state.current_tool {
            EditTool::Magnify => vec![SessionCommand::Zoom {
                screen,
                zoom_in: !modifiers.zooms_out(),
            }],
            _ if optimizing => Vec::new(),
            EditTool::MoveCross if modifiers.shift => vec![SessionCommand::BeginTranslate {
                grid: snap_to_magnification_grid(screen, canvas.magnification),
            }],
            EditTool::MoveCross => vec![SessionCommand::SelectNearestNode { screen }],
            EditTool::Resize => vec![SessionCommand::GrabHullHandle { screen }],
            EditTool::Rotate => vec![SessionCommand::BeginRotate { screen }],
            _ => Vec::new(),
        },
        SessionIntent::PointerDragged { .. } if optimizing => Vec::new(),
        SessionIntent::PointerDragged { screen, modifiers } => match state.current_tool {
            EditTool::MoveCross if modifiers.shift => vec![SessionCommand::TranslateTo {
                grid: snap_to_magnification_grid(screen, canvas.magnification),
            }],
            EditTool::MoveCross => vec![SessionCommand::MoveSelectedNode { screen }],
            EditTool::Resize if modifiers.shift => vec![SessionCommand::ResizeTo { screen }],
            EditTool::Resize => vec![SessionCommand::StretchTo { screen }],
            EditTool::Rotate => vec![SessionCommand::RotateTo { screen }],
            _ => Vec::new(),
        },
        SessionIntent::PointerReleased => vec![SessionCommand::EndDrag],
        SessionIntent::KeyPressed { key } => {
            if state.current_tool == EditTool::MoveCross && !optimizing {
                vec![SessionCommand::NudgeSelectedNode {
                    direction: key.direction(),
                }]
            } else {
                Vec::new()
            }
        }
    }
}

fn map_tool_click(state: &SessionState, tool: EditTool) -> Vec<SessionCommand> {
    let optimizing = state.is_optimizing();
    match tool {
        EditTool::Accept if optimizing => vec![SessionCommand::ShowStatus {
            message: EditTool::Undefined.status_text(),
        }],
        EditTool::Accept => vec![
            SessionCommand::SetTool {
                tool,
                reset_hull: false,
            },
            SessionCommand::Accept,
        ],
        EditTool::Cancel => vec![
            SessionCommand::SetTool {
                tool,
                reset_hull: false,
            },
            SessionCommand::Cancel,
        ],
        EditTool::MoveCross if optimizing => vec![SessionCommand::StopOptimizing],
        EditTool::MoveCross | EditTool::Magnify => vec![SessionCommand::SetTool {
            tool,
            reset_hull: false,
        }],
        EditTool::Resize | EditTool::Rotate if optimizing => Vec::new(),
        EditTool::Resize | EditTool::Rotate => vec![SessionCommand::SetTool {
            tool,
            reset_hull: true,
        }],
        EditTool::Start if state.single_shot || optimizing => Vec::new(),
        EditTool::Start => vec![SessionCommand::StartOptimizing],
        EditTool::Undefined => vec![SessionCommand::ShowStatus {
            message: tool.status_text(),
        }],
    }
}

/// Rastert eine Bildschirmposition auf das Vergrößerungsraster.
///
/// Verhindert Subpixel-Drift, wenn Translationen über viele Zieh-Events
/// akkumuliert werden.
pub fn snap_to_magnification_grid(screen: IVec2, magnification: f64) -> IVec2 {
    let scale = if magnification > 1.0 {
        1.0 / magnification
    } else {
        magnification
    };
    let snap = |v: i32| round_half_up(round_half_up(v as f64 * scale) as f64 / scale);
    IVec2::new(snap(screen.x), snap(screen.y))
}

#[cfg(test)]
mod tests;
