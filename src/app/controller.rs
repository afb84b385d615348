//! Tool-Controller für die zentrale Event-Verarbeitung einer Session.

use super::session::SessionInner;
use super::{SessionCommand, SessionIntent};
use crate::core::CanvasView;

/// Orchestriert Host-Events und Feature-Handler auf dem Session-Zustand.
#[derive(Default)]
pub struct ToolController;

impl ToolController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        inner: &mut SessionInner,
        intent: SessionIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(inner, intent);
        for command in commands {
            self.handle_command(inner, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(
        &self,
        inner: &SessionInner,
        intent: SessionIntent,
    ) -> Vec<SessionCommand> {
        let canvas = current_canvas(inner);
        super::intent_mapping::map_intent_to_commands(&inner.state, &canvas, intent)
    }

    /// Führt mutierende Commands auf dem Session-Zustand aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        inner: &mut SessionInner,
        command: SessionCommand,
    ) -> anyhow::Result<()> {
        inner.command_log.record(&command);
        use super::handlers;
        let canvas = current_canvas(inner);

        match command {
            // === Werkzeuge ===
            SessionCommand::SetTool { tool, reset_hull } => {
                handlers::tool::set_tool(inner, tool, reset_hull, &canvas)
            }
            SessionCommand::ShowStatus { message } => inner.show_status(message),
            SessionCommand::Zoom { screen, zoom_in } => handlers::tool::zoom(inner, screen, zoom_in),

            // === Editieren ===
            SessionCommand::SelectNearestNode { screen } => {
                handlers::editing::select_nearest(inner, screen, &canvas)
            }
            SessionCommand::MoveSelectedNode { screen } => {
                handlers::editing::move_selected(inner, screen, &canvas)
            }
            SessionCommand::NudgeSelectedNode { direction } => {
                handlers::editing::nudge_selected(inner, direction, &canvas)
            }
            SessionCommand::BeginTranslate { grid } => handlers::editing::begin_translate(inner, grid),
            SessionCommand::TranslateTo { grid } => {
                handlers::editing::translate_to(inner, grid, &canvas)
            }
            SessionCommand::GrabHullHandle { screen } => {
                handlers::editing::grab_hull_handle(inner, screen)
            }
            SessionCommand::StretchTo { screen } => {
                handlers::editing::stretch_to(inner, screen, &canvas)
            }
            SessionCommand::ResizeTo { screen } => handlers::editing::resize_to(inner, screen, &canvas),
            SessionCommand::BeginRotate { screen } => handlers::editing::begin_rotate(inner, screen),
            SessionCommand::RotateTo { screen } => handlers::editing::rotate_to(inner, screen, &canvas),
            SessionCommand::EndDrag => handlers::editing::end_drag(inner),

            // === Optimierer ===
            SessionCommand::StartOptimizing => handlers::optimization::start(inner)?,
            SessionCommand::StopOptimizing => handlers::optimization::stop(inner),

            // === Terminierung ===
            SessionCommand::Accept => handlers::session::accept(inner),
            SessionCommand::Cancel => handlers::session::cancel(inner),
        }

        Ok(())
    }
}

/// Abbildung der Host-Anzeige; ohne Anzeige ein leerer Canvas.
fn current_canvas(inner: &SessionInner) -> CanvasView {
    inner
        .surface
        .as_ref()
        .map_or_else(|| CanvasView::new(1, 1), |surface| surface.canvas())
}
