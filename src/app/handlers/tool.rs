//! Handler für Werkzeugwechsel und Lupe.

use glam::IVec2;

use crate::app::session::SessionInner;
use crate::app::state::EditTool;
use crate::core::CanvasView;

/// Aktiviert ein Werkzeug und zeigt dessen Statuszeile an.
pub fn set_tool(inner: &mut SessionInner, tool: EditTool, reset_hull: bool, canvas: &CanvasView) {
    inner.state.current_tool = tool;
    inner.state.drag = Default::default();
    if reset_hull {
        if let Some(editor) = inner.editor.as_mut() {
            editor.reset_hull(canvas);
        }
    }
    log::debug!("Werkzeug gewechselt: {:?}", tool);
    inner.show_status(tool.status_text());
}

/// Lupe: Vergrößerung der Host-Anzeige um den Zeiger ändern.
pub fn zoom(inner: &mut SessionInner, screen: IVec2, zoom_in: bool) {
    if let Some(surface) = &inner.surface {
        surface.zoom(screen, zoom_in);
    }
    // Rahmen liegt in Bildschirmkoordinaten und muss der neuen Abbildung folgen
    if let (Some(editor), Some(surface)) = (inner.editor.as_mut(), &inner.surface) {
        editor.reset_hull(&surface.canvas());
    }
}
