//! Handler für Punkt-Editieren, Translation, Streckung und Rotation.
//!
//! Jede Änderung an der Arbeitskopie entwertet ein gemeldetes Optimum und wird
//! sofort ins Modell übertragen, damit die nächste Haut aktuell ist.

use glam::IVec2;

use crate::app::point_editor::PointEditor;
use crate::app::session::SessionInner;
use crate::core::CanvasView;

/// Wählt den Griff, der dem Zeiger am nächsten liegt.
pub fn select_nearest(inner: &mut SessionInner, screen: IVec2, canvas: &CanvasView) {
    if let Some(editor) = inner.editor.as_mut() {
        editor.select_nearest(screen, canvas);
    }
}

/// Setzt den gewählten Griff auf die Zeigerposition.
pub fn move_selected(inner: &mut SessionInner, screen: IVec2, canvas: &CanvasView) {
    mutate(inner, |editor| editor.move_current(screen, canvas));
}

/// Pfeiltaste: gewählten Griff um einen Bildpixel-Schritt verschieben.
pub fn nudge_selected(inner: &mut SessionInner, direction: IVec2, canvas: &CanvasView) {
    mutate(inner, |editor| editor.nudge_current(direction, canvas));
}

/// Merkt sich den Startpunkt einer Translation.
pub fn begin_translate(inner: &mut SessionInner, grid: IVec2) {
    inner.state.drag.anchor = Some(grid);
}

/// Zieht alle freien Punkte um den Rasterzuwachs seit dem letzten Event mit.
pub fn translate_to(inner: &mut SessionInner, grid: IVec2, canvas: &CanvasView) {
    let Some(anchor) = inner.state.drag.anchor else {
        // Drag ohne vorheriges Drücken mit Modifier: ab hier verankern
        inner.state.drag.anchor = Some(grid);
        return;
    };
    inner.state.drag.anchor = Some(grid);
    let delta = grid - anchor;
    if delta == IVec2::ZERO {
        return;
    }
    mutate(inner, |editor| editor.translate(delta, canvas));
}

/// Greift die nächstgelegene Rahmenkante.
pub fn grab_hull_handle(inner: &mut SessionInner, screen: IVec2) {
    if let Some(editor) = inner.editor.as_mut() {
        editor.grab_hull_handle(screen);
    }
}

/// Einachsige Streckung; Inversionen bleiben wirkungslos.
pub fn stretch_to(inner: &mut SessionInner, screen: IVec2, canvas: &CanvasView) {
    mutate(inner, |editor| {
        editor.stretch(screen, canvas);
    });
}

/// Gleichmäßige Skalierung um das Rahmenzentrum; Inversionen bleiben wirkungslos.
pub fn resize_to(inner: &mut SessionInner, screen: IVec2, canvas: &CanvasView) {
    mutate(inner, |editor| {
        editor.resize(screen, canvas);
    });
}

/// Merkt sich den Startwinkel einer Rotation.
pub fn begin_rotate(inner: &mut SessionInner, screen: IVec2) {
    if let Some(editor) = inner.editor.as_ref() {
        inner.state.drag.angle = editor.hull_angle(screen);
    }
}

/// Rotiert um den Winkelzuwachs seit dem letzten Event.
pub fn rotate_to(inner: &mut SessionInner, screen: IVec2, canvas: &CanvasView) {
    let Some(editor) = inner.editor.as_ref() else {
        return;
    };
    let angle = editor.hull_angle(screen);
    let delta = angle - inner.state.drag.angle;
    inner.state.drag.angle = angle;
    mutate(inner, |editor| editor.rotate(delta, canvas));
}

/// Beendet die laufende Zieh-Geste.
pub fn end_drag(inner: &mut SessionInner) {
    inner.state.drag.anchor = None;
}

fn mutate(inner: &mut SessionInner, f: impl FnOnce(&mut PointEditor)) {
    let Some(editor) = inner.editor.as_mut() else {
        return;
    };
    f(editor);
    inner.state.destroy_optimality();
    inner.push_nodes_to_snake();
}
