//! Arbeitskopie der Kontrollpunkte und alle geometrischen Edit-Operationen.
//!
//! Zeigerkoordinaten kommen immer in Bildschirmpixeln an und werden über die
//! `CanvasView` in Bildkoordinaten umgerechnet. Beim H-Modell sind die ersten
//! `M` Griffe die Positionen, die nächsten `M` die Tangentenspitzen
//! (`Position + w·Tangente`).

use glam::{DVec2, IVec2};

use super::hull::{EditHull, HullHandle};
use crate::core::{round_half_up, CanvasView, ControlNode, NodeLayout};

/// Arbeitskopie der Knoten einer laufenden Session.
#[derive(Debug, Clone)]
pub struct PointEditor {
    nodes: Vec<ControlNode>,
    layout: NodeLayout,
    knots: usize,
    image_max: IVec2,
    current: usize,
    hull: EditHull,
    grabbed_handle: HullHandle,
}

impl PointEditor {
    /// Übernimmt eine (tiefe) Kopie der Modellknoten.
    pub fn new(nodes: Vec<ControlNode>, layout: NodeLayout, canvas: &CanvasView) -> Self {
        let knots = nodes.len() / layout.entries_per_knot();
        let mut editor = Self {
            nodes,
            layout,
            knots,
            image_max: canvas.image_max(),
            current: 0,
            hull: EditHull::around(&[], canvas),
            grabbed_handle: 0,
        };
        editor.reset_hull(canvas);
        editor
    }

    /// Aktuelle Arbeitskopie.
    pub fn nodes(&self) -> &[ControlNode] {
        &self.nodes
    }

    /// Ersetzt die Arbeitskopie (z.B. durch die Bestlösung eines Optimierers).
    pub fn replace_nodes(&mut self, nodes: &[ControlNode]) {
        for (target, source) in self.nodes.iter_mut().zip(nodes) {
            *target = *source;
        }
    }

    /// Übergibt die Arbeitskopie.
    pub fn into_nodes(self) -> Vec<ControlNode> {
        self.nodes
    }

    /// Anzahl bearbeitbarer Griffe.
    pub fn handle_count(&self) -> usize {
        match self.layout {
            NodeLayout::Positions => self.knots,
            NodeLayout::PositionsWithTangents { .. } => 2 * self.knots,
        }
    }

    /// Index des aktuell gewählten Griffs.
    pub fn current_handle(&self) -> usize {
        self.current
    }

    /// Bildposition eines Griffs.
    pub fn handle_position(&self, handle: usize) -> DVec2 {
        match self.layout {
            NodeLayout::PositionsWithTangents { tangent_weight } if handle >= self.knots => {
                let anchor = self.nodes[handle - self.knots].position();
                anchor + self.nodes[handle].position() * tangent_weight
            }
            _ => self.nodes[handle].position(),
        }
    }

    /// `true`, wenn der Griff nicht gezeichnet werden soll.
    pub fn is_handle_hidden(&self, handle: usize) -> bool {
        self.nodes[handle].hidden
    }

    /// Aktueller Griff-Rahmen.
    pub fn hull(&self) -> &EditHull {
        &self.hull
    }

    /// Beim letzten Zeigerdruck gegriffene Rahmenkante.
    pub fn grabbed_handle(&self) -> HullHandle {
        self.grabbed_handle
    }

    // ── Auswahl ─────────────────────────────────────────────────────

    /// Wählt den nächstgelegenen Griff; bei Gleichstand bleibt die Auswahl.
    pub fn select_nearest(&mut self, screen: IVec2, canvas: &CanvasView) {
        let target = canvas.offscreen(screen).as_dvec2();
        let mut best = self.handle_position(self.current).distance_squared(target);
        for handle in 0..self.handle_count() {
            let distance = self.handle_position(handle).distance_squared(target);
            if distance < best {
                best = distance;
                self.current = handle;
            }
        }
    }

    /// Merkt sich die Rahmenkante, die dem Zeiger am nächsten liegt.
    pub fn grab_hull_handle(&mut self, screen: IVec2) {
        self.grabbed_handle = self.hull.closest_handle(screen);
    }

    // ── Einzelpunkt ─────────────────────────────────────────────────

    /// Setzt den gewählten Griff auf die (ins Bild begrenzte) Zeigerposition.
    pub fn move_current(&mut self, screen: IVec2, canvas: &CanvasView) {
        let handle = self.current;
        if self.nodes[handle].frozen {
            return;
        }
        let target = canvas
            .offscreen(screen)
            .clamp(IVec2::ZERO, self.image_max)
            .as_dvec2();
        match self.layout {
            NodeLayout::PositionsWithTangents { tangent_weight } if handle >= self.knots => {
                if tangent_weight == 0.0 {
                    return;
                }
                let anchor = self.nodes[handle - self.knots].position();
                self.nodes[handle].set_position((target - anchor) / tangent_weight);
            }
            _ => self.nodes[handle].set_position(target),
        }
    }

    /// Verschiebt den gewählten Griff um einen Bildpixel-Schritt (Pfeiltasten).
    ///
    /// Die Schrittweite ist `ceil(1/Vergrößerung)`, damit sich der Punkt auch bei
    /// verkleinerter Ansicht sichtbar bewegt.
    pub fn nudge_current(&mut self, direction: IVec2, canvas: &CanvasView) {
        let step = (1.0 / canvas.magnification).ceil() as i32;
        let position = self.handle_position(self.current);
        let rounded = IVec2::new(round_half_up(position.x), round_half_up(position.y));
        let screen = canvas.screen(rounded + direction * step);
        self.move_current(screen, canvas);
    }

    // ── Ganze Konfiguration ─────────────────────────────────────────

    /// Verschiebt alle freien Positionen um ein Bildschirm-Delta.
    pub fn translate(&mut self, delta: IVec2, canvas: &CanvasView) {
        let dx = round_half_up(delta.x as f64 / canvas.magnification) as f64;
        let dy = round_half_up(delta.y as f64 / canvas.magnification) as f64;
        let offset = DVec2::new(dx, dy);
        for node in self.nodes[..self.knots].iter_mut().filter(|n| !n.frozen) {
            node.set_position(node.position() + offset);
        }
    }

    /// Baut den Rahmen um die gerundeten Positionen neu auf.
    pub fn reset_hull(&mut self, canvas: &CanvasView) {
        let points: Vec<IVec2> = self.nodes[..self.knots]
            .iter()
            .map(ControlNode::rounded)
            .collect();
        self.hull = EditHull::around(&points, canvas);
    }

    /// Gleichmäßige Skalierung um das Rahmenzentrum; `false` bei Inversion.
    pub fn resize(&mut self, screen: IVec2, canvas: &CanvasView) -> bool {
        let Some(factor) = self.hull.uniform_scale(self.grabbed_handle, screen) else {
            return false;
        };
        let center = self.hull_center_in_image(canvas);
        for node in self.nodes[..self.knots].iter_mut().filter(|n| !n.frozen) {
            node.set_position(center + (node.position() - center) * factor);
        }
        for tangent in self.tangents_mut().filter(|n| !n.frozen) {
            tangent.set_position(tangent.position() * factor);
        }
        self.hull.scale(factor);
        true
    }

    /// Einachsige Streckung an der gegenüberliegenden Kante; `false` bei Inversion.
    pub fn stretch(&mut self, screen: IVec2, canvas: &CanvasView) -> bool {
        let Some((axis, anchor, factor)) = self.hull.stretch(self.grabbed_handle, screen) else {
            return false;
        };
        let origin = canvas.source_origin.as_dvec2();
        let anchor = anchor / canvas.magnification + origin[axis];
        for node in self.nodes[..self.knots].iter_mut().filter(|n| !n.frozen) {
            let mut p = node.position();
            p[axis] = anchor + factor * (p[axis] - anchor);
            node.set_position(p);
        }
        for tangent in self.tangents_mut().filter(|n| !n.frozen) {
            let mut d = tangent.position();
            d[axis] *= factor;
            tangent.set_position(d);
        }
        true
    }

    /// Rotiert Rahmen und freie Punkte um das Rahmenzentrum.
    pub fn rotate(&mut self, angle: f64, canvas: &CanvasView) {
        self.hull.rotate(angle);
        let rotation = DVec2::from_angle(angle);
        let center = self.hull_center_in_image(canvas);
        for node in self.nodes[..self.knots].iter_mut().filter(|n| !n.frozen) {
            node.set_position(center + rotation.rotate(node.position() - center));
        }
        for tangent in self.tangents_mut().filter(|n| !n.frozen) {
            tangent.set_position(rotation.rotate(tangent.position()));
        }
    }

    /// Winkel des Zeigers relativ zum Rahmenzentrum (Bildschirmraum).
    pub fn hull_angle(&self, screen: IVec2) -> f64 {
        let c = self.hull.center;
        (c.y - screen.y as f64).atan2(c.x - screen.x as f64)
    }

    fn hull_center_in_image(&self, canvas: &CanvasView) -> DVec2 {
        canvas.offscreen_exact(self.hull.center)
    }

    fn tangents_mut(&mut self) -> impl Iterator<Item = &mut ControlNode> {
        let start = match self.layout {
            NodeLayout::Positions => self.nodes.len(),
            NodeLayout::PositionsWithTangents { .. } => self.knots,
        };
        self.nodes[start..].iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_nodes() -> Vec<ControlNode> {
        vec![
            ControlNode::new(100.0, 100.0),
            ControlNode::new(200.0, 100.0),
            ControlNode::new(200.0, 200.0),
            ControlNode::new(100.0, 200.0),
        ]
    }

    fn editor() -> (PointEditor, CanvasView) {
        let canvas = CanvasView::new(512, 512);
        (
            PointEditor::new(square_nodes(), NodeLayout::Positions, &canvas),
            canvas,
        )
    }

    #[test]
    fn test_select_nearest_and_move_with_clamp() {
        let (mut editor, canvas) = editor();
        editor.select_nearest(IVec2::new(195, 205), &canvas);
        assert_eq!(editor.current_handle(), 2);

        editor.move_current(IVec2::new(600, -20), &canvas);
        assert_eq!(editor.nodes()[2].position(), DVec2::new(511.0, 0.0));
    }

    #[test]
    fn test_frozen_node_is_not_moved() {
        let canvas = CanvasView::new(512, 512);
        let mut nodes = square_nodes();
        nodes[0].frozen = true;
        let mut editor = PointEditor::new(nodes, NodeLayout::Positions, &canvas);
        editor.select_nearest(IVec2::new(100, 100), &canvas);
        editor.move_current(IVec2::new(10, 10), &canvas);
        assert_eq!(editor.nodes()[0].position(), DVec2::new(100.0, 100.0));

        editor.translate(IVec2::new(5, 5), &canvas);
        assert_eq!(editor.nodes()[0].position(), DVec2::new(100.0, 100.0));
        assert_eq!(editor.nodes()[1].position(), DVec2::new(205.0, 105.0));
    }

    #[test]
    fn test_translate_uses_magnification() {
        let canvas = CanvasView {
            magnification: 2.0,
            ..CanvasView::new(512, 512)
        };
        let mut editor = PointEditor::new(square_nodes(), NodeLayout::Positions, &canvas);
        editor.translate(IVec2::new(10, -6), &canvas);
        assert_eq!(editor.nodes()[0].position(), DVec2::new(105.0, 97.0));
    }

    #[test]
    fn test_resize_doubles_about_center() {
        let (mut editor, canvas) = editor();
        editor.grab_hull_handle(IVec2::new(205, 150));
        assert_eq!(editor.grabbed_handle(), 1);
        assert!(editor.resize(IVec2::new(250, 150), &canvas));
        assert_eq!(editor.nodes()[0].position(), DVec2::new(50.0, 50.0));
        assert_eq!(editor.nodes()[2].position(), DVec2::new(250.0, 250.0));
    }

    #[test]
    fn test_resize_and_stretch_ignore_inversion() {
        let (mut editor, canvas) = editor();
        let before = editor.nodes().to_vec();
        editor.grab_hull_handle(IVec2::new(205, 150));
        assert!(!editor.resize(IVec2::new(100, 150), &canvas));
        assert!(!editor.stretch(IVec2::new(60, 150), &canvas));
        assert_eq!(editor.nodes(), before.as_slice());
    }

    #[test]
    fn test_stretch_scales_one_axis_from_opposite_edge() {
        let (mut editor, canvas) = editor();
        editor.grab_hull_handle(IVec2::new(150, 95));
        assert_eq!(editor.grabbed_handle(), 0);
        assert!(editor.stretch(IVec2::new(150, 0), &canvas));
        assert_eq!(editor.nodes()[0].position(), DVec2::new(100.0, 0.0));
        assert_eq!(editor.nodes()[3].position(), DVec2::new(100.0, 200.0));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let (mut editor, canvas) = editor();
        editor.rotate(std::f64::consts::FRAC_PI_2, &canvas);
        let p = editor.nodes()[0].position();
        assert_relative_eq!(p.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nudge_moves_by_zoom_scaled_step() {
        let canvas = CanvasView {
            magnification: 0.5,
            ..CanvasView::new(512, 512)
        };
        let mut editor = PointEditor::new(square_nodes(), NodeLayout::Positions, &canvas);
        editor.nudge_current(IVec2::new(1, 0), &canvas);
        assert_eq!(editor.nodes()[0].position(), DVec2::new(102.0, 100.0));

        let canvas = CanvasView::new(512, 512);
        editor.nudge_current(IVec2::new(0, -1), &canvas);
        assert_eq!(editor.nodes()[0].position(), DVec2::new(102.0, 99.0));
    }

    #[test]
    fn test_tangent_tip_handles() {
        let canvas = CanvasView::new(512, 512);
        let nodes = vec![
            ControlNode::new(100.0, 100.0),
            ControlNode::new(200.0, 100.0),
            ControlNode::new(0.0, 30.0),
            ControlNode::new(0.0, -30.0),
        ];
        let layout = NodeLayout::PositionsWithTangents {
            tangent_weight: 1.0 / 3.0,
        };
        let mut editor = PointEditor::new(nodes, layout, &canvas);
        assert_eq!(editor.handle_count(), 4);
        assert_eq!(editor.handle_position(2), DVec2::new(100.0, 110.0));

        // Tangentenspitze greifen und verschieben
        editor.select_nearest(IVec2::new(100, 111), &canvas);
        assert_eq!(editor.current_handle(), 2);
        editor.move_current(IVec2::new(110, 100), &canvas);
        let tangent = editor.nodes()[2].position();
        assert_relative_eq!(tangent.x, 30.0, epsilon = 1e-9);
        assert_relative_eq!(tangent.y, 0.0, epsilon = 1e-9);

        // Translation lässt Tangenten unverändert
        editor.translate(IVec2::new(7, 7), &canvas);
        assert_eq!(editor.nodes()[0].position(), DVec2::new(107.0, 107.0));
        assert_relative_eq!(editor.nodes()[2].x, 30.0, epsilon = 1e-9);

        // Rotation dreht die Tangentenvektoren mit
        editor.rotate(std::f64::consts::FRAC_PI_2, &canvas);
        let rotated = editor.nodes()[2].position();
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(rotated.y, 30.0, epsilon = 1e-9);
    }
}
