//! H-Modell: geschlossene Kontur aus kubischen Hermite-Splines.
//!
//! Die Kontrollpunktliste hat `2M` Einträge: die ersten `M` sind Positionen,
//! die folgenden `M` die Tangentenvektoren an diesen Positionen.

use glam::{DVec2, IVec2};

use super::basis::{BasisTable, DISCRETIZATION_SAMPLING_RATE};
use super::node::round_half_up;
use super::resample::resample_with_tangents;
use super::roi::{RoiKind, SeedRegion, SeedShape};
use super::scale::{COLOR_BLACK, COLOR_TRANSPARENT};
use super::skin::SkinBuffer;
use super::snake::{NodeLayout, SessionStatus, Snake};
use super::{ControlNode, ModelError, Scale};

/// Mindestanzahl Knoten des H-Modells.
pub const HERMITE_MIN_NODES: usize = 2;
/// Standard-Anzeigegewicht der Tangenten.
pub const DEFAULT_TANGENT_WEIGHT: f64 = 1.0 / 3.0;
/// Halbe Breite der Tangenten-Pfeilspitze in Pixeln.
pub const DEFAULT_ARROW_WIDTH: f64 = 4.0;
/// Länge der Tangenten-Pfeilspitze in Pixeln.
pub const DEFAULT_ARROW_LENGTH: f64 = 8.0;

/// Darstellung der Tangenten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentStyle {
    /// Tangentenspitze = Position + Gewicht·Tangente
    pub weight: f64,
    /// Halbe Pfeilbreite
    pub arrow_width: f64,
    /// Pfeillänge
    pub arrow_length: f64,
}

impl Default for TangentStyle {
    fn default() -> Self {
        Self {
            weight: DEFAULT_TANGENT_WEIGHT,
            arrow_width: DEFAULT_ARROW_WIDTH,
            arrow_length: DEFAULT_ARROW_LENGTH,
        }
    }
}

/// Geschlossene Snake mit Hermite-Basis.
#[derive(Debug, Clone)]
pub struct HermiteSplineModel {
    knots: usize,
    nodes: Vec<ControlNode>,
    position_basis: BasisTable,
    tangent_basis: BasisTable,
    skin: SkinBuffer,
    style: TangentStyle,
    canceled_by_user: bool,
    last_status: Option<SessionStatus>,
}

impl HermiteSplineModel {
    /// Erstellt das Modell mit `m` Knoten (2M Kontrollpunkten) und Standardstil.
    pub fn new(
        m: usize,
        width: u32,
        height: u32,
        seed: Option<&SeedRegion>,
    ) -> Result<Self, ModelError> {
        Self::with_style(m, width, height, seed, TangentStyle::default())
    }

    /// Erstellt das Modell mit eigener Tangentendarstellung.
    pub fn with_style(
        m: usize,
        width: u32,
        height: u32,
        seed: Option<&SeedRegion>,
        style: TangentStyle,
    ) -> Result<Self, ModelError> {
        if m < HERMITE_MIN_NODES {
            return Err(ModelError::InvalidNodeCount {
                model: "H-Modell",
                requested: m,
                minimum: HERMITE_MIN_NODES,
            });
        }
        if width == 0 || height == 0 {
            return Err(ModelError::EmptyImage { width, height });
        }

        let nodes = initial_nodes(m, width, height, seed);
        let mut model = Self {
            knots: m,
            nodes,
            position_basis: BasisTable::hermite_position(),
            tangent_basis: BasisTable::hermite_tangent(),
            skin: SkinBuffer::new(m, width, height),
            style,
            canceled_by_user: false,
            last_status: None,
        };
        model.compute_skin();
        log::debug!("H-Modell mit {} Knoten erstellt ({}x{})", m, width, height);
        Ok(model)
    }

    /// Anzahl Knoten (M, nicht 2M).
    pub fn num_nodes(&self) -> usize {
        self.knots
    }

    /// Tangentenvektor am Knoten `k`.
    pub fn tangent(&self, k: usize) -> Option<DVec2> {
        if k >= self.knots {
            return None;
        }
        self.nodes.get(k + self.knots).map(ControlNode::position)
    }

    /// Anzeigegewicht der Tangenten.
    pub fn tangent_weight(&self) -> f64 {
        self.style.weight
    }

    /// Aktueller Skin-Puffer.
    pub fn skin(&self) -> &SkinBuffer {
        &self.skin
    }

    /// `true`, wenn die letzte Session abgebrochen wurde.
    pub fn canceled_by_user(&self) -> bool {
        self.canceled_by_user
    }

    /// Letzter empfangener Session-Bericht.
    pub fn last_status(&self) -> Option<SessionStatus> {
        self.last_status
    }

    /// Berechnet die Haut neu: Position·H1 + Tangente·H2 je Knoten.
    pub fn compute_skin(&mut self) {
        let m = self.knots;
        let nodes = &self.nodes;
        let h1 = &self.position_basis;
        let h2 = &self.tangent_basis;
        self.skin
            .recompute(DISCRETIZATION_SAMPLING_RATE, |k, index| {
                nodes[k].position() * h1.get(index).unwrap_or(0.0)
                    + nodes[k + m].position() * h2.get(index).unwrap_or(0.0)
            });
    }

    /// Radius der Standardform.
    ///
    /// Die Formel ist asymmetrisch (Faktor 120 für die Breite, 0.3 für die
    /// Höhe); für ein 512×512-Bild ergibt sich 76. Halbiert wird in
    /// Gleitkomma, nur der Mittelpunkt nutzt ganzzahlige Division.
    pub fn default_radius(width: u32, height: u32) -> f64 {
        let alpha = 6.0;
        (width as f64 / 2.0 * (alpha * 20.0))
            .min(height as f64 / 2.0 * (alpha / 20.0))
            .floor()
    }

    fn tangent_scales(&self) -> (Vec<Scale>, Vec<Scale>) {
        let w = self.style.weight;
        let mut lines = Vec::with_capacity(self.knots);
        let mut arrows = Vec::with_capacity(self.knots);
        for k in 0..self.knots {
            let c = self.nodes[k].position();
            let d = self.nodes[k + self.knots].position();
            let tip = c + d * w;
            lines.push(
                Scale::new(COLOR_BLACK, COLOR_TRANSPARENT, true, false)
                    .with_points(vec![round_point(c), round_point(tip)]),
            );

            let dist = w * d.length();
            let points = if dist > 0.0 {
                let unit = d * w / dist;
                let perp = DVec2::new(-unit.y, unit.x);
                let base = c + unit * (dist - self.style.arrow_length);
                vec![
                    round_point(tip),
                    round_point(base + perp * self.style.arrow_width),
                    round_point(base - perp * self.style.arrow_width),
                ]
            } else {
                vec![round_point(tip); 3]
            };
            arrows.push(Scale::new(COLOR_BLACK, COLOR_TRANSPARENT, true, true).with_points(points));
        }
        (lines, arrows)
    }
}

fn round_point(p: DVec2) -> IVec2 {
    IVec2::new(round_half_up(p.x), round_half_up(p.y))
}

fn initial_nodes(m: usize, width: u32, height: u32, seed: Option<&SeedRegion>) -> Vec<ControlNode> {
    let Some(region) = seed else {
        return default_shape(m, width, height, None);
    };
    match (region.kind, region.shape()) {
        (RoiKind::Rectangle | RoiKind::Polygon, SeedShape::Area(polygon)) => {
            match subdivide_polygon(polygon, m) {
                Some(nodes) => nodes,
                None => {
                    log::error!(
                        "Knotenzahl {} ist kein Vielfaches der {} Polygonecken, verwende Standardform",
                        m,
                        polygon.len()
                    );
                    default_shape(m, width, height, None)
                }
            }
        }
        (_, SeedShape::Area(polygon)) => match resample_with_tangents(polygon, m) {
            Some(contour) => contour
                .positions
                .into_iter()
                .chain(contour.tangents)
                .map(ControlNode::from_vec)
                .collect(),
            None => {
                log::warn!("Seed-Region ohne Eckpunkte, verwende Standardform");
                default_shape(m, width, height, None)
            }
        },
        (_, SeedShape::SinglePoint(center)) => default_shape(m, width, height, Some(center)),
        (kind, SeedShape::NotEnclosing) => {
            log::error!(
                "ROI-Typ {} kann keine geschlossene Snake initialisieren, verwende Standardform",
                kind.display_name()
            );
            default_shape(m, width, height, None)
        }
    }
}

/// Verteilt die Polygonecken auf jeden `M/n`-ten Knoten und unterteilt die
/// Kanten linear. Tangenten sind null.
fn subdivide_polygon(polygon: &[DVec2], m: usize) -> Option<Vec<ControlNode>> {
    let corners = polygon.len();
    if corners == 0 || m % corners != 0 {
        return None;
    }
    let inter = m / corners;
    let mut nodes = Vec::with_capacity(2 * m);
    for (i, &start) in polygon.iter().enumerate() {
        let end = polygon[(i + 1) % corners];
        for j in 0..inter {
            let t = j as f64 / inter as f64;
            nodes.push(ControlNode::from_vec(start + (end - start) * t));
        }
    }
    nodes.extend(vec![ControlNode::new(0.0, 0.0); m]);
    Some(nodes)
}

fn default_shape(m: usize, width: u32, height: u32, center: Option<DVec2>) -> Vec<ControlNode> {
    let radius = HermiteSplineModel::default_radius(width, height);
    let center =
        center.unwrap_or_else(|| DVec2::new((width / 2) as f64, (height / 2) as f64));

    if m == 2 {
        return vec![
            ControlNode::new((center.x + radius).trunc(), center.y.trunc()),
            ControlNode::new((center.x - radius).trunc(), center.y.trunc()),
            ControlNode::new(0.0, 2.0 * radius),
            ControlNode::new(0.0, -2.0 * radius),
        ];
    }

    let pim = std::f64::consts::PI / m as f64;
    let mut positions = Vec::with_capacity(2 * m);
    let mut tangents = Vec::with_capacity(m);
    for i in 0..m {
        let phi = pim * (2 * i + 2) as f64;
        positions.push(ControlNode::new(
            (center.x + radius * phi.cos()).trunc(),
            (center.y + radius * phi.sin()).trunc(),
        ));
        tangents.push(ControlNode::new(
            pim * 2.0 * radius * -phi.sin(),
            pim * 2.0 * radius * phi.cos(),
        ));
    }
    positions.extend(tangents);
    positions
}

impl Snake for HermiteSplineModel {
    fn energy(&self) -> f64 {
        0.0
    }

    fn energy_gradient(&self) -> Option<Vec<DVec2>> {
        None
    }

    fn nodes(&self) -> &[ControlNode] {
        &self.nodes
    }

    fn set_nodes(&mut self, nodes: &[ControlNode]) {
        if nodes.len() != self.nodes.len() {
            log::warn!(
                "H-Modell: {} Kontrollpunkte erhalten, erwartet {}; nur gemeinsamer Anteil übernommen",
                nodes.len(),
                self.nodes.len()
            );
        }
        for (target, source) in self.nodes.iter_mut().zip(nodes) {
            *target = *source;
        }
        self.compute_skin();
    }

    fn scales(&self) -> Vec<Scale> {
        let (lines, arrows) = self.tangent_scales();
        let mut scales = Vec::with_capacity(1 + 2 * self.knots);
        scales.push(self.skin.to_scale());
        scales.extend(lines);
        scales.extend(arrows);
        scales
    }

    fn is_alive(&self) -> bool {
        true
    }

    fn update_status(&mut self, status: SessionStatus) {
        self.canceled_by_user = status.canceled_by_user;
        self.last_status = Some(status);
    }

    fn node_layout(&self) -> NodeLayout {
        NodeLayout::PositionsWithTangents {
            tangent_weight: self.style.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scale::COLOR_RED;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_single_node() {
        assert!(matches!(
            HermiteSplineModel::new(1, 512, 512, None),
            Err(ModelError::InvalidNodeCount { minimum: 2, .. })
        ));
    }

    #[test]
    fn test_default_radius_quirk() {
        assert_eq!(HermiteSplineModel::default_radius(512, 512), 76.0);
    }

    #[test]
    fn test_default_radius_halves_odd_sizes_exactly() {
        // 27 / 2.0 · 0.3 = 4.05
        assert_eq!(HermiteSplineModel::default_radius(64, 27), 4.0);
        assert_eq!(HermiteSplineModel::default_radius(64, 33), 4.0);

        let snake = HermiteSplineModel::new(2, 64, 27, None).expect("gültig");
        let nodes = snake.nodes();
        assert_eq!(nodes[0].position(), DVec2::new(36.0, 13.0));
        assert_eq!(nodes[1].position(), DVec2::new(28.0, 13.0));
        assert_eq!(snake.tangent(0), Some(DVec2::new(0.0, 8.0)));
    }

    #[test]
    fn test_two_node_special_case() {
        let snake = HermiteSplineModel::new(2, 512, 512, None).expect("gültig");
        let r = 76.0;
        let nodes = snake.nodes();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].position(), DVec2::new(256.0 + r, 256.0));
        assert_eq!(nodes[1].position(), DVec2::new(256.0 - r, 256.0));
        assert_eq!(snake.tangent(0), Some(DVec2::new(0.0, 2.0 * r)));
        assert_eq!(snake.tangent(1), Some(DVec2::new(0.0, -2.0 * r)));
        assert_eq!(snake.tangent(2), None);
        assert_eq!(snake.num_nodes(), 2);
    }

    #[test]
    fn test_default_tangents_are_perpendicular_to_radius() {
        let snake = HermiteSplineModel::new(6, 512, 512, None).expect("gültig");
        let center = DVec2::new(256.0, 256.0);
        for k in 0..6 {
            let radial = snake.nodes()[k].position() - center;
            let tangent = snake.tangent(k).unwrap_or(DVec2::ZERO);
            let cos = radial.normalize().dot(tangent.normalize());
            assert!(cos.abs() < 0.03, "Tangente {} nicht senkrecht: {}", k, cos);
            assert_relative_eq!(
                tangent.length(),
                2.0 * std::f64::consts::PI / 6.0 * 76.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_skin_passes_through_positions() {
        let snake = HermiteSplineModel::new(4, 512, 512, None).expect("gültig");
        let r = DISCRETIZATION_SAMPLING_RATE;
        for k in 0..4 {
            let node = snake.nodes()[k];
            assert_relative_eq!(snake.skin().xs()[k * r], node.x, epsilon = 1e-9);
            assert_relative_eq!(snake.skin().ys()[k * r], node.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_scales_contain_skin_lines_and_arrowheads() {
        let snake = HermiteSplineModel::new(3, 512, 512, None).expect("gültig");
        let scales = snake.scales();
        assert_eq!(scales.len(), 1 + 3 + 3);
        assert_eq!(scales[0].primary_color, COLOR_RED);
        assert_eq!(scales[0].len(), 3 * DISCRETIZATION_SAMPLING_RATE);
        for line in &scales[1..4] {
            assert_eq!(line.len(), 2);
            assert_eq!(line.primary_color, COLOR_BLACK);
            assert!(!line.filled);
        }
        for arrow in &scales[4..7] {
            assert_eq!(arrow.len(), 3);
            assert!(arrow.closed && arrow.filled);
        }
        // Pfeilspitze liegt auf dem Ende der Tangentenlinie
        assert_eq!(scales[4].points[0], scales[1].points[1]);
    }

    #[test]
    fn test_polygon_seed_subdivides_edges_when_divisible() {
        let seed = SeedRegion::rectangle(100.0, 100.0, 100.0, 100.0);
        let snake = HermiteSplineModel::new(8, 512, 512, Some(&seed)).expect("gültig");
        let nodes = snake.nodes();
        assert_eq!(nodes.len(), 16);
        assert_eq!(nodes[0].position(), DVec2::new(100.0, 100.0));
        assert_eq!(nodes[1].position(), DVec2::new(150.0, 100.0));
        assert_eq!(nodes[2].position(), DVec2::new(200.0, 100.0));
        assert_eq!(nodes[7].position(), DVec2::new(100.0, 150.0));
        assert!(nodes[8..].iter().all(|n| n.position() == DVec2::ZERO));
    }

    #[test]
    fn test_polygon_seed_falls_back_when_not_divisible() {
        let seed = SeedRegion::rectangle(100.0, 100.0, 100.0, 100.0);
        let seeded = HermiteSplineModel::new(6, 512, 512, Some(&seed)).expect("gültig");
        let default = HermiteSplineModel::new(6, 512, 512, None).expect("gültig");
        assert_eq!(seeded.nodes(), default.nodes());
    }

    #[test]
    fn test_oval_seed_produces_tangents() {
        let seed = SeedRegion::oval(DVec2::new(200.0, 200.0), DVec2::new(50.0, 30.0), 64);
        let snake = HermiteSplineModel::new(8, 512, 512, Some(&seed)).expect("gültig");
        assert_eq!(snake.nodes().len(), 16);
        assert!((1..8).all(|k| snake.tangent(k).is_some_and(|t| t.length() > 0.0)));
    }

    #[test]
    fn test_set_nodes_keeps_skin_stable() {
        let mut snake = HermiteSplineModel::new(5, 300, 200, None).expect("gültig");
        let before = snake.skin().clone();
        let nodes = snake.nodes().to_vec();
        snake.set_nodes(&nodes);
        assert_eq!(snake.skin(), &before);
        assert!(matches!(
            snake.node_layout(),
            NodeLayout::PositionsWithTangents { .. }
        ));
    }
}
