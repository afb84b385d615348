//! L-Modell: geschlossene Kontur aus linearen B-Splines (Polygon durch die Knoten).

use glam::DVec2;

use super::basis::BasisTable;
use super::resample::resample_closed;
use super::roi::{SeedRegion, SeedShape};
use super::skin::SkinBuffer;
use super::snake::{SessionStatus, Snake};
use super::{ControlNode, ModelError, Scale};

/// Mindestanzahl Kontrollpunkte des L-Modells.
pub const LINEAR_MIN_NODES: usize = 3;

/// Geschlossene Snake mit linearer Basis.
#[derive(Debug, Clone)]
pub struct LinearSplineModel {
    nodes: Vec<ControlNode>,
    basis: BasisTable,
    skin: SkinBuffer,
    canceled_by_user: bool,
    last_status: Option<SessionStatus>,
}

impl LinearSplineModel {
    /// Erstellt das Modell mit `m` Knoten über einem `width`×`height`-Bild.
    ///
    /// Ohne Seed (oder bei nicht flächigem Seed) entsteht die Standardform
    /// in der Bildmitte, ein Punkt-Seed zentriert die Standardform dort.
    pub fn new(
        m: usize,
        width: u32,
        height: u32,
        seed: Option<&SeedRegion>,
    ) -> Result<Self, ModelError> {
        if m < LINEAR_MIN_NODES {
            return Err(ModelError::InvalidNodeCount {
                model: "L-Modell",
                requested: m,
                minimum: LINEAR_MIN_NODES,
            });
        }
        if width == 0 || height == 0 {
            return Err(ModelError::EmptyImage { width, height });
        }

        let nodes = match seed.map(SeedRegion::shape) {
            Some(SeedShape::Area(polygon)) => match resample_closed(polygon, m) {
                Some(points) => points.into_iter().map(ControlNode::from_vec).collect(),
                None => {
                    log::warn!("Seed-Region ohne Eckpunkte, verwende Standardform");
                    default_shape(m, width, height, None)
                }
            },
            Some(SeedShape::SinglePoint(center)) => default_shape(m, width, height, Some(center)),
            Some(SeedShape::NotEnclosing) => {
                if let Some(region) = seed {
                    log::warn!(
                        "ROI-Typ {} kann keine geschlossene Snake initialisieren, verwende Standardform",
                        region.kind.display_name()
                    );
                }
                default_shape(m, width, height, None)
            }
            None => default_shape(m, width, height, None),
        };

        let mut model = Self {
            nodes,
            basis: BasisTable::linear_b_spline(),
            skin: SkinBuffer::new(m, width, height),
            canceled_by_user: false,
            last_status: None,
        };
        model.compute_skin();
        log::debug!("L-Modell mit {} Knoten erstellt ({}x{})", m, width, height);
        Ok(model)
    }

    /// Anzahl Knoten (M).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
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

    /// Berechnet die Haut aus den Knoten neu (reine Funktion der Knoten).
    pub fn compute_skin(&mut self) {
        let nodes = &self.nodes;
        let basis = &self.basis;
        self.skin.recompute(0, |k, index| {
            nodes[k].position() * basis.get(index).unwrap_or(0.0)
        });
    }

    /// Effektiver Radius der Standardform in der Bildmitte.
    pub fn default_radius(m: usize, width: u32, height: u32) -> f64 {
        let radius = (width as f64 / 6.0).min(height as f64 / 6.0).floor();
        radius * circumscription_factor(m)
    }
}

/// Faktor, mit dem die Kontrollpunkte außerhalb des Kreises liegen müssen,
/// damit das Polygon den Zielkreis umschreibt.
fn circumscription_factor(m: usize) -> f64 {
    let pim = std::f64::consts::PI / m as f64;
    2.0 * (1.0 - (2.0 * pim).cos()) / (pim.cos() - (3.0 * pim).cos())
}

fn default_shape(m: usize, width: u32, height: u32, center: Option<DVec2>) -> Vec<ControlNode> {
    let radius = (width as f64 / 6.0).min(height as f64 / 6.0).floor();
    let center =
        center.unwrap_or_else(|| DVec2::new((width / 2) as f64, (height / 2) as f64));
    let k = circumscription_factor(m);
    let pim = std::f64::consts::PI / m as f64;
    (0..m)
        .map(|i| {
            let phi = pim * (2 * i + 3) as f64;
            ControlNode::new(
                (center.x + radius * k * phi.cos()).trunc(),
                (center.y + radius * k * phi.sin()).trunc(),
            )
        })
        .collect()
}

impl Snake for LinearSplineModel {
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
                "L-Modell: {} Knoten erhalten, erwartet {}; nur gemeinsamer Anteil übernommen",
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
        vec![self.skin.to_scale()]
    }

    fn is_alive(&self) -> bool {
        true
    }

    fn update_status(&mut self, status: SessionStatus) {
        self.canceled_by_user = status.canceled_by_user;
        self.last_status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::basis::DISCRETIZATION_SAMPLING_RATE;
    use crate::core::scale::COLOR_RED;
    use approx::assert_relative_eq;

    fn model(m: usize) -> LinearSplineModel {
        LinearSplineModel::new(m, 512, 512, None).expect("gültige Parameter")
    }

    #[test]
    fn test_rejects_too_few_nodes() {
        let err = LinearSplineModel::new(2, 512, 512, None).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidNodeCount {
                model: "L-Modell",
                requested: 2,
                minimum: 3
            }
        );
        assert!(LinearSplineModel::new(3, 0, 10, None).is_err());
    }

    #[test]
    fn test_default_shape_lies_on_circle_in_angular_order() {
        let snake = model(8);
        let radius = LinearSplineModel::default_radius(8, 512, 512);
        let center = DVec2::new(256.0, 256.0);
        assert_eq!(snake.nodes().len(), 8);
        for (i, node) in snake.nodes().iter().enumerate() {
            let offset = node.position() - center;
            assert_relative_eq!(offset.length(), radius, epsilon = 1.5);
            let expected = std::f64::consts::PI / 8.0 * (2 * i + 3) as f64;
            let actual = offset.y.atan2(offset.x).rem_euclid(std::f64::consts::TAU);
            let diff = (actual - expected.rem_euclid(std::f64::consts::TAU)).abs();
            assert!(diff < 0.02, "Knoten {} liegt bei Winkel {}", i, actual);
        }
    }

    #[test]
    fn test_skin_scale_is_closed_red_and_clamped() {
        let snake = model(8);
        let scales = snake.scales();
        assert_eq!(scales.len(), 1);
        let skin = &scales[0];
        assert_eq!(skin.len(), 8 * DISCRETIZATION_SAMPLING_RATE);
        assert!(skin.closed);
        assert!(!skin.filled);
        assert_eq!(skin.primary_color, COLOR_RED);
        assert!(skin
            .points
            .iter()
            .all(|p| (0..=511).contains(&p.x) && (0..=511).contains(&p.y)));
    }

    #[test]
    fn test_skin_passes_through_nodes_one_interval_later() {
        let snake = model(5);
        let r = DISCRETIZATION_SAMPLING_RATE;
        let mr = 5 * r;
        for (k, node) in snake.nodes().iter().enumerate() {
            let i = (k * r + r) % mr;
            assert_relative_eq!(snake.skin().xs()[i], node.x, epsilon = 1e-9);
            assert_relative_eq!(snake.skin().ys()[i], node.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_compute_skin_is_pure_and_set_nodes_idempotent() {
        let mut snake = model(6);
        let before = snake.skin().clone();
        snake.compute_skin();
        assert_eq!(snake.skin(), &before);

        let nodes = snake.nodes().to_vec();
        snake.set_nodes(&nodes);
        assert_eq!(snake.skin(), &before);
    }

    #[test]
    fn test_rectangle_seed_is_resampled() {
        let seed = SeedRegion::rectangle(100.0, 100.0, 200.0, 200.0);
        let snake = LinearSplineModel::new(4, 512, 512, Some(&seed)).expect("gültig");
        let positions: Vec<DVec2> = snake.nodes().iter().map(ControlNode::position).collect();
        assert_eq!(
            positions,
            vec![
                DVec2::new(100.0, 100.0),
                DVec2::new(300.0, 100.0),
                DVec2::new(300.0, 300.0),
                DVec2::new(100.0, 300.0),
            ]
        );
    }

    #[test]
    fn test_point_seed_centers_default_shape() {
        let seed = SeedRegion::point(DVec2::new(100.0, 150.0));
        let snake = LinearSplineModel::new(6, 512, 512, Some(&seed)).expect("gültig");
        let mean = snake
            .nodes()
            .iter()
            .fold(DVec2::ZERO, |acc, n| acc + n.position())
            / 6.0;
        assert_relative_eq!(mean.x, 100.0, epsilon = 1.5);
        assert_relative_eq!(mean.y, 150.0, epsilon = 1.5);
    }

    #[test]
    fn test_update_status_records_cancellation() {
        let mut snake = model(3);
        snake.update_status(SessionStatus {
            canceled_by_user: true,
            ..SessionStatus::default()
        });
        assert!(snake.canceled_by_user());
        assert_eq!(snake.energy(), 0.0);
        assert!(snake.energy_gradient().is_none());
        assert!(snake.is_alive());
    }
}
