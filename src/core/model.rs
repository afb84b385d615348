//! Getaggte Modellvariante für Hosts, die das Modell per Konfiguration wählen.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::h_model::{HermiteSplineModel, TangentStyle};
use super::l_model::LinearSplineModel;
use super::roi::SeedRegion;
use super::snake::{NodeLayout, SessionStatus, Snake};
use super::{ControlNode, ModelError, Scale};

/// Auswahl der Basisfamilie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Lineare B-Splines (Polygon)
    #[default]
    Linear,
    /// Kubische Hermite-Splines mit Tangenten
    Hermite,
}

/// L- oder H-Modell hinter einem gemeinsamen Typ.
#[derive(Debug, Clone)]
pub enum CurveModel {
    /// L-Modell
    Linear(LinearSplineModel),
    /// H-Modell
    Hermite(HermiteSplineModel),
}

impl CurveModel {
    /// Erstellt ein Modell der gewählten Variante.
    pub fn new(
        kind: ModelKind,
        m: usize,
        width: u32,
        height: u32,
        seed: Option<&SeedRegion>,
        style: TangentStyle,
    ) -> Result<Self, ModelError> {
        Ok(match kind {
            ModelKind::Linear => Self::Linear(LinearSplineModel::new(m, width, height, seed)?),
            ModelKind::Hermite => Self::Hermite(HermiteSplineModel::with_style(
                m, width, height, seed, style,
            )?),
        })
    }

    /// Variante des Modells.
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Linear(_) => ModelKind::Linear,
            Self::Hermite(_) => ModelKind::Hermite,
        }
    }

    /// Anzahl Knoten (M).
    pub fn num_nodes(&self) -> usize {
        match self {
            Self::Linear(model) => model.num_nodes(),
            Self::Hermite(model) => model.num_nodes(),
        }
    }

    /// Letzter empfangener Session-Bericht.
    pub fn last_status(&self) -> Option<SessionStatus> {
        match self {
            Self::Linear(model) => model.last_status(),
            Self::Hermite(model) => model.last_status(),
        }
    }

    fn inner(&self) -> &dyn Snake {
        match self {
            Self::Linear(model) => model,
            Self::Hermite(model) => model,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Snake {
        match self {
            Self::Linear(model) => model,
            Self::Hermite(model) => model,
        }
    }
}

impl Snake for CurveModel {
    fn energy(&self) -> f64 {
        self.inner().energy()
    }

    fn energy_gradient(&self) -> Option<Vec<DVec2>> {
        self.inner().energy_gradient()
    }

    fn nodes(&self) -> &[ControlNode] {
        self.inner().nodes()
    }

    fn set_nodes(&mut self, nodes: &[ControlNode]) {
        self.inner_mut().set_nodes(nodes);
    }

    fn scales(&self) -> Vec<Scale> {
        self.inner().scales()
    }

    fn is_alive(&self) -> bool {
        self.inner().is_alive()
    }

    fn update_status(&mut self, status: SessionStatus) {
        self.inner_mut().update_status(status);
    }

    fn node_layout(&self) -> NodeLayout {
        self.inner().node_layout()
    }
}
