//! Fähigkeits-Schnittstelle, über die Session und Optimierer ein Kurvenmodell nutzen.

use std::sync::{Arc, Mutex};

use glam::DVec2;

use super::{ControlNode, Scale};

/// Anordnung der Kontrollpunkte eines Modells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeLayout {
    /// Alle Einträge sind Positionen
    Positions,
    /// Erste Hälfte Positionen, zweite Hälfte zugehörige Tangentenvektoren
    PositionsWithTangents {
        /// Anzeige-Gewicht der Tangenten (Tangentenspitze = Position + w·Tangente)
        tangent_weight: f64,
    },
}

impl NodeLayout {
    /// Anzahl Einträge pro Knoten (1 oder 2).
    pub fn entries_per_knot(&self) -> usize {
        match self {
            NodeLayout::Positions => 1,
            NodeLayout::PositionsWithTangents { .. } => 2,
        }
    }
}

/// Abschlussbericht einer Interaktion, wird dem Modell übergeben.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionStatus {
    /// Session wurde per Abbrechen beendet
    pub canceled_by_user: bool,
    /// Modell meldete sich während der Session als nicht mehr lebendig
    pub snake_died: bool,
    /// Optimierer meldete ein Optimum, das seither nicht verändert wurde
    pub optimal_snake_found: bool,
    /// Beste beobachtete Energie (`None`, wenn nie ausgewertet)
    pub best_energy: Option<f64>,
}

/// Vertrag eines Kurvenmodells gegenüber Session und Optimierer.
pub trait Snake: Send {
    /// Energie der aktuellen Konfiguration.
    fn energy(&self) -> f64;

    /// Energiegradient je Kontrollpunkt; `None` = finite Differenzen verwenden.
    fn energy_gradient(&self) -> Option<Vec<DVec2>>;

    /// Aktuelle Kontrollpunkte.
    fn nodes(&self) -> &[ControlNode];

    /// Überschreibt alle Kontrollpunkte und berechnet die Haut neu.
    fn set_nodes(&mut self, nodes: &[ControlNode]);

    /// Frisch erzeugte Zeichenelemente der aktuellen Konfiguration.
    fn scales(&self) -> Vec<Scale>;

    /// `false` signalisiert allen Beteiligten einen kooperativen Abbruch.
    fn is_alive(&self) -> bool;

    /// Nimmt den Abschlussbericht einer Session entgegen.
    fn update_status(&mut self, status: SessionStatus);

    /// Anordnung der Kontrollpunkte.
    fn node_layout(&self) -> NodeLayout {
        NodeLayout::Positions
    }
}

/// Zwischen Session und Optimierer-Thread geteiltes Modell.
pub type SharedSnake = Arc<Mutex<dyn Snake>>;

/// Verpackt ein Modell für die Session.
pub fn share<S: Snake + 'static>(snake: S) -> SharedSnake {
    Arc::new(Mutex::new(snake))
}
