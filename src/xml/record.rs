//! Persistierbarer Schnappschuss eines Modells.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{ControlNode, NodeLayout, Snake};

/// Name, Knotenanzahl und Kontrollpunkte einer Snake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeRecord {
    /// Bildtitel bzw. frei wählbarer Name
    pub name: String,
    /// Anzahl Knoten (M)
    pub m: usize,
    /// Alle Kontrollpunkte (M beim L-Modell, 2M beim H-Modell)
    pub control_points: Vec<ControlNode>,
}

impl SnakeRecord {
    /// Schnappschuss eines Modells.
    pub fn from_snake(name: impl Into<String>, snake: &dyn Snake) -> Self {
        let control_points = snake.nodes().to_vec();
        let m = control_points.len() / snake.node_layout().entries_per_knot();
        Self {
            name: name.into(),
            m,
            control_points,
        }
    }

    /// `true`, wenn Punktzahl und M zu einer der beiden Basisfamilien passen.
    pub fn has_consistent_count(&self) -> bool {
        let n = self.control_points.len();
        n == self.m || n == 2 * self.m
    }

    /// Schreibt die Kontrollpunkte in ein Modell gleicher Größe.
    pub fn apply_to(&self, snake: &mut dyn Snake) -> Result<()> {
        let layout = snake.node_layout();
        let expected = Self::expected_points(self.m, layout);
        if self.control_points.len() != expected {
            bail!(
                "Snake '{}' hat {} Kontrollpunkte, erwartet {}",
                self.name,
                self.control_points.len(),
                expected
            );
        }
        if snake.nodes().len() != expected {
            bail!(
                "Snake '{}': M = {} passt nicht zum Modell ({:?})",
                self.name,
                self.m,
                layout
            );
        }
        snake.set_nodes(&self.control_points);
        log::info!("Snake '{}' mit {} Knoten übernommen", self.name, self.m);
        Ok(())
    }

    /// Erwartete Anzahl Kontrollpunkte für ein Layout.
    pub fn expected_points(m: usize, layout: NodeLayout) -> usize {
        m * layout.entries_per_knot()
    }

    /// JSON-Darstellung.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Snake konnte nicht als JSON serialisiert werden")
    }

    /// Liest die JSON-Darstellung.
    pub fn from_json(text: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(text).context("Ungültiges Snake-JSON")?;
        if !record.has_consistent_count() {
            bail!(
                "M = {} passt nicht zu {} Kontrollpunkten",
                record.m,
                record.control_points.len()
            );
        }
        Ok(record)
    }

    /// Lädt eine Snake aus einer XML-Datei.
    pub fn load_xml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Datei nicht lesbar: {}", path.display()))?;
        let record = super::parse_snake_record(&content)
            .with_context(|| format!("Fehler in {}", path.display()))?;
        log::info!("Snake geladen aus: {}", path.display());
        Ok(record)
    }

    /// Speichert die Snake als XML-Datei.
    pub fn save_xml(&self, path: &Path) -> Result<()> {
        let content = super::write_snake_record(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Datei nicht schreibbar: {}", path.display()))?;
        log::info!("Snake gespeichert nach: {}", path.display());
        Ok(())
    }
}
