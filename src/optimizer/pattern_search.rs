//! Kompass-Suche als Referenz-Optimierer.
//!
//! Verschiebt jede freie Koordinate um ±Schrittweite und übernimmt die erste
//! Verbesserung. Bleibt ein ganzer Durchlauf ohne Verbesserung, wird die
//! Schrittweite halbiert; unterhalb der Mindestschrittweite gilt das Optimum
//! als erreicht.

use serde::{Deserialize, Serialize};

use super::{Optimizer, ProgressSink, StopHandle};
use crate::core::{ControlNode, SharedSnake};

/// Einstellungen der Kompass-Suche.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternSearchSettings {
    /// Start-Schrittweite in Pixeln
    pub initial_step: f64,
    /// Mindestschrittweite; darunter endet die Suche mit Optimum
    pub min_step: f64,
    /// Maximale Anzahl Energieauswertungen
    pub max_evaluations: usize,
}

impl Default for PatternSearchSettings {
    fn default() -> Self {
        Self {
            initial_step: 8.0,
            min_step: 0.25,
            max_evaluations: 10_000,
        }
    }
}

/// Kompass-Suche über alle nicht eingefrorenen Kontrollpunkt-Koordinaten.
#[derive(Debug, Default)]
pub struct PatternSearchOptimizer {
    settings: PatternSearchSettings,
    stop: StopHandle,
    evaluations: usize,
    best_energy: Option<f64>,
    snake_died: bool,
    optimum: bool,
}

enum Evaluation {
    Energy(f64),
    Aborted,
}

impl PatternSearchOptimizer {
    /// Erstellt den Optimierer.
    pub fn new(settings: PatternSearchSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Anzahl Energieauswertungen des letzten Laufs.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn evaluate(
        &mut self,
        snake: &SharedSnake,
        configuration: &[ControlNode],
        progress: &ProgressSink,
    ) -> Evaluation {
        let Ok(mut guard) = snake.lock() else {
            log::error!("Modell-Lock vergiftet, Optimierung abgebrochen");
            return Evaluation::Aborted;
        };
        guard.set_nodes(configuration);
        progress.will_probe(&*guard);
        if !guard.is_alive() {
            self.snake_died = true;
            return Evaluation::Aborted;
        }
        self.evaluations += 1;
        Evaluation::Energy(guard.energy())
    }

    fn announce_best(&self, snake: &SharedSnake, progress: &ProgressSink) {
        if let Ok(guard) = snake.lock() {
            progress.was_successful_probing(&*guard);
        }
    }

    fn budget_exhausted(&self) -> bool {
        self.stop.is_stop_requested() || self.evaluations >= self.settings.max_evaluations
    }
}

impl Optimizer for PatternSearchOptimizer {
    fn optimize(
        &mut self,
        snake: &SharedSnake,
        configuration: Vec<ControlNode>,
        progress: &ProgressSink,
    ) {
        self.evaluations = 0;
        self.best_energy = None;
        self.snake_died = false;
        self.optimum = false;

        let mut current = configuration;
        let mut best = match self.evaluate(snake, &current, progress) {
            Evaluation::Energy(energy) => energy,
            Evaluation::Aborted => return,
        };
        self.best_energy = Some(best);
        self.announce_best(snake, progress);

        let mut step = self.settings.initial_step;
        while step >= self.settings.min_step {
            let mut improved = false;
            for index in 0..current.len() {
                if current[index].frozen {
                    continue;
                }
                for axis in 0..2 {
                    for sign in [1.0, -1.0] {
                        if self.budget_exhausted() {
                            log::info!(
                                "Kompass-Suche beendet nach {} Auswertungen (ohne Optimum)",
                                self.evaluations
                            );
                            return;
                        }
                        let mut candidate = current.clone();
                        if axis == 0 {
                            candidate[index].x += sign * step;
                        } else {
                            candidate[index].y += sign * step;
                        }
                        let energy = match self.evaluate(snake, &candidate, progress) {
                            Evaluation::Energy(energy) => energy,
                            Evaluation::Aborted => return,
                        };
                        if energy < best {
                            best = energy;
                            current = candidate;
                            self.best_energy = Some(best);
                            self.announce_best(snake, progress);
                            improved = true;
                            break;
                        }
                    }
                }
            }
            if !improved {
                step *= 0.5;
            }
        }

        self.optimum = true;
        log::info!(
            "Kompass-Suche: Optimum nach {} Auswertungen, Energie {}",
            self.evaluations,
            best
        );
    }

    fn best_observed_energy(&self) -> Option<f64> {
        self.best_energy
    }

    fn terminated_by_snake_death(&self) -> bool {
        self.snake_died
    }

    fn reached_optimum(&self) -> bool {
        self.optimum
    }

    fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}
