//! Protokoll für Optimierer, die eine Session im Hintergrund begleiten.
//!
//! Der Optimierer läuft auf einem eigenen Thread und meldet Fortschritt über
//! einen Kanal mit genau einem Empfänger (der Session). Die Session liest die
//! Meldungen in ihrem eigenen Takt; es gibt keinen geteilten Zustand außer dem
//! Modell selbst und dem Stop-Flag.

pub mod pattern_search;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::core::{ControlNode, Scale, SharedSnake, Snake};

pub use pattern_search::PatternSearchOptimizer;

/// Art einer Fortschrittsmeldung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// Gleich wird eine Konfiguration ausgewertet
    Probing,
    /// Die zuletzt ausgewertete Konfiguration ist neue Bestlösung
    NewBest,
}

/// Fortschrittsmeldung des Optimierers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeEvent {
    /// Art der Meldung
    pub kind: ProbeKind,
    /// Haut der Konfiguration zum Zeitpunkt der Meldung
    pub skin: Vec<Scale>,
    /// Kontrollpunkte zum Zeitpunkt der Meldung
    pub nodes: Vec<ControlNode>,
}

impl ProbeEvent {
    /// `true` bei einer neuen Bestlösung.
    pub fn is_current_best(&self) -> bool {
        self.kind == ProbeKind::NewBest
    }
}

/// Sendeseite des Fortschrittskanals.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    sender: Sender<ProbeEvent>,
}

impl ProgressSink {
    /// Erstellt den Kanal; der Empfänger gehört der Session.
    pub fn channel() -> (Self, Receiver<ProbeEvent>) {
        let (sender, receiver) = std::sync::mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Meldet eine bevorstehende Auswertung.
    pub fn will_probe(&self, snake: &dyn Snake) {
        self.publish(ProbeKind::Probing, snake);
    }

    /// Meldet eine gerade gefundene Verbesserung.
    pub fn was_successful_probing(&self, snake: &dyn Snake) {
        self.publish(ProbeKind::NewBest, snake);
    }

    fn publish(&self, kind: ProbeKind, snake: &dyn Snake) {
        let event = ProbeEvent {
            kind,
            skin: snake.scales(),
            nodes: snake.nodes().to_vec(),
        };
        // Empfänger weg = Session beendet; Meldungen sind dann bedeutungslos
        if self.sender.send(event).is_err() {
            log::debug!("Fortschrittsmeldung verworfen: Session hört nicht mehr zu");
        }
    }
}

/// Geteiltes Stop-Flag eines Optimierers.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Erstellt ein nicht gesetztes Flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fordert den Abbruch an; jederzeit und mehrfach aufrufbar.
    pub fn stop_optimizing(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// `true`, sobald ein Abbruch angefordert wurde.
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Setzt das Flag vor einem neuen Lauf zurück.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Austauschbarer Hintergrund-Optimierer.
///
/// Vor jeder Energie- oder Gradientenauswertung muss `is_alive()` geprüft und
/// bei `false` sofort zurückgekehrt werden.
pub trait Optimizer: Send {
    /// Führt die Suche aus, beginnend bei `configuration`.
    fn optimize(
        &mut self,
        snake: &SharedSnake,
        configuration: Vec<ControlNode>,
        progress: &ProgressSink,
    );

    /// Beste beobachtete Energie, `None` wenn nie ausgewertet.
    fn best_observed_energy(&self) -> Option<f64>;

    /// `true`, wenn die Suche wegen eines toten Modells endete.
    fn terminated_by_snake_death(&self) -> bool;

    /// `true`, wenn die Suche ein selbst erklärtes Optimum erreichte.
    fn reached_optimum(&self) -> bool;

    /// Handle, über das die Session den Lauf abbricht.
    fn stop_handle(&self) -> StopHandle;
}
