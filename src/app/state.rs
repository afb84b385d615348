//! Session-Zustand: aktives Werkzeug, Phase, Statusflags und Optimierer-Overlays.

use glam::IVec2;

use crate::core::{Scale, SessionStatus};

/// Werkzeug der Session-Palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditTool {
    /// Standard: Kreuze (Kontrollpunkte) verschieben
    #[default]
    MoveCross,
    /// Rahmen ziehen: Strecken bzw. mit Modifier gleichmäßig skalieren
    Resize,
    /// Konfiguration um das Rahmenzentrum drehen
    Rotate,
    /// Optimierer starten
    Start,
    /// Lupe (Zoom über den Host)
    Magnify,
    /// Session abbrechen
    Cancel,
    /// Session übernehmen
    Accept,
    /// Kein gültiges Werkzeug
    Undefined,
}

impl EditTool {
    /// Reihenfolge der Werkzeuge in der Palette.
    pub const PALETTE: [EditTool; 7] = [
        EditTool::MoveCross,
        EditTool::Resize,
        EditTool::Rotate,
        EditTool::Start,
        EditTool::Magnify,
        EditTool::Cancel,
        EditTool::Accept,
    ];

    /// Statuszeile beim Anklicken des Werkzeugs.
    pub fn status_text(self) -> &'static str {
        match self {
            EditTool::MoveCross => "Move crosses",
            EditTool::Resize => "Resize snake",
            EditTool::Rotate => "Rotate snake",
            EditTool::Start => "Optimization started",
            EditTool::Magnify => "Magnifying glass",
            EditTool::Cancel => "Abort",
            EditTool::Accept => "Done",
            EditTool::Undefined => "Undefined operation",
        }
    }
}

/// Statuszeile beim Unterbrechen des Optimierers.
pub const STATUS_OPTIMIZATION_INTERRUPTED: &str = "Optimization interrupted";

/// Lebenszyklus einer Session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Keine Interaktion aktiv
    #[default]
    Idle,
    /// Benutzer editiert
    Editing,
    /// Optimierer läuft, direktes Editieren gesperrt
    Optimizing,
    /// Übernehmen/Abbrechen empfangen, wartender Aufrufer wird geweckt
    Terminated,
}

/// Zwischenzustand einer laufenden Zieh-Geste
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    /// Letzte (gerasterte) Zeigerposition für Translation
    pub anchor: Option<IVec2>,
    /// Letzter Winkel zum Rahmenzentrum für Rotation
    pub angle: f64,
}

/// Zustand einer Interaktions-Session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Lebenszyklus-Phase
    pub phase: SessionPhase,
    /// Aktives Werkzeug
    pub current_tool: EditTool,
    /// Ohne angehängten Optimierer: Start ist wirkungslos
    pub single_shot: bool,
    /// Session wurde abgebrochen
    pub canceled_by_user: bool,
    /// Modell meldete `is_alive() == false`
    pub snake_died: bool,
    /// Optimierer meldete Optimum und seither wurde nichts verändert
    pub optimal_snake_found: bool,
    /// Beste vom Optimierer beobachtete Energie
    pub best_energy: Option<f64>,
    /// Haut der bisher besten Konfiguration (Geist-Overlay)
    pub best_skin_so_far: Option<Vec<Scale>>,
    /// Haut der zuletzt gemeldeten Probe
    pub probe_skin: Option<Vec<Scale>>,
    /// Zieh-Gesten-Zustand
    pub drag: DragState,
    /// Letzte Statusmeldung an den Host
    pub status_message: Option<String>,
}

impl SessionState {
    /// Neuer Zustand für eine beginnende Interaktion.
    pub fn editing(single_shot: bool) -> Self {
        Self {
            phase: SessionPhase::Editing,
            single_shot,
            ..Self::default()
        }
    }

    /// `true`, solange der Optimierer läuft.
    pub fn is_optimizing(&self) -> bool {
        self.phase == SessionPhase::Optimizing
    }

    /// `true` in den Phasen Editing und Optimizing.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Editing | SessionPhase::Optimizing)
    }

    /// Jede manuelle Änderung entwertet ein gemeldetes Optimum.
    pub fn destroy_optimality(&mut self) {
        self.optimal_snake_found = false;
    }

    /// Vierteiliger Abschlussbericht.
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            canceled_by_user: self.canceled_by_user,
            snake_died: self.snake_died,
            optimal_snake_found: self.optimal_snake_found,
            best_energy: self.best_energy,
        }
    }
}
