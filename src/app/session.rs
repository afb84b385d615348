//! Interaktions-Session: blockierender Rendezvous zwischen Host und Editor.
//!
//! `InteractionSession::interact` blockiert den aufrufenden Thread, bis über
//! einen `SessionHandle` Übernehmen oder Abbrechen eintrifft. Alle Eingaben
//! laufen seriell unter einem Mutex; der Optimierer arbeitet auf einem eigenen
//! Thread und berührt nur das Modell. Sperr-Reihenfolge: Session vor Modell.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::command_log::CommandLog;
use super::controller::ToolController;
use super::handlers;
use super::palette::ScopedPalette;
use super::point_editor::PointEditor;
use super::render_frame::{self, RenderFrame, RenderStyle};
use super::state::{SessionPhase, SessionState};
use super::surface::Surface;
use super::SessionIntent;
use crate::core::{ControlNode, SessionStatus, SharedSnake};
use crate::optimizer::{Optimizer, ProbeEvent, StopHandle};

/// Takt, in dem eine wartende Session Optimierer-Meldungen abholt.
pub const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Laufender Optimierer einer Session.
pub struct OptimizerRun {
    /// Worker-Thread; liefert den Optimierer nach Ende zurück
    pub worker: JoinHandle<Box<dyn Optimizer>>,
    /// Empfangsseite des Fortschrittskanals
    pub progress: Receiver<ProbeEvent>,
    /// Abbruch-Flag des Optimierers
    pub stop: StopHandle,
    /// Knoten der zuletzt gemeldeten Bestlösung
    pub best_nodes: Option<Vec<ControlNode>>,
}

/// Veränderlicher Session-Zustand hinter dem Mutex.
pub struct SessionInner {
    /// Phase, Werkzeug und Statusflags
    pub state: SessionState,
    /// Arbeitskopie der Knoten
    pub editor: Option<PointEditor>,
    /// Bearbeitetes Modell
    pub snake: Option<SharedSnake>,
    /// Host-Anzeige
    pub surface: Option<Arc<dyn Surface>>,
    /// Angehängter, ruhender Optimierer
    pub optimizer: Option<Box<dyn Optimizer>>,
    /// Laufender Optimierer
    pub run: Option<OptimizerRun>,
    /// Ausgeführte Commands
    pub command_log: CommandLog,
    /// Darstellungsparameter für `RenderFrame`
    pub style: RenderStyle,
}

impl SessionInner {
    fn new(style: RenderStyle) -> Self {
        Self {
            state: SessionState::default(),
            editor: None,
            snake: None,
            surface: None,
            optimizer: None,
            run: None,
            command_log: CommandLog::new(),
            style,
        }
    }

    /// Zeigt eine Statusmeldung an und merkt sie sich.
    pub fn show_status(&mut self, message: &str) {
        self.state.status_message = Some(message.to_string());
        if let Some(surface) = &self.surface {
            surface.show_status(message);
        }
    }

    /// Fordert einen Repaint der Host-Anzeige an.
    pub fn request_repaint(&self) {
        if let Some(surface) = &self.surface {
            surface.request_repaint();
        }
    }

    /// Überträgt die Arbeitskopie in das Modell.
    pub fn push_nodes_to_snake(&self) {
        let (Some(editor), Some(snake)) = (&self.editor, &self.snake) else {
            return;
        };
        match snake.lock() {
            Ok(mut model) => model.set_nodes(editor.nodes()),
            Err(_) => log::error!("Modell-Lock vergiftet, Knoten nicht übertragen"),
        }
    }
}

struct SessionShared {
    inner: Mutex<SessionInner>,
    wakeup: Condvar,
}

impl SessionShared {
    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::error!("Session-Lock vergiftet, Zustand wird weiterverwendet");
            poisoned.into_inner()
        })
    }

    /// Wartet auf ein Wecksignal; während der Optimierung höchstens einen Takt.
    fn wait<'a>(&self, inner: MutexGuard<'a, SessionInner>) -> MutexGuard<'a, SessionInner> {
        if inner.run.is_some() {
            self.wakeup
                .wait_timeout(inner, PROGRESS_POLL_INTERVAL)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|poisoned| poisoned.into_inner().0)
        } else {
            self.wakeup
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner)
        }
    }
}

/// Orchestriert genau eine Editier-Session zur Zeit.
pub struct InteractionSession {
    shared: Arc<SessionShared>,
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self::new(RenderStyle::default())
    }
}

impl InteractionSession {
    /// Erstellt eine ruhende Session ohne Optimierer (Single-Shot).
    pub fn new(style: RenderStyle) -> Self {
        Self {
            shared: Arc::new(SessionShared {
                inner: Mutex::new(SessionInner::new(style)),
                wakeup: Condvar::new(),
            }),
        }
    }

    /// Hängt einen Optimierer an; ab der nächsten Session ist Start möglich.
    pub fn attach_optimizer(&self, optimizer: Box<dyn Optimizer>) {
        let mut inner = self.shared.lock();
        if inner.run.is_some() {
            log::warn!("Optimierer läuft noch, neuer Optimierer wird verworfen");
            return;
        }
        inner.optimizer = Some(optimizer);
        log::info!("Optimierer angehängt");
    }

    /// Handle für Host-Events und Repaints; beliebig oft klonbar.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Startet die Interaktion und blockiert bis Übernehmen oder Abbrechen.
    ///
    /// Ein totes Modell wird sofort mit `snake_died` zurückgemeldet. Nach dem
    /// Aufwachen wird die Arbeitskopie per `set_nodes` zurückgeschrieben und
    /// `update_status` mit dem Abschlussbericht aufgerufen.
    pub fn interact(&self, snake: &SharedSnake, surface: Arc<dyn Surface>) -> SessionStatus {
        let (nodes, layout) = {
            let mut model = snake.lock().unwrap_or_else(PoisonError::into_inner);
            if !model.is_alive() {
                let status = SessionStatus {
                    snake_died: true,
                    ..SessionStatus::default()
                };
                log::warn!("Modell ist tot, keine Interaktion");
                model.update_status(status);
                return status;
            }
            (model.nodes().to_vec(), model.node_layout())
        };

        {
            let mut inner = self.shared.lock();
            if inner.state.is_active() {
                log::error!("Es läuft bereits eine Session, Aufruf wird ignoriert");
                return SessionStatus::default();
            }
            let canvas = surface.canvas();
            inner.state = SessionState::editing(inner.optimizer.is_none());
            inner.editor = Some(PointEditor::new(nodes, layout, &canvas));
            inner.snake = Some(Arc::clone(snake));
            inner.surface = Some(Arc::clone(&surface));
            log::info!(
                "Session gestartet ({} Griffe, Single-Shot: {})",
                inner.editor.as_ref().map_or(0, PointEditor::handle_count),
                inner.state.single_shot
            );
        }
        self.shared.wakeup.notify_all();

        let (nodes, status) = {
            let _palette = ScopedPalette::acquire(surface.as_ref());
            surface.request_repaint();

            let mut inner = self.shared.lock();
            loop {
                handlers::optimization::drain_progress(&mut inner);
                if inner.state.phase == SessionPhase::Terminated {
                    break;
                }
                // Aufwachen ohne Terminierung: erneut warten
                inner = self.shared.wait(inner);
            }

            let nodes = inner
                .editor
                .take()
                .map(PointEditor::into_nodes)
                .unwrap_or_default();
            inner.snake = None;
            inner.surface = None;
            (nodes, inner.state.status())
        };

        {
            let mut model = snake.lock().unwrap_or_else(PoisonError::into_inner);
            model.set_nodes(&nodes);
            model.update_status(status);
        }
        log::info!(
            "Session beendet: abgebrochen={}, tot={}, optimal={}, Energie={:?}",
            status.canceled_by_user,
            status.snake_died,
            status.optimal_snake_found,
            status.best_energy
        );
        status
    }
}

/// Zugriff des Hosts auf eine laufende Session.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<SessionShared>,
}

impl SessionHandle {
    /// Verarbeitet ein Host-Event über den `ToolController`.
    pub fn dispatch(&self, intent: SessionIntent) -> anyhow::Result<()> {
        let result = {
            let mut inner = self.shared.lock();
            handlers::optimization::drain_progress(&mut inner);
            let result = ToolController::new().handle_intent(&mut inner, intent);
            inner.request_repaint();
            result
        };
        self.shared.wakeup.notify_all();
        result
    }

    /// Baut das Bild für den aktuellen Host-Repaint.
    pub fn render_frame(&self) -> Option<RenderFrame> {
        let frame = {
            let mut inner = self.shared.lock();
            render_frame::build(&mut inner)
        };
        self.shared.wakeup.notify_all();
        frame
    }

    /// Aktuelle Phase.
    pub fn phase(&self) -> SessionPhase {
        self.shared.lock().state.phase
    }

    /// Momentaufnahme des Session-Zustands.
    pub fn state(&self) -> SessionState {
        self.shared.lock().state.clone()
    }

    /// Momentaufnahme der Arbeitskopie, `None` außerhalb einer Session.
    pub fn working_nodes(&self) -> Option<Vec<ControlNode>> {
        self.shared
            .lock()
            .editor
            .as_ref()
            .map(|editor| editor.nodes().to_vec())
    }

    /// Anzahl der bisher ausgeführten Commands.
    pub fn executed_commands(&self) -> usize {
        self.shared.lock().command_log.len()
    }

    /// Wartet höchstens `timeout`, bis die Session `phase` erreicht.
    ///
    /// Holt dabei Optimierer-Meldungen ab, damit ein beendeter Lauf auch ohne
    /// Host-Events übernommen wird.
    pub fn wait_for_phase(&self, phase: SessionPhase, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut inner = self.shared.lock();
        loop {
            handlers::optimization::drain_progress(&mut inner);
            if inner.state.phase == phase {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let slice = (deadline - now).min(PROGRESS_POLL_INTERVAL);
            inner = self
                .shared
                .wakeup
                .wait_timeout(inner, slice)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|poisoned| poisoned.into_inner().0);
        }
    }
}
