//! Bild einer Session pro Host-Repaint.
//!
//! Haut-Skalen liegen in Bildkoordinaten, Rahmen und Kreuze in
//! Bildschirmkoordinaten. Das Zeichnen selbst übernimmt der Host.

use glam::{DVec2, IVec2};

use super::handlers;
use super::session::SessionInner;
use super::state::{EditTool, SessionPhase};
use crate::core::{round_half_up, Color, Scale, COLOR_BLACK, COLOR_RED};

/// Darstellungsparameter der Session-Overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Halbe Kantenlänge eines Knotenkreuzes in Bildschirmpixeln
    pub cross_half_size: i32,
    /// Farbe der Knotenkreuze
    pub cross_color: Color,
    /// Farbe des Griff-Rahmens
    pub hull_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            cross_half_size: 5,
            cross_color: COLOR_RED,
            hull_color: COLOR_BLACK,
        }
    }
}

/// Griff-Rahmen für Resize und Rotate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullOverlay {
    /// Eckpunkte
    pub corners: [DVec2; 4],
    /// Kantenmitten (Griffe 0..4)
    pub handles: [DVec2; 4],
    /// Rahmenzentrum
    pub center: DVec2,
    /// Linienfarbe
    pub color: Color,
}

/// Kreuzmarke eines sichtbaren Griffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeCross {
    /// Index des Griffs
    pub handle: usize,
    /// Mittelpunkt in Bildschirmkoordinaten
    pub center: IVec2,
    /// Halbe Kantenlänge
    pub half_size: i32,
    /// Aktuell gewählter Griff
    pub selected: bool,
    /// Farbe
    pub color: Color,
}

/// Alles, was der Host für einen Repaint braucht.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Phase zum Zeitpunkt des Repaints
    pub phase: SessionPhase,
    /// Aktives Werkzeug
    pub tool: EditTool,
    /// Haut des Modells bzw. der aktuellen Probe
    pub skin: Vec<Scale>,
    /// Geist der bisher besten Konfiguration (nur während der Optimierung)
    pub ghost_skin: Vec<Scale>,
    /// Griff-Rahmen (Resize/Rotate außerhalb der Optimierung)
    pub hull: Option<HullOverlay>,
    /// Knotenkreuze
    pub crosses: Vec<NodeCross>,
}

impl RenderFrame {
    fn empty(phase: SessionPhase, tool: EditTool) -> Self {
        Self {
            phase,
            tool,
            skin: Vec::new(),
            ghost_skin: Vec::new(),
            hull: None,
            crosses: Vec::new(),
        }
    }

    /// `true`, wenn nichts zu zeichnen ist.
    pub fn is_empty(&self) -> bool {
        self.skin.is_empty() && self.ghost_skin.is_empty() && self.crosses.is_empty()
    }
}

/// Baut das Bild; `None` außerhalb einer aktiven Session.
///
/// Außerhalb der Optimierung wird zuerst die Arbeitskopie ins Modell
/// übertragen. Ein totes Modell setzt `snake_died` und ergibt ein leeres Bild.
pub fn build(inner: &mut SessionInner) -> Option<RenderFrame> {
    handlers::optimization::drain_progress(inner);
    if !inner.state.is_active() {
        return None;
    }
    let snake = inner.snake.clone()?;
    let surface = inner.surface.clone()?;
    let canvas = surface.canvas();
    let phase = inner.state.phase;
    let tool = inner.state.current_tool;
    let optimizing = inner.state.is_optimizing();

    if !optimizing {
        inner.push_nodes_to_snake();
    }

    let (alive, model_skin) = match snake.lock() {
        Ok(model) => {
            let alive = model.is_alive();
            (alive, if alive { model.scales() } else { Vec::new() })
        }
        Err(_) => {
            log::error!("Modell-Lock vergiftet, Repaint übersprungen");
            return None;
        }
    };
    inner.state.snake_died = !alive;
    if !alive {
        return Some(RenderFrame::empty(phase, tool));
    }

    let (skin, ghost_skin) = if optimizing {
        (
            inner.state.probe_skin.clone().unwrap_or(model_skin),
            inner.state.best_skin_so_far.clone().unwrap_or_default(),
        )
    } else {
        (model_skin, Vec::new())
    };

    let style = inner.style;
    let editor = inner.editor.as_ref()?;
    let hull = match tool {
        EditTool::Resize | EditTool::Rotate if !optimizing => {
            let hull = editor.hull();
            Some(HullOverlay {
                corners: hull.corners,
                handles: [0, 1, 2, 3].map(|handle| hull.handle_position(handle)),
                center: hull.center,
                color: style.hull_color,
            })
        }
        _ => None,
    };

    let offset = IVec2::splat((canvas.magnification / 2.0) as i32);
    let crosses = (0..editor.handle_count())
        .filter(|&handle| !editor.is_handle_hidden(handle))
        .map(|handle| {
            let position = editor.handle_position(handle);
            let image = IVec2::new(round_half_up(position.x), round_half_up(position.y));
            NodeCross {
                handle,
                center: canvas.screen(image) + offset,
                half_size: style.cross_half_size,
                selected: handle == editor.current_handle(),
                color: style.cross_color,
            }
        })
        .collect();

    Some(RenderFrame {
        phase,
        tool,
        skin,
        ghost_skin,
        hull,
        crosses,
    })
}
