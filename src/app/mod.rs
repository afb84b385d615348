//! Application-Layer: Session, Controller, State, Events und Handler.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod hull;
mod intent_mapping;
pub mod palette;
pub mod point_editor;
pub mod render_frame;
pub mod session;
/// Session-Zustand und Werkzeuge
///
/// Dieses Modul hält Phase, aktives Werkzeug und Statusflags einer Session.
pub mod state;
pub mod surface;

pub use command_log::CommandLog;
pub use controller::ToolController;
pub use events::{ArrowKey, Modifiers, SessionCommand, SessionIntent};
pub use hull::{EditHull, HullHandle};
pub use intent_mapping::snap_to_magnification_grid;
pub use palette::ScopedPalette;
pub use point_editor::PointEditor;
pub use render_frame::{HullOverlay, NodeCross, RenderFrame, RenderStyle};
pub use session::{InteractionSession, SessionHandle, PROGRESS_POLL_INTERVAL};
pub use state::{
    DragState, EditTool, SessionPhase, SessionState, STATUS_OPTIMIZATION_INTERRUPTED,
};
pub use surface::{HeadlessSurface, Surface};
