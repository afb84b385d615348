//! Interactive Snake Editor Library.
//! Kurvenmodelle, Interaktions-Session und Optimierer-Protokoll als Library
//! exportiert für Hosts, Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod optimizer;
pub mod shared;
pub mod xml;

pub use app::{
    EditTool, HeadlessSurface, InteractionSession, Modifiers, RenderFrame, SessionCommand,
    SessionHandle, SessionIntent, SessionPhase, SessionState, Surface, ToolController,
};
pub use core::{
    share, CanvasView, ControlNode, CurveModel, HermiteSplineModel, LinearSplineModel,
    ModelError, ModelKind, NodeLayout, Scale, SeedRegion, SessionStatus, SharedSnake, Snake,
};
pub use optimizer::{Optimizer, PatternSearchOptimizer, ProbeEvent, ProgressSink, StopHandle};
pub use shared::SnakeOptions;
pub use xml::{parse_snake_record, write_snake_record, SnakeRecord};
