//! Core-Domänentypen: Kontrollpunkte, Kurvenmodelle, Haut, Canvas-Abbildung.
//!
//! Dieses Modul kennt weder Threads noch Host-Oberflächen.

pub mod basis;
pub mod canvas;
pub mod error;
pub mod h_model;
pub mod l_model;
pub mod model;
pub mod node;
pub mod resample;
pub mod roi;
pub mod scale;
pub mod skin;
pub mod snake;

pub use basis::{BasisTable, BASIS_SUPPORT, DISCRETIZATION_SAMPLING_RATE};
pub use canvas::CanvasView;
pub use error::ModelError;
pub use h_model::{HermiteSplineModel, TangentStyle, HERMITE_MIN_NODES};
pub use l_model::{LinearSplineModel, LINEAR_MIN_NODES};
pub use model::{CurveModel, ModelKind};
pub use node::{round_half_up, ControlNode};
pub use resample::{resample_closed, resample_with_tangents, ResampledContour};
pub use roi::{RoiKind, SeedRegion, SeedShape};
pub use scale::{Color, Scale, COLOR_BLACK, COLOR_RED, COLOR_TRANSPARENT};
pub use skin::SkinBuffer;
pub use snake::{share, NodeLayout, SessionStatus, SharedSnake, Snake};
