//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Konfiguration, die Modell, Session und Optimierer
//! gemeinsam lesen.

pub mod options;

pub use options::SnakeOptions;
pub use options::{CONFIG_FILE_NAME, CROSS_HALF_SIZE, DEFAULT_NODE_COUNT};
