//! XML Import/Export für Snake-Konfigurationen.
//!
//! Format: `<root><name/><rois><roi><snake_parameters><M/><control_points>…`
//! mit einem `<control_point>` (x, y, frozen, hidden) pro Kontrollpunkt.

pub mod parser;
pub mod record;
pub mod writer;

pub use parser::parse_snake_record;
pub use record::SnakeRecord;
pub use writer::write_snake_record;
