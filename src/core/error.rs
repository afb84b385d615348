//! Fehler beim Konstruieren eines Kurvenmodells.

use thiserror::Error;

/// Vorbedingungsverletzung bei der Modell-Konstruktion.
///
/// Ein fehlgeschlagener Konstruktor liefert kein (teilweise) nutzbares Modell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Zu wenige Kontrollpunkte für eine geschlossene Kontur.
    #[error("{model}: mindestens {minimum} Kontrollpunkte erforderlich, angefragt {requested}")]
    InvalidNodeCount {
        model: &'static str,
        requested: usize,
        minimum: usize,
    },
    /// Bildgröße ohne Pixel.
    #[error("Bildgröße {width}x{height} enthält keine Pixel")]
    EmptyImage { width: u32, height: u32 },
}
