//! Zeichenbare Polylinien/Polygone, die ein Kurvenmodell pro Render-Aufruf erzeugt.

use glam::IVec2;

/// RGBA-Farbe (0.0–1.0 je Kanal), wie in den Editor-Optionen.
pub type Color = [f32; 4];

/// Rot (Hautfarbe der Kontur).
pub const COLOR_RED: Color = [1.0, 0.0, 0.0, 1.0];
/// Schwarz (Tangenten).
pub const COLOR_BLACK: Color = [0.0, 0.0, 0.0, 1.0];
/// Vollständig transparent.
pub const COLOR_TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];

/// Ein zeichenbares Element der Snake-Haut.
///
/// Punkte liegen in ganzzahligen Bildkoordinaten. Das Modell hält keine
/// Scales vor, jeder Aufruf von `scales()` erzeugt neue.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    /// Eckpunkte in Bildkoordinaten
    pub points: Vec<IVec2>,
    /// Geschlossen: letzter Punkt wird mit dem ersten verbunden
    pub closed: bool,
    /// Gefüllt: Fläche wird mit der Primärfarbe gefüllt
    pub filled: bool,
    /// Linienfarbe
    pub primary_color: Color,
    /// Sekundärfarbe (z.B. Füllung bei Überlagerung)
    pub secondary_color: Color,
}

impl Scale {
    /// Erstellt eine leere Scale mit Stil.
    pub fn new(primary_color: Color, secondary_color: Color, closed: bool, filled: bool) -> Self {
        Self {
            points: Vec::new(),
            closed,
            filled,
            primary_color,
            secondary_color,
        }
    }

    /// Erstellt eine Scale mit gegebenen Punkten.
    pub fn with_points(mut self, points: Vec<IVec2>) -> Self {
        self.points = points;
        self
    }

    /// Anzahl der Eckpunkte.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true`, wenn die Scale keine Punkte enthält.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Liefert eine Kopie mit komplementärer Primärfarbe (Alpha bleibt).
    ///
    /// Wird für die Live-Probe über dem Bestwert-Geist verwendet.
    pub fn complementary(&self) -> Self {
        let [r, g, b, a] = self.primary_color;
        Self {
            primary_color: [1.0 - r, 1.0 - g, 1.0 - b, a],
            ..self.clone()
        }
    }
}
