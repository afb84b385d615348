//! Kontrollpunkt einer Snake-Kontur.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Ein bewegbarer Kontrollpunkt (oder beim H-Modell: ein Tangentenvektor).
///
/// `frozen` schützt den Punkt vor allen mutierenden Edit-Operationen,
/// `hidden` blendet ihn nur beim Zeichnen der Kreuze aus.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlNode {
    /// X-Koordinate in Bild-Pixeln
    pub x: f64,
    /// Y-Koordinate in Bild-Pixeln
    pub y: f64,
    /// Eingefroren: von Verschieben/Skalieren/Rotieren ausgenommen
    #[serde(default)]
    pub frozen: bool,
    /// Versteckt: wird nicht als Kreuz gezeichnet
    #[serde(default)]
    pub hidden: bool,
}

impl ControlNode {
    /// Erstellt einen freien, sichtbaren Kontrollpunkt.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            frozen: false,
            hidden: false,
        }
    }

    /// Erstellt einen Kontrollpunkt aus einem Vektor.
    pub fn from_vec(position: DVec2) -> Self {
        Self::new(position.x, position.y)
    }

    /// Liefert die Koordinaten als Vektor.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Überschreibt nur die Koordinaten, Flags bleiben erhalten.
    pub fn set_position(&mut self, position: DVec2) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Liefert die auf ganze Pixel gerundete Position (Java-Rundung).
    pub fn rounded(&self) -> glam::IVec2 {
        glam::IVec2::new(round_half_up(self.x), round_half_up(self.y))
    }
}

/// Rundet wie `Math.round` (halbe Werte Richtung +∞).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_rounds_halves_towards_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49), 0);
    }

    #[test]
    fn test_set_position_keeps_flags() {
        let mut node = ControlNode {
            x: 1.0,
            y: 2.0,
            frozen: true,
            hidden: true,
        };
        node.set_position(DVec2::new(5.0, 6.0));
        assert_eq!(node.position(), DVec2::new(5.0, 6.0));
        assert!(node.frozen);
        assert!(node.hidden);
    }
}
