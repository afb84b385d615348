//! Dichte Abtastung ("Haut") einer geschlossenen Kontur.

use glam::{DVec2, IVec2};

use super::basis::{BASIS_SUPPORT, DISCRETIZATION_SAMPLING_RATE};
use super::node::round_half_up;
use super::scale::{Scale, COLOR_RED, COLOR_TRANSPARENT};

/// Gemeinsamer Skin-Puffer beider Modellvarianten (`M·R` Abtastwerte).
#[derive(Debug, Clone, PartialEq)]
pub struct SkinBuffer {
    knots: usize,
    width: u32,
    height: u32,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SkinBuffer {
    /// Legt einen Puffer für `knots` Knoten über einem Bild der gegebenen Größe an.
    pub fn new(knots: usize, width: u32, height: u32) -> Self {
        let len = knots * DISCRETIZATION_SAMPLING_RATE;
        Self {
            knots,
            width,
            height,
            x: vec![0.0; len],
            y: vec![0.0; len],
        }
    }

    /// Berechnet alle Abtastwerte neu.
    ///
    /// Für Abtastwert `i` trägt Knoten `k` mit `weight(k, index)` bei, wobei
    /// `index = i − k·R + shift` modulo `M·R` gewickelt wird und nur Indizes
    /// innerhalb des Trägers `N·R` zählen.
    pub fn recompute<F>(&mut self, shift: usize, weight: F)
    where
        F: Fn(usize, usize) -> DVec2,
    {
        let r = DISCRETIZATION_SAMPLING_RATE;
        let mr = self.knots * r;
        let support = BASIS_SUPPORT * r;
        for i in 0..mr {
            let mut acc = DVec2::ZERO;
            for k in 0..self.knots {
                let index = (i + shift + mr - k * r) % mr;
                if index >= support {
                    continue;
                }
                acc += weight(k, index);
            }
            self.x[i] = acc.x;
            self.y[i] = acc.y;
        }
    }

    /// X-Koordinaten der Abtastwerte.
    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    /// Y-Koordinaten der Abtastwerte.
    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    /// Anzahl der Abtastwerte (`M·R`).
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` ohne Abtastwerte.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Rastert die Haut auf Bildpixel, begrenzt auf `[0, w−1] × [0, h−1]`.
    pub fn rasterize(&self) -> Vec<IVec2> {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| {
                IVec2::new(
                    round_half_up(x + 0.5).clamp(0, max_x),
                    round_half_up(y + 0.5).clamp(0, max_y),
                )
            })
            .collect()
    }

    /// Geschlossene, ungefüllte, rote Kontur-Scale.
    pub fn to_scale(&self) -> Scale {
        Scale::new(COLOR_RED, COLOR_TRANSPARENT, true, false).with_points(self.rasterize())
    }
}
