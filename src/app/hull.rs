//! Griff-Rahmen (Hull) für Skalieren und Rotieren in Bildschirmkoordinaten.

use glam::{DVec2, IVec2};

use crate::core::CanvasView;

/// Index eines Kanten-Griffs: 0 = oben, 1 = rechts, 2 = unten, 3 = links.
pub type HullHandle = usize;

/// Vier Eckpunkte plus Zentrum, in Bildschirmkoordinaten.
///
/// Ecken: `[0]` links oben, `[1]` rechts oben, `[2]` rechts unten, `[3]` links unten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditHull {
    /// Eckpunkte
    pub corners: [DVec2; 4],
    /// Mittelpunkt zwischen Ecke 0 und Ecke 2
    pub center: DVec2,
}

impl EditHull {
    /// Bounding-Box der (bereits gerundeten) Bildpunkte auf dem Bildschirm.
    ///
    /// Jeder Punkt wird um eine halbe Vergrößerung verschoben, damit der Rahmen
    /// Pixelmitten umschließt. Eine Box ohne Breite oder Höhe wird zur
    /// Bildschirmmitte hin aufgezogen.
    pub fn around(points: &[IVec2], canvas: &CanvasView) -> Self {
        let offset = (canvas.magnification / 2.0) as i32;
        let mut min = IVec2::splat(i32::MAX);
        let mut max = IVec2::splat(i32::MIN);
        for p in points {
            let screen = canvas.screen(*p) + IVec2::splat(offset);
            min = min.min(screen);
            max = max.max(screen);
        }
        if points.is_empty() {
            min = IVec2::ZERO;
            max = IVec2::ZERO;
        }

        if min.x == max.x {
            let extent = canvas.screen_x(canvas.image_width as i32);
            let other = degenerate_partner(min.x, extent);
            min.x = min.x.min(other);
            max.x = max.x.max(other);
        }
        if min.y == max.y {
            let extent = canvas.screen_y(canvas.image_height as i32);
            let other = degenerate_partner(min.y, extent);
            min.y = min.y.min(other);
            max.y = max.y.max(other);
        }

        let (min, max) = (min.as_dvec2(), max.as_dvec2());
        let corners = [
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ];
        Self {
            corners,
            center: (corners[0] + corners[2]) * 0.5,
        }
    }

    /// Mittelpunkt der Kante eines Griffs.
    pub fn handle_position(&self, handle: HullHandle) -> DVec2 {
        let start = self.corners[handle % 4];
        let end = self.corners[(handle + 1) % 4];
        (start + end) * 0.5
    }

    /// Nächster Kanten-Griff; bei Gleichstand gewinnt die linke Kante (3).
    pub fn closest_handle(&self, screen: IVec2) -> HullHandle {
        let p = screen.as_dvec2();
        let mut best = 3;
        let mut best_distance = self.handle_position(3).distance_squared(p);
        for handle in 0..3 {
            let distance = self.handle_position(handle).distance_squared(p);
            if distance < best_distance {
                best_distance = distance;
                best = handle;
            }
        }
        best
    }

    /// Gleichmäßiger Skalierungsfaktor, wenn `handle` nach `screen` gezogen wird.
    ///
    /// `None`, wenn der Zeiger das Zentrum überquert (Inversion).
    pub fn uniform_scale(&self, handle: HullHandle, screen: IVec2) -> Option<f64> {
        let (x, y) = (screen.x as f64, screen.y as f64);
        let c = self.center;
        match handle {
            0 if y <= c.y - 1.0 => Some((y - c.y) / (self.corners[0].y - c.y)),
            1 if x >= c.x + 1.0 => Some((x - c.x) / (self.corners[1].x - c.x)),
            2 if y >= c.y + 1.0 => Some((y - c.y) / (self.corners[2].y - c.y)),
            3 if x <= c.x - 1.0 => Some((x - c.x) / (self.corners[3].x - c.x)),
            _ => None,
        }
    }

    /// Skaliert den Rahmen um sein Zentrum.
    pub fn scale(&mut self, factor: f64) {
        let c = self.center;
        for corner in &mut self.corners {
            *corner = c + (*corner - c) * factor;
        }
    }

    /// Rotiert den Rahmen um sein Zentrum.
    pub fn rotate(&mut self, angle: f64) {
        let rotation = DVec2::from_angle(angle);
        let c = self.center;
        for corner in &mut self.corners {
            *corner = c + rotation.rotate(*corner - c);
        }
    }

    /// Einachsige Streckung an der gegenüberliegenden Kante.
    ///
    /// Liefert `(Achse, Anker in Bildschirmkoordinaten, Faktor)`; Achse 0 = x,
    /// 1 = y. `None` bei Überquerung der Ankerkante. Der Rahmen folgt dem Zeiger.
    pub fn stretch(&mut self, handle: HullHandle, screen: IVec2) -> Option<(usize, f64, f64)> {
        let (x, y) = (screen.x as f64, screen.y as f64);
        let result = match handle {
            0 => {
                let anchor = self.corners[2].y;
                if anchor - 1.0 < y {
                    return None;
                }
                let factor = (y - anchor) / (self.corners[1].y - anchor);
                self.corners[0].y = y;
                self.corners[1].y = y;
                (1, anchor, factor)
            }
            1 => {
                let anchor = self.corners[0].x;
                if x < anchor + 1.0 {
                    return None;
                }
                let factor = (x - anchor) / (self.corners[1].x - anchor);
                self.corners[1].x = x;
                self.corners[2].x = x;
                (0, anchor, factor)
            }
            2 => {
                let anchor = self.corners[1].y;
                if y < anchor + 1.0 {
                    return None;
                }
                let factor = (y - anchor) / (self.corners[2].y - anchor);
                self.corners[2].y = y;
                self.corners[3].y = y;
                (1, anchor, factor)
            }
            _ => {
                let anchor = self.corners[1].x;
                if anchor - 1.0 < x {
                    return None;
                }
                let factor = (x - anchor) / (self.corners[0].x - anchor);
                self.corners[3].x = x;
                self.corners[0].x = x;
                (0, anchor, factor)
            }
        };
        self.center = (self.corners[0] + self.corners[2]) * 0.5;
        Some(result)
    }
}

/// Zweite Koordinate für eine entartete (null-breite) Box.
fn degenerate_partner(value: i32, extent: i32) -> i32 {
    if value < 0 || value >= extent {
        extent / 2
    } else if value < extent / 2 {
        (value + extent) / 2
    } else {
        value / 2
    }
}
