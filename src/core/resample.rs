//! Bogenlängen-Resampling eines Polygons auf genau M Punkte.
//!
//! Die Zielparameter liegen äquidistant im Abstand `Gesamtlänge / M` entlang
//! der Polylinie; jeder Zielpunkt wird linear zwischen den beiden umschließenden
//! Eckpunkten interpoliert.

use glam::DVec2;

/// Relativer Abstand der Nachbarproben für Tangenten (ε).
pub const TANGENT_PROBE_FRACTION: f64 = 0.1;

/// Ergebnis eines Resamplings mit Tangenten.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledContour {
    /// M Positionen
    pub positions: Vec<DVec2>,
    /// M Tangentenvektoren (gleiche Reihenfolge)
    pub tangents: Vec<DVec2>,
}

/// Kumulierte Bogenlänge über die Eckpunkte, beginnend bei 0.
pub fn cumulative_arc_length(vertices: &[DVec2]) -> Vec<f64> {
    let mut arc = Vec::with_capacity(vertices.len());
    let mut total = 0.0;
    for (i, v) in vertices.iter().enumerate() {
        if i > 0 {
            total += vertices[i - 1].distance(*v);
        }
        arc.push(total);
    }
    arc
}

/// Monotoner Lauf-Cursor entlang der Polylinie.
///
/// Zielparameter müssen aufsteigend abgefragt werden; der Cursor sucht ab dem
/// zuletzt gefundenen Segment weiter.
struct ArcCursor<'a> {
    vertices: &'a [DVec2],
    arc: &'a [f64],
    index: usize,
}

impl<'a> ArcCursor<'a> {
    fn new(vertices: &'a [DVec2], arc: &'a [f64]) -> Self {
        Self {
            vertices,
            arc,
            index: 0,
        }
    }

    fn point_at(&mut self, t: f64) -> DVec2 {
        let last = self.vertices.len() - 1;
        if last == 0 {
            return self.vertices[0];
        }
        let mut found = false;
        while self.index < last && !found {
            if self.arc[self.index] <= t && self.arc[self.index + 1] >= t {
                found = true;
            }
            self.index += 1;
        }
        // Zeigt danach auf den Segmentanfang (ohne Treffer: letztes Segment)
        self.index -= 1;

        let start = self.vertices[self.index];
        let end = self.vertices[self.index + 1];
        let segment = self.arc[self.index + 1] - self.arc[self.index];
        if segment <= 0.0 {
            return start;
        }
        start + (end - start) * ((t - self.arc[self.index]) / segment)
    }
}

/// Resampling einer geschlossenen Kontur (erster Eckpunkt wird angehängt).
///
/// `None` bei leerem Polygon oder `m == 0`.
pub fn resample_closed(polygon: &[DVec2], m: usize) -> Option<Vec<DVec2>> {
    if polygon.is_empty() || m == 0 {
        return None;
    }
    let mut vertices = polygon.to_vec();
    vertices.push(polygon[0]);
    Some(resample_vertices(&vertices, m))
}

fn resample_vertices(vertices: &[DVec2], m: usize) -> Vec<DVec2> {
    let arc = cumulative_arc_length(vertices);
    let total = arc[arc.len() - 1];
    let delta = total / m as f64;
    let mut cursor = ArcCursor::new(vertices, &arc);
    (0..m).map(|i| cursor.point_at(delta * i as f64)).collect()
}

/// Resampling ohne Schließen, zusätzlich mit Tangenten aus Nachbarproben.
///
/// Die Tangente ist die zentrale Differenz der Proben bei `t ± ε·Δ`, gewichtet
/// mit `1/(2ε)`. Liegt eine Probe außerhalb `[0, Gesamtlänge]`, wird der Punkt
/// selbst verwendet und das Gewicht ist 1.
pub fn resample_with_tangents(polygon: &[DVec2], m: usize) -> Option<ResampledContour> {
    if polygon.is_empty() || m == 0 {
        return None;
    }
    let arc = cumulative_arc_length(polygon);
    let total = arc[arc.len() - 1];
    let delta = total / m as f64;
    let eps = TANGENT_PROBE_FRACTION;

    let mut center = ArcCursor::new(polygon, &arc);
    let mut left_cursor = ArcCursor::new(polygon, &arc);
    let mut right_cursor = ArcCursor::new(polygon, &arc);

    let mut positions = Vec::with_capacity(m);
    let mut tangents = Vec::with_capacity(m);
    for i in 0..m {
        let t = delta * i as f64;
        let point = center.point_at(t);

        let mut weight = 1.0 / (2.0 * eps);
        let t_left = t - eps * delta;
        let left = if t_left < 0.0 {
            weight = 1.0;
            point
        } else {
            left_cursor.point_at(t_left)
        };
        let t_right = t + eps * delta;
        let right = if t_right > total {
            weight = 1.0;
            point
        } else {
            right_cursor.point_at(t_right)
        };

        positions.push(point);
        tangents.push((right - left) * weight);
    }

    Some(ResampledContour {
        positions,
        tangents,
    })
}
