//! Region-of-Interest des Hosts, nur zum Initialisieren eines Modells verwendet.

use glam::DVec2;

/// Art einer Host-Region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoiKind {
    /// Achsenparalleles Rechteck
    Rectangle,
    /// Ellipse (als Polygon geliefert)
    Oval,
    /// Geschlossenes Polygon
    Polygon,
    /// Freihand-Fläche
    FreeForm,
    /// Per Wand-Tool nachgezeichnete Fläche
    Traced,
    /// Einzelner Punkt
    Point,
    /// Gerade Linie
    Line,
    /// Offene Polylinie
    PolyLine,
    /// Freihand-Linie
    FreeLine,
    /// Winkelmessung
    Angle,
}

impl RoiKind {
    /// `true` für Regionen, die eine Fläche umschließen.
    pub fn encloses_area(self) -> bool {
        matches!(
            self,
            RoiKind::Rectangle
                | RoiKind::Oval
                | RoiKind::Polygon
                | RoiKind::FreeForm
                | RoiKind::Traced
        )
    }

    /// Anzeigename für Log-Meldungen.
    pub fn display_name(self) -> &'static str {
        match self {
            RoiKind::Rectangle => "Rectangle",
            RoiKind::Oval => "Oval",
            RoiKind::Polygon => "Polygon",
            RoiKind::FreeForm => "Freehand",
            RoiKind::Traced => "Traced",
            RoiKind::Point => "Point",
            RoiKind::Line => "Straight Line",
            RoiKind::PolyLine => "Segmented Line",
            RoiKind::FreeLine => "Freehand Line",
            RoiKind::Angle => "Angle",
        }
    }
}

/// Seed-Region: Art plus Polygon-Darstellung in Bildkoordinaten.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRegion {
    /// Art der Region
    pub kind: RoiKind,
    /// Eckpunkte (bei Ellipsen die Host-Polygonisierung, bei Punkten genau einer)
    pub polygon: Vec<DVec2>,
}

/// Klassifikation einer Seed-Region für die Modell-Initialisierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedShape<'a> {
    /// Flächige Region mit Rand-Polygon
    Area(&'a [DVec2]),
    /// Einzelner Punkt als Zentrum
    SinglePoint(DVec2),
    /// Region kann keine geschlossene Kontur liefern
    NotEnclosing,
}

impl SeedRegion {
    /// Erstellt eine Region.
    pub fn new(kind: RoiKind, polygon: Vec<DVec2>) -> Self {
        Self { kind, polygon }
    }

    /// Rechteck aus linker oberer Ecke und Größe (Eckpunkte im Uhrzeigersinn).
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            RoiKind::Rectangle,
            vec![
                DVec2::new(x, y),
                DVec2::new(x + width, y),
                DVec2::new(x + width, y + height),
                DVec2::new(x, y + height),
            ],
        )
    }

    /// Ellipse, polygonisiert mit `segments` Eckpunkten.
    pub fn oval(center: DVec2, radii: DVec2, segments: usize) -> Self {
        let n = segments.max(3);
        let polygon = (0..n)
            .map(|i| {
                let phi = std::f64::consts::TAU * i as f64 / n as f64;
                center + DVec2::new(radii.x * phi.cos(), radii.y * phi.sin())
            })
            .collect();
        Self::new(RoiKind::Oval, polygon)
    }

    /// Einzelner Punkt.
    pub fn point(position: DVec2) -> Self {
        Self::new(RoiKind::Point, vec![position])
    }

    /// Ordnet die Region einer Initialisierungsstrategie zu.
    pub fn shape(&self) -> SeedShape<'_> {
        if self.kind.encloses_area() {
            SeedShape::Area(&self.polygon)
        } else if self.kind == RoiKind::Point && self.polygon.len() == 1 {
            SeedShape::SinglePoint(self.polygon[0])
        } else {
            SeedShape::NotEnclosing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_classification() {
        let rect = SeedRegion::rectangle(0.0, 0.0, 10.0, 5.0);
        assert!(matches!(rect.shape(), SeedShape::Area(points) if points.len() == 4));

        let point = SeedRegion::point(DVec2::new(3.0, 4.0));
        assert_eq!(point.shape(), SeedShape::SinglePoint(DVec2::new(3.0, 4.0)));

        let line = SeedRegion::new(
            RoiKind::Line,
            vec![DVec2::new(0.0, 0.0), DVec2::new(5.0, 5.0)],
        );
        assert_eq!(line.shape(), SeedShape::NotEnclosing);

        // Mehrpunkt-"Point" kann nicht zentrieren
        let multi = SeedRegion::new(RoiKind::Point, vec![DVec2::ZERO, DVec2::ONE]);
        assert_eq!(multi.shape(), SeedShape::NotEnclosing);
    }
}
