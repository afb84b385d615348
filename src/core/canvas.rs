//! Abbildung zwischen Bildschirm- und Bildkoordinaten der Host-Anzeige.

use glam::{DVec2, IVec2};

/// Sicht des Hosts auf das Bild: Vergrößerung und sichtbarer Ausschnitt.
///
/// Bildschirmkoordinaten sind ganzzahlige Pixel relativ zur Canvas-Ecke,
/// Bildkoordinaten ("offscreen") Pixel im Originalbild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    /// Vergrößerung (1.0 = 1 Bildpixel pro Bildschirmpixel)
    pub magnification: f64,
    /// Linke obere Ecke des sichtbaren Ausschnitts in Bildkoordinaten
    pub source_origin: IVec2,
    /// Bildbreite in Pixeln
    pub image_width: u32,
    /// Bildhöhe in Pixeln
    pub image_height: u32,
}

impl CanvasView {
    /// Minimale Vergrößerung.
    pub const MAGNIFICATION_MIN: f64 = 1.0 / 32.0;
    /// Maximale Vergrößerung.
    pub const MAGNIFICATION_MAX: f64 = 32.0;

    /// Erstellt eine ungezoomte Ansicht auf ein Bild.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            magnification: 1.0,
            source_origin: IVec2::ZERO,
            image_width,
            image_height,
        }
    }

    /// Bildschirm-X → Bild-X (abgeschnitten wie beim Host).
    pub fn offscreen_x(&self, sx: i32) -> i32 {
        self.source_origin.x + (sx as f64 / self.magnification) as i32
    }

    /// Bildschirm-Y → Bild-Y.
    pub fn offscreen_y(&self, sy: i32) -> i32 {
        self.source_origin.y + (sy as f64 / self.magnification) as i32
    }

    /// Bildschirmpunkt → ganzzahliger Bildpunkt.
    pub fn offscreen(&self, screen: IVec2) -> IVec2 {
        IVec2::new(self.offscreen_x(screen.x), self.offscreen_y(screen.y))
    }

    /// Kontinuierliche Umrechnung Bildschirm → Bild (ohne Abschneiden).
    pub fn offscreen_exact(&self, screen: DVec2) -> DVec2 {
        screen / self.magnification + self.source_origin.as_dvec2()
    }

    /// Bild-X → Bildschirm-X.
    pub fn screen_x(&self, ox: i32) -> i32 {
        ((ox - self.source_origin.x) as f64 * self.magnification) as i32
    }

    /// Bild-Y → Bildschirm-Y.
    pub fn screen_y(&self, oy: i32) -> i32 {
        ((oy - self.source_origin.y) as f64 * self.magnification) as i32
    }

    /// Bildpunkt → Bildschirmpunkt.
    pub fn screen(&self, image: IVec2) -> IVec2 {
        IVec2::new(self.screen_x(image.x), self.screen_y(image.y))
    }

    /// Letzter gültiger Bildpunkt (rechts unten).
    pub fn image_max(&self) -> IVec2 {
        IVec2::new(
            self.image_width.saturating_sub(1) as i32,
            self.image_height.saturating_sub(1) as i32,
        )
    }

    /// Verdoppelt die Vergrößerung, der Bildpunkt unter `screen` bleibt stehen.
    pub fn zoom_in(&mut self, screen: IVec2) {
        self.zoom_about(screen, 2.0);
    }

    /// Halbiert die Vergrößerung, der Bildpunkt unter `screen` bleibt stehen.
    pub fn zoom_out(&mut self, screen: IVec2) {
        self.zoom_about(screen, 0.5);
    }

    fn zoom_about(&mut self, screen: IVec2, factor: f64) {
        let anchor = self.offscreen(screen);
        self.magnification = (self.magnification * factor)
            .clamp(Self::MAGNIFICATION_MIN, Self::MAGNIFICATION_MAX);
        self.source_origin = IVec2::new(
            anchor.x - (screen.x as f64 / self.magnification) as i32,
            anchor.y - (screen.y as f64 / self.magnification) as i32,
        );
    }
}
