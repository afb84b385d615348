//! Session-gebundene Werkzeugpalette.

use super::state::EditTool;
use super::surface::Surface;

/// Hält die Session-Palette auf der Host-Anzeige installiert.
///
/// Beim Drop werden die Host-Werkzeuge wiederhergestellt, auch wenn die
/// Session über einen Fehlerpfad endet.
pub struct ScopedPalette<'a> {
    surface: &'a dyn Surface,
}

impl<'a> ScopedPalette<'a> {
    /// Installiert die Palette und gibt sie beim Drop zurück.
    pub fn acquire(surface: &'a dyn Surface) -> Self {
        surface.install_palette(&EditTool::PALETTE);
        Self { surface }
    }
}

impl Drop for ScopedPalette<'_> {
    fn drop(&mut self) {
        self.surface.restore_host_tools();
        log::debug!("Host-Werkzeuge wiederhergestellt");
    }
}
