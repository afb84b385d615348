//! Schnittstelle zur Host-Anzeige und eine Headless-Implementierung.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use glam::IVec2;

use super::state::EditTool;
use crate::core::CanvasView;

/// Host-Anzeige, auf der eine Session zeichnet.
///
/// Alle Methoden dürfen von jedem Thread aufgerufen werden.
pub trait Surface: Send + Sync {
    /// Aktuelle Abbildung Bildschirm ↔ Bild.
    fn canvas(&self) -> CanvasView;

    /// Fordert einen Repaint an; der Host ruft danach `render_frame` auf.
    fn request_repaint(&self);

    /// Zeigt eine Statusmeldung an.
    fn show_status(&self, _message: &str) {}

    /// Lupe: Vergrößerung um den Zeiger ändern.
    fn zoom(&self, _screen: IVec2, _zoom_in: bool) {}

    /// Ersetzt die Host-Werkzeugleiste durch die Session-Palette.
    fn install_palette(&self, _tools: &[EditTool]) {}

    /// Stellt die Host-Werkzeugleiste wieder her.
    fn restore_host_tools(&self) {}
}

/// Anzeige ohne Fenster für Tests und den Demo-Lauf.
///
/// Zählt Repaints, sammelt Statusmeldungen und merkt sich, ob die Palette
/// gerade installiert ist.
#[derive(Debug)]
pub struct HeadlessSurface {
    canvas: Mutex<CanvasView>,
    repaints: AtomicUsize,
    messages: Mutex<Vec<String>>,
    palette: Mutex<Option<Vec<EditTool>>>,
}

impl HeadlessSurface {
    /// Ungezoomte Anzeige eines `width`×`height`-Bildes.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_canvas(CanvasView::new(width, height))
    }

    /// Anzeige mit vorgegebener Abbildung.
    pub fn with_canvas(canvas: CanvasView) -> Self {
        Self {
            canvas: Mutex::new(canvas),
            repaints: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
            palette: Mutex::new(None),
        }
    }

    /// Anzahl angeforderter Repaints.
    pub fn repaint_count(&self) -> usize {
        self.repaints.load(Ordering::SeqCst)
    }

    /// Alle bisher angezeigten Statusmeldungen.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Installierte Palette, `None` wenn die Host-Werkzeuge aktiv sind.
    pub fn installed_palette(&self) -> Option<Vec<EditTool>> {
        match self.palette.lock() {
            Ok(palette) => palette.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update_canvas(&self, f: impl FnOnce(&mut CanvasView)) {
        match self.canvas.lock() {
            Ok(mut canvas) => f(&mut canvas),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Surface for HeadlessSurface {
    fn canvas(&self) -> CanvasView {
        match self.canvas.lock() {
            Ok(canvas) => *canvas,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn request_repaint(&self) {
        self.repaints.fetch_add(1, Ordering::SeqCst);
    }

    fn show_status(&self, message: &str) {
        log::debug!("Status: {}", message);
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }

    fn zoom(&self, screen: IVec2, zoom_in: bool) {
        self.update_canvas(|canvas| {
            if zoom_in {
                canvas.zoom_in(screen);
            } else {
                canvas.zoom_out(screen);
            }
        });
    }

    fn install_palette(&self, tools: &[EditTool]) {
        if let Ok(mut palette) = self.palette.lock() {
            *palette = Some(tools.to_vec());
        }
    }

    fn restore_host_tools(&self) {
        if let Ok(mut palette) = self.palette.lock() {
            *palette = None;
        }
    }
}
