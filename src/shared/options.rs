//! Zentrale Konfiguration für den Interactive Snake Editor.
//!
//! `SnakeOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::app::RenderStyle;
use crate::core::h_model::{DEFAULT_ARROW_LENGTH, DEFAULT_ARROW_WIDTH, DEFAULT_TANGENT_WEIGHT};
use crate::core::{Color, ModelKind, TangentStyle, COLOR_BLACK, COLOR_RED};
use crate::optimizer::pattern_search::PatternSearchSettings;

// ── Modell ──────────────────────────────────────────────────────────

/// Standard-Knotenanzahl neuer Modelle.
pub const DEFAULT_NODE_COUNT: usize = 5;

// ── Darstellung ─────────────────────────────────────────────────────

/// Halbe Kantenlänge der Knotenkreuze in Bildschirmpixeln.
pub const CROSS_HALF_SIZE: i32 = 5;

/// Dateiname der Optionen neben der Binary.
pub const CONFIG_FILE_NAME: &str = "interactive_snake_editor.toml";

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `interactive_snake_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeOptions {
    // ── Modell ──────────────────────────────────────────────────────
    /// Basisfamilie neuer Modelle
    pub model_kind: ModelKind,
    /// Knotenanzahl neuer Modelle
    pub node_count: usize,
    /// Tangentenspitze = Position + Gewicht·Tangente
    pub tangent_weight: f64,
    /// Halbe Breite der Tangenten-Pfeilspitze
    pub arrow_width: f64,
    /// Länge der Tangenten-Pfeilspitze
    pub arrow_length: f64,

    // ── Darstellung ─────────────────────────────────────────────────
    /// Halbe Kantenlänge der Knotenkreuze
    pub cross_half_size: i32,
    /// Farbe der Knotenkreuze (RGBA)
    pub cross_color: Color,
    /// Farbe des Griff-Rahmens (RGBA)
    pub hull_color: Color,

    // ── Optimierer ──────────────────────────────────────────────────
    /// Einstellungen des Referenz-Optimierers
    #[serde(default)]
    pub optimizer: PatternSearchSettings,
}

impl Default for SnakeOptions {
    fn default() -> Self {
        Self {
            model_kind: ModelKind::default(),
            node_count: DEFAULT_NODE_COUNT,
            tangent_weight: DEFAULT_TANGENT_WEIGHT,
            arrow_width: DEFAULT_ARROW_WIDTH,
            arrow_length: DEFAULT_ARROW_LENGTH,
            cross_half_size: CROSS_HALF_SIZE,
            cross_color: COLOR_RED,
            hull_color: COLOR_BLACK,
            optimizer: PatternSearchSettings::default(),
        }
    }
}

impl SnakeOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad zur Optionen-Datei (neben der Binary).
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("interactive_snake_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Tangentendarstellung für das H-Modell.
    pub fn tangent_style(&self) -> TangentStyle {
        TangentStyle {
            weight: self.tangent_weight,
            arrow_width: self.arrow_width,
            arrow_length: self.arrow_length,
        }
    }

    /// Darstellung der Session-Overlays.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            cross_half_size: self.cross_half_size,
            cross_color: self.cross_color,
            hull_color: self.hull_color,
        }
    }
}
