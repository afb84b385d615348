use glam::IVec2;

use super::super::state::EditTool;

/// Gedrückte Modifier-Tasten eines Zeigerereignisses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift: Translation statt Einzelpunkt, gleichmäßige statt einachsige Größenänderung
    pub shift: bool,
    /// Alt: Lupe zoomt heraus
    pub alt: bool,
    /// Strg: Lupe zoomt heraus
    pub ctrl: bool,
    /// Meta/Command: Lupe zoomt heraus
    pub meta: bool,
}

impl Modifiers {
    /// Nur Shift gedrückt.
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        alt: false,
        ctrl: false,
        meta: false,
    };

    /// `true`, wenn die Lupe herauszoomen soll.
    pub fn zooms_out(&self) -> bool {
        self.alt || self.ctrl || self.meta
    }
}

/// Pfeiltaste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl ArrowKey {
    /// Richtung in Bildkoordinaten (y wächst nach unten).
    pub fn direction(self) -> IVec2 {
        match self {
            ArrowKey::Up => IVec2::new(0, -1),
            ArrowKey::Down => IVec2::new(0, 1),
            ArrowKey::Left => IVec2::new(-1, 0),
            ArrowKey::Right => IVec2::new(1, 0),
        }
    }
}

/// Session-Intents: Eingaben des Hosts ohne direkte Mutationslogik.
/// Zeigerpositionen sind Bildschirmpixel relativ zur Canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    /// Maustaste gedrückt
    PointerPressed { screen: IVec2, modifiers: Modifiers },
    /// Maus mit gedrückter Taste bewegt
    PointerDragged { screen: IVec2, modifiers: Modifiers },
    /// Maustaste losgelassen
    PointerReleased,
    /// Pfeiltaste gedrückt
    KeyPressed { key: ArrowKey },
    /// Werkzeug in der Palette angeklickt
    ToolClicked { tool: EditTool },
}
