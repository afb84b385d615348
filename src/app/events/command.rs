use glam::IVec2;

use super::super::state::EditTool;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Werkzeug wechseln, optional Griff-Rahmen neu aufbauen
    SetTool { tool: EditTool, reset_hull: bool },
    /// Nur Statusmeldung anzeigen
    ShowStatus { message: &'static str },
    /// Nächsten Griff zum Zeiger wählen
    SelectNearestNode { screen: IVec2 },
    /// Gewählten Griff auf den Zeiger setzen
    MoveSelectedNode { screen: IVec2 },
    /// Gewählten Griff per Pfeiltaste verschieben
    NudgeSelectedNode { direction: IVec2 },
    /// Translation beginnen (Zeiger im Vergrößerungsraster)
    BeginTranslate { grid: IVec2 },
    /// Alle freien Punkte zur neuen Rasterposition mitziehen
    TranslateTo { grid: IVec2 },
    /// Nächste Rahmenkante greifen
    GrabHullHandle { screen: IVec2 },
    /// Einachsig an der gegenüberliegenden Kante strecken
    StretchTo { screen: IVec2 },
    /// Gleichmäßig um das Rahmenzentrum skalieren
    ResizeTo { screen: IVec2 },
    /// Startwinkel der Rotation festhalten
    BeginRotate { screen: IVec2 },
    /// Um den Winkelzuwachs rotieren
    RotateTo { screen: IVec2 },
    /// Zieh-Geste beenden
    EndDrag,
    /// Lupe: Host-Zoom ändern
    Zoom { screen: IVec2, zoom_in: bool },
    /// Optimierer starten
    StartOptimizing,
    /// Optimierer stoppen und Ergebnis übernehmen
    StopOptimizing,
    /// Session übernehmen
    Accept,
    /// Session abbrechen (stoppt vorher einen laufenden Optimierer)
    Cancel,
}
