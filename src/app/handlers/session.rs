//! Handler für die Terminierung einer Session.

use crate::app::session::SessionInner;
use crate::app::state::{SessionPhase, STATUS_OPTIMIZATION_INTERRUPTED};

use super::optimization;

/// Übernimmt die Arbeitskopie; während der Optimierung ohne Wirkung.
pub fn accept(inner: &mut SessionInner) {
    if inner.state.is_optimizing() {
        log::warn!("Übernehmen während der Optimierung ignoriert");
        return;
    }
    terminate(inner);
}

/// Bricht die Session ab; ein laufender Optimierer wird vorher gestoppt.
pub fn cancel(inner: &mut SessionInner) {
    inner.state.canceled_by_user = true;
    if inner.state.is_optimizing() {
        optimization::stop(inner);
        inner.show_status(STATUS_OPTIMIZATION_INTERRUPTED);
    }
    terminate(inner);
}

fn terminate(inner: &mut SessionInner) {
    if inner.state.phase == SessionPhase::Terminated {
        return;
    }
    inner.state.phase = SessionPhase::Terminated;
    log::info!("Session terminiert (abgebrochen: {})", inner.state.canceled_by_user);
}
