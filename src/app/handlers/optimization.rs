//! Handler für Start, Stopp und Fortschritt des Hintergrund-Optimierers.

use anyhow::Context;

use crate::app::session::{OptimizerRun, SessionInner};
use crate::app::state::{EditTool, SessionPhase, SessionState};
use crate::core::ControlNode;
use crate::optimizer::{ProbeEvent, ProgressSink};

/// Startet den angehängten Optimierer auf einem eigenen Thread.
///
/// Ohne Optimierer (Single-Shot) oder bei bereits laufender Optimierung
/// geschieht nichts.
pub fn start(inner: &mut SessionInner) -> anyhow::Result<()> {
    if inner.state.is_optimizing() || inner.state.single_shot {
        return Ok(());
    }
    let Some(snake) = inner.snake.clone() else {
        return Ok(());
    };
    let Some(mut optimizer) = inner.optimizer.take() else {
        log::warn!("Kein Optimierer angehängt");
        return Ok(());
    };

    inner.push_nodes_to_snake();
    let configuration = inner
        .editor
        .as_ref()
        .map(|editor| editor.nodes().to_vec())
        .unwrap_or_default();
    let stop = optimizer.stop_handle();
    stop.reset();
    let (sink, progress) = ProgressSink::channel();

    let spawned = std::thread::Builder::new()
        .name("snake-optimizer".into())
        .spawn(move || {
            optimizer.optimize(&snake, configuration, &sink);
            optimizer
        });
    let worker = match spawned {
        Ok(worker) => worker,
        Err(e) => {
            inner.state.single_shot = true;
            return Err(e).context("Optimierer-Thread konnte nicht gestartet werden");
        }
    };

    inner.run = Some(OptimizerRun {
        worker,
        progress,
        stop,
        best_nodes: None,
    });
    inner.state.phase = SessionPhase::Optimizing;
    inner.state.current_tool = EditTool::Start;
    inner.state.drag = Default::default();
    inner.state.probe_skin = None;
    inner.state.best_skin_so_far = None;
    inner.show_status(EditTool::Start.status_text());
    log::info!("Optimierer gestartet");
    Ok(())
}

/// Stoppt den laufenden Optimierer und übernimmt sein Ergebnis.
pub fn stop(inner: &mut SessionInner) {
    let Some(run) = inner.run.as_ref() else {
        return;
    };
    run.stop.stop_optimizing();
    log::info!("Optimierer-Stopp angefordert");
    finish(inner);
}

/// Holt Fortschrittsmeldungen ab; ein beendeter Worker wird übernommen.
pub fn drain_progress(inner: &mut SessionInner) {
    let Some(run) = inner.run.as_mut() else {
        return;
    };
    let mut received = false;
    while let Ok(event) = run.progress.try_recv() {
        received = true;
        apply_event(&mut inner.state, &mut run.best_nodes, event);
    }
    let finished = run.worker.is_finished();
    if received {
        inner.request_repaint();
    }
    if finished {
        finish(inner);
    }
}

fn apply_event(
    state: &mut SessionState,
    best_nodes: &mut Option<Vec<ControlNode>>,
    event: ProbeEvent,
) {
    if event.is_current_best() {
        state.best_skin_so_far = Some(event.skin);
        *best_nodes = Some(event.nodes);
    } else {
        state.probe_skin = Some(event.skin);
    }
}

/// Wartet auf den Worker, übernimmt Debriefing und Bestlösung und kehrt zum
/// Editieren zurück.
fn finish(inner: &mut SessionInner) {
    let Some(mut run) = inner.run.take() else {
        return;
    };
    let optimizer = match run.worker.join() {
        Ok(optimizer) => Some(optimizer),
        Err(_) => {
            log::error!("Optimierer-Thread ist abgestürzt, Session läuft ohne Optimierer weiter");
            None
        }
    };
    for event in run.progress.try_iter() {
        apply_event(&mut inner.state, &mut run.best_nodes, event);
    }

    match optimizer {
        Some(optimizer) => {
            inner.state.best_energy = optimizer.best_observed_energy();
            inner.state.snake_died |= optimizer.terminated_by_snake_death();
            inner.state.optimal_snake_found = optimizer.reached_optimum();
            inner.optimizer = Some(optimizer);
        }
        None => inner.state.single_shot = true,
    }

    if let (Some(nodes), Some(editor)) = (&run.best_nodes, inner.editor.as_mut()) {
        editor.replace_nodes(nodes);
    }
    inner.push_nodes_to_snake();
    if let (Some(editor), Some(surface)) = (inner.editor.as_mut(), &inner.surface) {
        editor.reset_hull(&surface.canvas());
    }

    if inner.state.phase == SessionPhase::Optimizing {
        inner.state.phase = SessionPhase::Editing;
    }
    inner.state.current_tool = EditTool::MoveCross;
    inner.state.probe_skin = None;
    inner.state.best_skin_so_far = None;
    inner.request_repaint();
    log::info!(
        "Optimierer beendet: Energie {:?}, Optimum {}, Modell tot {}",
        inner.state.best_energy,
        inner.state.optimal_snake_found,
        inner.state.snake_died
    );
}
