//! Interactive Snake Editor: Headless-Demo.
//!
//! Erstellt ein Modell aus den Optionen, startet eine Session auf einer
//! Headless-Anzeige, spielt ein kurzes Eingabeskript ab und gibt das Ergebnis
//! als XML auf stdout aus.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use glam::IVec2;
use interactive_snake_editor::{
    share, CurveModel, EditTool, HeadlessSurface, InteractionSession, Modifiers,
    PatternSearchOptimizer, SessionHandle, SessionIntent, SessionPhase, SharedSnake,
    SnakeOptions, SnakeRecord, Surface,
};

/// Bildgröße der Demo-Anzeige.
const DEMO_IMAGE_SIZE: u32 = 512;
/// Maximale Wartezeit auf einen Phasenwechsel.
const PHASE_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Interactive Snake Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let options = SnakeOptions::load_from_file(&SnakeOptions::config_path());
    DemoRunner::run(&options)
}

struct DemoRunner;

impl DemoRunner {
    fn run(options: &SnakeOptions) -> anyhow::Result<()> {
        let model = CurveModel::new(
            options.model_kind,
            options.node_count,
            DEMO_IMAGE_SIZE,
            DEMO_IMAGE_SIZE,
            None,
            options.tangent_style(),
        )
        .context("Modell konnte nicht erstellt werden")?;
        let snake: SharedSnake = share(model);

        let session = Arc::new(InteractionSession::new(options.render_style()));
        session.attach_optimizer(Box::new(PatternSearchOptimizer::new(options.optimizer)));
        let handle = session.handle();
        let surface = Arc::new(HeadlessSurface::new(DEMO_IMAGE_SIZE, DEMO_IMAGE_SIZE));

        let interaction = {
            let session = Arc::clone(&session);
            let snake = Arc::clone(&snake);
            let surface: Arc<dyn Surface> = surface.clone();
            std::thread::Builder::new()
                .name("snake-session".into())
                .spawn(move || session.interact(&snake, surface))
                .context("Session-Thread konnte nicht gestartet werden")?
        };

        Self::play_script(&handle)?;

        let status = interaction
            .join()
            .map_err(|_| anyhow!("Session-Thread ist abgestürzt"))?;
        log::info!(
            "Ergebnis: abgebrochen={}, optimal={}, Energie={:?}, {} Repaints",
            status.canceled_by_user,
            status.optimal_snake_found,
            status.best_energy,
            surface.repaint_count()
        );

        let record = {
            let model = snake
                .lock()
                .map_err(|_| anyhow!("Modell-Lock vergiftet"))?;
            SnakeRecord::from_snake("demo", &*model)
        };
        print!("{}", interactive_snake_editor::write_snake_record(&record)?);
        Ok(())
    }

    /// Rotiert die Startkontur, verschiebt sie, optimiert und übernimmt.
    fn play_script(handle: &SessionHandle) -> anyhow::Result<()> {
        if !handle.wait_for_phase(SessionPhase::Editing, PHASE_TIMEOUT) {
            return Err(anyhow!("Session wurde nicht gestartet"));
        }

        handle.dispatch(SessionIntent::ToolClicked {
            tool: EditTool::Rotate,
        })?;
        handle.dispatch(SessionIntent::PointerPressed {
            screen: IVec2::new(400, 256),
            modifiers: Modifiers::default(),
        })?;
        handle.dispatch(SessionIntent::PointerDragged {
            screen: IVec2::new(256, 400),
            modifiers: Modifiers::default(),
        })?;
        handle.dispatch(SessionIntent::PointerReleased)?;

        handle.dispatch(SessionIntent::ToolClicked {
            tool: EditTool::MoveCross,
        })?;
        handle.dispatch(SessionIntent::PointerPressed {
            screen: IVec2::new(256, 256),
            modifiers: Modifiers::SHIFT,
        })?;
        handle.dispatch(SessionIntent::PointerDragged {
            screen: IVec2::new(276, 246),
            modifiers: Modifiers::SHIFT,
        })?;
        handle.dispatch(SessionIntent::PointerReleased)?;

        handle.dispatch(SessionIntent::ToolClicked {
            tool: EditTool::Start,
        })?;
        if !handle.wait_for_phase(SessionPhase::Editing, PHASE_TIMEOUT) {
            log::warn!("Optimierer nicht rechtzeitig fertig, wird gestoppt");
            handle.dispatch(SessionIntent::ToolClicked {
                tool: EditTool::MoveCross,
            })?;
        }

        if let Some(frame) = handle.render_frame() {
            log::info!(
                "Letztes Bild: {} Skalen, {} Kreuze",
                frame.skin.len(),
                frame.crosses.len()
            );
        }
        handle.dispatch(SessionIntent::ToolClicked {
            tool: EditTool::Accept,
        })?;
        Ok(())
    }
}
