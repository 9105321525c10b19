//! Platform Battle entry point
//!
//! Runs the configured game headless: a simulated display clock feeds the
//! fixed timestep, the autopilot presses the keys and every frame is
//! recorded into a draw list.

use std::process::ExitCode;

use platform_battle::renderer::{Assets, DrawList, RenderBackend, TextureCache, render_game};
use platform_battle::sim::{FixedTimestep, Game, TickInput, autopilot, tick};
use platform_battle::{Settings, SettingsError};

fn run(settings: &Settings) {
    let mut game = Game::new(settings.scene, settings.seed, settings.contact_policy);
    let mut clock =
        FixedTimestep::new(settings.fixed_timestep).with_max_substeps(settings.max_substeps);

    let mut backend = DrawList::new(TextureCache::new(&settings.asset_dir));
    let assets = Assets::load(&mut backend, &game);
    if backend.textures.failures() > 0 {
        log::warn!(
            "{} textures missing under {}",
            backend.textures.failures(),
            settings.asset_dir.display()
        );
    }

    let frame_dt = settings.frame_dt();
    let frames = (settings.run_seconds.max(0.0) * settings.frame_rate.max(1.0)) as u64;
    let mut steps_total: u64 = 0;

    log::info!("{} running for {} frames", settings.scene.title(), frames);

    for frame in 0..frames {
        let mut input = if settings.autopilot {
            autopilot::drive(&game)
        } else {
            TickInput::default()
        };
        if input.quit {
            break;
        }

        let steps = clock.advance(frame_dt, |dt| {
            tick(&mut game, &input, dt);
            // Jump, serve and begin fire on the first substep only
            input.clear_one_shots();
        });
        steps_total += steps as u64;

        render_game(&mut backend, &game, &assets);
        backend.swap_buffers();

        if game.status().is_over() {
            log::info!("Game over after {} frames", frame + 1);
            break;
        }
    }

    let stats = backend.last_frame();
    log::info!(
        "Finished: status {:?}, {} steps, {} frames, last frame {} quads in {} batches",
        game.status(),
        steps_total,
        backend.frames(),
        stats.quads,
        stats.batches
    );
}

fn load_settings() -> Result<Settings, SettingsError> {
    let path = Settings::default_path();
    let mut settings = Settings::load_or_default(&path)?;

    // First CLI argument overrides the scene
    if let Some(arg) = std::env::args().nth(1) {
        match platform_battle::SceneKind::from_str(&arg) {
            Some(scene) => settings.scene = scene,
            None => log::warn!("Unknown scene '{}', keeping {}", arg, settings.scene.as_str()),
        }
    }
    Ok(settings)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Platform Battle (native) starting...");

    match load_settings() {
        Ok(settings) => {
            run(&settings);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
