use anyhow::Context;
use clap::Parser;
use glam::Vec4;
use sbx::config::SandboxConfig;
use sbx::display::{DisplaySurface, HeadlessSurface, Platform};
use sbx::plock::{Plock, PlockTypeId, PlockTypes};
use sbx::world::{Dimension, PlockBox};

const CLEAR_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Room temperature for seeded plocks (Celsius)
const SEED_TEMPERATURE: f64 = 20.0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Box width in plocks
    #[arg(long)]
    width: Option<Dimension>,

    /// Box height in plocks
    #[arg(long)]
    height: Option<Dimension>,

    /// Resize the box to WIDTHxHEIGHT halfway through the run
    #[arg(long, value_parser = parse_dimensions)]
    resize: Option<(Dimension, Dimension)>,

    /// Frames to run before exiting (at least 1)
    #[arg(long)]
    frames: Option<u64>,
}

fn parse_dimensions(value: &str) -> Result<(Dimension, Dimension), String> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width = width.parse().map_err(|e| format!("bad width: {e}"))?;
    let height = height.parse().map_err(|e| format!("bad height: {e}"))?;
    Ok((width, height))
}

impl Args {
    fn apply(&self, config: &mut SandboxConfig) {
        if let Some(width) = self.width {
            config.world.width = width;
        }
        if let Some(height) = self.height {
            config.world.height = height;
        }
        if let Some((width, height)) = self.resize {
            config.world.resize_width = width;
            config.world.resize_height = height;
        }
        if let Some(frames) = self.frames {
            config.window.max_frames = frames;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = SandboxConfig::load()?;
    args.apply(&mut config);

    let plock_types =
        PlockTypes::from_colors(&config.plock_types).context("Failed to register plock types")?;

    log::info!("Starting SBX");

    let frame_budget = config.window.frame_budget()?;
    let platform = Platform::init();
    let mut surface = HeadlessSurface::with_max_frames(frame_budget);
    surface
        .init(
            &platform,
            &config.window.title,
            config.window.width,
            config.window.height,
        )
        .context("Failed to create window")?;

    let mut plock_box = PlockBox::with_limits(config.limits);
    if let Err(report) = plock_box.init(config.world.width, config.world.height) {
        // Unwind in reverse order; the process is exiting anyway
        let _ = plock_box.deinit();
        let _ = plock_box.destroy();
        let _ = surface.deinit();
        let _ = surface.destroy();
        return Err(report).context("Failed to create box");
    }

    let result = run(&mut surface, &mut plock_box, &plock_types, &config);

    if let Err(report) = plock_box.deinit() {
        log::warn!("Failed to deinitialize box: {}", report);
    }
    if let Err((_, report)) = plock_box.destroy() {
        log::warn!("Failed to destroy box: {}", report);
    }
    if let Err(report) = surface.deinit() {
        log::warn!("Failed to destroy window: {}", report);
    }
    let _ = surface.destroy();

    result
}

/// Main loop: poll the surface, read the box, present
fn run(
    surface: &mut HeadlessSurface,
    plock_box: &mut PlockBox,
    plock_types: &PlockTypes,
    config: &SandboxConfig,
) -> anyhow::Result<()> {
    seed(plock_box, plock_types)?;

    let resize = (config.world.resize_width, config.world.resize_height);
    let resize_at = config.window.max_frames / 2;
    let mut frame: u64 = 0;

    while !surface.should_close() {
        surface.clear(CLEAR_COLOR)?;

        if resize.0 != 0 && resize.1 != 0 && frame == resize_at {
            plock_box
                .set_size(resize.0, resize.1)
                .context("Failed to resize box")?;
            log::info!("Resized box to {}x{}", resize.0, resize.1);
        }

        let drawn = visible_plocks(plock_box, plock_types);
        log::trace!("Frame {}: {} plocks to draw", frame, drawn);

        surface.present()?;
        surface.poll_events();
        frame += 1;
    }

    let stats = plock_box.stats();
    log::info!(
        "Ran {} frames, box {}x{} with {} of {} plocks occupied",
        frame,
        stats.width,
        stats.height,
        stats.occupied,
        stats.plock_count
    );
    Ok(())
}

/// Fill the bottom row with the first type and a column with the others
fn seed(plock_box: &mut PlockBox, plock_types: &PlockTypes) -> anyhow::Result<()> {
    let (width, height) = plock_box.size()?;
    let ids: Vec<PlockTypeId> = plock_types.iter().map(|(id, _)| id).collect();
    let Some((&floor, rest)) = ids.split_first() else {
        return Ok(());
    };

    for x in 0..width {
        plock_box.place(x, height - 1, Plock::new(floor, SEED_TEMPERATURE))?;
    }
    for (y, &type_id) in (0..height.saturating_sub(1)).rev().zip(rest.iter().cycle()) {
        plock_box.place(width / 2, y, Plock::new(type_id, SEED_TEMPERATURE))?;
    }

    log::debug!("Seeded box with {} plocks", plock_box.stats().occupied);
    Ok(())
}

/// Count positions whose plock has a registered color
fn visible_plocks(plock_box: &PlockBox, plock_types: &PlockTypes) -> usize {
    let ids = plock_box.plock_ids();
    let (width, height) = ids.size();
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter_map(|(x, y)| plock_box.plock_at(x, y))
        .filter(|plock| plock_types.get(plock.type_id).is_some())
        .count()
}
