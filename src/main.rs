use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use gif_player::cli::Cli;
use gif_player::config::PlayerConfig;
use gif_player::core::{Clock, ManualClock, MonotonicClock, PixelCanvas, PlaybackEngine, TimerQueue};
use gif_player::{build_frame_set, FrameSet, GifSource, LoopCount, TickOutcome};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    }
    .merge_cli(&cli);

    let source = GifSource::open(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    let mut frames = build_frame_set(&source, config.decode)
        .with_context(|| format!("failed to decode {}", cli.path.display()))?;

    if let Some(raw) = config.loops {
        frames = frames.with_loop_count(LoopCount::from_raw(raw));
    }

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&frames.summary())?);
        return Ok(());
    }

    if let Some(dir) = &config.export_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    if config.simulate {
        play(frames, ManualClock::new(), &config)
    } else {
        play(frames, MonotonicClock::new(), &config)
    }
}

fn play<C: Clock>(frames: FrameSet, clock: C, config: &PlayerConfig) -> Result<()> {
    if frames.loop_count() == LoopCount::Infinite && config.max_ticks.is_none() {
        log::warn!("infinite animation without --max-ticks, playing until interrupted");
    }

    let mut engine = PlaybackEngine::new(frames, PixelCanvas::default(), TimerQueue::new(clock))?;
    engine.start();

    let mut ticks = 0u64;
    while config.max_ticks.map_or(true, |max| ticks < max) {
        let Some(outcome) = engine.step()? else {
            break;
        };
        ticks += 1;

        if let (TickOutcome::Drew(index), Some(dir)) = (outcome, &config.export_dir) {
            let stats = engine.stats();
            export_frame(engine.surface(), dir, stats.frames_drawn, index)?;
        }
    }
    engine.stop();

    let stats = engine.stats();
    println!(
        "drew {} frames, skipped {}, completed {} loops",
        stats.frames_drawn,
        stats.frames_skipped,
        engine.loops_completed()
    );
    Ok(())
}

fn export_frame(canvas: &PixelCanvas, dir: &Path, sequence: u64, index: usize) -> Result<()> {
    let path: PathBuf = dir.join(format!("{sequence:05}_frame{index:03}.png"));
    canvas
        .to_image()
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!("exported {}", path.display());
    Ok(())
}
