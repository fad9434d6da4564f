mod config;
mod panel;
mod render;

use std::path::PathBuf;

use clap::Parser;

use crate::config::PanelConfig;
use crate::panel::{sweep_strength, RadioPanel};

#[derive(Parser, Debug)]
#[command(
    name = "siglost-console",
    about = "Headless radio panel: Morse keying, fading trail and static meter"
)]
struct Args {
    /// Message to key.
    message: String,

    /// JSON settings file. Flags below take precedence over it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Morse unit in seconds.
    #[arg(long)]
    unit: Option<f32>,

    /// Constant signal strength between 0 and 1.
    #[arg(long, default_value_t = 0.8)]
    strength: f32,

    /// Sweep strength up and down over this many seconds instead.
    #[arg(long)]
    sweep: Option<f32>,

    /// Frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    #[arg(long)]
    fps: Option<f32>,

    /// Number of meter bars.
    #[arg(long)]
    bars: Option<usize>,

    /// Print one line every this many frames.
    #[arg(long, default_value_t = 6)]
    print_every: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    if let Some(unit) = args.unit {
        config.unit = unit;
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(bars) = args.bars {
        config.bars = bars;
    }

    let delta = config.frame_delta()?;
    let mut panel = RadioPanel::new(&config, &args.message)?;
    log::info!(
        "keying {:?} as {} at {} s/unit, {} frames at {} fps",
        args.message,
        siglost_morse::morse_string(&args.message),
        config.unit,
        args.frames,
        config.fps
    );

    let print_every = args.print_every.max(1);
    let mut keyed = 0usize;
    for frame in 0..args.frames {
        let strength = match args.sweep {
            Some(period) => sweep_strength(panel.time(), period),
            None => args.strength,
        };
        keyed += panel.frame(delta, strength);
        if frame % print_every == 0 {
            println!("{}", render::render_line(&panel));
        }
    }

    log::info!(
        "done after {:.2}s: {} marks keyed, {} still in the trail",
        panel.time(),
        keyed,
        panel.display().history().len()
    );
    Ok(())
}
