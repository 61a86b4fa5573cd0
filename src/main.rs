use clap::Parser;
use game_core::{GameConfig, Outcome, RunOptions};

const CONFIG_PATH: &str = "hookline.json";

/// Runs a scripted fishing session and reports what was caught.
#[derive(Parser, Debug)]
#[command(name = "hookline", version)]
struct Cli {
    /// JSON configuration file. Missing files fall back to defaults.
    #[arg(long, default_value = CONFIG_PATH)]
    config: String,
    /// Print debug logs.
    #[arg(short, long)]
    verbose: bool,
    /// Simulation step in seconds.
    #[arg(long, default_value_t = 0.1)]
    dt: f32,
    /// Steps between reel taps while fighting a fish.
    #[arg(long, default_value_t = 5)]
    tap_every: u32,
    #[arg(long, default_value_t = 10_000)]
    max_steps: u64,
}

fn main() {
    let cli = Cli::parse();
    hookline::logging::init(cli.verbose);

    let config = match GameConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("failed to load {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };
    let options = RunOptions {
        dt: cli.dt,
        tap_every: cli.tap_every,
        max_steps: cli.max_steps,
    };
    match game_core::run(&config, options) {
        Ok(summary) => {
            for resolved in &summary.resolutions {
                let what = match resolved.outcome {
                    Outcome::Caught { points } => format!("caught (+{})", points),
                    Outcome::Escaped => "escaped".to_string(),
                    Outcome::LineSnapped => "line snapped".to_string(),
                    Outcome::Abandoned => "abandoned".to_string(),
                };
                println!("target {}: {}", resolved.target.0, what);
            }
            println!("Final score: {} in {} steps", summary.score, summary.steps);
        }
        Err(e) => {
            eprintln!("Game error: {}", e);
            std::process::exit(1);
        }
    }
}
