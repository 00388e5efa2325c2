mod app;
mod config;
mod error;
mod logging;
mod tree;
mod util;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::error;

use config::{
    Config, DEFAULT_GRAVITY, DEFAULT_REPULSION, DEFAULT_SEED, DEFAULT_SPREAD, DumpFormat,
    LayoutConfig, WINDOW_SIZE, default_root_path,
};
use error::ConfigError;
use logging::LoggingConfig;
use tree::{FsSource, Placement, RadiusBounds, dump_json, dump_text, load_tree};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed for the initial node placement
    seed: Option<String>,

    /// Directory to scan [default: ~/Documents/Progetti]
    root_path: Option<PathBuf>,

    #[arg(hide = true)]
    extra: Vec<String>,

    /// Print the scanned tree and exit instead of opening a window
    #[arg(long, value_enum)]
    dump: Option<DumpFormat>,

    /// Pull of every node towards the origin, per unit of distance
    #[arg(long, default_value_t = DEFAULT_GRAVITY)]
    gravity: f32,

    /// Push exchanged by every pair of nodes
    #[arg(long, default_value_t = DEFAULT_REPULSION)]
    repulsion: f32,

    /// Half-width of the initial placement square, in window sizes
    #[arg(long, default_value_t = DEFAULT_SPREAD)]
    spread: f32,

    /// Radius of the smallest entry, in world units
    #[arg(long, default_value_t = RadiusBounds::default().min)]
    min_radius: f32,

    /// Radius of the largest entry, in world units
    #[arg(long, default_value_t = RadiusBounds::default().max)]
    max_radius: f32,

    /// Log filter, overridden by GRAPH_VIEW_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            color: !self.no_color,
        }
    }

    fn into_config(self) -> Result<Config> {
        let layout = LayoutConfig {
            gravity: self.gravity,
            repulsion: self.repulsion,
            spread: self.spread,
            window_size: WINDOW_SIZE,
            radius: RadiusBounds {
                min: self.min_radius,
                max: self.max_radius,
            },
        }
        .validate()?;

        let seed = match self.seed {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw))?,
            None => DEFAULT_SEED,
        };

        let root_path = match self.root_path {
            Some(path) => path,
            None => default_root_path()?,
        };

        Ok(Config {
            seed,
            root_path,
            layout,
            dump: self.dump,
        })
    }
}

fn usage_text() -> String {
    let program = env!("CARGO_PKG_NAME");
    format!(
        "Syntax error, correct usage:\n{program}\n{program} <seed>\n{program} <seed> <rootPath>\n"
    )
}

fn dump(config: &Config, format: DumpFormat) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut placement = Placement::new(&mut rng, config.layout.spread, config.layout.window_size);
    let tree = load_tree(
        &FsSource,
        &config.root_path,
        &mut placement,
        config.layout.radius,
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        DumpFormat::Text => dump_text(&tree, &mut out),
        DumpFormat::Json => dump_json(&tree, &mut out),
    };
    written
        .and_then(|()| out.flush())
        .context("failed to write the tree dump")
}

fn open_window(config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Graph View")
            .with_inner_size([WINDOW_SIZE, WINDOW_SIZE]),
        ..Default::default()
    };

    eframe::run_native(
        "Graph View",
        options,
        Box::new(move |cc| Ok(Box::new(app::GraphViewApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("failed to run the graph window: {error}"))
}

fn run(args: Args) -> Result<()> {
    let config = args.into_config()?;
    match config.dump {
        Some(format) => dump(&config, format),
        None => open_window(config),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if !args.extra.is_empty() {
        print!("{}", usage_text());
        return ExitCode::FAILURE;
    }

    if let Err(error) = logging::init_logging(&args.logging()) {
        eprintln!("error: {error:#}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
