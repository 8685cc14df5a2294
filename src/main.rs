use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use connect_four::ai::RngSource;
use connect_four::config::{AppConfig, FrontendKind, GameMode};
use connect_four::driver::SessionDriver;
use connect_four::error::GameError;
use connect_four::ui::{DisplaySink, InputSource, TextFrontend, TuiFrontend};

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    VsAi,
    TwoPlayer,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::VsAi => GameMode::VsAi,
            ModeArg::TwoPlayer => GameMode::TwoPlayer,
        }
    }
}

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Skip the game mode prompt
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for the computer player
    #[arg(long)]
    seed: Option<u64>,

    /// Use the full-screen terminal UI
    #[arg(long)]
    tui: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.dump_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(mode) = cli.mode {
        config.game.mode = Some(mode.into());
    }
    if cli.seed.is_some() {
        config.ai.seed = cli.seed;
    }
    if cli.tui {
        config.display.frontend = FrontendKind::Tui;
    }

    let rng = RngSource::from_seed_option(config.ai.seed);
    match config.display.frontend {
        FrontendKind::Text => {
            let frontend = TextFrontend::new(io::stdin().lock(), io::stdout())
                .with_clear_screen(config.display.clear_screen);
            play(frontend, rng, config)
        }
        FrontendKind::Tui => {
            let frontend = TuiFrontend::enter().context("setting up the terminal")?;
            play(frontend, rng, config)
        }
    }
}

fn play<F>(frontend: F, rng: RngSource, config: AppConfig) -> Result<()>
where
    F: InputSource + DisplaySink,
{
    let mut driver = SessionDriver::new(frontend, rng, config);
    let result = driver.run();
    // Leave the alternate screen before printing the summary
    drop(driver);

    match result {
        Ok(score) => {
            println!("{score}");
            println!("Thanks for playing!");
            Ok(())
        }
        Err(GameError::InputClosed) => {
            println!("Input closed, goodbye.");
            Ok(())
        }
        Err(err) => Err(err).context("game aborted"),
    }
}
