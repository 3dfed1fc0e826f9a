//! Magazine content portal CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Backend status and the available tools
//! portal home
//!
//! # Crossword themes offered by the backend
//! portal themes
//!
//! # Generate a 15x15 travel crossword and save crossword_travel.xml
//! portal crossword Travel --size 15 --word-count 10
//!
//! # Generate a weekly spread for every sign and save horoscope_export.xml
//! portal horoscope --magazine "Glow" --type weekly --tone warm
//!
//! # Only two signs, no export
//! portal horoscope --magazine "Glow" --sign aries --sign leo --no-export
//! ```

mod render;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_client::download::trigger_download;
use portal_client::runner::run_horoscopes;
use portal_client::{BatchExecutor, ClientConfig, PortalApi};
use portal_core::crossword::{self, CrosswordParams, CrosswordPuzzle, PREDEFINED_THEMES};
use portal_core::export::{build_crossword_export, build_horoscope_export};
use portal_core::horoscope::{self, HoroscopeParams, HoroscopeType, Tone, ZodiacSign};
use portal_core::lifecycle::{GenerationState, Phase};

/// Magazine content portal
#[derive(Parser)]
#[command(name = "portal")]
#[command(version)]
#[command(about = "Generate crosswords and horoscopes for print and export them as XML")]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend base URL (overrides PORTAL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Maximum concurrent horoscope requests (overrides PORTAL_CONCURRENCY)
    #[arg(long, global = true, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: Option<u16>,

    /// Directory exports are written to (overrides PORTAL_EXPORT_DIR)
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend status and the available tools
    Home,

    /// List crossword themes
    Themes,

    /// Generate a themed crossword puzzle
    Crossword {
        /// Puzzle theme, e.g. "Travel"
        theme: String,

        /// Grid side length
        #[arg(long, default_value_t = crossword::DEFAULT_SIZE)]
        size: usize,

        /// Number of words to place
        #[arg(long, default_value_t = crossword::DEFAULT_WORD_COUNT)]
        word_count: u32,

        /// Send use_ai=false with the request
        #[arg(long)]
        no_ai: bool,

        /// Print the puzzle without saving an export
        #[arg(long)]
        no_export: bool,
    },

    /// Generate a horoscope spread
    Horoscope {
        /// Publication name
        #[arg(long)]
        magazine: String,

        /// daily, weekly, monthly, love-romance or career-finance
        #[arg(long = "type", default_value = "daily")]
        horoscope_type: HoroscopeType,

        /// mystical, practical, warm or witty
        #[arg(long, default_value = "mystical")]
        tone: Tone,

        /// Target length of each forecast
        #[arg(long, default_value_t = horoscope::DEFAULT_WORD_COUNT)]
        word_count: u32,

        /// Generate only this sign (repeatable; default is all twelve)
        #[arg(long = "sign")]
        signs: Vec<ZodiacSign>,

        /// Print the spread without saving an export
        #[arg(long)]
        no_export: bool,
    },
}

fn setup_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "portal=info,portal_client=info,portal_core=info",
        1 => "portal=debug,portal_client=debug,portal_core=debug",
        _ => "portal=trace,portal_client=trace,portal_core=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid portal configuration")?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = usize::from(concurrency);
    }
    if let Some(dir) = &cli.out_dir {
        config.export_dir = dir.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = load_config(&cli)?;
    tracing::debug!(
        api_url = %config.api_url,
        concurrency = config.concurrency,
        export_dir = %config.export_dir.display(),
        "Loaded portal configuration",
    );
    let api = PortalApi::from_config(&config)?;

    match cli.command {
        Commands::Home => show_home(&api).await,
        Commands::Themes => list_themes(&api).await,
        Commands::Crossword {
            theme,
            size,
            word_count,
            no_ai,
            no_export,
        } => {
            let mut params = CrosswordParams::new(theme)
                .with_size(size)
                .with_word_count(word_count);
            params.use_ai = !no_ai;
            crossword_page(&api, &config, params, !no_export).await
        }
        Commands::Horoscope {
            magazine,
            horoscope_type,
            tone,
            word_count,
            signs,
            no_export,
        } => {
            let params =
                HoroscopeParams::new(magazine, horoscope_type, tone).with_word_count(word_count);
            let signs = if signs.is_empty() {
                ZodiacSign::ALL.to_vec()
            } else {
                signs
            };
            horoscope_page(&api, &config, params, &signs, !no_export).await
        }
    }
}

async fn show_home(api: &PortalApi) -> Result<()> {
    println!("Magazine Portal");
    println!();
    println!("Backend: {}", api.api_url());

    match api.health().await {
        Ok(health) => println!("  Status: {}", health.status),
        Err(e) => println!("  Status: unreachable ({e})"),
    }
    if let Ok(version) = api.version().await {
        println!("  Version: {} {}", version.app, version.version);
        if let Some(ai) = version.azure {
            let state = if ai.endpoint_configured {
                "configured"
            } else {
                "not configured"
            };
            println!("  AI: {} ({state})", ai.deployment);
        }
    }

    println!();
    print!("{}", render::launcher());
    Ok(())
}

async fn list_themes(api: &PortalApi) -> Result<()> {
    let themes = match api.themes().await {
        Ok(themes) => themes,
        Err(e) => {
            tracing::warn!(error = %e, "Theme list unavailable, using built-in themes");
            PREDEFINED_THEMES.iter().map(|t| t.to_string()).collect()
        }
    };
    for theme in themes {
        println!("{theme}");
    }
    Ok(())
}

async fn crossword_page(
    api: &PortalApi,
    config: &ClientConfig,
    params: CrosswordParams,
    export: bool,
) -> Result<()> {
    let mut page: GenerationState<CrosswordPuzzle> = GenerationState::new();

    let ticket = page.begin_request()?;
    let outcome = api
        .generate_crossword(&params)
        .await
        .map_err(|e| e.to_string());
    page.finish(ticket, outcome);

    if page.phase() == Phase::Failed {
        let message = page.error().unwrap_or("unknown error");
        bail!("Crossword generation failed: {message}");
    }
    let Some(puzzle) = page.content() else {
        bail!("Crossword generation produced no puzzle");
    };
    print!("{}", render::puzzle(puzzle));

    if export {
        let doc = page.export(build_crossword_export)?;
        if let Some(path) = trigger_download(&config.export_dir, &doc).await {
            println!();
            println!("Exported {}", path.display());
        }
    }
    Ok(())
}

async fn horoscope_page(
    api: &PortalApi,
    config: &ClientConfig,
    params: HoroscopeParams,
    signs: &[ZodiacSign],
    export: bool,
) -> Result<()> {
    let cancel = CancellationToken::new();
    let executor = BatchExecutor::new(config.concurrency).with_cancellation(cancel.clone());

    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling outstanding horoscopes");
            cancel.cancel();
        }
    });

    let run = run_horoscopes(api, params, signs, &executor).await;
    watcher.abort();
    let run = run?;

    print!("{}", render::spread(&run));

    if export {
        let doc = build_horoscope_export(&run, chrono::Utc::now());
        if let Some(path) = trigger_download(&config.export_dir, &doc).await {
            println!();
            println!(
                "Exported {} of {} signs to {}",
                run.board.exportable().count(),
                signs.len(),
                path.display()
            );
        }
    }
    Ok(())
}
