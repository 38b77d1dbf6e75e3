use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use soulguide_core::{ArchetypeTable, GuidanceConfig, ProfileProvider, RhythmMode, SoulProfile};
use soulguide_engine::{GuidanceEngine, RngSource};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uuid::Uuid;

mod provider;

use provider::JsonFileProvider;

#[derive(Parser, Debug)]
#[command(author, version, about = "Synthesize one guidance record from a profile snapshot", long_about = None)]
struct Args {
    /// Profile snapshot (JSON file), or a directory of `<id>.json` files with --id
    #[arg(short, long)]
    profile: PathBuf,

    /// Profile id to load when --profile is a directory
    #[arg(long)]
    id: Option<Uuid>,

    /// Path to the engine config file
    #[arg(short, long, default_value = "soulguide.toml", env = "SOULGUIDE_CONFIG")]
    config: PathBuf,

    /// Seed for reproducible output; thread RNG when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Override the rhythm evaluator (placeholder | seasonal)
    #[arg(long)]
    rhythm: Option<RhythmMode>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Pretty-print the guidance record
    #[arg(long)]
    pretty: bool,
}

fn init_tracing(args: &Args) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "soulguide_cli={lvl},soulguide_engine={lvl},soulguide_core={lvl}",
            lvl = args.log_level
        )
        .into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn load_profile(args: &Args) -> anyhow::Result<SoulProfile> {
    if args.profile.is_dir() {
        let id = args
            .id
            .context("--id is required when --profile is a directory")?;
        JsonFileProvider::new(&args.profile).load_profile(id).await
    } else {
        JsonFileProvider::read_file(&args.profile).await
    }
}

/// A missing config file means defaults; anything else wrong with it is fatal.
async fn load_config(args: &Args) -> anyhow::Result<GuidanceConfig> {
    let path = &args.config;
    let mut config = match fs::read_to_string(path).await {
        Ok(content) => GuidanceConfig::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Config file {} not found, using defaults", path.display());
            GuidanceConfig::default()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file: {}", path.display()))
        }
    };
    config.apply_env_overrides();
    if let Some(mode) = args.rhythm {
        config.rhythm.mode = mode;
    }
    Ok(config)
}

async fn load_table(config: &GuidanceConfig) -> anyhow::Result<ArchetypeTable> {
    let Some(path) = &config.archetype_table else {
        return Ok(ArchetypeTable::builtin());
    };
    info!("Loading archetype table from {}...", path.display());
    let source = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read archetype table: {}", path.display()))?;
    ArchetypeTable::from_toml(&source)
        .with_context(|| format!("Invalid archetype table: {}", path.display()))
}

async fn run(args: Args) -> anyhow::Result<()> {
    info!("Loading profile from {}...", args.profile.display());
    let (profile, config) = tokio::join!(load_profile(&args), load_config(&args));
    let (profile, config) = (profile?, config?);

    let table = load_table(&config).await?;
    let engine = GuidanceEngine::with_table(config, table)?;
    let now = args.now.unwrap_or_else(Utc::now);

    let guidance = match args.seed {
        Some(seed) => engine.synthesize(&profile, now, &mut RngSource::seeded(seed)),
        None => engine.synthesize(&profile, now, &mut RngSource::thread()),
    }
    .with_context(|| format!("Guidance synthesis failed for profile {}", profile.id))?;

    info!(
        "Guidance {} for {}: {:?}/{:?}, expires {}",
        guidance.id, profile.id, guidance.guidance_type, guidance.urgency, guidance.expires_at
    );

    let out = if args.pretty {
        serde_json::to_string_pretty(&guidance)?
    } else {
        serde_json::to_string(&guidance)?
    };
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
