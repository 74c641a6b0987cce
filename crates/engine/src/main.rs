//! Whereabouts - prints where every character is at a point in the week.
//!
//! Usage: `whereabouts [<day> <block>]`. Without arguments the current UTC
//! time is mapped onto the simulated week.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whereabouts_domain::{GameTime, TimeOfDay};
use whereabouts_engine::infrastructure::sources::read_sources_lenient;
use whereabouts_engine::{EngineConfig, JsonDefinitionParser, ScheduleManager};

fn main() -> Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "whereabouts_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env().context("Failed to load configuration")?;
    let time = requested_time()?;

    tracing::info!(
        schedule_dir = %config.schedule_dir.display(),
        extension = %config.schedule_extension,
        time = %time,
        "Resolving schedules"
    );

    let discovered = read_sources_lenient(&config.schedule_dir, &config.schedule_extension)
        .with_context(|| {
            format!(
                "Failed to read schedules from {}",
                config.schedule_dir.display()
            )
        })?;

    let mut manager = ScheduleManager::new(JsonDefinitionParser::new());
    if let Some(flags) = config.flag_conditions() {
        manager = manager.with_evaluator(flags);
    }

    let mut failures = discovered.failures;
    failures.extend(manager.load_all(&discovered.sources)?);
    for failure in &failures {
        tracing::warn!(error = %failure, "Schedule source skipped");
    }
    manager.finish_loading();

    println!("{}", time);
    for (character_id, location_id) in manager.snapshot(&time) {
        println!("  {:<24} {}", character_id.as_str(), location_id);
    }

    Ok(())
}

/// `<day> <block>` from the command line, or the current time.
fn requested_time() -> Result<TimeOfDay> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return Ok(GameTime::new(Utc::now()).time_of_day());
    }
    let raw = args.join(" ");
    raw.parse::<TimeOfDay>()
        .with_context(|| format!("Expected '<day> <block>', got '{}'", raw))
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
