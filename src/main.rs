//! Ocean Resonance CLI
//!
//! Records resonance scores for one relationship and reports decay,
//! velocity and trend.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use ocean_resonance::{
    config::Config,
    core::{
        create_frozen_clock, create_shared_clock, validate_score, DecaySummary, HistorySummary,
        ResonanceSession, SessionReport,
    },
    state::SessionStore,
    CONSTANTS_NOTICE, VERSION,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ocean-resonance")]
#[command(version = VERSION)]
#[command(about = "Track resonance decay, velocity and trend over time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a measured resonance score
    Record {
        /// Score in [0, 1] from the upstream scorer
        #[arg(value_parser = parse_score)]
        score: f64,

        /// Optional session label
        #[arg(long, short)]
        label: Option<String>,

        /// Treat this RFC3339 instant as "now"
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,
    },

    /// Show decay and history state
    Status {
        /// Base score to decay (defaults to the latest recorded score)
        #[arg(long, value_parser = parse_score)]
        base: Option<f64>,

        /// Treat this RFC3339 instant as "now"
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded measurements
    History,

    /// Replay a sample session arc followed by a 48 hour gap
    Demo,

    /// Delete the stored session
    Reset,

    /// Show or update configuration
    Config {
        /// Set the decay rate (fractional loss per hour)
        #[arg(long)]
        decay_rate: Option<f64>,

        /// Set the display time zone (IANA name, e.g. Europe/Berlin)
        #[arg(long)]
        timezone: Option<String>,

        /// Set the default log filter
        #[arg(long)]
        log_level: Option<String>,
    },

    /// Explain the constants behind the scores
    About,
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Record { score, label, at } => cmd_record(&config, score, label, at),
        Commands::Status { base, at, json } => cmd_status(&config, base, at, json),
        Commands::History => cmd_history(&config),
        Commands::Demo => cmd_demo(),
        Commands::Reset => cmd_reset(&config),
        Commands::Config {
            decay_rate,
            timezone,
            log_level,
        } => cmd_config(config, decay_rate, timezone, log_level),
        Commands::About => {
            println!("{CONSTANTS_NOTICE}");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_session(
    config: &Config,
    at: Option<DateTime<Utc>>,
) -> anyhow::Result<(SessionStore, uuid::Uuid, ResonanceSession)> {
    let clock = create_shared_clock();
    clock.set_fixed(at);

    let store = SessionStore::new(config.session_path());
    let (id, session) = store
        .open(clock, config.decay_rate)
        .with_context(|| format!("could not open session at {:?}", store.path()))?;
    Ok((store, id, session))
}

fn cmd_record(
    config: &Config,
    score: f64,
    label: Option<String>,
    at: Option<DateTime<Utc>>,
) -> anyhow::Result<()> {
    let (store, id, mut session) = open_session(config, at)?;

    session.observe(score, label.unwrap_or_default());
    store
        .save(id, &session)
        .with_context(|| format!("could not save session to {:?}", store.path()))?;

    let history = session.history();
    println!(
        "Recorded {score:.2} ({} measurements)  velocity={:+.3}/h  trend: {}",
        history.len(),
        history.velocity(),
        history.trend()
    );
    Ok(())
}

fn cmd_status(
    config: &Config,
    base: Option<f64>,
    at: Option<DateTime<Utc>>,
    json: bool,
) -> anyhow::Result<()> {
    let (_, id, session) = open_session(config, at)?;
    let report = session.report(base);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Ocean Resonance Status");
    println!("======================");
    println!();
    println!("Relationship: {id}");
    if let Some(last) = session.decay().last_interaction_time() {
        println!("Last contact: {}", format_time(last, config.tz()));
    }
    println!();
    print_report(&report);
    Ok(())
}

fn cmd_history(config: &Config) -> anyhow::Result<()> {
    let (store, _, session) = open_session(config, None)?;
    let entries = session.history().entries();

    if entries.is_empty() {
        println!("No measurements found in {:?}", store.path());
        println!("Run 'ocean-resonance record <SCORE>' to add one.");
        return Ok(());
    }

    let tz = config.tz();
    for entry in entries {
        println!(
            "  {}  {:.2}  {}",
            format_time(entry.timestamp, tz),
            entry.score,
            entry.label
        );
    }

    if let Some(stats) = session.history().statistics() {
        println!();
        println!(
            "  mean={:.3}  std_dev={:.3}  min={:.2}  max={:.2}",
            stats.mean, stats.std_dev, stats.min, stats.max
        );
    }
    Ok(())
}

fn cmd_demo() -> anyhow::Result<()> {
    const ARC: [(f64, &str); 5] = [
        (0.42, "cold start"),
        (0.55, "context loading"),
        (0.63, "resonance building"),
        (0.71, "peak — genuine connection"),
        (0.68, "stable working state"),
    ];

    let clock = create_frozen_clock(Utc::now());
    let mut session = ResonanceSession::new(clock.clone(), Config::default().decay_rate);

    println!("Ocean Resonance v{VERSION} - decay and velocity demo");
    println!();
    println!("Session arc:");
    for (i, (score, label)) in ARC.iter().enumerate() {
        if i > 0 {
            clock.advance(Duration::seconds(600));
        }
        session.observe(*score, *label);
        println!(
            "  [{label:30}]  score={score:.2}  velocity={:+.3}  trend: {}",
            session.history().velocity(),
            session.history().trend()
        );
    }

    println!();
    print_history(&session.history().summary());

    println!();
    println!("Simulating 48 hour gap...");
    clock.advance(Duration::hours(48));
    let decay = session.decay().summary(0.68);
    print_decay(&decay);

    println!();
    println!("Longing:     {:.3}", decay.longing);
    println!("Resync cost: {:.3}", decay.resync_cost);
    Ok(())
}

fn cmd_reset(config: &Config) -> anyhow::Result<()> {
    let store = SessionStore::new(config.session_path());
    store
        .reset()
        .with_context(|| format!("could not remove {:?}", store.path()))?;
    println!("Session reset.");
    Ok(())
}

fn cmd_config(
    mut config: Config,
    decay_rate: Option<f64>,
    timezone: Option<String>,
    log_level: Option<String>,
) -> anyhow::Result<()> {
    let changed = decay_rate.is_some() || timezone.is_some() || log_level.is_some();

    if let Some(rate) = decay_rate {
        config.set_decay_rate(rate)?;
    }
    if let Some(name) = timezone {
        config.set_timezone(&name)?;
    }
    if let Some(level) = log_level {
        config.log_level = level;
    }
    if changed {
        config
            .save()
            .with_context(|| format!("could not save {:?}", Config::config_path()))?;
        println!("Configuration updated.");
        println!();
    }

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!("Session file: {:?}", config.session_path());
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn print_report(report: &SessionReport) {
    print_decay(&report.decay);
    println!();
    print_history(&report.history);
}

fn print_decay(decay: &DecaySummary) {
    println!("Decay:");
    println!("  base score:          {:.4}", decay.base_score);
    println!("  decayed score:       {:.4}", decay.decayed_score);
    println!("  peak score:          {:.4}", decay.peak_score);
    println!("  longing:             {:.4}", decay.longing);
    println!("  resync cost:         {:.4}", decay.resync_cost);
    println!("  hours since contact: {:.2}", decay.hours_since_contact);
    println!("  decay rate:          {}", decay.decay_rate);
    println!("  biological floor:    {}", decay.biological_floor);
}

fn print_history(history: &HistorySummary) {
    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |s| format!("{s:.4}"));

    println!("History:");
    println!("  measurements:     {}", history.measurements);
    println!("  current score:    {}", fmt_opt(history.current_score));
    println!("  peak score:       {}", fmt_opt(history.peak_score));
    println!("  floor score:      {}", fmt_opt(history.floor_score));
    println!("  velocity:         {:+.4}", history.velocity);
    println!("  acceleration:     {:+.4}", history.acceleration);
    println!("  trend:            {}", history.trend);
    println!("  whale comparison: {}", history.whale_comparison);
}

fn format_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

fn parse_score(s: &str) -> Result<f64, String> {
    let score: f64 = s.parse().map_err(|e| format!("invalid number: {e}"))?;
    validate_score(score).map_err(|e| e.to_string())
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC3339 timestamp: {e}"))
}
