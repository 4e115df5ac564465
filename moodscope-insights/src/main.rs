//! moodscope-insights - Mood History & Insights CLI
//!
//! Render the history page for a snapshot exported by the state provider.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use moodscope_core::analytics::{
    HistoryInsights, EMPTY_FEED_MESSAGE, EMPTY_INSIGHTS_MESSAGE, EMPTY_SESSIONS_MESSAGE,
};
use moodscope_core::config::ViewerZone;
use moodscope_core::format::ConfidencePolicy;
use moodscope_core::snapshot::LOADING_MESSAGE;
use moodscope_core::{Config, HistorySnapshot, InsightsConfig, ViewState};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "moodscope-insights")]
#[command(about = "Mood History & Insights - your emotional journey at a glance")]
#[command(version)]
struct Args {
    /// Snapshot JSON exported by the state provider ("-" reads stdin)
    #[arg(long, short)]
    input: PathBuf,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Bucket days and render times in UTC instead of the local zone
    #[arg(long)]
    utc: bool,

    /// Number of top emotions to show (overrides config)
    #[arg(long)]
    top: Option<usize>,

    /// Number of recent detections to show (overrides config)
    #[arg(long)]
    recent: Option<usize>,

    /// Clamp confidences into 0-100% (overrides config)
    #[arg(long)]
    clamp_confidence: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = moodscope_core::logging::init(&config.logging).ok();

    let snapshot = read_snapshot(&args.input)?;

    // Command-line overrides win over the config file
    let mut insights_config = InsightsConfig::from_config(&config);
    if let Some(top) = args.top {
        if top == 0 {
            anyhow::bail!("--top must be at least 1");
        }
        insights_config.top_emotions_count = top;
    }
    if let Some(recent) = args.recent {
        if recent == 0 {
            anyhow::bail!("--recent must be at least 1");
        }
        insights_config.recent_limit = recent;
    }
    if args.clamp_confidence {
        insights_config.confidence_policy = ConfidencePolicy::Clamp;
    }

    let zone = if args.utc {
        ViewerZone::Utc
    } else {
        config.display.timezone
    };
    tracing::info!(?zone, input = %args.input.display(), "Rendering history insights");

    let view = match zone {
        ViewerZone::Utc => snapshot.view(&insights_config, &Utc),
        ViewerZone::Local => snapshot.view(&insights_config, &Local),
    };

    let insights = match view {
        ViewState::Loading => {
            print_loading(args.export.as_deref())?;
            return Ok(());
        }
        ViewState::Ready(insights) => insights,
    };

    match args.export.as_deref() {
        Some("json") => print_json(&insights)?,
        Some("md") => print_markdown(&insights),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&insights),
    }

    Ok(())
}

fn read_snapshot(input: &Path) -> Result<HistorySnapshot> {
    if input.as_os_str() == "-" {
        let json = std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
        return HistorySnapshot::from_json(&json).context("failed to decode snapshot from stdin");
    }

    HistorySnapshot::from_path(input)
        .with_context(|| format!("failed to load snapshot {}", input.display()))
}

fn print_loading(export: Option<&str>) -> Result<()> {
    match export {
        Some("json") => {
            let json = serde_json::json!({ "loading": true, "message": LOADING_MESSAGE });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Some("md") => println!("*{}*", LOADING_MESSAGE),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => println!("  {}", LOADING_MESSAGE),
    }
    Ok(())
}

/// Ten-cell bar for a percentage, bounded for drawing only.
fn meter(pct: i64) -> String {
    let filled = (pct.clamp(0, 100) as usize + 5) / 10;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn print_terminal(insights: &HistoryInsights) {
    let title = "MOOD HISTORY & INSIGHTS";

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    // Totals
    println!("SUMMARY");
    println!("   Total Detections: {}", insights.totals.detections);
    println!("   Therapy Sessions: {}", insights.totals.therapy_sessions);
    println!("   Days Active:      {}", insights.totals.active_days);
    println!();

    // Recent Emotions
    println!("RECENT EMOTIONS");
    if insights.recent.is_empty() {
        println!("   {}", EMPTY_FEED_MESSAGE);
    }
    for entry in &insights.recent {
        println!(
            "   [{:<12}] {:<12} {:<24} {:>4}% {}",
            entry.presentation.icon,
            entry.emotion.display_name(),
            entry.when_display(),
            entry.confidence_percent,
            meter(entry.confidence_percent)
        );
    }
    println!();

    // Emotion Insights
    println!("EMOTION INSIGHTS");
    if insights.top_emotions.is_empty() {
        println!("   {}", EMPTY_INSIGHTS_MESSAGE);
    }
    for (i, share) in insights.top_emotions.iter().enumerate() {
        println!(
            "   {}. {:<12} {:>4}% {}  ({} detection{})",
            i + 1,
            share.emotion.display_name(),
            share.percentage,
            meter(share.percentage),
            share.count,
            if share.count == 1 { "" } else { "s" }
        );
    }
    println!();

    // Therapy Sessions
    println!("THERAPY SESSIONS");
    if insights.sessions.is_empty() {
        println!("   {}", EMPTY_SESSIONS_MESSAGE);
    }
    for session in &insights.sessions {
        println!(
            "   {:<12} {:>8}   {}",
            session.date_label,
            session.duration_display(),
            session.messages_display()
        );
        if let Some(mood) = session.mood_display() {
            println!("                Mood: {}", mood);
        }
        if let Some(specialty) = session.specialty_display() {
            println!("                Therapy: {}", specialty);
        }
    }
    println!();
}

fn print_markdown(insights: &HistoryInsights) {
    println!("# Mood History & Insights");
    println!();

    // Summary table
    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Total Detections | {} |", insights.totals.detections);
    println!("| Therapy Sessions | {} |", insights.totals.therapy_sessions);
    println!("| Days Active | {} |", insights.totals.active_days);
    println!();

    println!("## Recent Emotions");
    println!();
    if insights.recent.is_empty() {
        println!("*{}*", EMPTY_FEED_MESSAGE);
    } else {
        println!("| Emotion | When | Confidence |");
        println!("|---------|------|------------|");
        for entry in &insights.recent {
            println!(
                "| {} | {} | {}% |",
                entry.emotion.display_name(),
                entry.when_display(),
                entry.confidence_percent
            );
        }
    }
    println!();

    println!("## Emotion Insights");
    println!();
    if insights.top_emotions.is_empty() {
        println!("*{}*", EMPTY_INSIGHTS_MESSAGE);
    }
    for (i, share) in insights.top_emotions.iter().enumerate() {
        println!(
            "{}. **{}** - {}% ({} of {})",
            i + 1,
            share.emotion.display_name(),
            share.percentage,
            share.count,
            insights.totals.detections
        );
    }
    println!();

    println!("## Therapy Sessions");
    println!();
    if insights.sessions.is_empty() {
        println!("*{}*", EMPTY_SESSIONS_MESSAGE);
    }
    for session in &insights.sessions {
        let mut line = format!(
            "- **{}** - {}, {}",
            session.date_label,
            session.duration_display(),
            session.messages_display()
        );
        if let Some(mood) = session.mood_display() {
            line.push_str(&format!(" - Mood: {}", mood));
        }
        if let Some(specialty) = session.specialty_display() {
            line.push_str(&format!(" - Therapy: {}", specialty));
        }
        println!("{}", line);
    }
    println!();

    println!("---");
    println!("*Generated by moodscope-insights*");
}

fn print_json(insights: &HistoryInsights) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(insights)?);
    Ok(())
}
