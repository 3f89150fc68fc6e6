//! Terminal rendering of panels and recommendation cards.

use colored::Colorize;
use rec_client::{RecommendResponse, StatsResponse};
use rec_view::{MovieCard, ProfileSummary, StatsPanel, bar_cells, cards};

const BAR_WIDTH: usize = 24;
const RULE: &str = "────────────────────────────────────────────────────────";

/// Text bar such as `██████░░░░`, `fraction` of it filled.
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = bar_cells(fraction, width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn rule() {
    println!("{}", RULE.dimmed());
}

pub fn status(api_ok: bool) {
    if api_ok {
        println!("{}", "✅  API Connected".green().bold());
    } else {
        println!("{}", "API Offline".red().bold());
        println!("Run: `uvicorn api.main:app --reload`");
    }
}

/// The System Info panel, or a "No data" line when stats are unavailable.
pub fn system_info(stats: Option<&StatsResponse>) {
    println!("{}", "System Info".bold());
    match stats {
        Some(stats) => {
            for metric in StatsPanel::from(stats).metrics {
                println!("  {:<14}{}", metric.label.dimmed(), metric.value.cyan().bold());
            }
        }
        None => println!("  {}", "No data".dimmed()),
    }
}

pub fn pipeline_overview() {
    println!("{}", "Movie Recommendation System".bold().blue());
    println!("{}", "Two-Stage Retrieval + Ranking · MovieLens 1M".dimmed());
    println!(
        "  {} Two-Tower network computes cosine similarity → Top-K candidates",
        "Stage 1: Retrieval".cyan().bold()
    );
    println!(
        "  {} Deep ranking model predicts exact rating → Sorts by score",
        "Stage 2: Ranking".green().bold()
    );
    println!(
        "  {} Personalized Top-N movies with predicted ratings",
        "Final Output".yellow().bold()
    );
}

pub fn placeholder() {
    println!();
    println!("{}", "Ready to recommend!".bold());
    println!(
        "Enter a User ID and press {}",
        "Enter to get recommendations".cyan().bold()
    );
}

pub fn error(message: &str) {
    println!("{}", message.red().bold());
}

pub fn profile(summary: &ProfileSummary) {
    println!("{}", summary.heading.bold().blue());
    let line = summary
        .metrics
        .iter()
        .map(|m| format!("{}: {}", m.label.dimmed(), m.value.bold()))
        .collect::<Vec<_>>()
        .join("   ");
    println!("  {}", line);
}

pub fn card(card: &MovieCard) {
    let tags = card
        .genres
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| format!("[{}]", g).cyan().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    println!(
        "{} {}",
        format!("#{}", card.rank).on_blue().white().bold(),
        card.title.bold()
    );
    println!("    {}", tags);
    println!("    {}", card.year_label.dimmed());
    println!(
        "    {:<17}{} {} ({})",
        "Predicted Rating".dimmed(),
        bar(card.score_norm, BAR_WIDTH).green(),
        card.rating_label().green().bold(),
        card.score_percent()
    );
    println!(
        "    {:<17}{} {} ({})",
        "Retrieval Score".dimmed(),
        bar(card.retrieval_norm, BAR_WIDTH).blue(),
        card.retrieval_label().dimmed(),
        card.retrieval_percent()
    );
}

/// Profile header followed by one card per recommendation.
pub fn results(response: &RecommendResponse) {
    let summary = ProfileSummary::from(response);
    profile(&summary);
    rule();
    println!("{}", summary.results_heading.bold());
    println!();
    for movie in cards(response) {
        card(&movie);
        println!();
    }
}
