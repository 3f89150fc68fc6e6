mod render;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

use rec_client::{ClientConfig, DEFAULT_BASE_URL, RecommendResponse, RecommenderClient, UserId};
use rec_view::{EXPORT_MIME, export_file_name, to_csv};
use settings::Settings;

const OFFLINE_MESSAGE: &str = "Cannot connect to the API. Please start the FastAPI server first.";

/// ReelRecs - terminal front end for the movie recommendation service
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(
    about = "Personalized movie recommendations from a two-stage retrieval + ranking service",
    long_about = None
)]
struct Cli {
    /// Base URL of the recommendation service
    #[arg(long, global = true, env = "REEL_RECS_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the recommendation service is reachable
    Health,

    /// Show dataset statistics
    Stats,

    /// Get movie recommendations for a user
    Recommend {
        #[command(flatten)]
        settings: Settings,

        /// Save the results as CSV
        #[arg(long)]
        export: bool,

        /// Directory for CSV exports
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Request recommendations repeatedly from one session
    Interactive {
        /// Directory for CSV exports
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the rendered page
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = RecommenderClient::new(ClientConfig::new(cli.api_url))
        .context("Failed to create recommendation client")?;

    match cli.command {
        Commands::Health => render::status(client.check_health().await),
        Commands::Stats => render::system_info(client.fetch_stats().await.as_ref()),
        Commands::Recommend {
            settings,
            export,
            out_dir,
        } => handle_recommend(&client, settings, export, &out_dir).await?,
        Commands::Interactive { out_dir } => handle_interactive(&client, &out_dir).await?,
    }

    Ok(())
}

/// Render the full page: status, stats, overview, then results if requested.
///
/// Returns the response when recommendations were fetched successfully.
async fn render_page(
    client: &RecommenderClient,
    settings: Option<Settings>,
) -> Option<RecommendResponse> {
    let api_ok = client.check_health().await;
    render::status(api_ok);
    render::rule();
    render::system_info(client.fetch_stats().await.as_ref());
    render::rule();
    render::pipeline_overview();
    render::rule();

    let Some(settings) = settings else {
        render::placeholder();
        return None;
    };

    if !api_ok {
        render::error(OFFLINE_MESSAGE);
        return None;
    }

    println!(
        "{}",
        format!("Fetching recommendations for User {}...", settings.user_id).dimmed()
    );
    match client
        .fetch_recommendations(settings.user_id, settings.top_k, settings.top_n)
        .await
    {
        Ok(response) => {
            for warning in response.contract_warnings() {
                warn!("Backend response out of contract: {}", warning);
            }
            render::results(&response);
            Some(response)
        }
        Err(e) => {
            render::error(&format!("Error: {}", e));
            None
        }
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    client: &RecommenderClient,
    settings: Settings,
    export: bool,
    out_dir: &Path,
) -> Result<()> {
    let response = render_page(client, Some(settings)).await;

    if let (true, Some(response)) = (export, response) {
        render::rule();
        save_export(out_dir, settings.user_id, &response)?;
    }
    Ok(())
}

/// Handle the 'interactive' command
///
/// Each line is either `<user_id> [top_n] [top_k]`, `export`, `help` or
/// `quit`. The client is shared across lines, so stats come from cache
/// while fresh.
async fn handle_interactive(client: &RecommenderClient, out_dir: &Path) -> Result<()> {
    render_page(client, None).await;
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut previous: Option<Settings> = None;
    let mut last: Option<(UserId, RecommendResponse)> = None;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "export" => match &last {
                Some((user_id, response)) => {
                    if let Err(e) = save_export(out_dir, *user_id, response) {
                        render::error(&format!("Error: {:#}", e));
                    }
                }
                None => render::error("Nothing to export yet."),
            },
            input => match Settings::from_line(input, previous) {
                Ok(settings) => {
                    previous = Some(settings);
                    if let Some(response) = render_page(client, Some(settings)).await {
                        last = Some((settings.user_id, response));
                    }
                }
                Err(message) => render::error(&message),
            },
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "Enter {} to get recommendations, {} to save the last results, {} to leave.",
        "<user_id> [top_n] [top_k]".cyan(),
        "export".cyan(),
        "quit".cyan()
    );
}

/// Write the CSV export for `user_id` into `out_dir`.
fn save_export(out_dir: &Path, user_id: UserId, response: &RecommendResponse) -> Result<PathBuf> {
    let bytes = to_csv(&response.recommendations).context("Failed to build CSV export")?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = out_dir.join(export_file_name(user_id));
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Saved recommendations to {} ({})",
        "⬇️ ".green(),
        path.display(),
        EXPORT_MIME
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recommend_args_parse() {
        let cli = Cli::try_parse_from([
            "reel-recs",
            "--api-url",
            "http://recs:9000",
            "recommend",
            "--user-id",
            "12",
            "--top-n",
            "15",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://recs:9000");
        match cli.command {
            Commands::Recommend {
                settings, export, ..
            } => {
                assert_eq!(settings.user_id, 12);
                assert_eq!(settings.top_n, 15);
                assert_eq!(settings.top_k, settings::DEFAULT_TOP_K);
                assert!(!export);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_recommend_rejects_off_step_top_k() {
        let result = Cli::try_parse_from([
            "reel-recs",
            "recommend",
            "--user-id",
            "1",
            "--top-k",
            "120",
        ]);
        assert!(result.is_err());
    }
}
