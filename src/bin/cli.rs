//! Review Dashboard CLI
//!
//! Command-line access to the review API and the dashboard renderer:
//! - Render the full dashboard page once
//! - Print statistics, recent reviews, per-repository statistics or a
//!   single review
//! - Generate a default config file

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand, ValueEnum};
use review_dashboard::client::{DashboardApi, DashboardClient};
use review_dashboard::config::{generate_default_config, Config};
use review_dashboard::controller::{DashboardController, ReviewModal};
use review_dashboard::format::{format_duration, format_relative, Locale};
use review_dashboard::page::ElementId;
use review_dashboard::render::{RepositoryTableView, ReviewListView, StatisticsView};
use review_dashboard::{ReviewDetail, Severity, SeverityCounts};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "review-dashboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query the code-review assistant and render the dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Review API origin (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Display language (overrides config)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch everything once and write the dashboard HTML
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Open the detail modal for this review (must be in the recent list)
        #[arg(long)]
        review: Option<u64>,
    },

    /// Show overall statistics
    Stats,

    /// List recent reviews
    Reviews {
        /// Number of reviews (default: config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show statistics per repository
    Repos,

    /// Show one review with its comments
    Review {
        /// Review id
        id: u64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let now: DateTime<FixedOffset> = Local::now().into();

    match cli.command {
        Commands::Config { output } => {
            write_output(output.as_ref(), &generate_default_config())?;
        }

        Commands::Render { output, review } => {
            let (config, client) = connect(cli.config, cli.api_url, cli.locale)?;
            let controller =
                DashboardController::new(Arc::new(client), config.dashboard_settings());
            let report = controller.refresh_all().await;
            let modal = ReviewModal::new();
            if let Some(id) = review {
                controller.select_review(&modal, id).await?;
            }
            eprintln!(
                "statistics: {:?}, reviews: {:?}",
                report.statistics, report.reviews
            );
            let html = controller.render_document(&modal.state().await).await;
            write_output(output.as_ref(), &html)?;
        }

        Commands::Stats => {
            let (config, client) = connect(cli.config, cli.api_url, cli.locale)?;
            let locale = config.dashboard.locale;
            let stats = client.fetch_statistics().await?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let view = StatisticsView::build(&stats, now, locale);
                for (element, value) in &view.fields {
                    println!("{:<24} {}", stat_label(*element, locale), value);
                }
                if let Some(counts) = stats.severity_distribution {
                    println!("{:<24} {}", "Severity", plain_badges(&counts));
                }
                if let Some(categories) = stats.category_distribution {
                    for (name, count) in categories.iter() {
                        println!("  {:<22} {}", name, count);
                    }
                }
            }
        }

        Commands::Reviews { limit } => {
            let (config, client) = connect(cli.config, cli.api_url, cli.locale)?;
            let locale = config.dashboard.locale;
            let limit = limit.unwrap_or(config.dashboard.recent_limit);
            let reviews = client.fetch_recent_reviews(limit).await?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&reviews)?);
            } else {
                match ReviewListView::build(&reviews, now, locale) {
                    ReviewListView::Empty => println!("{}", locale.messages().no_reviews),
                    ReviewListView::Rows(rows) => {
                        for (row, review) in rows.iter().zip(&reviews) {
                            println!(
                                "#{:<6} {:<30} PR #{}: {}",
                                row.id, row.repository, row.pr_number, row.pr_title
                            );
                            println!(
                                "        {} | {}: {} | {} | {}: {}",
                                row.relative_time,
                                locale.messages().comments_label,
                                row.total_comments,
                                plain_badges(&review.severity_counts),
                                locale.messages().processing_time_label,
                                row.processing_time
                            );
                        }
                    }
                }
            }
        }

        Commands::Repos => {
            let (config, client) = connect(cli.config, cli.api_url, cli.locale)?;
            let locale = config.dashboard.locale;
            let repositories = client.fetch_repository_statistics().await?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&repositories)?);
            } else {
                let m = locale.messages();
                match RepositoryTableView::build(&repositories, locale) {
                    RepositoryTableView::Empty => println!("{}", m.no_repositories),
                    RepositoryTableView::Rows(rows) => {
                        println!(
                            "{:<32} {:>8} {:>8} {:>10} {:>10}",
                            m.repository_label, "PRs", "Reviews", "Comments", "Avg time"
                        );
                        for row in rows {
                            println!(
                                "{:<32} {:>8} {:>8} {:>10} {:>10}",
                                row.repository,
                                row.total_pull_requests,
                                row.total_reviews,
                                row.total_comments,
                                row.avg_processing_time
                            );
                        }
                    }
                }
            }
        }

        Commands::Review { id } => {
            let (config, client) = connect(cli.config, cli.api_url, cli.locale)?;
            let detail = client.fetch_review_detail(id).await?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print_detail(&detail, now, config.dashboard.locale);
            }
        }
    }

    Ok(())
}

/// Resolve config with flag overrides and build the API client
fn connect(
    config_path: Option<PathBuf>,
    api_url: Option<String>,
    locale: Option<Locale>,
) -> anyhow::Result<(Config, DashboardClient)> {
    let mut config = Config::resolve(config_path.as_deref())?;
    if let Some(api_url) = api_url {
        config.api.base_url = api_url;
    }
    if let Some(locale) = locale {
        config.dashboard.locale = locale;
    }

    let client =
        DashboardClient::new(config.client_config()).context("failed to build HTTP client")?;
    Ok((config, client))
}

fn write_output(path: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn stat_label(element: ElementId, locale: Locale) -> &'static str {
    let m = locale.messages();
    match element {
        ElementId::TotalRepositories => m.total_repositories_label,
        ElementId::TotalReviews => m.total_reviews_label,
        ElementId::TotalComments => m.total_comments_label,
        ElementId::AvgProcessingTime => m.avg_processing_time_label,
        ElementId::TotalPullRequests => m.total_pull_requests_label,
        ElementId::AvgCommentsPerReview => m.avg_comments_label,
        ElementId::TotalTokensUsed => m.total_tokens_label,
        ElementId::ReviewsToday => m.reviews_today_label,
        ElementId::ReviewsThisWeek => m.reviews_this_week_label,
        ElementId::ReviewsThisMonth => m.reviews_this_month_label,
        ElementId::LastReviewTime => m.last_review_label,
        other => other.as_str(),
    }
}

/// `Error: 1 Warning: 2`, non-zero counts only
fn plain_badges(counts: &SeverityCounts) -> String {
    Severity::BADGE_ORDER
        .iter()
        .filter(|severity| counts.get(**severity) > 0)
        .map(|severity| format!("{}: {}", severity.label(), counts.get(*severity)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_detail(detail: &ReviewDetail, now: DateTime<FixedOffset>, locale: Locale) {
    let m = locale.messages();
    let pr = &detail.pull_request;

    println!(
        "{}/{} PR #{}: {}",
        detail.repository.owner, detail.repository.name, pr.number, pr.title
    );
    println!(
        "{}: {} | {} | {}",
        m.author_label,
        pr.author,
        format_relative(detail.created_at.as_deref(), now, locale),
        detail.review_status
    );
    println!(
        "{}: {} | {}: {} | {}: {} | {}: {}",
        m.total_comments_label,
        detail.total_comments,
        m.processing_time_label,
        format_duration(detail.processing_time_ms, locale),
        m.ai_model_label,
        detail.ai_model.as_deref().unwrap_or("N/A"),
        m.tokens_used_label,
        detail.tokens_used.unwrap_or(0)
    );
    println!("{}", plain_badges(&detail.severity_counts));
    println!();
    println!("{}", locale.comments_heading(detail.comments.len()));

    for comment in &detail.comments {
        let location = match comment.line_number {
            Some(line) => format!("{}:{}", comment.file_path, line),
            None => comment.file_path.clone(),
        };
        println!(
            "[{}] [{}] {}",
            comment.severity.label(),
            comment.category,
            location
        );
        println!("    {}", comment.message);
        if let Some(suggestion) = comment.suggestion.as_deref().filter(|s| !s.trim().is_empty()) {
            println!("    💡 {}", suggestion);
        }
        if let Some(code) = comment.code_example.as_deref().filter(|s| !s.trim().is_empty()) {
            for line in code.lines() {
                println!("      {}", line);
            }
        }
    }

    if let Some(error) = detail.error_message.as_deref().filter(|s| !s.trim().is_empty()) {
        println!();
        println!("{}: {}", m.error_heading, error);
    }
}
