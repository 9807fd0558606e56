mod logging;
mod prompt;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::process::ExitCode;

use islands_core::config::Settings;
use islands_core::wordcloud::{word_cloud_text, TerminalWordCloud, WordCloudRenderer};
use islands_core::{
    report, trend, Database, IslandsError, IslandsResult, SocialNetwork, TrendQuery, TrendReport,
    UserFilter, UserPredicate,
};
use islands_types::{ConnectionType, UserField};
use prompt::{is_invalid_input, Prompter};

/// Islands - a toy social network for trend and filtering exercises
#[derive(Parser, Debug)]
#[command(name = "islands")]
#[command(about = "Explore trending posts in a small seeded social network")]
#[command(version)]
struct Cli {
    /// Path to the SQLite database file, or :memory:
    #[arg(short, long, env = "ISLANDS_DATABASE_PATH")]
    database: Option<String>,

    /// Weight of a view relative to a comment in trend scores
    #[arg(long)]
    view_weight: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reset the database, list posts and pick a filter interactively (default)
    Interactive {
        /// Keep the current rows instead of reseeding
        #[arg(long)]
        no_reset: bool,
    },
    /// Print trending posts for the given filters
    Trending(TrendingArgs),
    /// Print every post with its comments
    Posts,
    /// Print user connections
    Connections {
        /// Only show connections going out from this user id
        #[arg(long)]
        user: Option<i64>,

        /// Only show one connection type, e.g. follows or has-read-posts-by
        #[arg(long = "type")]
        connection_type: Option<String>,
    },
    /// Drop, recreate and reseed every table
    Reset,
}

#[derive(Args, Debug, Default)]
struct TrendingArgs {
    /// Keep posts containing this keyword (case-insensitive)
    #[arg(long)]
    include: Option<String>,

    /// Drop posts containing this keyword (case-insensitive)
    #[arg(long)]
    exclude: Option<String>,

    #[arg(long)]
    gender: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    job: Option<String>,

    /// Exact author age
    #[arg(long)]
    age: Option<String>,

    #[arg(long)]
    min_age: Option<i64>,

    #[arg(long)]
    max_age: Option<i64>,

    /// Keep source order instead of sorting by score
    #[arg(long)]
    unranked: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Skip the word cloud
    #[arg(long)]
    no_cloud: bool,
}

impl TrendingArgs {
    fn user_filter(&self) -> IslandsResult<UserFilter> {
        let mut filter = UserFilter::new();
        let exact = [
            (UserField::Gender, &self.gender),
            (UserField::Location, &self.location),
            (UserField::Job, &self.job),
            (UserField::Age, &self.age),
        ];
        for (field, value) in exact {
            if let Some(value) = value {
                filter.push(UserPredicate::equals(field, value.clone())?);
            }
        }

        if self.min_age.is_some() || self.max_age.is_some() {
            filter.push(UserPredicate::age_between(
                self.min_age.unwrap_or(0),
                self.max_age.unwrap_or(i64::MAX),
            )?);
        }
        Ok(filter)
    }

    fn query(&self, base: TrendQuery) -> IslandsResult<TrendQuery> {
        let mut query = base.with_user_filter(self.user_filter()?);
        query.include_keyword = self.include.clone();
        query.exclude_keyword = self.exclude.clone();
        if self.unranked {
            query.ranked = false;
        }
        Ok(query)
    }
}

fn render_word_cloud(settings: &Settings, report: &TrendReport) -> Result<()> {
    let text = word_cloud_text(&report.posts);
    let mut cloud = TerminalWordCloud::new(
        io::stdout().lock(),
        settings.wordcloud.max_words,
        settings.wordcloud.bar_width,
    );
    cloud.render(&text)
}

fn run_interactive(
    db: &Database,
    settings: &Settings,
    base: TrendQuery,
    no_reset: bool,
) -> Result<()> {
    if no_reset {
        println!("\nDatabase initialized.\n");
    } else {
        db.reset()?;
        println!("\nDatabase initialized and reset.\n");
    }

    let network = SocialNetwork::load(db)?;
    {
        let mut out = io::stdout().lock();
        report::write_posts_with_comments(&mut out, &network)?;
        writeln!(out, "There are {} posts in the database.", network.posts.len())?;
    }

    let query = Prompter::new(io::stdin().lock(), io::stdout()).read_query(&network, base)?;
    let trend_report = trend::trending_posts(&network, &query);
    report::write_trend_report(&mut io::stdout().lock(), &trend_report)?;
    render_word_cloud(settings, &trend_report)
}

fn run_trending(
    db: &Database,
    settings: &Settings,
    base: TrendQuery,
    args: &TrendingArgs,
) -> Result<()> {
    let query = args.query(base)?;
    let network = SocialNetwork::load(db)?;
    let trend_report = trend::trending_posts(&network, &query);

    if args.json {
        let json = serde_json::json!({ "query": &query, "report": &trend_report });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).context("Failed to serialize trend report")?
        );
    } else {
        report::write_trend_report(&mut io::stdout().lock(), &trend_report)?;
    }

    if !args.no_cloud && !args.json {
        render_word_cloud(settings, &trend_report)?;
    }
    Ok(())
}

fn parse_connection_type(raw: Option<&str>) -> IslandsResult<Option<ConnectionType>> {
    raw.map(|raw| {
        ConnectionType::parse(raw)
            .ok_or_else(|| IslandsError::InvalidFilter(format!("unknown connection type '{}'", raw)))
    })
    .transpose()
}

fn run_connections(db: &Database, user: Option<i64>, connection_type: Option<&str>) -> Result<()> {
    let kind = parse_connection_type(connection_type)?;
    let network = SocialNetwork::load(db)?;
    let connections = network.find_connections(user, kind);
    report::write_connections(&mut io::stdout().lock(), &network, &connections)
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::new()?;
    let db_path = cli
        .database
        .clone()
        .unwrap_or_else(|| settings.database.path.clone());

    let view_weight = cli.view_weight.unwrap_or(settings.trend.view_weight);
    if !view_weight.is_finite() || view_weight < 0.0 {
        return Err(IslandsError::InvalidFilter(format!(
            "view weight must be a non-negative number, got {}",
            view_weight
        ))
        .into());
    }
    let base = TrendQuery::default()
        .with_view_weight(view_weight)
        .ranked(settings.trend.ranked);

    tracing::info!(database = %db_path, view_weight, "Opening database");
    let db = Database::with_pool_size(&db_path, settings.database.pool_size)
        .with_context(|| format!("Failed to open database {}", db_path))?;
    db.ensure_schema()?;

    match cli.command.unwrap_or(Command::Interactive { no_reset: false }) {
        Command::Interactive { no_reset } => run_interactive(&db, &settings, base, no_reset),
        Command::Trending(args) => run_trending(&db, &settings, base, &args),
        Command::Posts => {
            let network = SocialNetwork::load(&db)?;
            report::write_posts_with_comments(&mut io::stdout().lock(), &network)
        }
        Command::Connections {
            user,
            connection_type,
        } => run_connections(&db, user, connection_type.as_deref()),
        Command::Reset => {
            db.reset()?;
            println!("Database reset and reseeded.");
            for (table, count) in db.table_counts()? {
                println!("  {}: {}", table, count);
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_invalid_input(&err) => {
            tracing::debug!("{:#}", err);
            println!("Invalid input. Please try again.");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
