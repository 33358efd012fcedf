mod advisor;
mod config;
mod dex;
mod instrumentation;
mod interactive;
mod llm;
mod screen;
mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};

use advisor::{Advisor, DifficultyRank, ElementalType};
use config::Config;
use dex::Dex;
use llm::{GeminiClient, TextGenerator};
use screen::{Notice, Screen};

#[derive(Parser)]
#[command(
    name = "raid-advisor",
    about = "AI counter suggestions for solo Tera Raid battles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gemini model to ask
    #[arg(long, global = true)]
    model: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show autocomplete candidates for a partial name
    Suggest {
        /// Partial name (hiragana is matched against katakana too)
        text: String,
    },
    /// List the selectable tera types
    Types,
    /// List the selectable difficulty ranks
    Ranks,
    /// Ask for counters to one raid boss
    Advise {
        /// Raid boss name
        target: String,
        /// Tera type of the boss, e.g. ほのお
        #[arg(long)]
        tera: ElementalType,
        /// Star rank
        #[arg(long, default_value_t = DifficultyRank::default())]
        rank: DifficultyRank,
        /// Expand the Nth card (1-based)
        #[arg(long)]
        expand: Option<usize>,
    },
    /// Fill in the search form step by step
    Interactive,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// One search through the screen, returning the rendered result view.
/// Any failure comes back as the user-facing notice.
async fn advise<G: TextGenerator>(
    dex: &Dex,
    advisor: &Advisor<G>,
    target: &str,
    tera: ElementalType,
    rank: DifficultyRank,
    expand: Option<usize>,
) -> Result<String> {
    if dex.find_exact(target).is_none() {
        tracing::warn!(%target, "Target is not in the reference dataset");
    }

    let mut screen = Screen::new(dex);
    screen.set_target_name(target);
    screen.choose_tera_type(tera);
    screen.choose_rank(rank);

    if !screen.submit(advisor).await {
        let notice = screen.take_notice().unwrap_or(Notice::RequestFailed);
        anyhow::bail!(view::render_notice(notice));
    }

    if let Some(n) = expand.filter(|n| *n > 0) {
        screen.toggle_card(n - 1);
    }
    Ok(view::render_results(&screen).unwrap_or_default())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let dex = Dex::global()?;

    match cli.command {
        Commands::Suggest { text } => {
            for entity in dex::suggest(dex, &text) {
                println!("{}", view::render_suggestion(entity));
            }
        }
        Commands::Types => {
            for t in ElementalType::ALL {
                println!("{}", t);
            }
        }
        Commands::Ranks => {
            for r in DifficultyRank::ALL {
                let marker = if r == DifficultyRank::default() {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{}", r, marker);
            }
        }
        Commands::Advise {
            target,
            tera,
            rank,
            expand,
        } => {
            let config = Config::from_env().with_model(cli.model);
            let advisor = Advisor::new(GeminiClient::from_config(&config));

            let results = advise(dex, &advisor, &target, tera, rank, expand).await?;
            println!("{}", results);
        }
        Commands::Interactive => {
            let config = Config::from_env().with_model(cli.model);
            let advisor = Advisor::new(GeminiClient::from_config(&config));
            interactive::run(dex, &advisor).await?;
        }
    }

    Ok(())
}
