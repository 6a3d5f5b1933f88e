//! # schoolbot: a command-line front end for the school FAQ chatbot
//!
//! Answers single questions, runs an interactive chat session, and manages the local
//! SQLite database that holds the Q&A corpus, meal menus and notices.

mod config;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use schoolbot::{
    constants::DEFAULT_DB_FILE,
    providers::{db::sqlite::SqliteProvider, factory::create_provider},
    ReplyKind, SchoolBot,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{get_config, AppConfig};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file. Defaults to `config.yml`, then `config.{AI_PROVIDER}.yml`.
    #[arg(long, global = true, env = "SCHOOLBOT_CONFIG")]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question
    Ask(AskArgs),
    /// Start an interactive chat session on stdin
    Chat(ChatArgs),
    /// Create the database tables, optionally loading a seed SQL file
    InitDb(InitDbArgs),
    /// Print row counts of every table
    Stats,
}

#[derive(Parser, Debug)]
struct AskArgs {
    /// The question, e.g. "방과후 몇시에 끝나요?"
    utterance: String,
    #[arg(long, default_value = "cli")]
    user: String,
    /// Reference date for relative dates (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Print the top scored corpus candidates before the answer
    #[arg(long)]
    explain: bool,
}

#[derive(Parser, Debug)]
struct ChatArgs {
    #[arg(long, default_value = "cli")]
    user: String,
    /// Pin the reference date instead of using today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Parser, Debug)]
struct InitDbArgs {
    /// SQL file with INSERT statements, separated by ';' (quoted ';' is kept, comments are not supported)
    #[arg(long)]
    seed: Option<PathBuf>,
}

const EXPLAIN_TOP_N: usize = 5;

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("schoolbot=info".parse()?))
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let app_config = get_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Ask(args) => handle_ask(&app_config, args).await,
        Commands::Chat(args) => handle_chat(&app_config, args).await,
        Commands::InitDb(args) => handle_init_db(&app_config, args).await,
        Commands::Stats => handle_stats(&app_config).await,
    }
}

// --- Setup ---

async fn open_store(db_url: &str) -> Result<SqliteProvider> {
    if db_url != ":memory:" {
        if let Some(parent) = Path::new(db_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }
    let store = SqliteProvider::new(db_url).await?;
    store.initialize_schema().await?;
    Ok(store)
}

async fn build_bot(app_config: &AppConfig) -> Result<SchoolBot> {
    let store = open_store(&app_config.db_url).await?;
    let provider = create_provider(&app_config.provider)?;
    let bot = SchoolBot::builder()
        .storage(store)
        .ai_provider(provider)
        .config(app_config.bot.clone())
        .build()?;
    info!(
        "Bot ready for '{}' with provider '{}' and database '{}'.",
        bot.config().school_name,
        app_config.provider.provider,
        app_config.db_url
    );
    Ok(bot)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// --- Command Handlers ---

async fn handle_ask(app_config: &AppConfig, args: AskArgs) -> Result<()> {
    let bot = build_bot(app_config).await?;
    let reference_date = args.date.unwrap_or_else(today);

    if args.explain {
        print_explanation(&bot, &args.utterance, reference_date).await;
    }

    let reply = bot.reply(&args.utterance, &args.user, reference_date).await;
    if args.explain {
        println!("[{}]", describe_kind(&reply.kind));
    }
    println!("{}", reply.text);
    Ok(())
}

async fn print_explanation(bot: &SchoolBot, utterance: &str, reference_date: NaiveDate) {
    let analysis = bot.analyze(utterance, reference_date);
    let corpus = bot.corpus().await;
    let ranked = bot.engine().rank(&analysis.query, analysis.preferred, &corpus);

    println!("normalized: {}", analysis.query.normalized_text);
    println!(
        "tokens: {}",
        analysis.query.tokens.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    println!(
        "intent: {:?}, date: {}, category: {}",
        analysis.query.intent,
        analysis
            .query
            .detected_date
            .map_or_else(|| "-".to_string(), |d| d.to_string()),
        analysis
            .preferred
            .map_or_else(|| "-".to_string(), |c| c.to_string()),
    );
    println!("threshold: {}", bot.engine().config().threshold);

    for candidate in ranked.iter().take(EXPLAIN_TOP_N) {
        let b = &candidate.breakdown;
        let score = if b.exact {
            "exact".to_string()
        } else {
            format!("{:.2}", candidate.score)
        };
        println!(
            "{score:>8}  {}  [substring={:.1} overlap={:.1} partial={:.1} keyword={:.1} context={:.1} category={:.1} relevance={:.1}]",
            candidate.record.question,
            b.substring,
            b.token_overlap,
            b.partial_term,
            b.important_keyword,
            b.context_pattern,
            b.category,
            b.relevance,
        );
    }
    println!();
}

fn describe_kind(kind: &ReplyKind) -> String {
    match kind {
        ReplyKind::Corpus { score } if *score == f64::MAX => "corpus, exact".to_string(),
        ReplyKind::Corpus { score } => format!("corpus, score {score:.2}"),
        other => format!("{other:?}").to_lowercase(),
    }
}

async fn handle_chat(app_config: &AppConfig, args: ChatArgs) -> Result<()> {
    let bot = build_bot(app_config).await?;
    println!(
        "{} 챗봇입니다. '/history' 대화 기록, '/reload' 데이터 새로고침, '/quit' 종료.",
        bot.config().school_name
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/history" => println!("{}", bot.history().summary(&args.user).await),
            "/reload" => match bot.reload_corpus().await {
                Ok(count) => println!("질문 {count}개를 다시 불러왔습니다."),
                Err(e) => eprintln!("Reload failed: {e}"),
            },
            utterance => {
                let reference_date = args.date.unwrap_or_else(today);
                println!("{}", bot.handle(utterance, &args.user, reference_date).await);
            }
        }
    }
    Ok(())
}

async fn handle_init_db(app_config: &AppConfig, args: InitDbArgs) -> Result<()> {
    let store = open_store(&app_config.db_url).await?;
    info!("Schema ready in '{}'.", app_config.db_url);

    if let Some(seed) = args.seed {
        let sql = tokio::fs::read_to_string(&seed).await?;
        store.initialize_with_data(&sql).await?;
        info!("Loaded seed data from '{}'.", seed.display());
    }

    print_counts(&store).await
}

async fn handle_stats(app_config: &AppConfig) -> Result<()> {
    if app_config.db_url != ":memory:" && !Path::new(&app_config.db_url).exists() {
        anyhow::bail!(
            "Database '{}' does not exist. Run `schoolbot init-db` first (default path: {DEFAULT_DB_FILE}).",
            app_config.db_url
        );
    }
    let store = open_store(&app_config.db_url).await?;
    print_counts(&store).await
}

async fn print_counts(store: &SqliteProvider) -> Result<()> {
    let counts = store.table_counts().await?;
    println!("qa_data: {}", counts.qa_records);
    println!("meals:   {}", counts.meals);
    println!("notices: {}", counts.notices);
    Ok(())
}
