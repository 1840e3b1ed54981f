use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

use profile_cleaner::app::languages::LanguageCleanup;
use profile_cleaner::app::skills::run_skills_cleanup;
use profile_cleaner::config::Config;
use profile_cleaner::domain::CleanupReport;
use profile_cleaner::logging;
use profile_cleaner::normalize::skill::SkillNormalizer;
use profile_cleaner::storage::{ProfileStore, SqliteProfileStore};

#[derive(Parser)]
#[command(name = "profile_cleaner")]
#[command(about = "Batch cleanup for profile language and skill fields")]
#[command(version = "0.1.0")]
struct Cli {
    /// Alternate config file (config.toml is picked up by default)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize the languages field on stored profiles
    Languages {
        /// SQLite database holding the profile documents
        #[arg(long)]
        db: Option<PathBuf>,
        /// Table the profiles live in
        #[arg(long)]
        table: Option<String>,
        /// Only process profiles carrying this source tag
        #[arg(long)]
        source: Option<String>,
        /// Profiles fetched per batch
        #[arg(long)]
        batch_size: Option<u64>,
    },
    /// Deduplicate and sort a skills CSV column
    Skills {
        /// Input CSV with a `skills` column
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output CSV receiving the unique skills
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run both cleanups sequentially (languages, then skills)
    Run,
}

async fn run_language_cleanup(
    config: &Config,
    db: Option<PathBuf>,
    table: Option<String>,
    source: Option<String>,
    batch_size: Option<u64>,
) -> Result<CleanupReport, Box<dyn std::error::Error>> {
    let db_path = db.unwrap_or_else(|| PathBuf::from(&config.database.path));
    let table = table.unwrap_or_else(|| config.database.table.clone());
    let source = source.unwrap_or_else(|| config.database.source_filter.clone());
    let batch_size = batch_size.unwrap_or(config.database.batch_size);

    let store: Arc<dyn ProfileStore> =
        Arc::new(SqliteProfileStore::open_with_table(&db_path, &table)?);
    let cleanup = LanguageCleanup::new(store)
        .with_source(source)
        .with_batch_size(batch_size);
    Ok(cleanup.run().await)
}

fn print_language_report(report: &CleanupReport) {
    println!("\n📊 Language cleanup results:");
    println!("   Run id: {}", report.run_id);
    println!("   Updated profiles: {}", report.total_updates);
    println!("   Errors: {}", report.total_errors);
    println!("   Execution time: {:.2}s", report.execution_time);
    println!("   Status: {}", report.status);
    if let Some(error) = &report.error {
        println!("\n⚠️  Run aborted: {}", error);
    }
}

fn run_skills_job(config: &Config, input: Option<PathBuf>, output: Option<PathBuf>) {
    let input = input.unwrap_or_else(|| PathBuf::from(&config.skills.input));
    let output = output.unwrap_or_else(|| PathBuf::from(&config.skills.output));
    let normalizer = SkillNormalizer::new();

    match run_skills_cleanup(&input, &output, &normalizer) {
        Ok(report) => {
            println!("\n📊 Skills cleanup results:");
            println!("   Rows read: {}", report.total_rows);
            println!("   Unique skills: {}", report.unique_skills);
            println!("   Execution time: {:.2}s", report.execution_time);
            println!("   Output file: {}", report.output_file);
        }
        Err(e) => {
            error!("Skills cleanup failed: {}", e);
            println!("❌ Skills cleanup failed: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_required(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Languages {
            db,
            table,
            source,
            batch_size,
        } => {
            println!("🧹 Running language cleanup...");
            let report = run_language_cleanup(&config, db, table, source, batch_size).await?;
            print_language_report(&report);
        }
        Commands::Skills { input, output } => {
            println!("🧹 Running skills cleanup...");
            run_skills_job(&config, input, output);
        }
        Commands::Run => {
            println!("🚀 Running full cleanup (languages + skills)...");

            println!("\n📋 Step 1: Language cleanup...");
            let report = run_language_cleanup(&config, None, None, None, None).await?;
            print_language_report(&report);

            println!("\n📋 Step 2: Skills cleanup...");
            run_skills_job(&config, None, None);

            println!("\n✅ Full cleanup finished");
        }
    }
    Ok(())
}
