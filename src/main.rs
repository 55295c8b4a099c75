use anyhow::{bail, Context, Result};
use clap::Parser;
use philosophy_journal::config::{Config, Env};
use philosophy_journal::journal;
use philosophy_journal::pipeline::Pipeline;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "philosophy-journal")]
#[command(about = "Run the multi-language philosophy pipeline", long_about = None)]
struct Args {
    /// Your philosophical question (English)
    #[arg(value_name = "QUESTION")]
    question: Option<String>,

    /// Read the question from a text file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Do not call the API; produce mock outputs
    #[arg(long)]
    dry_run: bool,

    /// Enable Russian for this run even if disabled in config
    #[arg(long)]
    with_ru: bool,

    /// Enable Japanese for this run even if disabled in config
    #[arg(long)]
    with_ja: bool,

    /// Path to config file
    #[arg(long, value_name = "PATH", default_value = "config.yaml")]
    config: PathBuf,
}

/// The question from the argument, or else from `--file`
fn load_question(question: Option<&str>, file: Option<&Path>) -> Result<String> {
    let question = match (question, file) {
        (Some(q), _) => q.trim().to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read question file {}", path.display()))?
            .trim()
            .to_string(),
        (None, None) => bail!("No question provided. Pass a string or --file path."),
    };

    if question.is_empty() {
        bail!("The question is empty.");
    }
    Ok(question)
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(&args.config)?;

    for (requested, code) in [(args.with_ru, "ru"), (args.with_ja, "ja")] {
        if requested && !config.force_enable(code) {
            warn!("--with-{} given but '{}' is not in the language list", code, code);
        }
    }

    Ok(config)
}

fn setup(args: &Args) -> Result<(String, Pipeline)> {
    let question = load_question(args.question.as_deref(), args.file.as_deref())?;
    let config = load_config(args)?;
    let pipeline = Pipeline::new(config, &Env::from_env(), args.dry_run)?;
    Ok((question, pipeline))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("philosophy_journal=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let (question, pipeline) = match setup(&args) {
        Ok(setup) => setup,
        Err(e) => {
            error!("{:#}", e);
            return Ok(ExitCode::from(1));
        }
    };

    info!(
        "Starting run ({} languages, dry run: {})",
        pipeline.config().enabled_languages().count(),
        pipeline.is_dry_run()
    );

    let saved = pipeline
        .run(&question)
        .await
        .and_then(|result| journal::save(&result, &pipeline.config().output_dir));

    match saved {
        Ok(path) => {
            println!("Saved journal → {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{:#}", e);
            Ok(ExitCode::from(2))
        }
    }
}
