use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;

use humg_backend::corpus::{collect_input_files, run};
use humg_backend::logger;
use humg_backend::{Dialect, NormalizationForm, RunConfig};
use humg_cli::export::{write_github_envs, write_json, CorpusSummary, DEFAULT_ENVS_FILE};
use humg_cli::report::{render_report, ReportOptions};

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(about = "Count lines, regions and characters in ALTO or PAGE XML files")]
struct Cli {
    /// XML files, or directories searched for *.xml files
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Also report character counts
    #[arg(short = 'c', long = "chars", default_value_t = false)]
    chars: bool,

    /// Also report line and region counts per directory
    #[arg(short = 'g', long = "group", default_value_t = false)]
    group: bool,

    /// XML dialect of the input files (alto, page)
    #[arg(long, value_name = "DIALECT", default_value = "alto", env = "HUMG_PARSE")]
    parse: Dialect,

    /// Unicode normalization applied before counting characters (none, NFC, NFKC, NFD, NFKD)
    #[arg(long, value_name = "FORM", default_value = "none", env = "HUMG_NORMALIZE")]
    normalize: NormalizationForm,

    /// Write HTRUNITED_* variables to envs.txt
    #[arg(long, default_value_t = false)]
    github_envs: bool,

    /// Write HTRUNITED_* variables to PATH instead of envs.txt
    #[arg(long, value_name = "PATH")]
    github_envs_path: Option<PathBuf>,

    /// Write the summary as JSON to PATH
    #[arg(long, value_name = "PATH")]
    to_json: Option<PathBuf>,

    /// Log and skip files that cannot be parsed instead of stopping
    #[arg(long, default_value_t = false)]
    skip_malformed: bool,

    /// Label elements without TAGREFS through a declared #### tag, if any
    #[arg(long, default_value_t = false)]
    sentinel_lookup: bool,
}

impl Cli {
    /// Destination of the environment file, if one was requested.
    fn envs_path(&self) -> Option<PathBuf> {
        match (&self.github_envs_path, self.github_envs) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(PathBuf::from(DEFAULT_ENVS_FILE)),
            (None, false) => None,
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = RunConfig {
        dialect: cli.parse,
        normalization: cli.normalize,
        group_by_directory: cli.group,
        skip_malformed: cli.skip_malformed,
        sentinel_lookup: cli.sentinel_lookup,
    };

    let files = collect_input_files(&cli.files)?;
    let aggregation = run(&config, &files)?;
    let summary = CorpusSummary::from_aggregation(&aggregation);

    print!("{}", render_report(&aggregation, &summary, ReportOptions { chars: cli.chars }));

    if let Some(path) = cli.envs_path() {
        write_github_envs(&path, &summary)?;
        logger::info(&format!("Wrote environment variables to {:?}", path));
    }

    if let Some(path) = cli.to_json {
        write_json(&path, &summary)?;
        logger::info(&format!("Wrote JSON summary to {:?}", path));
    }

    Ok(())
}

fn main() {
    // .env may set LOG_LEVEL, HUMG_PARSE and HUMG_NORMALIZE before clap reads them.
    let dotenv_found = dotenv().is_ok();

    let cli = Cli::parse();

    logger::init_once(logger::level_from_env());
    if !dotenv_found {
        logger::debug("No .env file found or failed to load.");
    }

    if let Err(e) = execute(cli) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}
