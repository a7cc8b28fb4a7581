use anyhow::Result;
use clap::{Parser, Subcommand};
use deptrawl::{
    config::Config,
    convert,
    extract::extract_all,
    gitlab::GitlabClient,
    model::ExtractResult,
    output::{self, OutputFormat},
    parser::all_parsers,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "deptrawl")]
#[command(
    author,
    version,
    about = "Harvest dependency manifests from GitLab projects into purl/CPE records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate projects and extract dependency manifests
    Extract {
        /// GitLab base URL (overrides config)
        #[arg(long)]
        gitlab_url: Option<String>,

        /// API token (overrides GITLAB_TOKEN and config)
        #[arg(long)]
        token: Option<String>,

        /// Git ref to fetch files from (overrides config)
        #[arg(long)]
        git_ref: Option<String>,

        /// Output format for stdout (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Path for the JSON artifact (overrides config)
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Path for the CSV artifact (overrides config)
        #[arg(long)]
        csv_out: Option<PathBuf>,

        /// Extract projects sequentially instead of concurrently
        #[arg(long)]
        no_parallel: bool,
    },

    /// Search all projects for a keyword and export the matches
    Search {
        /// Keyword to search for (falls back to config search_term)
        term: Option<String>,

        /// GitLab base URL (overrides config)
        #[arg(long)]
        gitlab_url: Option<String>,

        /// API token (overrides GITLAB_TOKEN and config)
        #[arg(long)]
        token: Option<String>,

        /// Output format for stdout (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Path for the JSON artifact (overrides config)
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Path for the CSV artifact (overrides config)
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },

    /// Convert a vulnerability-scan CSV into CPE identifiers
    Cpe {
        /// Input CSV with Vendor, Software, Version columns
        input: PathBuf,

        /// Output format for stdout (table, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Path for the JSON artifact (overrides config)
        #[arg(long)]
        json_out: Option<PathBuf>,

        /// Path for the CSV artifact (overrides config)
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },

    /// List the manifest files checked in each project
    ListManifests,

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Commands::Extract {
            gitlab_url,
            token,
            git_ref,
            format,
            json_out,
            csv_out,
            no_parallel,
        } => {
            run_extract(
                &config,
                gitlab_url,
                token,
                git_ref,
                format,
                json_out,
                csv_out,
                no_parallel,
            )
            .await
        }
        Commands::Search {
            term,
            gitlab_url,
            token,
            format,
            json_out,
            csv_out,
        } => run_search(&config, term, gitlab_url, token, format, json_out, csv_out).await,
        Commands::Cpe {
            input,
            format,
            json_out,
            csv_out,
        } => run_cpe(&config, &input, format, json_out, csv_out),
        Commands::ListManifests => {
            list_manifests();
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_extract(
    config: &Config,
    gitlab_url: Option<String>,
    token: Option<String>,
    git_ref: Option<String>,
    format: Option<String>,
    json_out: Option<PathBuf>,
    csv_out: Option<PathBuf>,
    no_parallel: bool,
) -> Result<u8> {
    let format = parse_format(config, format)?;
    let is_interactive = format == OutputFormat::Table;

    let base_url = gitlab_url.unwrap_or_else(|| config.gitlab_url.clone());
    let git_ref = git_ref.unwrap_or_else(|| config.git_ref.clone());
    let token = config.resolve_token(token);
    let client = GitlabClient::new(&base_url, token, &git_ref);

    let projects = client.list_projects().await?;
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(exit_codes::SUCCESS);
    }

    info!(count = projects.len(), "extracting dependencies");

    let progress = if is_interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!(
            "Extracting dependencies from {} repositories...",
            projects.len()
        ));
        Some(pb)
    } else {
        None
    };

    let concurrency = if no_parallel { 1 } else { config.concurrency };
    let records = extract_all(&client, &projects, concurrency).await;

    if let Some(pb) = progress {
        pb.finish_with_message(format!("Found {} dependencies", records.len()));
    }

    let result = ExtractResult::new(projects.len(), records);

    if result.records.is_empty() {
        println!("No dependencies found.");
        return Ok(exit_codes::SUCCESS);
    }

    let json_path = json_out.unwrap_or_else(|| config.outputs.deps_json.clone());
    let csv_path = csv_out.unwrap_or_else(|| config.outputs.deps_csv.clone());
    output::write_artifacts(&json_path, &csv_path, &result.records)?;

    match format {
        OutputFormat::Table => {
            output::print_extract_table(&result);
            println!();
            println!(
                "Results saved to {} and {}",
                json_path.display(),
                csv_path.display()
            );
        }
        OutputFormat::Json => output::print_json(&result.records)?,
    }

    Ok(exit_codes::SUCCESS)
}

async fn run_search(
    config: &Config,
    term: Option<String>,
    gitlab_url: Option<String>,
    token: Option<String>,
    format: Option<String>,
    json_out: Option<PathBuf>,
    csv_out: Option<PathBuf>,
) -> Result<u8> {
    let format = parse_format(config, format)?;

    let term = term
        .or_else(|| config.search_term.clone())
        .ok_or_else(|| anyhow::anyhow!("no search term given (argument or config search_term)"))?;

    let base_url = gitlab_url.unwrap_or_else(|| config.gitlab_url.clone());
    let token = config.resolve_token(token);
    let client = GitlabClient::new(&base_url, token, &config.git_ref);

    let hits = client.search_blobs(&term).await?;

    let json_path = json_out.unwrap_or_else(|| config.outputs.search_json.clone());
    let csv_path = csv_out.unwrap_or_else(|| config.outputs.search_csv.clone());
    output::write_artifacts(&json_path, &csv_path, &hits)?;

    match format {
        OutputFormat::Table => {
            output::print_search_table(&hits);
            println!();
            println!(
                "Results saved to {} and {}",
                json_path.display(),
                csv_path.display()
            );
        }
        OutputFormat::Json => output::print_json(&hits)?,
    }

    Ok(exit_codes::SUCCESS)
}

fn run_cpe(
    config: &Config,
    input: &PathBuf,
    format: Option<String>,
    json_out: Option<PathBuf>,
    csv_out: Option<PathBuf>,
) -> Result<u8> {
    let format = parse_format(config, format)?;

    let rows = convert::convert_file(input)?;

    let json_path = json_out.unwrap_or_else(|| config.outputs.cpe_json.clone());
    let csv_path = csv_out.unwrap_or_else(|| config.outputs.cpe_csv.clone());
    output::write_artifacts(&json_path, &csv_path, &rows)?;

    match format {
        OutputFormat::Table => {
            output::print_cpe_table(&rows);
            println!();
            println!(
                "CPE data saved to {} and {}",
                json_path.display(),
                csv_path.display()
            );
        }
        OutputFormat::Json => output::print_json(&rows)?,
    }

    Ok(exit_codes::SUCCESS)
}

fn parse_format(config: &Config, flag: Option<String>) -> Result<OutputFormat> {
    let format_str = flag.unwrap_or_else(|| config.default_format.clone());
    OutputFormat::from_str(&format_str).map_err(|e| anyhow::anyhow!(e))
}

fn list_manifests() {
    println!("Manifest files checked in each project:");
    println!();

    for parser in all_parsers() {
        println!(
            "  {:<20} ecosystem: {}",
            parser.manifest_path(),
            parser.ecosystem()
        );
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'deptrawl config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
