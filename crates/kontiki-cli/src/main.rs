//! kontiki-docs: command-line client for a site's compliance documents.
//!
//! Set KONTIKI_API_URL and KONTIKI_API_TOKEN (Bearer) or KONTIKI_API_KEY (X-API-Key).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kontiki_api_client::ApiClient;
use kontiki_cli::init_tracing;
use kontiki_cli::output::{
    print_json, print_notification, render_categories, render_folder, render_folders,
    render_summary, OutputFormat,
};
use kontiki_core::{CategoryGroup, CategoryRegistry, ClientConfig, UploadFile};
use kontiki_repository::{DocumentRepository, Notification, RepositorySession};

/// Exit code for `status` when required documents are missing.
const EXIT_INCOMPLETE: u8 = 2;

#[derive(Parser)]
#[command(name = "kontiki-docs", about = "Site compliance document repository")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List document categories
    Categories {
        /// Only this group: compliance, training, internal
        #[arg(long)]
        group: Option<CategoryGroup>,
    },
    /// List every folder of a site with file counts
    Folders {
        /// Site ID
        #[arg(long)]
        site: String,
    },
    /// List the files in one folder
    Folder {
        /// Site ID
        #[arg(long)]
        site: String,
        /// Category ID, e.g. training-video
        #[arg(long)]
        category: String,
    },
    /// Upload files into a folder
    Upload {
        /// Site ID
        #[arg(long)]
        site: String,
        /// Category ID, e.g. training-video
        #[arg(long)]
        category: String,
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete a document by ID
    Delete {
        /// Site ID
        #[arg(long)]
        site: String,
        /// Document ID
        document_id: String,
    },
    /// Show which required documents are missing (exit code 2 when incomplete)
    Status {
        /// Site ID
        #[arg(long)]
        site: String,
    },
}

fn open_repository() -> anyhow::Result<DocumentRepository> {
    let config = ClientConfig::from_env().context(
        "Failed to load configuration. Set KONTIKI_API_URL and KONTIKI_API_TOKEN or KONTIKI_API_KEY",
    )?;
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;
    let session = RepositorySession::from_config(Arc::new(client), &config);
    Ok(DocumentRepository::new(Arc::new(session)))
}

fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<UploadFile>> {
    paths
        .iter()
        .map(|path| {
            UploadFile::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect()
}

/// Print a failed action and turn it into the process exit code.
fn report_failure(notification: Notification, format: OutputFormat) -> anyhow::Result<ExitCode> {
    print_notification(&notification, format)?;
    Ok(ExitCode::FAILURE)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Categories { group } => {
            let registry = CategoryRegistry::builtin();
            let categories = match group {
                Some(group) => registry.in_group(group),
                None => registry.all_categories().to_vec(),
            };
            match format {
                OutputFormat::Json => print_json(&categories)?,
                OutputFormat::Table => println!("{}", render_categories(&categories)),
            }
        }
        Commands::Folders { site } => {
            let repo = open_repository()?;
            let folders = match repo.refresh(&site).await {
                Ok(folders) => folders,
                Err(notification) => return report_failure(notification, format),
            };
            match format {
                OutputFormat::Json => print_json(&folders)?,
                OutputFormat::Table => println!("{}", render_folders(&site, &folders)),
            }
        }
        Commands::Folder { site, category } => {
            let repo = open_repository()?;
            if let Err(notification) = repo.refresh(&site).await {
                return report_failure(notification, format);
            }
            let folder = match repo.get_folder_view(&category) {
                Ok(folder) => folder,
                Err(notification) => return report_failure(notification, format),
            };
            match format {
                OutputFormat::Json => print_json(&folder)?,
                OutputFormat::Table => println!("{}", render_folder(&folder)),
            }
        }
        Commands::Upload {
            site,
            category,
            files,
        } => {
            let files = read_files(&files)?;
            tracing::debug!(site = %site, category = %category, files = files.len(), "Read files for upload");
            let repo = open_repository()?;
            if let Err(notification) = repo.refresh(&site).await {
                return report_failure(notification, format);
            }
            match repo.upload(&category, &files).await {
                Ok(notification) => print_notification(&notification, format)?,
                Err(notification) => return report_failure(notification, format),
            }
        }
        Commands::Delete { site, document_id } => {
            let repo = open_repository()?;
            if let Err(notification) = repo.refresh(&site).await {
                return report_failure(notification, format);
            }
            match repo.delete(&document_id).await {
                Ok(notification) => print_notification(&notification, format)?,
                Err(notification) => return report_failure(notification, format),
            }
        }
        Commands::Status { site } => {
            let repo = open_repository()?;
            if let Err(notification) = repo.refresh(&site).await {
                return report_failure(notification, format);
            }
            let summary = repo.session().compliance_summary();
            match format {
                OutputFormat::Json => print_json(&summary)?,
                OutputFormat::Table => println!("{}", render_summary(&summary)),
            }
            if !summary.is_complete() {
                return Ok(ExitCode::from(EXIT_INCOMPLETE));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
