use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schemars::schema_for;
use tracing_subscriber::EnvFilter;

use meritmint_cli::certificate::render_certificate;
use meritmint_ipfs::{gateway_url, Web3StorageClient};
use meritmint_registry::catalog::{generate, StyleCatalog};
use meritmint_registry::error::RegistryError;
use meritmint_registry::mint::Minter;
use meritmint_registry::query;
use meritmint_registry::state::{
    AchievementDraft, AchievementRecord, DescriptionStyle, MintConfig, NftMetadata,
};
use meritmint_registry::storage::JsonFileStore;

#[derive(Parser)]
#[command(name = "meritmint")]
#[command(about = "Achievement registry: generate descriptions, mint records, query them")]
struct Cli {
    /// Path of the JSON-array store file.
    #[arg(
        long,
        global = true,
        env = "MERITMINT_STORE",
        default_value = "achievements_db.json"
    )]
    store: PathBuf,

    /// Emit machine-readable JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the canned description for a draft without minting.
    Generate {
        /// JSON draft file.
        #[arg(long)]
        draft: PathBuf,
        #[arg(long, default_value = "professional")]
        style: DescriptionStyle,
    },
    /// Generate (unless an edited description is given), mint and persist.
    Mint {
        #[arg(long)]
        draft: PathBuf,
        #[arg(long, default_value = "professional")]
        style: DescriptionStyle,
        /// User-edited description, overriding the generated one.
        #[arg(long)]
        description: Option<String>,
        #[arg(long, env = "WEB3_STORAGE_TOKEN", default_value = "", hide_env_values = true)]
        web3_token: String,
    },
    /// List records, optionally filtered by owner address.
    List {
        #[arg(long)]
        owner: Option<String>,
    },
    /// Show one record by token id.
    Show {
        #[arg(long)]
        token_id: String,
    },
    /// Render the printable HTML certificate for one record.
    Certificate {
        #[arg(long)]
        token_id: String,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the JSON Schemas of the wire types.
    Schema,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("draft file {path}: {reason}")]
    Draft { path: PathBuf, reason: String },

    #[error("{0}")]
    Io(String),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Registry(err) => match err {
                RegistryError::Validation { .. } => 3,
                RegistryError::Conflict { .. } | RegistryError::Busy => 4,
                RegistryError::StorageUnavailable { .. } => 5,
                RegistryError::NotFound { .. } => 6,
            },
            Self::Draft { .. } => 3,
            Self::Io(_) => 10,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = JsonFileStore::new(&cli.store);
    let catalog = StyleCatalog::default();

    match cli.command {
        Commands::Generate { draft, style } => {
            let draft = load_draft(&draft)?;
            let description = generate(&draft, style, &catalog)?;
            if cli.json {
                println!("{}", serde_json::json!({ "description": description }));
            } else {
                println!("{description}");
            }
        }
        Commands::Mint {
            draft,
            style,
            description,
            web3_token,
        } => {
            let draft = load_draft(&draft)?;
            let description = match description {
                Some(text) => text,
                None => generate(&draft, style, &catalog)?,
            };
            let minter = Minter::new(Web3StorageClient::new(web3_token), MintConfig::default());
            let record = minter.mint(&store, &draft, &description)?;
            print_receipt(&record, cli.json)?;
        }
        Commands::List { owner } => {
            let records = match owner {
                Some(address) => query::list_by_owner(&store, &address)?,
                None => query::list_achievements(&store)?,
            };
            if cli.json {
                println!("{}", to_json(&records)?);
            } else if records.is_empty() {
                println!("no achievements");
            } else {
                for record in &records {
                    println!(
                        "{:<8} {:<30} {:<44} {}",
                        record.token_id,
                        record.name,
                        record.owner,
                        record.minted_at.format("%Y-%m-%d"),
                    );
                }
            }
        }
        Commands::Show { token_id } => {
            let record = query::get_achievement(&store, &token_id)?;
            if cli.json {
                println!("{}", to_json(&record)?);
            } else {
                print_record(&record);
            }
        }
        Commands::Certificate { token_id, out } => {
            let record = query::get_achievement(&store, &token_id)?;
            let html = render_certificate(&record);
            match out {
                Some(path) => fs::write(&path, html)
                    .map_err(|e| CliError::Io(format!("write {}: {e}", path.display())))?,
                None => print!("{html}"),
            }
        }
        Commands::Schema => {
            let schemas = serde_json::json!({
                "draft": schema_for!(AchievementDraft),
                "record": schema_for!(AchievementRecord),
                "metadata": schema_for!(NftMetadata),
            });
            println!("{}", to_json(&schemas)?);
        }
    }
    Ok(())
}

fn load_draft(path: &PathBuf) -> Result<AchievementDraft, CliError> {
    let raw = fs::read_to_string(path).map_err(|e| CliError::Draft {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| CliError::Draft {
        path: path.clone(),
        reason: e.to_string(),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Io(e.to_string()))
}

fn print_receipt(record: &AchievementRecord, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", to_json(record)?);
        return Ok(());
    }
    println!("minted token {}", record.token_id);
    println!("  transaction {}", record.transaction_hash);
    if let Some(cid) = &record.ipfs_hash {
        println!("  metadata    {cid}");
        println!("  gateway     {}", gateway_url(cid));
    }
    Ok(())
}

fn print_record(record: &AchievementRecord) {
    println!("{} (token {})", record.name, record.token_id);
    println!("{}", record.description);
    for attribute in &record.attributes {
        println!("  {}: {}", attribute.trait_type, attribute.value);
    }
    println!("owner {}", record.owner);
    println!("minted {}", record.minted_at.to_rfc3339());
    println!("transaction {}", record.transaction_hash);
    if let Some(cid) = &record.ipfs_hash {
        println!("metadata {cid}");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("MERITMINT_LOG_JSON").is_ok() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}
