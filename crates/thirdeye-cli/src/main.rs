// ThirdEye CLI - anomaly tree explorer

mod render;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use thirdeye_anomaly::{load_config, AnomalyTreeClassifier, ClassifierConfig};
use thirdeye_auth::env::{ClientEnv, EnvOptions};
use thirdeye_auth::{logout, HttpAuthenticator, Session, SessionProvider};
use thirdeye_core::{AnomalyTree, ParsedView};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://localhost:1426";

#[derive(Parser)]
#[command(name = "thirdeye")]
#[command(version = "0.1.0")]
#[command(about = "Explore anomaly trees from the command line", long_about = None)]
struct Cli {
    /// Backend URL for the auth commands
    #[arg(short, long, env = "THIRDEYE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Classifier configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the root view of an exploration
    Root {
        /// Exploration (alert) id shown in the breadcrumb
        #[arg(short, long)]
        exploration_id: i64,

        /// Anomaly tree JSON as returned by the backend
        #[arg(short, long)]
        file: PathBuf,

        /// Print the view as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Drill into one anomaly of the tree
    Subtree {
        /// Anomaly id to drill into
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Exchange an OAuth authorization code for a session
    Login {
        #[arg(long)]
        code: String,
    },

    /// End a session
    Logout {
        /// Session token to attach to the logout page request
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Show the client environment read from .env
    Env {
        #[arg(short, long, default_value = ".env")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClassifierConfig::default(),
    };
    let classifier = AnomalyTreeClassifier::new(config);

    match cli.command {
        Commands::Root {
            exploration_id,
            file,
            json,
        } => {
            let tree = read_tree(&file)?;
            let view = classifier.parse_root(exploration_id, &tree);
            emit(&view, json)?;
        }
        Commands::Subtree { id, file, json } => {
            let tree = read_tree(&file)?;
            let view = classifier.parse_subtree(id, &tree)?;
            emit(&view, json)?;
        }
        Commands::Login { code } => {
            let auth = HttpAuthenticator::new(&cli.api_url);
            let session = auth.authenticate(&code).await?;
            println!("{} {}", "✓ Authenticated".green().bold(), session.token);
        }
        Commands::Logout { session } => {
            let auth = HttpAuthenticator::new(&cli.api_url);
            let session = session.map(Session::new);
            let headers = logout(&auth, session.as_ref()).await?;
            println!("{}", "✓ Logged out".green().bold());
            for (name, value) in &headers {
                println!("  {} {}", format!("{}:", name).dimmed(), value.to_str().unwrap_or("<binary>"));
            }
        }
        Commands::Env { path } => {
            let env = ClientEnv::load(&EnvOptions {
                path,
                ..Default::default()
            })?;
            for key in EnvOptions::default().allowed_keys {
                match env.get(&key) {
                    Some(value) => println!("{} = {}", key.cyan(), value),
                    None => println!("{} {}", key.cyan(), "(not set)".yellow()),
                }
            }
        }
    }

    Ok(())
}

fn read_tree(path: &PathBuf) -> Result<AnomalyTree, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let tree = AnomalyTree::from_json(&raw)?;
    info!(path = %path.display(), roots = tree.roots().len(), "loaded anomaly tree");
    Ok(tree)
}

fn emit(view: &ParsedView, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        render::print_view(view);
    }
    Ok(())
}
