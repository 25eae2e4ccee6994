mod config;
mod favorites_cmds;
mod generate_cmd;
mod render;
mod session;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use tinysparks_core::AgeGroup;

use config::SparksConfig;

#[derive(Parser)]
#[command(
    name = "tinysparks",
    about = "Age-appropriate play activity plans for babies and young children"
)]
struct Cli {
    /// Gemini API key (overrides TINYSPARKS_API_KEY / GEMINI_API_KEY / API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Directory holding favorites and the last plan (overrides TINYSPARKS_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a tinysparks config file (stores the global --api-key if given)
    Init {
        /// Model to request (default: gemini-2.5-flash)
        #[arg(long)]
        model: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a new nine-activity play plan
    Generate {
        /// Age group slug or label (see `tinysparks age-groups`)
        #[arg(long, default_value = "toddler-young")]
        age: AgeGroup,
        /// Interests or themes, e.g. "dinosaurs, water"
        #[arg(long)]
        interests: Option<String>,
        /// Materials available at home, e.g. "cardboard boxes, crayons"
        #[arg(long)]
        materials: Option<String>,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the most recently generated plan
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Favorite activity management
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// List supported age groups
    AgeGroups,
    /// Print a shell completion script
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List saved activities
    List {
        /// Print favorites as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save or unsave an activity from the current plan or favorites
    Toggle {
        /// Activity ID
        id: String,
    },
    /// Show every detail of one activity
    Show {
        /// Activity ID
        id: String,
    },
}

/// Execute the `tinysparks init` command: write config file.
fn cmd_init(api_key: Option<&str>, model: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        gemini: config::GeminiSection {
            api_key: api_key.map(str::to_owned),
            model: model.map(str::to_owned),
            base_url: None,
        },
        storage: config::StorageSection::default(),
    };

    config::save_config_to(&path, &cfg)?;

    println!("Config written to {}", path.display());
    match api_key {
        Some(key) => println!("  gemini.api_key = {}", mask_key(key)),
        None => {
            println!("  gemini.api_key not set (export GEMINI_API_KEY or re-run with --api-key)")
        }
    }
    if let Some(model) = model {
        println!("  gemini.model = {model}");
    }
    println!();
    println!("Next: run `tinysparks generate --age toddler-young` to create a plan.");

    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { model, force } => {
            cmd_init(cli.api_key.as_deref(), model.as_deref(), force)?;
        }
        Commands::Generate {
            age,
            interests,
            materials,
            json,
        } => {
            let resolved = SparksConfig::resolve(cli.api_key.as_deref(), cli.data_dir.as_deref())?;
            let mut session = session::open_session(&resolved)?;
            generate_cmd::run_generate(&mut session, age, interests, materials, json).await?;
        }
        Commands::Plan { json } => {
            let resolved = SparksConfig::resolve(cli.api_key.as_deref(), cli.data_dir.as_deref())?;
            let session = session::open_session(&resolved)?;
            generate_cmd::run_plan(&session, json)?;
        }
        Commands::Favorites { command } => {
            let resolved = SparksConfig::resolve(cli.api_key.as_deref(), cli.data_dir.as_deref())?;
            let mut session = session::open_session(&resolved)?;
            favorites_cmds::run_favorites_command(command, &mut session)?;
        }
        Commands::AgeGroups => {
            generate_cmd::run_age_groups();
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "tinysparks",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
