//! Admin Finance console
//!
//! Command-line front end for the admin backend:
//! - Log in and out
//! - Dashboard with account counts and the growth chart
//! - Account list and account details

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use finadmin::config::{generate_default_config, Config};
use finadmin::render::{self, OutputFormat};
use finadmin::{
    AccountsView, ApiClient, DashboardView, DateDisplay, FileTokenStore, LocaleLabels,
    LoginOutcome,
};

#[derive(Parser)]
#[command(name = "finadmin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin Finance console")]
#[command(long_about = "Admin Finance console.\nLog in to the backend, review account statistics and browse accounts.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Password (default: FINADMIN_PASSWORD, then prompt)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show account counts and the growth chart
    Dashboard,

    /// List all accounts
    Accounts,

    /// Show details for one account
    Account {
        /// Account ID as shown in the account list
        id: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, warnings) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Vec::new()),
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    finadmin::logging::init(&config.logging);
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!("Backend: {}", config.api.base_url);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let tokens = Arc::new(FileTokenStore::new(&config.session.token_file));
    let client = ApiClient::new(config.api.client_config(), tokens)
        .context("Failed to create HTTP client")?;

    let ok = match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => read_password()?,
            };
            login(&client, &email, &password).await
        }

        Commands::Logout => {
            client.logout()?;
            println!("Logged out.");
            true
        }

        Commands::Dashboard => {
            let labels = LocaleLabels::from_name(&config.display.locale).unwrap_or_else(|e| {
                tracing::warn!("{}; using en_US", e);
                LocaleLabels::default()
            });

            eprintln!("{}", render::CHART_LOADING);
            let view = DashboardView::load(&client, chrono::Utc::now(), &labels).await;
            print!("{}", render::render_dashboard(&view, cli.format)?);
            !view.growth.is_failed()
        }

        Commands::Accounts => {
            eprintln!("{}", render::ACCOUNTS_LOADING);
            let view = AccountsView::load(&client).await;
            print!("{}", render::render_accounts(&view, cli.format)?);
            !view.accounts.is_failed()
        }

        Commands::Account { id } => {
            eprintln!("{}", render::ACCOUNTS_LOADING);
            let view = AccountsView::load(&client).await;
            let dates = DateDisplay::with_offset_minutes(config.display.timezone_offset_minutes);
            let detail = view.detail(&id, &dates);
            print!("{}", render::render_account_detail(&detail, cli.format)?);
            !detail.is_failed()
        }

        Commands::Config { .. } => true,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn login(client: &ApiClient, email: &str, password: &str) -> bool {
    match client.login(email, password).await {
        Ok(LoginOutcome::TokenStored) => {
            println!("Logged in as {}.", email);
            true
        }
        Ok(LoginOutcome::NoToken) => {
            println!("Logged in as {} (the server issued no token).", email);
            true
        }
        Err(e) => {
            tracing::debug!("Login failed: {}", e);
            eprintln!("{}", e.user_message());
            false
        }
    }
}

fn read_password() -> anyhow::Result<String> {
    if let Ok(password) = std::env::var("FINADMIN_PASSWORD") {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
