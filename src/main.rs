//! Zodiac CLI
//!
//! Command-line interface for the zodiac fortune teller:
//! - Register, log in and out
//! - Read the daily fortune for a sign
//! - Chat with the oracle
//! - Check backend status

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zodiac_oracle::config::{expand_home, generate_default_config, Config, LoggingConfig};
use zodiac_oracle::session::FileStorage;
use zodiac_oracle::view::{AuthTab, NavTab};
use zodiac_oracle::{ApiClient, App, TextRenderer, ZodiacSign, ZodiacTable};

#[derive(Parser)]
#[command(name = "zodiac")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily zodiac fortunes and a chat with the oracle")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the config
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign in
    Login {
        username: String,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show backend status
    Status,

    /// List the zodiac signs
    Signs,

    /// Show today's fortune for a sign
    Fortune {
        /// Sign key or name, e.g. "leo"
        sign: String,
    },

    /// Chat with the oracle
    Chat {
        /// Sign to chat as
        #[arg(short, long)]
        sign: Option<String>,
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

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let (mut config, report) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let (config, report) = Config::discover();
            (config, Some(report))
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);
    if let Some(report) = report {
        report.log();
    }
    tracing::debug!(base_url = %config.api.base_url, "Zodiac v{}", env!("CARGO_PKG_VERSION"));

    let table = match &config.fortune.table_path {
        Some(path) => ZodiacTable::from_path(&expand_home(path))?,
        None => ZodiacTable::builtin()?,
    };
    let session_path = config.storage.session_path();
    let storage = FileStorage::open(&session_path).unwrap_or_else(|e| {
        tracing::warn!("Session storage unavailable, starting signed out: {}", e);
        FileStorage::empty(&session_path)
    });
    let backend = Arc::new(ApiClient::new(&config.api)?);

    let mut app = App::new(backend, storage, table);
    let signed_in = app.start();
    let renderer = TextRenderer::new();

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            app.select_auth_tab(AuthTab::Register);
            if !app.submit_register(&username, &email, &password).await {
                bail!("{}", app.view().register_error.clone().unwrap_or_default());
            }
            print_greeting(&app);
        }

        Commands::Login { username, password } => {
            let password = password_or_prompt(password)?;
            if !app.submit_login(&username, &password).await {
                bail!("{}", app.view().login_error.clone().unwrap_or_default());
            }
            print_greeting(&app);
        }

        Commands::Logout => {
            app.logout();
            println!("Logged out");
        }

        Commands::Whoami => {
            require_sign_in(signed_in)?;
            match app.refresh_user().await {
                Ok(user) => {
                    println!("{}", user.username);
                    if let Some(email) = &user.email {
                        println!("  email:    {}", email);
                    }
                    if let Some(created) = &user.created_at {
                        println!("  joined:   {}", created);
                    }
                    if let Some(verified) = user.is_verified {
                        println!("  verified: {}", verified);
                    }
                }
                Err(e) => {
                    tracing::warn!("Profile refresh failed: {}", e);
                    let username = app.session().user().map(|u| u.username.clone()).unwrap_or_default();
                    println!("{} (offline: {})", username, e);
                }
            }
        }

        Commands::Status => {
            let health = app.health().await.context("Backend is not reachable")?;
            println!("Backend:  {}", config.api.base_url);
            println!("Status:   {}", health.status);
            if let Some(message) = health.message {
                println!("Message:  {}", message);
            }
            if let Some(db) = health.database_connected {
                println!("Database: {}", if db { "connected" } else { "disconnected" });
            }
            if let Some(key) = health.has_api_key {
                println!("AI key:   {}", if key { "configured" } else { "missing" });
            }
            println!("Signed in: {}", signed_in);
        }

        Commands::Signs => {
            print!("{}", renderer.render_selection(app.table()));
        }

        Commands::Fortune { sign } => {
            require_sign_in(signed_in)?;
            let sign: ZodiacSign = sign.parse()?;
            let fortune = app.select_sign(sign);
            print!("{}", renderer.render_fortune(fortune));
        }

        Commands::Chat { sign } => {
            require_sign_in(signed_in)?;
            if let Some(sign) = sign {
                app.set_chat_sign(sign.parse()?);
            }
            run_chat(&mut app, &renderer).await?;
        }

        // Written before the config was loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("zodiac={0},zodiac_oracle={0}", config.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }
    Ok(())
}

fn require_sign_in(signed_in: bool) -> anyhow::Result<()> {
    if !signed_in {
        bail!("Not logged in. Run `zodiac login <username>` first.");
    }
    Ok(())
}

fn print_greeting(app: &App<FileStorage>) {
    if let Some(greeting) = &app.view().greeting {
        println!("{}", greeting);
    }
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

const CHAT_HELP: &str = "Commands: /sign <name> to change sign, /clear to start over, /quit to leave";

async fn run_chat(app: &mut App<FileStorage>, renderer: &TextRenderer) -> anyhow::Result<()> {
    app.switch_tab(NavTab::Chat);
    print!("{}", renderer.render_chat(&app.view().chat));
    println!("{}", CHAT_HELP);
    if let Some(sign) = app.current_sign() {
        println!("Chatting as {}", sign);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => println!("{}", CHAT_HELP),
            "/clear" => {
                print!("Clear the conversation? [y/N] ");
                std::io::stdout().flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if answer.trim().eq_ignore_ascii_case("y") {
                    app.clear_chat().await;
                    print!("{}", renderer.render_chat(&app.view().chat));
                }
            }
            command if command.starts_with("/sign") => {
                match command.trim_start_matches("/sign").trim().parse::<ZodiacSign>() {
                    Ok(sign) => {
                        app.set_chat_sign(sign);
                        println!("Chatting as {}", app.current_sign().unwrap_or_default());
                    }
                    Err(e) => println!("{}", e),
                }
            }
            _ => {
                let shown = app.view().chat.messages.len();
                if let Some(message) = app.begin_send(&line) {
                    print!("{}", renderer.render_typing());
                    std::io::stdout().flush()?;

                    app.complete_send(message).await;

                    // Skip the echo of what was just typed
                    for message in app.view().chat.messages.iter().skip(shown + 1) {
                        print!("{}", renderer.render_message(message));
                    }
                }
            }
        }
    }

    Ok(())
}
