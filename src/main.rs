mod summary;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use courier_core::{
    config,
    params::{InputFile, Params},
    update::Update,
};
use courier_telegram::{Bot, PollOptions};
use std::io::Read;

#[derive(Parser)]
#[command(
    name = "courier",
    version,
    about = "Courier: Telegram Bot API client"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Bot token; overrides `bot.token` from the config file.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the bot's own account (getMe).
    Me,
    /// Fetch one batch of updates.
    Poll {
        /// First update_id to fetch.
        #[arg(long, default_value_t = 0)]
        offset: i64,
        /// Maximum updates to fetch (defaults to `polling.limit`).
        #[arg(long)]
        limit: Option<u32>,
        /// Long-poll hold in seconds (defaults to `polling.timeout`).
        #[arg(long)]
        timeout: Option<u32>,
        /// Leave the batch unacknowledged.
        #[arg(long)]
        no_advance: bool,
    },
    /// Call any Bot API method.
    Call {
        /// Method name, e.g. sendMessage.
        endpoint: String,
        /// Parameters as key=value; a value of @path uploads that file.
        params: Vec<String>,
        /// Send a plain GET without parameters.
        #[arg(long)]
        get: bool,
    },
    /// Download a file by its Telegram file_path.
    Download {
        /// file_path as returned by getFile.
        file_path: String,
        /// Local destination.
        dest: String,
    },
    /// Manage the webhook registration.
    Webhook {
        #[command(subcommand)]
        action: WebhookAction,
    },
    /// Classify an update read from FILE or stdin (offline).
    Classify {
        file: Option<String>,
    },
}

#[derive(Subcommand)]
enum WebhookAction {
    /// Register a webhook URL.
    Set {
        url: String,
        /// Self-signed public certificate to upload.
        #[arg(long)]
        certificate: Option<String>,
    },
    /// Remove the webhook and return to getUpdates.
    Delete,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.courier.log_level)),
        )
        .init();

    // No network needed.
    if let Commands::Classify { file } = &cli.command {
        let body = read_input(file.as_deref())?;
        let update = Update::from_slice(&body)?;
        println!("{}", summary::describe(&update));
        return Ok(());
    }

    if let Some(token) = cli.token {
        cfg.bot.token = token;
    }
    if cfg.bot.token.trim().is_empty() {
        anyhow::bail!(
            "no bot token. Set bot.token in {}, TELEGRAM_BOT_TOKEN, or --token.",
            cli.config
        );
    }
    let mut bot = Bot::new(&cfg.bot)?;

    match cli.command {
        Commands::Me => print_json(&bot.get_me().await)?,
        Commands::Poll {
            offset,
            limit,
            timeout,
            no_advance,
        } => {
            let mut options = PollOptions::default()
                .offset(offset)
                .limit(limit.unwrap_or(cfg.polling.limit))
                .timeout(timeout.unwrap_or(cfg.polling.timeout));
            if no_advance {
                options = options.no_advance();
            }
            let batch = bot.poll(options).await;
            if !batch.is_ok() {
                anyhow::bail!(
                    "getUpdates failed: {}",
                    batch.description().unwrap_or("no description")
                );
            }
            if batch.is_empty() {
                println!("no updates");
            }
            for update in &batch {
                println!("{}", summary::line(update));
            }
            if let Some(next) = bot.next_offset() {
                println!("next offset: {next}");
            }
        }
        Commands::Call {
            endpoint,
            params,
            get,
        } => {
            let params = Params::from_pairs(&params)?;
            print_json(&bot.call(&endpoint, params, !get).await)?;
        }
        Commands::Download { file_path, dest } => {
            let bytes = bot
                .download_file(&file_path, &dest)
                .await
                .with_context(|| format!("downloading {file_path}"))?;
            println!("saved {bytes} bytes to {dest}");
        }
        Commands::Webhook { action } => {
            let reply = match action {
                WebhookAction::Set { url, certificate } => {
                    bot.set_webhook(&url, certificate.map(InputFile::new)).await
                }
                WebhookAction::Delete => bot.delete_webhook().await,
            };
            print_json(&reply)?;
        }
        // Handled above.
        Commands::Classify { .. } => {}
    }

    Ok(())
}

fn read_input(file: Option<&str>) -> anyhow::Result<Vec<u8>> {
    match file {
        Some(path) if path != "-" => {
            std::fs::read(path).with_context(|| format!("reading {path}"))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
