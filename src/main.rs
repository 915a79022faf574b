//! Creator's Hub Assistant
//!
//! Interactive terminal chat client, standing in for the site's floating
//! widget. Reads user lines, dispatches them through the pipeline, and
//! prints replies. `/key <value>` saves a credential, `/status` reports
//! whether the remote assistant is reachable, `/quit` exits.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use creators_hub_assistant::config::Config;
use creators_hub_assistant::credentials::{CredentialResolver, CredentialStore};
use creators_hub_assistant::dispatcher::Dispatcher;
use creators_hub_assistant::fallback::FallbackResponder;
use creators_hub_assistant::persona;
use creators_hub_assistant::session::{GeminiSessionFactory, SessionManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(store = %config.credential_store_path.display(), model = %config.gemini.model, "Configuration loaded");

    let resolver = CredentialResolver::new(
        CredentialStore::new(config.credential_store_path.clone()),
        config.gemini.api_key.clone(),
    );
    let sessions = Arc::new(SessionManager::new(
        resolver,
        Box::new(GeminiSessionFactory::new(config.gemini.clone())),
    ));
    let dispatcher = Dispatcher::new(Arc::clone(&sessions), FallbackResponder::new());

    let mut stdout = tokio::io::stdout();
    let mode = if sessions.is_online().await {
        "online"
    } else {
        "standard mode (no API key; answering from the rule table)"
    };
    stdout
        .write_all(
            format!(
                "{}\n[{}] Type a message, or /key <value>, /status, /quit.\n",
                persona::GREETING,
                mode
            )
            .as_bytes(),
        )
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input == "/quit" {
            break;
        }
        if input == "/status" {
            let status = if sessions.is_online().await {
                "online"
            } else {
                "standard mode"
            };
            stdout.write_all(format!("status: {status}\n").as_bytes()).await?;
            continue;
        }
        if let Some(value) = input.strip_prefix("/key ") {
            sessions.set_credential(value.trim()).await;
            let note = if sessions.is_online().await {
                "credential saved, assistant is online"
            } else {
                "credential saved, but it looks too short to use"
            };
            stdout.write_all(format!("{note}\n").as_bytes()).await?;
            continue;
        }

        stdout.write_all(b"... thinking\n").await?;
        if let Some(reply) = dispatcher.handle_user_message(input).await {
            stdout.write_all(format!("{reply}\n").as_bytes()).await?;
        }
    }

    info!("Chat session ended");
    Ok(())
}
