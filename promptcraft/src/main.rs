use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use promptcraft::cli::Cli;
use promptcraft::redirect::TerminalRedirect;
use promptcraft::{commands, logging};
use promptcraft_session::{CredentialStore, FileStorage, SessionClient, SessionContext, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let log_path = logging::init_logging()?;
    tracing::info!(log = %log_path.display(), "Starting promptcraft");

    let settings = Settings::new()?;
    settings.validate().map_err(anyhow::Error::msg)?;

    let storage = match settings.storage_dir {
        Some(ref dir) => FileStorage::in_dir(dir)?,
        None => FileStorage::new()?,
    };
    let store = CredentialStore::new(storage);

    let mut context = SessionContext::new(store.clone());
    context.hydrate();

    let client = SessionClient::new(&settings, store, Arc::new(TerminalRedirect::stderr()))?;

    let mut stdout = std::io::stdout();
    commands::execute(cli.command, cli.json, &client, &mut context, &mut stdout).await
}
