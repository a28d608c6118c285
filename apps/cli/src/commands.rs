//! Command handlers. Results go to stdout; logs and errors go to stderr.

use crate::args::{Cli, Command, EntryFields};
use anyhow::{Context, Result, bail};
use pinvault::kernel::config::AppConfig;
use pinvault::session::{EntryPatch, NewEntry, PasswordEntry, VaultSession};
use pinvault::store::FileStore;
use serde_json::json;
use std::path::Path;
use tracing::debug;

const PASSWORD_MASK: &str = "********";

pub(crate) async fn run(cli: Cli, cfg: &AppConfig) -> Result<()> {
    let mut session = pinvault::open_file_session(&cfg.storage).await.with_context(|| {
        format!("Failed to open data directory {}", cfg.storage.data_dir.display())
    })?;
    debug!(account = session.store().account().as_str(), "Store connected");

    if matches!(cli.command, Command::Status) {
        return status(&session).await;
    }

    let pin = cli.pin.as_deref().context("A PIN is required: pass --pin or set PINVAULT_PIN")?;

    if matches!(cli.command, Command::Init) {
        session.create_vault(pin).await?;
        println!("Vault created for account '{}'", session.store().account().as_str());
        return Ok(());
    }

    session.unlock(pin).await?;
    let result = unlocked(&mut session, cli.command, pin).await;
    session.lock();
    result
}

async fn status(session: &VaultSession<FileStore>) -> Result<()> {
    let store = session.store();
    let state = if session.exists().await? { "initialized" } else { "empty" };
    println!("account: {}", store.account().as_str());
    println!("record:  {}", store.record_path().display());
    println!("state:   {state}");
    Ok(())
}

async fn unlocked(
    session: &mut VaultSession<FileStore>,
    command: Command,
    pin: &str,
) -> Result<()> {
    match command {
        Command::Status | Command::Init => bail!("Command does not operate on an unlocked vault"),
        Command::List { json } => {
            let entries = session.entries()?;
            if json {
                let rows: Vec<_> = entries.iter().map(summary).collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for entry in entries {
                    println!("{}\t{}\t{}", entry.id(), entry.service_name(), entry.username());
                }
            }
        },
        Command::Show { id, reveal } => print_entry(session.entry(&id)?, reveal),
        Command::Add { fields } => {
            let id = session.add_entry(new_entry(fields)?).await?;
            println!("{id}");
        },
        Command::Update { id, fields } => {
            let patch = patch(fields);
            if patch.is_empty() {
                bail!("Nothing to update: pass at least one field");
            }
            session.update_entry(id.as_str(), patch).await?;
            println!("Updated {id}");
        },
        Command::Remove { id } => {
            session.delete_entry(id.as_str()).await?;
            println!("Removed {id}");
        },
        Command::ChangePin { new_pin } => {
            session.change_pin(pin, &new_pin).await?;
            println!("PIN changed");
        },
        Command::Export { output } => {
            let document = session.export_backup()?.to_json()?;
            match output {
                Some(path) => {
                    write_backup(&path, document.as_bytes()).await?;
                    eprintln!("Backup written to {} (not encrypted)", path.display());
                },
                None => println!("{}", document.as_str()),
            }
        },
        Command::Import { file } => {
            let document = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read backup {}", file.display()))?;
            let added = session.import_backup(&document).await?;
            println!("Imported {added} entries");
        },
        Command::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every entry without --yes");
            }
            let removed = session.clear().await?;
            println!("Removed {removed} entries");
        },
    }
    Ok(())
}

fn summary(entry: &PasswordEntry) -> serde_json::Value {
    json!({
        "id": entry.id(),
        "serviceName": entry.service_name(),
        "username": entry.username(),
        "url": entry.url(),
        "updatedAt": entry.updated_at(),
    })
}

fn print_entry(entry: &PasswordEntry, reveal: bool) {
    println!("id:        {}", entry.id());
    println!("service:   {}", entry.service_name());
    println!("username:  {}", entry.username());
    println!("password:  {}", if reveal { entry.password() } else { PASSWORD_MASK });
    if !entry.url().is_empty() {
        println!("url:       {}", entry.url());
    }
    if !entry.notes().is_empty() {
        println!("notes:     {}", entry.notes());
    }
}

fn new_entry(fields: EntryFields) -> Result<NewEntry> {
    let EntryFields { service_name, username, password, url, notes } = fields;
    let draft = NewEntry::new(
        service_name.context("--service is required")?,
        username.context("--username is required")?,
        password.context("--password is required")?,
    );
    Ok(draft.url(url.unwrap_or_default()).notes(notes.unwrap_or_default()))
}

fn patch(fields: EntryFields) -> EntryPatch {
    let EntryFields { service_name, username, password, url, notes } = fields;
    EntryPatch { service_name, username, password, url, notes }
}

async fn write_backup(path: &Path, document: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, document)
        .await
        .with_context(|| format!("Failed to write backup {}", path.display()))
}
