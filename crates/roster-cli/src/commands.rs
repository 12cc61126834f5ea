//! Subcommands and their dispatch.

use std::{
  io::{self, BufRead, Write},
  sync::Arc,
};

use anyhow::{Context as _, bail};
use clap::{Args, Subcommand};
use roster_core::{
  Contact, ContactDraft, ContactId,
  list::{ContactChange, ContactFilter, ContactList},
  store::ContactStore,
};
use roster_import::{HttpSource, Importer};
use roster_store_sqlite::SqliteStore;

use crate::config::RosterConfig;

// ─── Arguments ────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Show contacts, newest first.
  List {
    /// Case-insensitive match on name, phone or email.
    #[arg(short, long)]
    search:    Option<String>,
    /// Only show favorites.
    #[arg(short, long)]
    favorites: bool,
    /// Print JSON instead of a table.
    #[arg(long)]
    json:      bool,
  },

  /// Add a contact.
  Add(ContactArgs),

  /// Replace name, phone and email of a contact.
  Edit {
    id:      ContactId,
    #[command(flatten)]
    contact: ContactArgs,
  },

  /// Toggle (or set) the favorite flag.
  Favorite {
    id:  ContactId,
    #[arg(long, conflicts_with = "off")]
    on:  bool,
    #[arg(long)]
    off: bool,
  },

  /// Delete a contact after confirmation.
  Delete {
    id:  ContactId,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },

  /// Import contacts from a remote JSON endpoint, skipping known phones.
  Import {
    /// Endpoint URL; defaults to `import.url` from the config.
    #[arg(long)]
    url: Option<String>,
  },
}

#[derive(Args, Debug)]
pub struct ContactArgs {
  #[arg(long)]
  name:  String,
  #[arg(long, default_value = "")]
  phone: String,
  #[arg(long, default_value = "")]
  email: String,
}

impl From<ContactArgs> for ContactDraft {
  fn from(a: ContactArgs) -> Self {
    ContactDraft {
      name:  a.name,
      phone: a.phone,
      email: a.email,
    }
  }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub async fn run(
  command: Command,
  store: &SqliteStore,
  cfg: &RosterConfig,
) -> anyhow::Result<()> {
  match command {
    Command::List { search, favorites, json } => {
      let list = ContactList::new(store.list().await?);
      let filter = ContactFilter {
        text:           search,
        favorites_only: favorites,
      };
      let shown = list.filtered(&filter);

      if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
      } else if shown.is_empty() {
        println!("No contacts.");
      } else {
        for c in shown {
          println!("{}", format_row(c));
        }
      }
    }

    Command::Add(args) => {
      let input = ContactDraft::from(args).validate()?;
      let created = store.create(input).await?;
      report(&ContactChange::Created(created));
    }

    Command::Edit { id, contact } => {
      let input = ContactDraft::from(contact).validate()?;
      match store.update(id, input).await? {
        Some(updated) => report(&ContactChange::Updated(updated)),
        None => println!("No contact with id {id}."),
      }
    }

    Command::Favorite { id, on, off } => {
      let updated = match (on, off) {
        (true, _) => store.set_favorite(id, true).await?,
        (_, true) => store.set_favorite(id, false).await?,
        _ => store.toggle_favorite(id).await?,
      };
      match updated {
        Some(c) => report(&ContactChange::Updated(c)),
        None => println!("No contact with id {id}."),
      }
    }

    Command::Delete { id, yes } => {
      let Some(contact) = store.get(id).await? else {
        println!("No contact with id {id}.");
        return Ok(());
      };
      if !yes && !confirm(&format!("Delete #{id} {}?", contact.name))? {
        println!("Cancelled.");
        return Ok(());
      }
      if store.delete(id).await? {
        report(&ContactChange::Removed(id));
      }
    }

    Command::Import { url } => {
      let Some(url) = url.or_else(|| cfg.import.url.clone()) else {
        bail!("no import URL: pass --url or set import.url in the config");
      };
      let source = HttpSource::new(&url, cfg.import.timeout())?;
      let importer = Importer::new(Arc::new(store.clone()), source);

      let mut list = ContactList::new(store.list().await?);
      let outcome = importer
        .run_with_snapshot(&list)
        .await
        .context("import aborted, no contacts were changed")?;

      let inserted = outcome.inserted.len();
      for c in outcome.inserted {
        let change = ContactChange::Created(c);
        report(&change);
        list.apply(change);
      }
      println!(
        "Imported {inserted} new contact(s), skipped {} already present; {} in total.",
        outcome.skipped,
        list.len()
      );
    }
  }

  Ok(())
}

// ─── Output ───────────────────────────────────────────────────────────────────

fn format_row(c: &Contact) -> String {
  let star = if c.favorite { "★" } else { "☆" };
  format!(
    "{star} {:>4}  {:<24} {:<16} {}",
    c.id,
    c.name,
    c.phone,
    c.email.as_deref().unwrap_or("")
  )
  .trim_end()
  .to_owned()
}

fn report(change: &ContactChange) {
  match change {
    ContactChange::Created(c) => println!("Added   {}", format_row(c)),
    ContactChange::Updated(c) => println!("Updated {}", format_row(c)),
    ContactChange::Removed(id) => println!("Deleted #{id}."),
  }
}

/// Ask a yes/no question on stderr; anything but `y`/`yes` means no.
fn confirm(question: &str) -> anyhow::Result<bool> {
  eprint!("{question} [y/N] ");
  io::stderr().flush().ok();

  let mut line = String::new();
  io::stdin()
    .lock()
    .read_line(&mut line)
    .context("failed to read confirmation")?;
  Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
