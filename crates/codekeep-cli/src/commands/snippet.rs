//! Snippet management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use codekeep_core::error::AppError;
use codekeep_core::types::SortOption;
use codekeep_entity::snippet::{CreateSnippet, FieldUpdate, Snippet, UpdateSnippet, parse_tag_list};
use codekeep_entity::version::SnippetVersion;
use codekeep_service::BrowseQuery;

use super::{Session, confirm, parse_id};
use crate::output::{self, OutputFormat};

/// Arguments for snippet commands
#[derive(Debug, Args)]
pub struct SnippetArgs {
    /// Snippet subcommand
    #[command(subcommand)]
    pub command: SnippetCommand,
}

/// Where the code comes from: inline or a file.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct CodeSource {
    /// Code given inline
    #[arg(long)]
    pub code: Option<String>,
    /// Read the code from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,
}

impl CodeSource {
    fn read(&self) -> Result<Option<String>, AppError> {
        match (&self.code, &self.file) {
            (Some(code), _) => Ok(Some(code.clone())),
            (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
            (None, None) => Ok(None),
        }
    }
}

/// Snippet subcommands
#[derive(Debug, Subcommand)]
pub enum SnippetCommand {
    /// Add a snippet
    Add {
        /// Snippet name
        #[arg(short, long)]
        name: String,
        /// Language label
        #[arg(short, long)]
        language: String,
        #[command(flatten)]
        source: CodeSource,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
        /// Folder id
        #[arg(long)]
        folder: Option<String>,
    },
    /// List snippets
    List {
        /// Case-insensitive search over name, code, description and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only snippets in this folder
        #[arg(long)]
        folder: Option<String>,
        /// newest, oldest, a-z or z-a
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show a snippet with its code
    Show {
        /// Snippet id
        id: String,
    },
    /// Edit a snippet; a version of the current state is recorded first
    Edit {
        /// Snippet id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New language
        #[arg(long)]
        language: Option<String>,
        #[command(flatten)]
        source: CodeSource,
        /// Replace tags (comma-separated)
        #[arg(long, conflicts_with = "clear_tags")]
        tags: Option<String>,
        /// Remove all tags
        #[arg(long)]
        clear_tags: bool,
        /// Move into a folder
        #[arg(long, conflicts_with = "no_folder")]
        folder: Option<String>,
        /// Take out of its folder
        #[arg(long)]
        no_folder: bool,
    },
    /// Delete a snippet and its history
    Delete {
        /// Snippet id
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// List recorded versions, newest first
    History {
        /// Snippet id
        id: String,
    },
    /// Restore a snippet to a recorded version
    Restore {
        /// Version id
        version_id: String,
    },
    /// Make a snippet public and print its link
    Share {
        /// Snippet id
        id: String,
    },
    /// Make a snippet private again
    Unshare {
        /// Snippet id
        id: String,
    },
}

/// Snippet display row for table output
#[derive(Debug, Serialize, Tabled)]
struct SnippetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Language")]
    language: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Public")]
    public: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&Snippet> for SnippetRow {
    fn from(s: &Snippet) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            language: s.language.clone(),
            tags: s.tags.join(", "),
            public: if s.is_public { "yes" } else { "no" }.to_string(),
            created_at: s.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Version display row for table output
#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    #[tabled(rename = "Version")]
    id: String,
    #[tabled(rename = "Recorded")]
    created_at: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
}

impl From<&SnippetVersion> for VersionRow {
    fn from(v: &SnippetVersion) -> Self {
        Self {
            id: v.id.to_string(),
            created_at: v.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            name: v.name.clone(),
            code: output::preview(&v.code, 40),
        }
    }
}

fn print_snippet(snippet: &Snippet, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_kv("ID", &snippet.id.to_string());
            output::print_kv("Name", &snippet.name);
            output::print_kv("Language", &snippet.language);
            output::print_kv("Description", &snippet.description);
            output::print_kv("Tags", &snippet.tags.join(", "));
            output::print_kv(
                "Folder",
                &snippet.folder_id.map(|f| f.to_string()).unwrap_or_default(),
            );
            output::print_kv(
                "Shared",
                match (snippet.is_public, snippet.share_id.as_deref()) {
                    (true, Some(id)) => id,
                    _ => "no",
                },
            );
            output::print_kv("Updated", &snippet.updated_at.format("%Y-%m-%d %H:%M").to_string());
            println!();
            println!("{}", snippet.code);
        }
        OutputFormat::Json => output::print_json(snippet),
    }
}

fn parse_folder(raw: Option<&str>) -> Result<Option<uuid::Uuid>, AppError> {
    raw.map(|f| parse_id(f, "folder")).transpose()
}

/// Execute snippet commands
pub async fn execute(
    args: &SnippetArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = Session::open(config_path).await?;
    let result = run(&args.command, &session, format).await;
    session.close().await;
    result
}

async fn run(
    command: &SnippetCommand,
    session: &Session,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = &session.ctx;
    let snippets = &session.state.snippet_service;

    match command {
        SnippetCommand::Add {
            name,
            language,
            source,
            description,
            tags,
            folder,
        } => {
            let code = source
                .read()?
                .ok_or_else(|| AppError::validation("Provide --code or --file"))?;
            let snippet = snippets
                .create(
                    ctx,
                    CreateSnippet {
                        name: name.clone(),
                        description: description.clone(),
                        code,
                        language: language.clone(),
                        tags: parse_tag_list(tags),
                        folder_id: parse_folder(folder.as_deref())?,
                    },
                )
                .await?;
            output::print_success(&format!("Snippet '{}' created ({})", snippet.name, snippet.id));
            if format == OutputFormat::Json {
                output::print_json(&snippet);
            }
        }
        SnippetCommand::List {
            search,
            folder,
            sort,
        } => {
            let query = BrowseQuery {
                folder: parse_folder(folder.as_deref())?,
                search: search.clone(),
                sort: sort.parse::<SortOption>()?,
            };
            let items = snippets.browse(ctx, &query).await?.into_visible();
            let rows: Vec<SnippetRow> = items.iter().map(SnippetRow::from).collect();
            output::print_list(&items, rows, format);
        }
        SnippetCommand::Show { id } => {
            let snippet = snippets.get(ctx, parse_id(id, "snippet")?).await?;
            print_snippet(&snippet, format);
        }
        SnippetCommand::Edit {
            id,
            name,
            description,
            language,
            source,
            tags,
            clear_tags,
            folder,
            no_folder,
        } => {
            let tags = if *clear_tags {
                FieldUpdate::Clear
            } else {
                FieldUpdate::from_option(tags.as_deref().map(parse_tag_list))
            };
            let folder_id = if *no_folder {
                FieldUpdate::Clear
            } else {
                FieldUpdate::from_option(parse_folder(folder.as_deref())?)
            };
            let changes = UpdateSnippet {
                name: FieldUpdate::from_option(name.clone()),
                description: FieldUpdate::from_option(description.clone()),
                code: FieldUpdate::from_option(source.read()?),
                language: FieldUpdate::from_option(language.clone()),
                tags,
                folder_id,
            };
            let snippet = snippets.update(ctx, parse_id(id, "snippet")?, &changes).await?;
            output::print_success(&format!("Snippet '{}' updated", snippet.name));
            if format == OutputFormat::Json {
                output::print_json(&snippet);
            }
        }
        SnippetCommand::Delete { id, force } => {
            let id = parse_id(id, "snippet")?;
            let snippet = snippets.get(ctx, id).await?;
            let prompt = format!("Delete '{}' and all of its versions?", snippet.name);
            if !confirm(&prompt, *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            snippets.delete(ctx, id).await?;
            output::print_success(&format!("Snippet '{}' deleted", snippet.name));
        }
        SnippetCommand::History { id } => {
            let versions = session
                .state
                .version_service
                .list_for(ctx, parse_id(id, "snippet")?)
                .await?;
            let rows: Vec<VersionRow> = versions.iter().map(VersionRow::from).collect();
            output::print_list(&versions, rows, format);
        }
        SnippetCommand::Restore { version_id } => {
            let snippet = session
                .state
                .restore_service
                .restore(ctx, parse_id(version_id, "version")?)
                .await?;
            output::print_success(&format!("Snippet '{}' restored", snippet.name));
            print_snippet(&snippet, format);
        }
        SnippetCommand::Share { id } => {
            let snippet = snippets.set_sharing(ctx, parse_id(id, "snippet")?, true).await?;
            match snippet.share_id.as_deref() {
                Some(share_id) => {
                    let url = session.state.config.sharing.share_url(share_id);
                    match format {
                        OutputFormat::Table => output::print_success(&format!("Shared at {url}")),
                        OutputFormat::Json => output::print_json(&serde_json::json!({
                            "id": snippet.id,
                            "share_id": share_id,
                            "share_url": url,
                        })),
                    }
                }
                None => output::print_warning("Snippet is public but has no share id"),
            }
        }
        SnippetCommand::Unshare { id } => {
            let snippet = snippets.set_sharing(ctx, parse_id(id, "snippet")?, false).await?;
            output::print_success(&format!("Snippet '{}' is private", snippet.name));
        }
    }

    Ok(())
}
