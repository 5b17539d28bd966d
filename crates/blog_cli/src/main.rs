//! Command-line entry point over `blog_core` services.
//!
//! # Responsibility
//! - Map flags to explicit create/update/get/list/delete calls.
//! - Print records as JSON lines; print validation failures as
//!   `field: message` on stderr and exit non-zero.

use anyhow::{bail, Context, Result};
use blog_core::db::{open_db, Connection};
use blog_core::model::post::validate_category;
use blog_core::{
    default_log_level, init_logging, AuthorChanges, AuthorListQuery, AuthorService, NewAuthor,
    NewPost, Page, PostChanges, PostListQuery, PostService, RepoError, SqliteAuthorRepository,
    SqlitePostRepository, ValidationError,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// blog record management.
#[derive(Parser, Debug)]
#[command(name = "blog", author, version, about)]
struct Cli {
    /// SQLite database file; created and migrated when missing.
    #[arg(long, env = "BLOG_DB", default_value = "blog.sqlite3")]
    db: PathBuf,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "BLOG_LOG_DIR")]
    log_dir: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long, env = "BLOG_LOG_LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage authors.
    #[command(subcommand)]
    Author(AuthorCommand),
    /// Manage posts.
    #[command(subcommand)]
    Post(PostCommand),
}

#[derive(Subcommand, Debug)]
enum AuthorCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone_number: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, conflicts_with = "clear_phone_number")]
        phone_number: Option<String>,
        #[arg(long)]
        clear_phone_number: bool,
    },
    Get {
        id: i64,
    },
    List(PageArgs),
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum PostCommand {
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// `Fiction` or `Non-Fiction`.
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, conflicts_with = "clear_category")]
        category: Option<String>,
        #[arg(long)]
        clear_category: bool,
        #[arg(long, conflicts_with = "clear_summary")]
        summary: Option<String>,
        #[arg(long)]
        clear_summary: bool,
    },
    Get {
        id: i64,
    },
    List {
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long, default_value_t = 0)]
    offset: u32,
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Page {
            limit: args.limit,
            offset: args.offset,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let validation = err
                .downcast_ref::<ValidationError>()
                .or_else(|| err.downcast_ref::<RepoError>().and_then(RepoError::validation));
            match validation {
                Some(validation) => eprintln!("{validation}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(message) = init_logging(level, log_dir) {
            bail!("failed to initialize logging: {message}");
        }
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;

    match cli.command {
        Commands::Author(command) => run_author(&conn, command),
        Commands::Post(command) => run_post(&conn, command),
    }
}

fn run_author(conn: &Connection, command: AuthorCommand) -> Result<()> {
    let service = AuthorService::new(SqliteAuthorRepository::new(conn));
    match command {
        AuthorCommand::Create { name, phone_number } => {
            let author = NewAuthor { name, phone_number };
            print_json(&service.create_author(author)?)
        }
        AuthorCommand::Update {
            id,
            name,
            phone_number,
            clear_phone_number,
        } => {
            let changes = AuthorChanges {
                name,
                phone_number: nullable_change(phone_number, clear_phone_number),
            };
            print_json(&service.update_author(id, changes)?)
        }
        AuthorCommand::Get { id } => match service.get_author(id)? {
            Some(author) => print_json(&author),
            None => bail!("author not found: {id}"),
        },
        AuthorCommand::List(page) => {
            let query = AuthorListQuery { page: page.into() };
            for author in service.list_authors(&query)? {
                print_json(&author)?;
            }
            Ok(())
        }
        AuthorCommand::Delete { id } => Ok(service.delete_author(id)?),
    }
}

fn run_post(conn: &Connection, command: PostCommand) -> Result<()> {
    let service = PostService::new(SqlitePostRepository::new(conn));
    match command {
        PostCommand::Create {
            title,
            content,
            category,
            summary,
        } => {
            let post = NewPost {
                title,
                content,
                category: category.as_deref().map(validate_category).transpose()?,
                summary,
            };
            print_json(&service.create_post(post)?)
        }
        PostCommand::Update {
            id,
            title,
            content,
            category,
            clear_category,
            summary,
            clear_summary,
        } => {
            let category = category.as_deref().map(validate_category).transpose()?;
            let changes = PostChanges {
                title,
                content,
                category: nullable_change(category, clear_category),
                summary: nullable_change(summary, clear_summary),
            };
            print_json(&service.update_post(id, changes)?)
        }
        PostCommand::Get { id } => match service.get_post(id)? {
            Some(post) => print_json(&post),
            None => bail!("post not found: {id}"),
        },
        PostCommand::List { category, page } => {
            let query = PostListQuery {
                category: category.as_deref().map(validate_category).transpose()?,
                page: page.into(),
            };
            for post in service.list_posts(&query)? {
                print_json(&post)?;
            }
            Ok(())
        }
        PostCommand::Delete { id } => Ok(service.delete_post(id)?),
    }
}

/// `--x value` sets, `--clear-x` clears, neither leaves the field unchanged.
fn nullable_change<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{nullable_change, Cli};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn nullable_change_prefers_clear() {
        assert_eq!(nullable_change(Some(1), false), Some(Some(1)));
        assert_eq!(nullable_change(Some(1), true), Some(None));
        assert_eq!(nullable_change::<i32>(None, false), None);
    }
}
