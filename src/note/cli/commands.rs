use super::print::{print_full_notes, print_messages, print_notes, print_spaces};
use super::setup::{Cli, Commands, FindArgs, FormatArgs, ListArgs};
use clap::Parser;
use note::api::{self, FindOptions, Finder, NoteApi, RemoveTarget};
use note::codec::Format;
use note::config::{NoteConfig, NotePaths};
use note::editor::edit_text;
use note::error::{NoteError, Result};
use note::model::NoteId;
use note::query::{Column, NoteQuery, PageOpts, SortOpts};
use note::store::sqlite::SqliteStore;
use std::fs::{self, File};
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct AppContext {
    api: NoteApi<SqliteStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = NotePaths::resolve()?;
    let mut config = match &cli.config {
        Some(path) => NoteConfig::load_file(path)?,
        None => NoteConfig::load(&paths.config_dir)?,
    };

    let db_path = cli.db.clone().unwrap_or_else(|| paths.db_path(&config));

    if let Some(Commands::Init) = cli.command {
        // `--db` given at init time is recorded in the new config.
        if let Some(db) = &cli.db {
            config.db = Some(db.clone());
        }
        let config_file = cli.config.clone().unwrap_or_else(|| paths.config_file());
        return handle_init(&config_file, &db_path, &config);
    }

    let mut ctx = init_context(&db_path, config)?;

    match cli.command {
        Some(Commands::Add {
            text,
            space,
            pin,
            file,
        }) => handle_add(&mut ctx, text, space, pin, file),
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Show { ids }) => handle_show(&ctx, &ids),
        Some(Commands::Edit { id, message }) => handle_edit(&mut ctx, id, message),
        Some(Commands::Move { space, ids }) => handle_move(&mut ctx, &space, &ids),
        Some(Commands::Pin { ids }) => handle_pin(&mut ctx, &ids),
        Some(Commands::Unpin { ids }) => handle_unpin(&mut ctx, &ids),
        Some(Commands::Remove {
            ids,
            all_in_space,
            permanent,
            yes,
        }) => handle_remove(&mut ctx, ids, all_in_space, permanent, yes),
        Some(Commands::Clean { yes }) => handle_clean(&mut ctx, yes),
        Some(Commands::Spaces {
            ids,
            all,
            descending,
        }) => handle_spaces(&ctx, &ids, all, descending),
        Some(Commands::Find(args)) => handle_find(&ctx, args),
        Some(Commands::Import {
            file,
            space,
            format,
        }) => handle_import(&mut ctx, &file, space, &format),
        Some(Commands::Export {
            ids,
            output,
            space,
            all,
            format,
        }) => handle_export(&ctx, &ids, output, space, all, &format),
        Some(Commands::Init) => Ok(()),
        None => handle_list(&ctx, ListArgs::default()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) is harmless; ignore it.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn init_context(db_path: &Path, config: NoteConfig) -> Result<AppContext> {
    debug!(db = %db_path.display(), "opening note database");
    let store = SqliteStore::open(db_path)?;
    Ok(AppContext {
        api: NoteApi::new(store, config),
    })
}

fn handle_add(
    ctx: &mut AppContext,
    text: Vec<String>,
    space: Option<String>,
    pin: bool,
    file: Option<PathBuf>,
) -> Result<()> {
    let content = if !text.is_empty() {
        text.join(" ")
    } else if let Some(file) = file {
        read_input(&file)?
    } else if !io::stdin().is_terminal() {
        read_stdin()?
    } else {
        edit_text("", ctx.api.config().editor.as_deref())?
    };

    let content = content.trim_end().to_string();
    if content.trim().is_empty() {
        return Err(NoteError::Argument("note is empty".into()));
    }

    let result = ctx.api.add_note(space.as_deref(), content, pin)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let query = list_query(&args)?;
    let result = ctx.api.list_notes(query)?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

fn list_query(args: &ListArgs) -> Result<NoteQuery> {
    let mut query = NoteQuery::new()
        .in_spaces(args.space.iter().map(String::as_str))
        .include_hidden(args.all);

    let ascending = !args.descending;
    if let Some(column) = &args.sort {
        query = query.sorted(SortOpts::parse(column, ascending)?);
    } else if args.descending {
        query = query.sorted(SortOpts::desc(Column::Id));
    }

    if args.limit > 0 || args.offset > 0 {
        query = query.paged(PageOpts::new(args.limit, args.offset));
    }
    Ok(query)
}

fn handle_show(ctx: &AppContext, ids: &[NoteId]) -> Result<()> {
    let result = ctx.api.show_notes(ids)?;
    print_full_notes(&result.listed_notes);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: NoteId, message: Option<String>) -> Result<()> {
    let content = match message {
        Some(message) => message,
        None => {
            let current = ctx.api.get_note(id)?;
            let edited = edit_text(&current.content, ctx.api.config().editor.as_deref())?;
            edited.trim_end().to_string()
        }
    };

    let result = ctx.api.edit_note(id, content)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, space: &str, ids: &[NoteId]) -> Result<()> {
    let result = ctx.api.move_notes(ids, space)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, ids: &[NoteId]) -> Result<()> {
    let result = ctx.api.pin_notes(ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_unpin(ctx: &mut AppContext, ids: &[NoteId]) -> Result<()> {
    let result = ctx.api.unpin_notes(ids)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(
    ctx: &mut AppContext,
    ids: Vec<NoteId>,
    all_in_space: Option<String>,
    permanent: bool,
    yes: bool,
) -> Result<()> {
    let whole_space = all_in_space.is_some();
    let target = match all_in_space {
        Some(space) => RemoveTarget::Space(space),
        None => RemoveTarget::Ids(ids),
    };

    if !yes && (permanent || whole_space) {
        let targets = ctx.api.removal_targets(&target)?;
        if !targets.is_empty() {
            let action = if permanent {
                "Permanently delete"
            } else {
                "Move to trash"
            };
            if !confirm(&format!("{} {} note(s)?", action, targets.len()))? {
                println!("Aborted.");
                return Ok(());
            }
        }
    }

    let result = ctx.api.remove_notes(&target, permanent)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clean(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        let count = ctx.api.trash_ids()?.len();
        if count > 0 && !confirm(&format!("Permanently delete {} note(s) in trash?", count))? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let result = ctx.api.clean_trash()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_spaces(ctx: &AppContext, ids: &[NoteId], all: bool, descending: bool) -> Result<()> {
    let sort = descending.then(|| SortOpts::desc(Column::Space));
    let result = ctx.api.list_spaces(all, sort.as_ref(), ids)?;
    print_spaces(&result.spaces);
    Ok(())
}

fn handle_find(ctx: &AppContext, args: FindArgs) -> Result<()> {
    let finder = if args.regex {
        let pattern = if args.ignore_case {
            format!("(?i){}", args.pattern)
        } else {
            args.pattern
        };
        Finder::regex(&pattern)?
    } else if args.ignore_case {
        Finder::insensitive(args.pattern)
    } else {
        Finder::substring(args.pattern)
    };

    let options = FindOptions {
        spaces: args.space,
        include_hidden: args.all,
        include_trash: args.trash,
        ..FindOptions::default()
    };
    let result = ctx.api.find_notes(&finder, &options)?;
    print_notes(&result.listed_notes);
    Ok(())
}

fn handle_import(
    ctx: &mut AppContext,
    file: &Path,
    space: Option<String>,
    format: &FormatArgs,
) -> Result<()> {
    let format = Format::resolve(format.explicit(), Some(file))?;
    let reader: Box<dyn Read> = if is_stdin(file) {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(file)?)
    };

    let result = ctx.api.import_notes(reader, format, space.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    ids: &[NoteId],
    output: Option<PathBuf>,
    space: Vec<String>,
    all: bool,
    format: &FormatArgs,
) -> Result<()> {
    let format = match (&output, format.explicit()) {
        (_, Some(explicit)) => explicit,
        (Some(path), None) => Format::resolve(None, Some(path))?,
        (None, None) => Format::Json,
    };
    let query = NoteQuery::new()
        .in_spaces(space.iter().map(String::as_str))
        .include_hidden(all);

    let result = ctx.api.export_notes(&query, ids, format)?;
    let document = result.output.unwrap_or_default();

    match output.filter(|p| !is_stdin(p)) {
        Some(path) => {
            fs::write(&path, document)?;
            print_messages(&result.messages);
        }
        None => {
            // Stdout carries the document only.
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn handle_init(config_file: &Path, db_path: &Path, config: &NoteConfig) -> Result<()> {
    let result = api::init(config_file, db_path, config)?;
    print_messages(&result.messages);
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        read_stdin()
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let query = list_query(&ListArgs::default()).unwrap();
        assert_eq!(query, NoteQuery::new());
    }

    #[test]
    fn list_query_sort_and_page() {
        let args = ListArgs {
            space: vec!["work".into()],
            sort: Some("updated".into()),
            descending: true,
            limit: 10,
            offset: 20,
            ..ListArgs::default()
        };
        let query = list_query(&args).unwrap();
        assert_eq!(query.spaces, vec!["work".to_string()]);
        assert_eq!(query.sort, Some(SortOpts::desc(Column::Updated)));
        assert_eq!(query.page, Some(PageOpts::new(10, 20)));
    }

    #[test]
    fn list_query_rejects_unknown_column() {
        let args = ListArgs {
            sort: Some("pinned".into()),
            ..ListArgs::default()
        };
        assert!(matches!(
            list_query(&args),
            Err(NoteError::InvalidSortColumn(_))
        ));
    }

    #[test]
    fn dash_means_stdin() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("notes.json")));
    }
}
