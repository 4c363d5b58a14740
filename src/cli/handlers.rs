use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{bundle, prefs_io, store_io};
use crate::model::board::Board;
use crate::model::prefs::{Drafts, Theme};
use crate::model::task::{Quadrant, TaskStatus};
use crate::ops::filter::{NO_TAGS_FILTER, TaskFilter, collect_labels, list_by_quadrant};
use crate::ops::{backlog_ops, reorder, task_ops};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = store_io::data_dir(cli.data_dir.as_deref().map(Path::new));
    let json = cli.json;

    match cli.command {
        // Write commands
        Commands::Add(args) => cmd_add(&dir, args),
        Commands::Quick(args) => cmd_quick(&dir, args),
        Commands::Start(args) => cmd_start(&dir, args),
        Commands::Done(args) => cmd_done(&dir, args),
        Commands::Revert(args) => cmd_revert(&dir, args),
        Commands::Restore(args) => cmd_restore(&dir, args),
        Commands::Rm(args) => cmd_rm(&dir, args),
        Commands::Edit(args) => cmd_edit(&dir, args),
        Commands::Mv(args) => cmd_mv(&dir, args),
        Commands::Triage(args) => cmd_triage(&dir, args),

        // Read commands
        Commands::List(args) => cmd_list(&dir, args, json),
        Commands::Completed(args) => cmd_completed(&dir, args, json),
        Commands::Backlog(args) => cmd_backlog(&dir, args, json),
        Commands::Search(args) => cmd_search(&dir, args, json),

        // Bundle / prefs
        Commands::Export(args) => cmd_export(&dir, args),
        Commands::Import(args) => cmd_import(&dir, args),
        Commands::Theme(args) => cmd_theme(&dir, args),
        Commands::Draft(args) => cmd_draft(&dir, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_quadrant(s: &str) -> Result<Quadrant, String> {
    Quadrant::from_key(s).ok_or_else(|| {
        let keys: Vec<&str> = Quadrant::all().iter().map(|q| q.key()).collect();
        format!("unknown quadrant '{}' (expected one of: {})", s, keys.join(", "))
    })
}

/// Resolve a full id or unique prefix against a set of candidate ids.
fn resolve_id(candidates: &[Uuid], input: &str) -> Result<Uuid, String> {
    if let Ok(id) = Uuid::parse_str(input) {
        if candidates.contains(&id) {
            return Ok(id);
        }
        return Err(format!("no task matching id '{}'", input));
    }

    let matches: Vec<Uuid> = candidates
        .iter()
        .filter(|id| id.to_string().starts_with(input))
        .copied()
        .collect();
    match matches.as_slice() {
        [] => Err(format!("no task matching id '{}'", input)),
        [id] => Ok(*id),
        _ => Err(format!("ambiguous id prefix '{}'", input)),
    }
}

fn board_ids(board: &Board) -> Vec<Uuid> {
    board
        .active_tasks
        .iter()
        .chain(&board.completed_tasks)
        .map(|t| t.id)
        .collect()
}

fn active_ids(board: &Board) -> Vec<Uuid> {
    board.active_tasks.iter().map(|t| t.id).collect()
}

/// Build the view filter shared by `list`, `mv`, and `search`.
fn build_filter(tags: &[String], no_tags: bool, search: Option<&str>) -> TaskFilter {
    let mut filter = TaskFilter::with_tags(tags.iter().cloned());
    if no_tags {
        filter.tags.insert(NO_TAGS_FILTER.to_string());
    }
    if let Some(query) = search {
        filter.search = query.to_string();
    }
    filter
}

/// Split a comma-separated field into trimmed, non-empty values
fn split_field(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let quadrant = match &args.quadrant {
        Some(key) => parse_quadrant(key)?,
        None => Quadrant::derive(args.urgent, args.important),
    };

    let mut board = store_io::load_board_or_default(dir);
    let id = task_ops::create(&mut board, args.content, quadrant, args.tags, args.urls)?;
    store_io::save_board(dir, &board)?;

    println!("added {} to {}", short_id(&id), quadrant.key());
    Ok(())
}

fn cmd_quick(dir: &Path, args: QuickArgs) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = crate::parse::parse_quick(&args.text);

    if args.backlog {
        let mut backlog = store_io::load_backlog_or_default(dir);
        let id = backlog_ops::capture(&mut backlog, parsed.content, parsed.labels, parsed.urls)?;
        store_io::save_backlog(dir, &backlog)?;
        println!("captured {} to backlog", short_id(&id));
        return Ok(());
    }

    let quadrant = match &args.quadrant {
        Some(key) => parse_quadrant(key)?,
        None => Quadrant::UrgentImportant,
    };
    let mut board = store_io::load_board_or_default(dir);
    let id = task_ops::create(&mut board, parsed.content, quadrant, parsed.labels, parsed.urls)?;
    store_io::save_board(dir, &board)?;

    println!("added {} to {}", short_id(&id), quadrant.key());
    Ok(())
}

fn cmd_start(dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = store_io::load_board_or_default(dir);
    let id = resolve_id(&active_ids(&board), &args.id)?;

    let task = board.find_active(id).ok_or(task_ops::TaskError::NotFound(id))?;
    if task.status != TaskStatus::Todo {
        return Err(format!("task {} is already {}", short_id(&id), task.status.badge()).into());
    }

    task_ops::advance(&mut board, id)?;
    store_io::save_board(dir, &board)?;
    println!("started {}", short_id(&id));
    Ok(())
}

fn cmd_done(dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = store_io::load_board_or_default(dir);
    let id = resolve_id(&active_ids(&board), &args.id)?;

    task_ops::archive(&mut board, id)?;
    store_io::save_board(dir, &board)?;
    println!("completed {}", short_id(&id));
    Ok(())
}

fn cmd_revert(dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = store_io::load_board_or_default(dir);
    let id = resolve_id(&active_ids(&board), &args.id)?;

    let status = task_ops::revert(&mut board, id)?;
    store_io::save_board(dir, &board)?;
    println!("{} is {}", short_id(&id), status.badge());
    Ok(())
}

fn cmd_restore(dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = store_io::load_board_or_default(dir);
    let completed: Vec<Uuid> = board.completed_tasks.iter().map(|t| t.id).collect();
    let id = resolve_id(&completed, &args.id)?;

    task_ops::restore(&mut board, id)?;
    store_io::save_board(dir, &board)?;
    println!("restored {}", short_id(&id));
    Ok(())
}

fn cmd_rm(dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = store_io::load_board_or_default(dir);
    let mut backlog = store_io::load_backlog_or_default(dir);

    let mut candidates = board_ids(&board);
    candidates.extend(backlog.iter().map(|i| i.id));

    // Removing something already gone is a no-op, not an error
    let Ok(id) = resolve_id(&candidates, &args.id) else {
        println!("nothing to remove");
        return Ok(());
    };

    if task_ops::remove(&mut board, id) {
        store_io::save_board(dir, &board)?;
    } else if backlog_ops::remove(&mut backlog, id) {
        store_io::save_backlog(dir, &backlog)?;
    }
    println!("removed {}", short_id(&id));
    Ok(())
}

fn cmd_edit(dir: &Path, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let quadrant = match &args.quadrant {
        Some(key) => Some(parse_quadrant(key)?),
        None => None,
    };

    let mut board = store_io::load_board_or_default(dir);
    let id = resolve_id(&active_ids(&board), &args.id)?;

    let patch = task_ops::TaskPatch {
        content: args.content,
        quadrant,
        labels: args.tags.as_deref().map(split_field),
        urls: args.urls.as_deref().map(split_field),
    };
    task_ops::update(&mut board, id, patch)?;
    store_io::save_board(dir, &board)?;
    println!("updated {}", short_id(&id));
    Ok(())
}

fn cmd_mv(dir: &Path, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let quadrant = parse_quadrant(&args.quadrant)?;
    let filter = build_filter(&args.tags, args.no_tags, args.search.as_deref());

    let mut board = store_io::load_board_or_default(dir);
    let id = resolve_id(&active_ids(&board), &args.id)?;

    reorder::move_to_quadrant(&mut board.active_tasks, id, quadrant, args.at, &filter)?;
    store_io::save_board(dir, &board)?;
    println!("moved {} to {}", short_id(&id), quadrant.key());
    Ok(())
}

fn cmd_triage(dir: &Path, args: TriageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let quadrant = parse_quadrant(&args.quadrant)?;

    let mut board = store_io::load_board_or_default(dir);
    let mut backlog = store_io::load_backlog_or_default(dir);
    let ids: Vec<Uuid> = backlog.iter().map(|i| i.id).collect();
    let id = resolve_id(&ids, &args.id)?;

    backlog_ops::triage(&mut backlog, &mut board, id, quadrant)?;
    store_io::save_board(dir, &board)?;
    store_io::save_backlog(dir, &backlog)?;
    println!("triaged {} to {}", short_id(&id), quadrant.key());
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = build_filter(&args.tags, args.no_tags, args.search.as_deref());
    let board = store_io::load_board_or_default(dir);

    let quadrants: Vec<Quadrant> = match &args.quadrant {
        Some(key) => vec![parse_quadrant(key)?],
        None => Quadrant::all().to_vec(),
    };

    if json {
        let out = BoardJson {
            quadrants: quadrants
                .iter()
                .map(|&q| QuadrantJson {
                    quadrant: q.key(),
                    name: q.display_name(),
                    tasks: list_by_quadrant(&board, q, &filter)
                        .iter()
                        .map(|t| TaskJson::from_task(t))
                        .collect(),
                })
                .collect(),
        };
        print_json(&out)?;
        return Ok(());
    }

    for quadrant in quadrants {
        let tasks = list_by_quadrant(&board, quadrant, &filter);
        println!("{} ({})", quadrant.display_name(), quadrant.key());
        if tasks.is_empty() {
            println!("  (none)");
        }
        for task in tasks {
            println!("{}", task_line(task));
        }
        println!();
    }

    let labels = collect_labels(&board);
    if !labels.is_empty() {
        let labels: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        println!("labels: {}", labels.join(", "));
    }
    Ok(())
}

fn cmd_completed(
    dir: &Path,
    args: CompletedArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = store_io::load_board_or_default(dir);
    let mut tasks = board.completed_recent_first();
    if let Some(limit) = args.limit {
        tasks.truncate(limit);
    }

    if json {
        let out: Vec<TaskJson> = tasks.iter().map(|t| TaskJson::from_task(t)).collect();
        print_json(&out)?;
        return Ok(());
    }

    if tasks.is_empty() {
        println!("no completed tasks yet");
        return Ok(());
    }
    for task in tasks {
        let when = task
            .completed_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("{}  ({}, was {})", task_line(task), when, task.quadrant.display_name());
    }
    Ok(())
}

fn cmd_backlog(
    dir: &Path,
    args: BacklogArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut backlog = store_io::load_backlog_or_default(dir);

    if let Some(text) = args.text {
        let parsed = crate::parse::parse_quick(&text);
        let id = backlog_ops::capture(&mut backlog, parsed.content, parsed.labels, parsed.urls)?;
        store_io::save_backlog(dir, &backlog)?;
        println!("captured {} to backlog", short_id(&id));
        return Ok(());
    }

    if json {
        let out: Vec<BacklogItemJson> = backlog.iter().map(BacklogItemJson::from_item).collect();
        print_json(&out)?;
        return Ok(());
    }

    if backlog.is_empty() {
        println!("backlog is empty");
    }
    for item in &backlog {
        println!("{}", backlog_line(item));
    }
    Ok(())
}

fn cmd_search(
    dir: &Path,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = TaskFilter::with_search(&args.query);
    let board = store_io::load_board_or_default(dir);

    if json {
        let out = BoardJson {
            quadrants: Quadrant::all()
                .iter()
                .map(|&q| QuadrantJson {
                    quadrant: q.key(),
                    name: q.display_name(),
                    tasks: list_by_quadrant(&board, q, &filter)
                        .iter()
                        .map(|t| TaskJson::from_task(t))
                        .collect(),
                })
                .filter(|qj| !qj.tasks.is_empty())
                .collect(),
        };
        print_json(&out)?;
        return Ok(());
    }

    let mut total = 0;
    for quadrant in Quadrant::all() {
        let tasks = list_by_quadrant(&board, quadrant, &filter);
        if tasks.is_empty() {
            continue;
        }
        println!("{} ({})", quadrant.display_name(), quadrant.key());
        for task in tasks {
            println!("{}", task_line(task));
            total += 1;
        }
    }
    if total == 0 {
        println!("no matches for '{}'", args.query);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Bundle / prefs commands
// ---------------------------------------------------------------------------

fn cmd_export(dir: &Path, args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let board = store_io::load_board_or_default(dir);
    let backlog = store_io::load_backlog_or_default(dir);
    let prefs = prefs_io::read_prefs(dir).unwrap_or_default();
    let drafts = prefs_io::read_drafts(dir).unwrap_or_default();

    let json = bundle::to_json(&bundle::export_bundle(&board, &backlog, &prefs, &drafts))?;
    match args.file {
        Some(path) => {
            fs::write(&path, json)?;
            println!("exported to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_import(dir: &Path, args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(&args.file)?;
    // Validate the whole bundle before touching anything on disk
    let bundle = bundle::import_bundle(&json)?;
    let (board, backlog, prefs, drafts) = bundle::apply_bundle(bundle);

    store_io::save_board(dir, &board)?;
    store_io::save_backlog(dir, &backlog)?;
    prefs_io::write_prefs(dir, &prefs)?;
    prefs_io::write_drafts(dir, &drafts)?;

    println!(
        "imported {} active, {} completed, {} backlog",
        board.active_tasks.len(),
        board.completed_tasks.len(),
        backlog.len()
    );
    Ok(())
}

fn cmd_theme(dir: &Path, args: ThemeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut prefs = prefs_io::read_prefs(dir).unwrap_or_default();

    match args.value {
        None => println!("{}", prefs.theme.key()),
        Some(value) => {
            prefs.theme = Theme::from_key(&value)
                .ok_or_else(|| format!("unknown theme '{}' (expected light or dark)", value))?;
            prefs_io::write_prefs(dir, &prefs)?;
            println!("theme set to {}", prefs.theme.key());
        }
    }
    Ok(())
}

fn cmd_draft(dir: &Path, args: DraftArgs) -> Result<(), Box<dyn std::error::Error>> {
    let quadrant = parse_quadrant(&args.quadrant)?;
    let mut drafts: Drafts = prefs_io::read_drafts(dir).unwrap_or_default();

    if args.clear {
        drafts.shift_remove(&quadrant);
        prefs_io::write_drafts(dir, &drafts)?;
        println!("cleared draft for {}", quadrant.key());
    } else if let Some(text) = args.text {
        drafts.insert(quadrant, text);
        prefs_io::write_drafts(dir, &drafts)?;
        println!("saved draft for {}", quadrant.key());
    } else {
        match drafts.get(&quadrant) {
            Some(text) => println!("{}", text),
            None => println!("(no draft)"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_id_prefix_and_full() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let ids = vec![a, b];

        assert_eq!(resolve_id(&ids, &a.to_string()), Ok(a));
        // An 8-char prefix is unique between two random v4 ids in practice
        assert_eq!(resolve_id(&ids, &a.to_string()[..8]), Ok(a));
        assert!(resolve_id(&ids, "zzzz").is_err());
        assert!(resolve_id(&ids, &Uuid::new_v4().to_string()).is_err());
    }

    #[test]
    fn test_split_field_trims_and_drops_empty() {
        assert_eq!(split_field("a, b ,,c "), vec!["a", "b", "c"]);
        assert!(split_field("").is_empty());
        assert!(split_field(" , ").is_empty());
    }

    #[test]
    fn test_build_filter_combines_flags() {
        let filter = build_filter(&["work".into()], true, Some("milk"));
        assert!(filter.tags.contains("work"));
        assert!(filter.tags.contains(NO_TAGS_FILTER));
        assert_eq!(filter.search, "milk");
    }
}
