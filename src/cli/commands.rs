use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ei", about = concat!("[#] eisen v", env!("CARGO_PKG_VERSION"), " - urgent x important, sorted"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to the board
    Add(AddArgs),
    /// Quick-add from free text with inline #tags and links
    Quick(QuickArgs),
    /// Show the board (optionally filtered)
    List(ListArgs),
    /// Start a task (todo -> in-progress)
    Start(IdArg),
    /// Complete a task (moves it to the archive, whatever its status)
    Done(IdArg),
    /// Step a task back (in-progress -> todo)
    Revert(IdArg),
    /// Restore an archived task to the board as todo
    Restore(IdArg),
    /// Permanently delete a task or backlog item
    Rm(IdArg),
    /// Edit a task's content, quadrant, tags, or links
    Edit(EditArgs),
    /// Move a task to a quadrant, optionally to a position in the
    /// currently-filtered view
    Mv(MvArgs),
    /// Show archived tasks, most recently completed first
    Completed(CompletedArgs),
    /// List backlog items, or capture a new one
    Backlog(BacklogArgs),
    /// Triage a backlog item into a quadrant
    Triage(TriageArgs),
    /// Search tasks by content and labels
    Search(SearchArgs),
    /// Write a full backup bundle to a file (or stdout)
    Export(ExportArgs),
    /// Replace all state from a backup bundle
    Import(ImportArgs),
    /// Show or set the color theme
    Theme(ThemeArgs),
    /// Show, set, or clear a quadrant's quick-add draft
    Draft(DraftArgs),
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task description
    pub content: String,
    /// Mark as urgent
    #[arg(short, long)]
    pub urgent: bool,
    /// Mark as important
    #[arg(short, long)]
    pub important: bool,
    /// Target quadrant key (overrides --urgent/--important)
    #[arg(long, conflicts_with_all = ["urgent", "important"])]
    pub quadrant: Option<String>,
    /// Attach a label (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Attach a link (repeatable)
    #[arg(long = "url")]
    pub urls: Vec<String>,
}

#[derive(Args)]
pub struct QuickArgs {
    /// Free text; #tags and http(s) links are extracted
    pub text: String,
    /// Target quadrant key (default: urgent-important)
    #[arg(long)]
    pub quadrant: Option<String>,
    /// Capture into the backlog instead of the board
    #[arg(long)]
    pub backlog: bool,
}

#[derive(Args)]
pub struct IdArg {
    /// Task id (a unique prefix is enough)
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id (a unique prefix is enough)
    pub id: String,
    /// New description
    #[arg(long)]
    pub content: Option<String>,
    /// New quadrant key
    #[arg(long)]
    pub quadrant: Option<String>,
    /// Replace labels (comma-separated; empty string clears)
    #[arg(long)]
    pub tags: Option<String>,
    /// Replace links (comma-separated; empty string clears)
    #[arg(long)]
    pub urls: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id (a unique prefix is enough)
    pub id: String,
    /// Target quadrant key
    pub quadrant: String,
    /// Drop position within the visible (filtered) quadrant, 0 = top
    #[arg(long)]
    pub at: Option<usize>,
    /// Tag filter in effect for the visible view (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Restrict the visible view to unlabeled tasks
    #[arg(long)]
    pub no_tags: bool,
    /// Search query in effect for the visible view
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct BacklogArgs {
    /// Text to capture; omit to list the backlog
    pub text: Option<String>,
}

#[derive(Args)]
pub struct TriageArgs {
    /// Backlog item id (a unique prefix is enough)
    pub id: String,
    /// Target quadrant key
    pub quadrant: String,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Show only this quadrant
    #[arg(long)]
    pub quadrant: Option<String>,
    /// Filter by label (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Show only unlabeled tasks
    #[arg(long)]
    pub no_tags: bool,
    /// Filter by case-insensitive substring of content or labels
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct CompletedArgs {
    /// Show at most this many
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive substring of content or labels
    pub query: String,
}

// ---------------------------------------------------------------------------
// Bundle / prefs args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    pub file: Option<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Bundle file to import
    pub file: String,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// "light" or "dark"; omit to show the current theme
    pub value: Option<String>,
}

#[derive(Args)]
pub struct DraftArgs {
    /// Quadrant key
    pub quadrant: String,
    /// Draft text to store; omit to show the current draft
    pub text: Option<String>,
    /// Clear the draft
    #[arg(long, conflicts_with = "text")]
    pub clear: bool,
}
