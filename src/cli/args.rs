//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! Available on every command:
//! - `--json` / `--plain` (`--machine`, `--tsv`): output mode
//! - `--dry-run` (`--dryrun`): report side effects without performing them
//! - `--force`: skip confirmation prompts
//! - `--account <name>`: select the per-account config directory
//! - `--quiet` / `-q`: minimal output
//! - `--debug`: debug logging
//! - `--no-interactive`: never prompt
//! - `--enable-commands` / `--disable-commands`: command gating

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
pub use clap_complete::Shell;

use crate::core::types::CommandPath;
use crate::workspace::gmail::MessageFormat;

/// gog - a scriptable CLI for Google Workspace
#[derive(Parser, Debug)]
#[command(name = "gog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output results as tab-separated values
    #[arg(long, global = true, visible_aliases = ["machine", "tsv"])]
    pub plain: bool,

    /// Report intended side effects without performing them
    #[arg(long, global = true, alias = "dryrun")]
    pub dry_run: bool,

    /// Skip confirmation prompts
    #[arg(long, global = true)]
    pub force: bool,

    /// Account name (also: GOG_ACCOUNT)
    #[arg(long, global = true, value_name = "NAME")]
    pub account: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Comma-separated command allow-list (also: GOG_ENABLE_COMMANDS)
    #[arg(long, global = true, value_name = "LIST")]
    pub enable_commands: Option<String>,

    /// Comma-separated command deny-list (also: GOG_DISABLE_COMMANDS)
    #[arg(long, global = true, value_name = "LIST")]
    pub disable_commands: Option<String>,

    /// Config directory override
    #[arg(long, global = true, hide = true, value_name = "DIR")]
    pub config_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Shared pagination flags for list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Maximum results per page
    #[arg(long, value_name = "N")]
    pub max: Option<u32>,

    /// Resume listing from this page token
    #[arg(long, visible_alias = "cursor", value_name = "TOKEN")]
    pub page: Option<String>,

    /// Fetch every page
    #[arg(long)]
    pub all: bool,
}

/// Flags shared by `gmail messages send` and `gmail drafts create`.
#[derive(Args, Debug, Clone)]
pub struct ComposeArgs {
    /// Recipient address (repeatable)
    #[arg(long, required = true)]
    pub to: Vec<String>,

    /// Cc address (repeatable)
    #[arg(long)]
    pub cc: Vec<String>,

    /// Bcc address (repeatable)
    #[arg(long)]
    pub bcc: Vec<String>,

    /// Sender address (a verified send-as alias)
    #[arg(long)]
    pub from: Option<String>,

    /// Subject line
    #[arg(long, default_value = "")]
    pub subject: String,

    /// Plain-text body
    #[arg(long)]
    pub body: Option<String>,

    /// HTML body
    #[arg(long)]
    pub html: Option<String>,

    /// File to attach (repeatable)
    #[arg(long, value_name = "FILE")]
    pub attach: Vec<PathBuf>,

    /// Append the configured tracking pixel to the HTML body
    #[arg(long)]
    pub track: bool,
}

/// Message detail level for `gmail messages get`.
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum FormatArg {
    #[default]
    Full,
    Metadata,
    Minimal,
    Raw,
}

impl From<FormatArg> for MessageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Full => MessageFormat::Full,
            FormatArg::Metadata => MessageFormat::Metadata,
            FormatArg::Minimal => MessageFormat::Minimal,
            FormatArg::Raw => MessageFormat::Raw,
        }
    }
}

/// Top-level command groups.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Gmail messages, labels, drafts, and attachments
    Gmail {
        #[command(subcommand)]
        command: GmailCommand,
    },
    /// Calendars and events
    Calendar {
        #[command(subcommand)]
        command: CalendarCommand,
    },
    /// Drive files
    Drive {
        #[command(subcommand)]
        command: DriveCommand,
    },
    /// Spreadsheet values
    Sheets {
        #[command(subcommand)]
        command: SheetsCommand,
    },
    /// Presentations
    Slides {
        #[command(subcommand)]
        command: SlidesCommand,
    },
    /// Task lists and tasks
    Tasks {
        #[command(subcommand)]
        command: TasksCommand,
    },
    /// Directory groups and membership
    Groups {
        #[command(subcommand)]
        command: GroupsCommand,
    },
    /// Credentials and tracking configuration
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
    /// Time utilities
    Time {
        #[command(subcommand)]
        command: TimeCommand,
    },
    /// Machine-readable metadata for scripts and agents
    Agent {
        #[command(subcommand)]
        command: AgentCommand,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum GmailCommand {
    /// Operate on messages
    Messages {
        #[command(subcommand)]
        command: GmailMessages,
    },
    /// List labels
    Labels {
        #[command(subcommand)]
        command: GmailLabels,
    },
    /// Download attachments
    Attachments {
        #[command(subcommand)]
        command: GmailAttachments,
    },
    /// Create drafts
    Drafts {
        #[command(subcommand)]
        command: GmailDrafts,
    },
    /// List send-as aliases
    SendAs {
        #[command(subcommand)]
        command: GmailSendAs,
    },
}

#[derive(Subcommand, Debug)]
pub enum GmailMessages {
    /// List messages matching a search query
    List {
        /// Gmail search query, e.g. "is:unread from:alice"
        #[arg(long)]
        query: Option<String>,

        /// Restrict to a label id (repeatable)
        #[arg(long = "label")]
        labels: Vec<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one message
    Get {
        /// Message id
        id: String,

        /// Payload detail level
        #[arg(long, value_enum, default_value_t = FormatArg::Full)]
        format: FormatArg,
    },
    /// Send a message
    Send(ComposeArgs),
    /// Move a message to trash
    Trash {
        /// Message id
        id: String,
    },
    /// Permanently delete a message
    Delete {
        /// Message id
        id: String,
    },
    /// Add or remove labels on a message
    Modify {
        /// Message id
        id: String,

        /// Label id to add (repeatable)
        #[arg(long = "add-label")]
        add: Vec<String>,

        /// Label id to remove (repeatable)
        #[arg(long = "remove-label")]
        remove: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GmailLabels {
    /// List all labels
    List,
}

#[derive(Subcommand, Debug)]
pub enum GmailAttachments {
    /// Download an attachment to a file
    Get {
        /// Message id
        message_id: String,

        /// Attachment id (from the message payload)
        attachment_id: String,

        /// Output file (defaults to <message_id>.attachment)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GmailDrafts {
    /// Create a draft
    Create(ComposeArgs),
}

#[derive(Subcommand, Debug)]
pub enum GmailSendAs {
    /// List verified send-as aliases
    List,
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommand {
    /// Operate on the calendar list
    Calendars {
        #[command(subcommand)]
        command: CalendarCalendars,
    },
    /// Operate on events
    Events {
        #[command(subcommand)]
        command: CalendarEvents,
    },
}

#[derive(Subcommand, Debug)]
pub enum CalendarCalendars {
    /// List the user's calendars
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum CalendarEvents {
    /// List events (recurring events expanded)
    List {
        /// Calendar id
        #[arg(long, default_value = "primary")]
        calendar: String,

        /// Earliest start time (RFC3339)
        #[arg(long, value_name = "TIME")]
        from: Option<String>,

        /// Latest start time (RFC3339)
        #[arg(long, value_name = "TIME")]
        to: Option<String>,

        /// Free-text search
        #[arg(long)]
        query: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one event
    Get {
        /// Event id
        id: String,

        /// Calendar id
        #[arg(long, default_value = "primary")]
        calendar: String,
    },
    /// Create an event
    Create {
        /// Event title
        #[arg(long)]
        summary: String,

        /// Start time (RFC3339)
        #[arg(long, value_name = "TIME")]
        start: String,

        /// End time (RFC3339)
        #[arg(long, value_name = "TIME")]
        end: String,

        /// Calendar id
        #[arg(long, default_value = "primary")]
        calendar: String,

        /// Event description
        #[arg(long)]
        description: Option<String>,

        /// Event location
        #[arg(long)]
        location: Option<String>,

        /// Attendee email (repeatable)
        #[arg(long = "attendee")]
        attendees: Vec<String>,
    },
    /// Delete an event
    Delete {
        /// Event id
        id: String,

        /// Calendar id
        #[arg(long, default_value = "primary")]
        calendar: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DriveCommand {
    /// Operate on files
    Files {
        #[command(subcommand)]
        command: DriveFiles,
    },
    /// Show storage quota and user info
    About,
}

#[derive(Subcommand, Debug)]
pub enum DriveFiles {
    /// List files matching a Drive query
    List {
        /// Drive query expression, e.g. "name contains 'report'"
        #[arg(long)]
        query: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show file metadata
    Get {
        /// File id
        id: String,

        /// Open the file in the browser
        #[arg(long)]
        open: bool,
    },
    /// Download file content
    Download {
        /// File id
        id: String,

        /// Output file (defaults to the remote file name)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Permanently delete a file
    Delete {
        /// File id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SheetsCommand {
    /// Spreadsheet metadata
    Spreadsheets {
        #[command(subcommand)]
        command: SheetsSpreadsheets,
    },
    /// Cell values
    Values {
        #[command(subcommand)]
        command: SheetsValues,
    },
}

#[derive(Subcommand, Debug)]
pub enum SheetsSpreadsheets {
    /// Show spreadsheet metadata
    Get {
        /// Spreadsheet id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SheetsValues {
    /// Read a range of values
    Get {
        /// Spreadsheet id
        id: String,

        /// Range in A1 notation, e.g. "Sheet1!A1:C10"
        range: String,
    },
    /// Overwrite a range of values
    Update {
        /// Spreadsheet id
        id: String,

        /// Range in A1 notation
        range: String,

        /// Rows as a JSON array of arrays, e.g. '[["a","b"],["c","d"]]'
        #[arg(long, value_name = "JSON")]
        values: String,
    },
    /// Append rows after a range's table
    Append {
        /// Spreadsheet id
        id: String,

        /// Range in A1 notation
        range: String,

        /// Rows as a JSON array of arrays
        #[arg(long, value_name = "JSON")]
        values: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SlidesCommand {
    /// Presentation metadata
    Presentations {
        #[command(subcommand)]
        command: SlidesPresentations,
    },
    /// Slide pages
    Pages {
        #[command(subcommand)]
        command: SlidesPages,
    },
}

#[derive(Subcommand, Debug)]
pub enum SlidesPresentations {
    /// Show presentation metadata
    Get {
        /// Presentation id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SlidesPages {
    /// List the slides of a presentation
    List {
        /// Presentation id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasksCommand {
    /// Task lists
    Lists {
        #[command(subcommand)]
        command: TasksLists,
    },
    /// Tasks within a list
    Tasks {
        #[command(subcommand)]
        command: TasksTasks,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasksLists {
    /// List the user's task lists
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasksTasks {
    /// List tasks in a list
    List {
        /// Task list id
        #[arg(long, default_value = "@default")]
        tasklist: String,

        /// Include completed and hidden tasks
        #[arg(long)]
        completed: bool,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Create a task
    Insert {
        /// Task title
        title: String,

        /// Task list id
        #[arg(long, default_value = "@default")]
        tasklist: String,

        /// Task notes
        #[arg(long)]
        notes: Option<String>,

        /// Due date (RFC3339)
        #[arg(long, value_name = "TIME")]
        due: Option<String>,
    },
    /// Mark a task completed
    Complete {
        /// Task id
        id: String,

        /// Task list id
        #[arg(long, default_value = "@default")]
        tasklist: String,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,

        /// Task list id
        #[arg(long, default_value = "@default")]
        tasklist: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupsCommand {
    /// List groups
    List {
        /// Restrict to groups containing this member email
        #[arg(long)]
        member: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Group membership
    Members {
        #[command(subcommand)]
        command: GroupsMembers,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupsMembers {
    /// List members of a group
    List {
        /// Group email or id
        group: String,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Add a member to a group
    Insert {
        /// Group email or id
        group: String,

        /// Member email
        email: String,

        /// Membership role
        #[arg(long, default_value = "MEMBER")]
        role: String,
    },
    /// Remove a member from a group
    Delete {
        /// Group email or id
        group: String,

        /// Member email or id
        member: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Service-account key for the selected account
    Key {
        #[command(subcommand)]
        command: AuthKey,
    },
    /// Tracking pixel configuration
    Tracking {
        #[command(subcommand)]
        command: AuthTracking,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthKey {
    /// Install a service-account key file
    Set {
        /// Path to the JSON key file
        path: PathBuf,

        /// Email to impersonate (domain-wide delegation)
        #[arg(long)]
        subject: Option<String>,
    },
    /// Show whether a key is installed
    Status,
    /// Remove the installed key
    Unset,
}

#[derive(Subcommand, Debug)]
pub enum AuthTracking {
    /// Set the tracking pixel base URL
    Set {
        /// Pixel endpoint base URL
        base_url: String,
    },
    /// Show the tracking configuration
    Status,
    /// Remove the tracking configuration
    Unset,
}

#[derive(Subcommand, Debug)]
pub enum TimeCommand {
    /// Print the current time (local and UTC)
    Now,
    /// Guess the IANA zone name for a UTC offset
    Zone {
        /// UTC offset, e.g. "-05:00" or "Z"
        #[arg(allow_hyphen_values = true)]
        offset: String,

        /// Reference date for the DST guess (YYYY-MM-DD, defaults to today)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Print the exit-code table as JSON
    ExitCodes,
    /// List command paths and whether the gate permits them
    Commands,
}

impl Command {
    /// The dot-separated path used for gating, e.g. `gmail.messages.list`.
    pub fn path(&self) -> CommandPath {
        CommandPath::new(self.path_str())
    }

    fn path_str(&self) -> String {
        match self {
            Command::Gmail { command } => match command {
                GmailCommand::Messages { command } => {
                    let op = match command {
                        GmailMessages::List { .. } => "list",
                        GmailMessages::Get { .. } => "get",
                        GmailMessages::Send(_) => "send",
                        GmailMessages::Trash { .. } => "trash",
                        GmailMessages::Delete { .. } => "delete",
                        GmailMessages::Modify { .. } => "modify",
                    };
                    format!("gmail.messages.{}", op)
                }
                GmailCommand::Labels { command: GmailLabels::List } => "gmail.labels.list".into(),
                GmailCommand::Attachments { command: GmailAttachments::Get { .. } } => {
                    "gmail.attachments.get".into()
                }
                GmailCommand::Drafts { command: GmailDrafts::Create(_) } => {
                    "gmail.drafts.create".into()
                }
                GmailCommand::SendAs { command: GmailSendAs::List } => "gmail.sendas.list".into(),
            },
            Command::Calendar { command } => match command {
                CalendarCommand::Calendars { command: CalendarCalendars::List { .. } } => {
                    "calendar.calendars.list".into()
                }
                CalendarCommand::Events { command } => {
                    let op = match command {
                        CalendarEvents::List { .. } => "list",
                        CalendarEvents::Get { .. } => "get",
                        CalendarEvents::Create { .. } => "create",
                        CalendarEvents::Delete { .. } => "delete",
                    };
                    format!("calendar.events.{}", op)
                }
            },
            Command::Drive { command } => match command {
                DriveCommand::Files { command } => {
                    let op = match command {
                        DriveFiles::List { .. } => "list",
                        DriveFiles::Get { .. } => "get",
                        DriveFiles::Download { .. } => "download",
                        DriveFiles::Delete { .. } => "delete",
                    };
                    format!("drive.files.{}", op)
                }
                DriveCommand::About => "drive.about".into(),
            },
            Command::Sheets { command } => match command {
                SheetsCommand::Spreadsheets { command: SheetsSpreadsheets::Get { .. } } => {
                    "sheets.spreadsheets.get".into()
                }
                SheetsCommand::Values { command } => {
                    let op = match command {
                        SheetsValues::Get { .. } => "get",
                        SheetsValues::Update { .. } => "update",
                        SheetsValues::Append { .. } => "append",
                    };
                    format!("sheets.values.{}", op)
                }
            },
            Command::Slides { command } => match command {
                SlidesCommand::Presentations { command: SlidesPresentations::Get { .. } } => {
                    "slides.presentations.get".into()
                }
                SlidesCommand::Pages { command: SlidesPages::List { .. } } => {
                    "slides.pages.list".into()
                }
            },
            Command::Tasks { command } => match command {
                TasksCommand::Lists { command: TasksLists::List { .. } } => {
                    "tasks.lists.list".into()
                }
                TasksCommand::Tasks { command } => {
                    let op = match command {
                        TasksTasks::List { .. } => "list",
                        TasksTasks::Insert { .. } => "insert",
                        TasksTasks::Complete { .. } => "complete",
                        TasksTasks::Delete { .. } => "delete",
                    };
                    format!("tasks.tasks.{}", op)
                }
            },
            Command::Groups { command } => match command {
                GroupsCommand::List { .. } => "groups.list".into(),
                GroupsCommand::Members { command } => {
                    let op = match command {
                        GroupsMembers::List { .. } => "list",
                        GroupsMembers::Insert { .. } => "insert",
                        GroupsMembers::Delete { .. } => "delete",
                    };
                    format!("groups.members.{}", op)
                }
            },
            Command::Auth { command } => match command {
                AuthCommand::Key { command } => {
                    let op = match command {
                        AuthKey::Set { .. } => "set",
                        AuthKey::Status => "status",
                        AuthKey::Unset => "unset",
                    };
                    format!("auth.key.{}", op)
                }
                AuthCommand::Tracking { command } => {
                    let op = match command {
                        AuthTracking::Set { .. } => "set",
                        AuthTracking::Status => "status",
                        AuthTracking::Unset => "unset",
                    };
                    format!("auth.tracking.{}", op)
                }
            },
            Command::Time { command } => match command {
                TimeCommand::Now => "time.now".into(),
                TimeCommand::Zone { .. } => "time.zone".into(),
            },
            Command::Agent { command } => match command {
                AgentCommand::ExitCodes => "agent.exit-codes".into(),
                AgentCommand::Commands => "agent.commands".into(),
            },
            Command::Completion { .. } => "completion".into(),
        }
    }
}

/// Every command path, for the gate-aware `agent commands` listing.
pub const COMMAND_CATALOG: &[&str] = &[
    "gmail.messages.list",
    "gmail.messages.get",
    "gmail.messages.send",
    "gmail.messages.trash",
    "gmail.messages.delete",
    "gmail.messages.modify",
    "gmail.labels.list",
    "gmail.attachments.get",
    "gmail.drafts.create",
    "gmail.sendas.list",
    "calendar.calendars.list",
    "calendar.events.list",
    "calendar.events.get",
    "calendar.events.create",
    "calendar.events.delete",
    "drive.files.list",
    "drive.files.get",
    "drive.files.download",
    "drive.files.delete",
    "drive.about",
    "sheets.spreadsheets.get",
    "sheets.values.get",
    "sheets.values.update",
    "sheets.values.append",
    "slides.presentations.get",
    "slides.pages.list",
    "tasks.lists.list",
    "tasks.tasks.list",
    "tasks.tasks.insert",
    "tasks.tasks.complete",
    "tasks.tasks.delete",
    "groups.list",
    "groups.members.list",
    "groups.members.insert",
    "groups.members.delete",
    "auth.key.set",
    "auth.key.status",
    "auth.key.unset",
    "auth.tracking.set",
    "auth.tracking.status",
    "auth.tracking.unset",
    "time.now",
    "time.zone",
    "agent.exit-codes",
    "agent.commands",
    "completion",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn paths_match_catalog() {
        let cli = Cli::parse_from(["gog", "gmail", "messages", "list"]);
        assert_eq!(cli.command.path().as_str(), "gmail.messages.list");

        let cli = Cli::parse_from(["gog", "drive", "files", "delete", "f1"]);
        assert_eq!(cli.command.path().as_str(), "drive.files.delete");

        let cli = Cli::parse_from(["gog", "agent", "exit-codes"]);
        assert_eq!(cli.command.path().as_str(), "agent.exit-codes");
    }

    #[test]
    fn dryrun_alias_accepted() {
        let cli = Cli::parse_from(["gog", "--dryrun", "gmail", "messages", "trash", "m1"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn plain_aliases_accepted() {
        let cli = Cli::parse_from(["gog", "--tsv", "gmail", "labels", "list"]);
        assert!(cli.plain);
        let cli = Cli::parse_from(["gog", "--machine", "gmail", "labels", "list"]);
        assert!(cli.plain);
    }

    #[test]
    fn page_cursor_alias() {
        let cli = Cli::parse_from([
            "gog", "gmail", "messages", "list", "--cursor", "tok-1", "--max", "5",
        ]);
        match cli.command {
            Command::Gmail {
                command:
                    GmailCommand::Messages {
                        command: GmailMessages::List { page, .. },
                    },
            } => {
                assert_eq!(page.page.as_deref(), Some("tok-1"));
                assert_eq!(page.max, Some(5));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn catalog_covers_every_service() {
        for group in ["gmail", "calendar", "drive", "sheets", "slides", "tasks", "groups"] {
            assert!(
                COMMAND_CATALOG.iter().any(|p| p.starts_with(group)),
                "missing {}",
                group
            );
        }
    }
}
