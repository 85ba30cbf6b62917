pub mod advert;
pub mod client;
pub mod collection;
pub mod computer;
pub mod config;
pub mod doctor;
pub mod folder;
pub mod package;
pub mod program;
pub mod schedule;
pub mod site;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};

use sw_objects::ClientAction;

/// Sitewrench — a scripting console for systems-management sites.
#[derive(Debug, Parser)]
#[command(name = "sitewrench", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Path to the config file (overrides the SW_CONFIG variable).
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Provider base URL, overriding the config file.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Site code, overriding the config file.
    #[arg(long, global = true)]
    pub site: Option<String>,

    /// Print results as JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sites visible through the provider.
    #[command(subcommand)]
    Site(SiteCommand),
    /// Device collections and their membership rules.
    #[command(subcommand)]
    Collection(CollectionCommand),
    /// Managed computers.
    #[command(subcommand)]
    Computer(ComputerCommand),
    /// Software packages.
    #[command(subcommand)]
    Package(PackageCommand),
    /// Programs inside a package.
    #[command(subcommand)]
    Program(ProgramCommand),
    /// Advertisements targeting programs at collections.
    #[command(subcommand)]
    Advert(AdvertCommand),
    /// Build recurrence schedule tokens.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Console folders for organizing objects.
    #[command(subcommand)]
    Folder(FolderCommand),
    /// On-demand actions on managed clients.
    #[command(subcommand)]
    Client(ClientCommand),
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Run diagnostic checks against the current configuration.
    Doctor,
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum SiteCommand {
    /// List every site the provider reports.
    List,
    /// Show one site by its code.
    Show {
        /// Site code, e.g. "PR1".
        code: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    /// List all collections.
    List,
    /// Show one collection by ID.
    Show {
        /// Collection ID, e.g. "SW00042".
        id: String,
    },
    /// List a collection's direct members.
    Members {
        id: String,
    },
    /// Create an empty collection.
    Create {
        name: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete a collection.
    Delete {
        id: String,
    },
    /// Add a computer to a collection with a direct membership rule.
    AddMember {
        id: String,
        /// Resource ID of the computer.
        #[arg(long)]
        resource: u32,
        /// Rule name (defaults to the computer's name).
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a computer's direct membership rule.
    RemoveMember {
        id: String,
        #[arg(long)]
        resource: u32,
    },
    /// Ask the site to re-evaluate the collection's membership.
    Refresh {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ComputerCommand {
    /// Show one computer by resource ID.
    Show {
        resource: u32,
    },
    /// Find computers by exact name.
    Find {
        name: String,
    },
    /// Pre-create a computer record from a name and MAC address.
    Import {
        name: String,
        #[arg(long)]
        mac: String,
    },
    /// Delete a computer record.
    Delete {
        resource: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum PackageCommand {
    /// List all packages.
    List,
    /// Show one package by ID.
    Show {
        id: String,
    },
    /// Create a package.
    Create {
        name: String,
        #[arg(long)]
        version: Option<String>,
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// UNC or local path the package content is served from.
        #[arg(long)]
        source_path: Option<String>,
    },
    /// Delete a package.
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProgramCommand {
    /// List a package's programs.
    List {
        /// Owning package ID.
        package: String,
    },
    /// Create a program under a package.
    Create {
        /// Owning package ID.
        package: String,
        name: String,
        #[arg(long)]
        command_line: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete a program.
    Delete {
        package: String,
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdvertCommand {
    /// List all advertisements.
    List,
    /// Show one advertisement by ID.
    Show {
        id: String,
    },
    /// Advertise a program to a collection.
    Create {
        name: String,
        #[arg(long)]
        package: String,
        #[arg(long)]
        program: String,
        #[arg(long)]
        collection: String,
        #[arg(long)]
        comment: Option<String>,
        /// RFC 3339 time at which the advertisement becomes visible.
        #[arg(long, value_parser = parse_start_time)]
        present: Option<DateTime<FixedOffset>>,
        /// Schedule token JSON file ("-" reads stdin), as printed by
        /// `sitewrench schedule`.
        #[arg(long)]
        schedule: Option<String>,
    },
    /// Delete an advertisement.
    Delete {
        id: String,
    },
}

/// Flags shared by every `schedule` variant. Durations describe how
/// long each occurrence stays open; `--start` anchors the recurrence.
#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// A one-shot schedule with no recurrence.
    NonRecurring {
        #[arg(long, default_value_t = 1)]
        day_duration: u32,
        #[arg(long, default_value_t = 0)]
        hour_duration: u32,
        #[arg(long, default_value_t = 0)]
        minute_duration: u32,
        /// Evaluate the start time as UTC instead of client-local time.
        #[arg(long)]
        gmt: bool,
        /// RFC 3339 start time, e.g. 2024-03-01T09:30:00+00:00.
        #[arg(long, value_parser = parse_start_time)]
        start: DateTime<FixedOffset>,
        /// Also materialize the token through the provider and print
        /// the populated instance.
        #[arg(long)]
        instantiate: bool,
    },
    /// Repeat at a fixed day/hour/minute interval.
    Interval {
        #[arg(long, default_value_t = 1)]
        day_duration: u32,
        /// Days between occurrences (0-31).
        #[arg(long, default_value_t = 0)]
        day_span: u32,
        #[arg(long, default_value_t = 0)]
        hour_duration: u32,
        /// Hours between occurrences (0-23).
        #[arg(long, default_value_t = 0)]
        hour_span: u32,
        #[arg(long, default_value_t = 0)]
        minute_duration: u32,
        /// Minutes between occurrences (0-59).
        #[arg(long, default_value_t = 0)]
        minute_span: u32,
        #[arg(long)]
        gmt: bool,
        #[arg(long, value_parser = parse_start_time)]
        start: DateTime<FixedOffset>,
        #[arg(long)]
        instantiate: bool,
    },
    /// Repeat monthly on a fixed day of the month.
    MonthlyByDate {
        #[arg(long, default_value_t = 1)]
        day_duration: u32,
        /// Repeat every N months (1-12).
        #[arg(long, default_value_t = 1)]
        for_months: u32,
        #[arg(long, default_value_t = 0)]
        hour_duration: u32,
        #[arg(long, default_value_t = 0)]
        minute_duration: u32,
        /// Day of the month (1-31, or 0 for the last day).
        #[arg(long)]
        month_day: u32,
        #[arg(long)]
        gmt: bool,
        #[arg(long, value_parser = parse_start_time)]
        start: DateTime<FixedOffset>,
        #[arg(long)]
        instantiate: bool,
    },
    /// Repeat monthly on the Nth weekday.
    MonthlyByWeekday {
        /// Weekday (1 = Sunday .. 7 = Saturday).
        #[arg(long)]
        day: u32,
        #[arg(long, default_value_t = 1)]
        day_duration: u32,
        /// Repeat every N months (1-12).
        #[arg(long, default_value_t = 1)]
        for_months: u32,
        #[arg(long, default_value_t = 0)]
        hour_duration: u32,
        #[arg(long, default_value_t = 0)]
        minute_duration: u32,
        /// Which occurrence of the weekday (1-4, or 0 for the last).
        #[arg(long)]
        week_order: u32,
        #[arg(long)]
        gmt: bool,
        #[arg(long, value_parser = parse_start_time)]
        start: DateTime<FixedOffset>,
        #[arg(long)]
        instantiate: bool,
    },
    /// Repeat weekly on a fixed weekday.
    Weekly {
        /// Weekday (1 = Sunday .. 7 = Saturday).
        #[arg(long)]
        day: u32,
        #[arg(long, default_value_t = 1)]
        day_duration: u32,
        /// Repeat every N weeks (1-4).
        #[arg(long, default_value_t = 1)]
        for_weeks: u32,
        #[arg(long, default_value_t = 0)]
        hour_duration: u32,
        #[arg(long, default_value_t = 0)]
        minute_duration: u32,
        #[arg(long)]
        gmt: bool,
        #[arg(long, value_parser = parse_start_time)]
        start: DateTime<FixedOffset>,
        #[arg(long)]
        instantiate: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders, optionally only those holding one object type.
    List {
        #[arg(long)]
        object_type: Option<String>,
    },
    /// Create a folder.
    Create {
        name: String,
        /// Object type the folder holds, e.g. "Package".
        #[arg(long)]
        object_type: String,
        /// Parent folder ID for nesting.
        #[arg(long)]
        parent: Option<u32>,
    },
    /// File an object under a folder, replacing any previous placement.
    Move {
        /// Object key, e.g. a package ID.
        key: String,
        #[arg(long)]
        object_type: String,
        /// Target folder ID.
        #[arg(long)]
        folder: u32,
    },
    /// Delete a folder.
    Delete {
        id: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Fire one built-in action on one computer.
    Trigger {
        /// Resource ID of the computer.
        #[arg(long)]
        resource: u32,
        /// One of: machine-policy-refresh, hardware-inventory,
        /// software-inventory, discovery-data, software-updates-scan.
        #[arg(long)]
        action: ClientAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
    /// Prompt for the provider API key and store it in the OS keychain.
    SetSecret,
    /// Read and display (masked) the API key from the OS keychain.
    GetSecret,
}

// ── Shared helpers ───────────────────────────────────────────────────

/// Parse an RFC 3339 timestamp with an explicit UTC offset.
fn parse_start_time(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| format!("expected RFC 3339, e.g. 2024-03-01T09:30:00+00:00 ({e})"))
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
