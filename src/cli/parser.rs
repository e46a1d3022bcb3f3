use clap::{Parser, Subcommand};

/// Command-line interface definition for timeclock-admin
#[derive(Parser)]
#[command(
    name = "timeclock-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Administer shared attendance records: employees, groups, special days and work-hour reports",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration file path (useful for tests)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local cache database
    Init {
        /// Directory where the share is mounted
        #[arg(long = "share", value_name = "DIR")]
        share: String,

        /// Local cache database path
        #[arg(long = "db", value_name = "FILE")]
        db: Option<String>,

        /// Directory for emergency day-file backups
        #[arg(long = "backup", value_name = "DIR")]
        backup: Option<String>,

        /// Remote server address (informational, the mount authenticates)
        #[arg(long = "address")]
        address: Option<String>,

        /// Remote share name (informational)
        #[arg(long = "share-name")]
        share_name: Option<String>,

        #[arg(long = "username")]
        username: Option<String>,

        #[arg(long = "password")]
        password: Option<String>,

        /// Background poll interval in seconds
        #[arg(long = "poll-interval", value_name = "SECS")]
        poll_interval: Option<u64>,
    },

    /// Inspect the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for problems")]
        check: bool,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        cmd: EmployeeCmd,
    },

    /// Manage groups
    Group {
        #[command(subcommand)]
        cmd: GroupCmd,
    },

    /// Manage special (non-working) days
    Special {
        #[command(subcommand)]
        cmd: SpecialCmd,
    },

    /// Manage raw attendance records on the share
    Record {
        #[command(subcommand)]
        cmd: RecordCmd,
    },

    /// Work-hour calculations and reports
    Calc {
        #[command(subcommand)]
        cmd: CalcCmd,
    },

    /// Synchronize the dataset with other instances
    Sync {
        #[command(subcommand)]
        cmd: SyncCmd,
    },

    /// Print the internal operations log
    Log {
        #[arg(long = "print", help = "Print rows from the operations log")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// Add an employee
    Add {
        name: String,

        /// 14-digit hexadecimal card id
        card: String,

        /// Scheduled daily hours (omit together with --flexible)
        #[arg(long = "hours", conflicts_with = "flexible")]
        hours: Option<f64>,

        /// Flexible schedule: no overtime/shortfall computed
        #[arg(long = "flexible")]
        flexible: bool,

        /// Group name
        #[arg(long = "group")]
        group: Option<String>,
    },

    /// Remove an employee by card id
    Del { card: String },

    /// List employees
    List,

    /// Change an employee's scheduled daily hours
    SetHours {
        card: String,

        #[arg(long = "hours", conflicts_with = "flexible")]
        hours: Option<f64>,

        #[arg(long = "flexible")]
        flexible: bool,
    },

    /// Assign an employee to a group (omit --group to unassign)
    SetGroup {
        card: String,

        #[arg(long = "group")]
        group: Option<String>,
    },

    /// Replace an employee's card id everywhere: dataset, roster file and
    /// every day-file on the share
    ChangeCard { old_card: String, new_card: String },
}

#[derive(Subcommand)]
pub enum GroupCmd {
    /// Add a group
    Add { name: String },

    /// Remove a group (members keep their records)
    Del { name: String },

    /// List groups with member counts
    List,
}

#[derive(Subcommand)]
pub enum SpecialCmd {
    /// Mark days as sick leave or vacation (replaces existing marks)
    Set {
        card: String,

        /// `sick` or `vacation`
        kind: String,

        /// Day, month or range: YYYY-MM-DD, YYYY-MM or start:end
        #[arg(long = "period")]
        period: String,
    },

    /// Clear special-day marks
    Clear {
        card: String,

        #[arg(long = "period")]
        period: String,
    },

    /// List special days for a card
    List { card: String },
}

#[derive(Subcommand)]
pub enum RecordCmd {
    /// Append one clock event to the day-file on the share
    Add {
        card: String,

        /// Date (YYYY-MM-DD)
        date: String,

        /// Time (HH:MM or HH:MM:SS)
        time: String,

        /// `arrival` or `departure`
        kind: String,
    },

    /// Delete one clock event from the day-file on the share
    Del {
        card: String,
        date: String,
        time: String,
        kind: String,
    },

    /// Show raw events for a card over a period
    List {
        card: String,

        #[arg(long = "period")]
        period: String,
    },

    /// Delete every event of a card over a period
    Purge {
        card: String,

        #[arg(long = "period")]
        period: String,
    },

    /// Export a card's raw events over a period to a local CSV file
    Archive {
        card: String,

        #[arg(long = "period")]
        period: String,

        /// Destination directory
        #[arg(long = "out", value_name = "DIR")]
        out: String,
    },
}

#[derive(Subcommand)]
pub enum CalcCmd {
    /// Per-day work hours and statuses for one employee
    Hours {
        card: String,

        #[arg(long = "period")]
        period: String,
    },

    /// Overtime report for one employee
    Overtime {
        card: String,

        #[arg(long = "period")]
        period: String,
    },

    /// Shortfall report for one employee
    Shortage {
        card: String,

        #[arg(long = "period")]
        period: String,
    },

    /// Summary report for a whole group (or all employees)
    Group {
        /// Group name; omit for all employees
        #[arg(long = "group")]
        group: Option<String>,

        #[arg(long = "period")]
        period: String,
    },
}

#[derive(Subcommand)]
pub enum SyncCmd {
    /// Fetch the remote snapshot if it is newer and apply it
    Refresh,

    /// Publish the local dataset as a new remote version
    Publish,

    /// Show local and remote version numbers
    Status,

    /// Run the periodic background poller in the foreground
    Watch {
        /// Poll interval in seconds (defaults to the configured value)
        #[arg(long = "interval", value_name = "SECS")]
        interval: Option<u64>,

        /// Stop after this many polls (runs until interrupted if omitted)
        #[arg(long = "count")]
        count: Option<u32>,
    },
}
