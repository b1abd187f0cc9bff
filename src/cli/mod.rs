//! CLI argument definitions for pgadm.

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// pgadm - operate PostgreSQL, Patroni, pgBackRest and Pigsty from one CLI.
///
/// Every subcommand performs one administrative action by driving the
/// corresponding external tool. With `-o json|json-pretty|yaml` the
/// outcome is emitted as a machine-parsable envelope with stable codes.
#[derive(Parser, Debug)]
#[command(name = "pgadm")]
#[command(author, version, about = "An ops CLI for PostgreSQL, Patroni, pgBackRest and Pigsty", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        env = "PGADM_OUTPUT"
    )]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show local environment and tool availability
    Status,

    /// Show version and build information
    Version,

    /// Inspect command metadata (risk, confirmation, required user)
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// PostgreSQL instance control (pg_ctl wrappers)
    #[command(visible_alias = "postgres")]
    Pg {
        #[command(subcommand)]
        command: PgCommands,
    },

    /// Patroni cluster management (patronictl wrappers)
    #[command(visible_alias = "pt")]
    Patroni {
        #[command(subcommand)]
        command: PatroniCommands,
    },

    /// Backup and PITR via pgBackRest
    #[command(visible_alias = "pb")]
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// Extension package management
    Ext {
        #[command(subcommand)]
        command: ExtCommands,
    },

    /// Run Pigsty playbooks against clusters and nodes
    Do {
        #[command(subcommand)]
        command: DoCommands,
    },

    /// Pigsty deployment helpers
    Sty {
        #[command(subcommand)]
        command: StyCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List all command schemas
    List,
    /// Show one command's schema
    Show {
        /// Full command name, e.g. "pgadm backup restore"
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PgCommands {
    /// Initialize a new data directory (initdb)
    Init {
        /// Extra options passed through to initdb
        #[arg(trailing_var_arg = true)]
        initdb_args: Vec<String>,
    },
    /// Start PostgreSQL
    Start,
    /// Stop PostgreSQL
    Stop {
        /// Shutdown mode
        #[arg(short, long, default_value = "fast", value_parser = ["smart", "fast", "immediate"])]
        mode: String,
    },
    /// Restart PostgreSQL
    Restart {
        /// Shutdown mode
        #[arg(short, long, default_value = "fast", value_parser = ["smart", "fast", "immediate"])]
        mode: String,
    },
    /// Reload server configuration
    Reload,
    /// Promote a standby to primary
    Promote,
    /// Show server status
    Status,
    /// Run vacuum
    Vacuum {
        /// Database name (all databases when omitted)
        dbname: Option<String>,
        /// Full vacuum
        #[arg(short, long)]
        full: bool,
    },
    /// Refresh planner statistics
    Analyze {
        /// Database name (all databases when omitted)
        dbname: Option<String>,
    },
    /// Server log files
    Log {
        #[command(subcommand)]
        command: PgLogCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PgLogCommands {
    /// List log files
    List,
    /// Tail a log file (latest one when omitted)
    Tail {
        /// Log file name
        file: Option<String>,
        /// Number of lines
        #[arg(short = 'n', long, default_value_t = 100)]
        lines: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum PatroniCommands {
    /// List cluster members
    List,
    /// Restart a member (or the whole cluster)
    Restart {
        /// Member name
        member: Option<String>,
        /// Skip patronictl confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Reload patroni configuration
    Reload {
        /// Skip patronictl confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Reinitialize a member from the primary
    Reinit {
        /// Member name
        member: String,
        /// Skip patronictl confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Switch the primary role to another member (planned)
    Switchover {
        /// Current leader
        #[arg(long)]
        leader: Option<String>,
        /// Member to promote
        #[arg(long)]
        candidate: Option<String>,
        /// Proceed without interactive confirmation (required with -o json/yaml)
        #[arg(short, long)]
        force: bool,
    },
    /// Fail over to another member (emergency)
    Failover {
        /// Member to promote
        #[arg(long)]
        candidate: Option<String>,
        /// Proceed without interactive confirmation (required with -o json/yaml)
        #[arg(short, long)]
        force: bool,
    },
    /// Pause cluster auto-failover
    Pause,
    /// Resume cluster auto-failover
    Resume,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Show backup repository information
    Info {
        /// Show a specific backup set
        #[arg(short, long)]
        set: Option<String>,
    },
    /// Take a backup
    Backup {
        /// Backup type
        #[arg(default_value = "incr")]
        r#type: String,
    },
    /// Restore from backup (point-in-time recovery)
    Restore {
        /// Recover to end of WAL stream (latest data)
        #[arg(short = 'd', long = "latest", visible_alias = "default")]
        latest: bool,
        /// Recover to backup consistency point only
        #[arg(short = 'I', long)]
        immediate: bool,
        /// Recover to a timestamp ("YYYY-MM-DD HH:MM:SS[+TZ]", "YYYY-MM-DD", "HH:MM:SS")
        #[arg(short = 't', long)]
        time: Option<String>,
        /// Recover to a named restore point
        #[arg(short = 'n', long)]
        name: Option<String>,
        /// Recover to an LSN
        #[arg(short = 'l', long)]
        lsn: Option<String>,
        /// Recover to a transaction ID
        #[arg(short = 'x', long)]
        xid: Option<String>,
        /// Restore from a specific backup set
        #[arg(short = 'b', long)]
        set: Option<String>,
        /// Stop just before the recovery target
        #[arg(short = 'X', long)]
        exclusive: bool,
        /// Promote once the recovery target is reached
        #[arg(short = 'P', long)]
        promote: bool,
        /// Skip interactive confirmation
        #[arg(short = 'y', long)]
        yes: bool,
        /// Show the execution plan without restoring
        #[arg(long, visible_alias = "dry-run")]
        plan: bool,
    },
    /// Clean up expired backups per retention policy
    Expire {
        /// Expire a specific backup set
        #[arg(long)]
        set: Option<String>,
        /// Show what would be removed without removing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration and archiving
    Check,
    /// Stanza management
    Stanza {
        #[command(subcommand)]
        command: StanzaCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum StanzaCommands {
    /// Create the stanza
    Create,
    /// Upgrade the stanza after a PostgreSQL major upgrade
    Upgrade,
    /// Delete the stanza and its backups
    Delete {
        /// Required: deletion destroys the backup repository
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExtCommands {
    /// Install extension packages
    Add {
        /// Package names
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Remove extension packages
    Rm {
        /// Package names
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Upgrade extension packages (all when omitted)
    Update {
        /// Package names
        packages: Vec<String>,
    },
    /// List extensions available to the server
    List,
}

#[derive(Subcommand, Debug)]
pub enum DoCommands {
    /// Add nodes to the deployment
    NodeAdd {
        /// Cluster or host selector
        selector: String,
        /// Extra ansible-playbook arguments
        #[arg(trailing_var_arg = true)]
        extra: Vec<String>,
    },
    /// Remove nodes from the deployment
    NodeRm {
        /// Cluster or host selector
        selector: String,
        /// Extra ansible-playbook arguments
        #[arg(trailing_var_arg = true)]
        extra: Vec<String>,
    },
    /// Provision a PostgreSQL cluster
    PgsqlAdd {
        /// Cluster name
        cluster: String,
        /// Extra ansible-playbook arguments
        #[arg(trailing_var_arg = true)]
        extra: Vec<String>,
    },
    /// Tear down a PostgreSQL cluster
    PgsqlRm {
        /// Cluster name
        cluster: String,
        /// Extra ansible-playbook arguments
        #[arg(trailing_var_arg = true)]
        extra: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StyCommands {
    /// Bootstrap offline packages and the admin environment
    Boot {
        /// Extra bootstrap arguments
        #[arg(trailing_var_arg = true)]
        extra: Vec<String>,
    },
    /// Generate pigsty.yml from a config template
    Conf {
        /// Template name (e.g. meta, full, oltp)
        template: String,
        /// Primary IP address to template in
        #[arg(short, long)]
        ip: Option<String>,
        /// Extra configure arguments
        #[arg(trailing_var_arg = true)]
        extra: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_flag_parses() {
        let cli = Cli::try_parse_from(["pgadm", "-o", "json-pretty", "status"]).unwrap();
        assert_eq!(cli.output, OutputFormat::JsonPretty);
        let cli = Cli::try_parse_from(["pgadm", "status"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn restore_flags_parse() {
        let cli = Cli::try_parse_from([
            "pgadm", "backup", "restore", "-t", "2025-01-01", "-b", "20250101-120000F", "-P",
            "--plan",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Backup {
                command:
                    BackupCommands::Restore {
                        time,
                        set,
                        promote,
                        plan,
                        latest,
                        ..
                    },
            }) => {
                assert_eq!(time.as_deref(), Some("2025-01-01"));
                assert_eq!(set.as_deref(), Some("20250101-120000F"));
                assert!(promote);
                assert!(plan);
                assert!(!latest);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn every_subcommand_has_a_schema() {
        // Keep the annotation registry in lockstep with the CLI tree.
        use crate::ancs;
        for name in [
            "pgadm status",
            "pgadm pg start",
            "pgadm patroni switchover",
            "pgadm backup restore",
            "pgadm ext add",
            "pgadm do pgsql-rm",
            "pgadm sty conf",
        ] {
            assert!(ancs::find(name).is_some(), "missing schema for {name}");
        }
    }
}
