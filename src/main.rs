//! pgadm CLI - one-shot administrative actions for PostgreSQL, Patroni,
//! pgBackRest and Pigsty deployments.

use clap::{CommandFactory, Parser};
use serde_json::json;
use std::process;

use pgadm::bridge::{
    normalize_params, run_legacy_structured, structured_param_error, LegacyCommandData, Params,
};
use pgadm::cli::{
    BackupCommands, Cli, Commands, DoCommands, ExtCommands, PatroniCommands, PgCommands,
    PgLogCommands, SchemaCommands, StanzaCommands, StyCommands,
};
use pgadm::commands::{self, backup};
use pgadm::output::code::{
    CODE_PB_INVALID_RESTORE_PARAMS, CODE_PB_STANZA_DELETE_REQUIRES_FORCE,
    CODE_PT_FAILOVER_NEED_FORCE, CODE_PT_SWITCHOVER_NEED_FORCE,
};
use pgadm::output::{self, Module, Report};
use pgadm::Error;

fn main() {
    let cli = Cli::parse();
    init_tracing();
    output::set_output_format(cli.output);

    let result = run_command(cli.command);

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("PGADM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(command: Option<Commands>) -> pgadm::Result<()> {
    let Some(command) = command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Status => commands::status::status(),
        Commands::Version => commands::status::version(),
        Commands::Schema { command } => match command {
            SchemaCommands::List => commands::schema::list(),
            SchemaCommands::Show { name } => commands::schema::show(&name),
        },
        Commands::Pg { command } => run_pg(command),
        Commands::Patroni { command } => run_patroni(command),
        Commands::Backup { command } => run_backup(command),
        Commands::Ext { command } => run_ext(command),
        Commands::Do { command } => run_do(command),
        Commands::Sty { command } => run_sty(command),
    }
}

fn run_pg(command: PgCommands) -> pgadm::Result<()> {
    use commands::postgres;

    match command {
        PgCommands::Init { initdb_args } => {
            run_legacy_structured(Module::Pg, "pgadm pg init", &initdb_args, Vec::new(), || {
                postgres::init(&initdb_args)
            })
        }
        PgCommands::Start => {
            run_legacy_structured(Module::Pg, "pgadm pg start", &[], Vec::new(), postgres::start)
        }
        PgCommands::Stop { mode } => run_legacy_structured(
            Module::Pg,
            "pgadm pg stop",
            &[],
            vec![("mode", json!(mode))],
            || postgres::stop(&mode),
        ),
        PgCommands::Restart { mode } => run_legacy_structured(
            Module::Pg,
            "pgadm pg restart",
            &[],
            vec![("mode", json!(mode))],
            || postgres::restart(&mode),
        ),
        PgCommands::Reload => run_legacy_structured(
            Module::Pg,
            "pgadm pg reload",
            &[],
            Vec::new(),
            postgres::reload,
        ),
        PgCommands::Promote => run_legacy_structured(
            Module::Pg,
            "pgadm pg promote",
            &[],
            Vec::new(),
            postgres::promote,
        ),
        PgCommands::Status => run_legacy_structured(
            Module::Pg,
            "pgadm pg status",
            &[],
            Vec::new(),
            postgres::status,
        ),
        PgCommands::Vacuum { dbname, full } => run_legacy_structured(
            Module::Pg,
            "pgadm pg vacuum",
            &[],
            vec![("dbname", json!(dbname)), ("full", json!(full))],
            || postgres::vacuum(dbname.as_deref(), full),
        ),
        PgCommands::Analyze { dbname } => run_legacy_structured(
            Module::Pg,
            "pgadm pg analyze",
            &[],
            vec![("dbname", json!(dbname))],
            || postgres::analyze(dbname.as_deref()),
        ),
        PgCommands::Log { command } => match command {
            PgLogCommands::List => run_legacy_structured(
                Module::Pg,
                "pgadm pg log list",
                &[],
                Vec::new(),
                postgres::log_list,
            ),
            PgLogCommands::Tail { file, lines } => run_legacy_structured(
                Module::Pg,
                "pgadm pg log tail",
                &[],
                vec![("file", json!(file)), ("lines", json!(lines))],
                || postgres::log_tail(file.as_deref(), lines),
            ),
        },
    }
}

fn run_patroni(command: PatroniCommands) -> pgadm::Result<()> {
    use commands::patroni;

    match command {
        PatroniCommands::List => run_legacy_structured(
            Module::Patroni,
            "pgadm patroni list",
            &[],
            Vec::new(),
            patroni::list,
        ),
        PatroniCommands::Restart { member, force } => run_legacy_structured(
            Module::Patroni,
            "pgadm patroni restart",
            &[],
            vec![("member", json!(member)), ("force", json!(force))],
            || patroni::restart(member.as_deref(), force),
        ),
        PatroniCommands::Reload { force } => run_legacy_structured(
            Module::Patroni,
            "pgadm patroni reload",
            &[],
            vec![("force", json!(force))],
            || patroni::reload(force),
        ),
        PatroniCommands::Reinit { member, force } => run_legacy_structured(
            Module::Patroni,
            "pgadm patroni reinit",
            &[member.clone()],
            vec![("force", json!(force))],
            || patroni::reinit(&member, force),
        ),
        PatroniCommands::Switchover {
            leader,
            candidate,
            force,
        } => {
            // patronictl prompts interactively without --force; a capture
            // pipe would hang on that prompt, so refuse upfront.
            if output::is_structured_output() && !force {
                return takeover_needs_force(
                    CODE_PT_SWITCHOVER_NEED_FORCE,
                    "pgadm patroni switchover",
                    "switchover requires --force in structured output mode",
                );
            }
            run_legacy_structured(
                Module::Patroni,
                "pgadm patroni switchover",
                &[],
                vec![
                    ("leader", json!(leader)),
                    ("candidate", json!(candidate)),
                    ("force", json!(force)),
                ],
                || patroni::switchover(leader.as_deref(), candidate.as_deref(), force),
            )
        }
        PatroniCommands::Failover { candidate, force } => {
            if output::is_structured_output() && !force {
                return takeover_needs_force(
                    CODE_PT_FAILOVER_NEED_FORCE,
                    "pgadm patroni failover",
                    "failover requires --force in structured output mode",
                );
            }
            run_legacy_structured(
                Module::Patroni,
                "pgadm patroni failover",
                &[],
                vec![("candidate", json!(candidate)), ("force", json!(force))],
                || patroni::failover(candidate.as_deref(), force),
            )
        }
        PatroniCommands::Pause => run_legacy_structured(
            Module::Patroni,
            "pgadm patroni pause",
            &[],
            Vec::new(),
            patroni::pause,
        ),
        PatroniCommands::Resume => run_legacy_structured(
            Module::Patroni,
            "pgadm patroni resume",
            &[],
            Vec::new(),
            patroni::resume,
        ),
    }
}

/// Structured-mode refusal for interactive takeover commands. Only
/// reached in structured mode; text mode keeps patronictl's own prompt.
fn takeover_needs_force(code: i32, command: &str, detail: &str) -> pgadm::Result<()> {
    commands::finish(
        Report::fail(code, "interactive confirmation unavailable")
            .with_detail(detail)
            .with_data(&LegacyCommandData {
                command: command.to_string(),
                ..LegacyCommandData::default()
            }),
    )
}

fn run_backup(command: BackupCommands) -> pgadm::Result<()> {
    match command {
        BackupCommands::Info { set } => run_legacy_structured(
            Module::Backup,
            "pgadm backup info",
            &[],
            vec![("set", json!(set))],
            || backup::info(set.as_deref()),
        ),
        BackupCommands::Backup { r#type } => {
            if !backup::valid_backup_type(&r#type) {
                return structured_param_error(
                    Module::Backup,
                    "pgadm backup backup",
                    "invalid backup type",
                    &format!("invalid backup type {:?}, expected full, diff or incr", r#type),
                    &[r#type.clone()],
                    Vec::new(),
                );
            }
            run_legacy_structured(
                Module::Backup,
                "pgadm backup backup",
                &[],
                vec![("type", json!(r#type))],
                || backup::backup(&r#type),
            )
        }
        BackupCommands::Restore {
            latest,
            immediate,
            time,
            name,
            lsn,
            xid,
            set,
            exclusive,
            promote,
            yes,
            plan,
        } => {
            let opts = backup::RestoreOptions {
                latest,
                immediate,
                time,
                name,
                lsn,
                xid,
                set,
                exclusive,
                promote,
                yes,
            };
            let params: Params = vec![
                ("latest", json!(opts.latest)),
                ("immediate", json!(opts.immediate)),
                ("time", json!(opts.time)),
                ("name", json!(opts.name)),
                ("lsn", json!(opts.lsn)),
                ("xid", json!(opts.xid)),
                ("set", json!(opts.set)),
                ("exclusive", json!(opts.exclusive)),
                ("promote", json!(opts.promote)),
                ("plan", json!(plan)),
            ];

            // Resolve before anything effectful so bad options surface as
            // parameter errors, not operation failures.
            let spec = match backup::resolve(&opts) {
                Ok(spec) => spec,
                Err(err) => return restore_param_error(err, params),
            };

            if plan {
                let plan = backup::restore_plan(&opts)?;
                return commands::print_plan(&plan);
            }

            run_legacy_structured(
                Module::Backup,
                "pgadm backup restore",
                &[],
                params,
                || backup::restore_resolved(&spec, opts.yes),
            )
        }
        BackupCommands::Expire { set, dry_run } => run_legacy_structured(
            Module::Backup,
            "pgadm backup expire",
            &[],
            vec![("set", json!(set)), ("dry_run", json!(dry_run))],
            || backup::expire(set.as_deref(), dry_run),
        ),
        BackupCommands::Check => run_legacy_structured(
            Module::Backup,
            "pgadm backup check",
            &[],
            Vec::new(),
            backup::check,
        ),
        BackupCommands::Stanza { command } => match command {
            StanzaCommands::Create => run_legacy_structured(
                Module::Backup,
                "pgadm backup stanza create",
                &[],
                Vec::new(),
                backup::stanza_create,
            ),
            StanzaCommands::Upgrade => run_legacy_structured(
                Module::Backup,
                "pgadm backup stanza upgrade",
                &[],
                Vec::new(),
                backup::stanza_upgrade,
            ),
            StanzaCommands::Delete { force } => {
                if !force {
                    let detail = "stanza delete destroys the backup repository, pass --force to confirm";
                    if output::is_structured_output() {
                        return commands::finish(
                            Report::fail(
                                CODE_PB_STANZA_DELETE_REQUIRES_FORCE,
                                "stanza delete requires --force",
                            )
                            .with_detail(detail),
                        );
                    }
                    return Err(Error::InvalidInput(detail.into()));
                }
                run_legacy_structured(
                    Module::Backup,
                    "pgadm backup stanza delete",
                    &[],
                    vec![("force", json!(force))],
                    backup::stanza_delete,
                )
            }
        },
    }
}

/// Map a restore resolution failure to the published "invalid restore
/// parameters" code in structured mode; plain error otherwise.
fn restore_param_error(err: Error, params: Params) -> pgadm::Result<()> {
    if !output::is_structured_output() {
        return Err(err);
    }
    let data = LegacyCommandData {
        command: "pgadm backup restore".to_string(),
        params: normalize_params(params),
        ..LegacyCommandData::default()
    };
    commands::finish(
        Report::fail(CODE_PB_INVALID_RESTORE_PARAMS, "invalid restore parameters")
            .with_detail(err.to_string())
            .with_data(&data),
    )
}

fn run_ext(command: ExtCommands) -> pgadm::Result<()> {
    use commands::ext;

    match command {
        ExtCommands::Add { packages } => run_legacy_structured(
            Module::Ext,
            "pgadm ext add",
            &packages,
            Vec::new(),
            || ext::add(&packages),
        ),
        ExtCommands::Rm { packages } => run_legacy_structured(
            Module::Ext,
            "pgadm ext rm",
            &packages,
            Vec::new(),
            || ext::remove(&packages),
        ),
        ExtCommands::Update { packages } => run_legacy_structured(
            Module::Ext,
            "pgadm ext update",
            &packages,
            Vec::new(),
            || ext::update(&packages),
        ),
        ExtCommands::List => {
            run_legacy_structured(Module::Ext, "pgadm ext list", &[], Vec::new(), ext::list)
        }
    }
}

fn run_do(command: DoCommands) -> pgadm::Result<()> {
    use commands::do_;

    match command {
        DoCommands::NodeAdd { selector, extra } => run_legacy_structured(
            Module::Do,
            "pgadm do node-add",
            &extra,
            vec![("selector", json!(selector))],
            || do_::node_add(&selector, &extra),
        ),
        DoCommands::NodeRm { selector, extra } => run_legacy_structured(
            Module::Do,
            "pgadm do node-rm",
            &extra,
            vec![("selector", json!(selector))],
            || do_::node_rm(&selector, &extra),
        ),
        DoCommands::PgsqlAdd { cluster, extra } => run_legacy_structured(
            Module::Do,
            "pgadm do pgsql-add",
            &extra,
            vec![("cluster", json!(cluster))],
            || do_::pgsql_add(&cluster, &extra),
        ),
        DoCommands::PgsqlRm { cluster, extra } => run_legacy_structured(
            Module::Do,
            "pgadm do pgsql-rm",
            &extra,
            vec![("cluster", json!(cluster))],
            || do_::pgsql_rm(&cluster, &extra),
        ),
    }
}

fn run_sty(command: StyCommands) -> pgadm::Result<()> {
    use commands::sty;

    match command {
        StyCommands::Boot { extra } => run_legacy_structured(
            Module::Sty,
            "pgadm sty boot",
            &extra,
            Vec::new(),
            || sty::boot(&extra),
        ),
        StyCommands::Conf { template, ip, extra } => {
            if template.trim().is_empty() {
                return structured_param_error(
                    Module::Sty,
                    "pgadm sty conf",
                    "invalid configure arguments",
                    "configure template name must not be empty",
                    &extra,
                    vec![("ip", json!(ip))],
                );
            }
            run_legacy_structured(
                Module::Sty,
                "pgadm sty conf",
                &extra,
                vec![("template", json!(template)), ("ip", json!(ip))],
                || sty::conf(&template, ip.as_deref(), &extra),
            )
        }
    }
}
