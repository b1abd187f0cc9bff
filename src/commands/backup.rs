//! pgBackRest wrappers: backup, restore (PITR), stanza management.
//!
//! Restore is the risky one. Its option resolution lives in a single
//! [`resolve`] function feeding both the plan preview and real execution,
//! so the preview cannot drift from what execution would do.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::{confirm, run_tool_as};
use crate::config;
use crate::output::{is_structured_output, Plan, Resource};
use crate::Error;

const BACKUP_TYPES: &[&str] = &["full", "diff", "incr"];

fn pgbackrest(args: &[String]) -> crate::Result<()> {
    let mut full = vec![format!("--stanza={}", config::stanza())];
    full.extend_from_slice(args);
    run_tool_as(&config::dbsu(), "pgbackrest", &full)
}

pub fn info(set: Option<&str>) -> crate::Result<()> {
    let mut args = vec!["info".to_string()];
    if let Some(set) = set {
        args.push(format!("--set={set}"));
    }
    pgbackrest(&args)
}

/// True if `btype` is an accepted backup type. The caller turns a
/// rejection into a PARAM-band error before any execution.
pub fn valid_backup_type(btype: &str) -> bool {
    BACKUP_TYPES.contains(&btype)
}

pub fn backup(btype: &str) -> crate::Result<()> {
    pgbackrest(&["backup".to_string(), format!("--type={btype}")])
}

pub fn expire(set: Option<&str>, dry_run: bool) -> crate::Result<()> {
    let mut args = vec!["expire".to_string()];
    if let Some(set) = set {
        args.push(format!("--set={set}"));
    }
    if dry_run {
        args.push("--dry-run".to_string());
    }
    pgbackrest(&args)
}

pub fn check() -> crate::Result<()> {
    pgbackrest(&["check".to_string()])
}

pub fn stanza_create() -> crate::Result<()> {
    pgbackrest(&["stanza-create".to_string()])
}

pub fn stanza_upgrade() -> crate::Result<()> {
    pgbackrest(&["stanza-upgrade".to_string()])
}

pub fn stanza_delete() -> crate::Result<()> {
    pgbackrest(&["stanza-delete".to_string(), "--force".to_string()])
}

/// Restore flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    /// Recover to end of WAL stream (latest data)
    pub latest: bool,
    /// Recover to backup consistency point only
    pub immediate: bool,
    /// Recover to a timestamp
    pub time: Option<String>,
    /// Recover to a named restore point
    pub name: Option<String>,
    /// Recover to an LSN
    pub lsn: Option<String>,
    /// Recover to a transaction ID
    pub xid: Option<String>,
    /// Restore from a specific backup set
    pub set: Option<String>,
    /// Stop just before the target instead of at it
    pub exclusive: bool,
    /// Promote after recovery completes
    pub promote: bool,
    /// Skip interactive confirmation
    pub yes: bool,
}

/// The resolved shape of one restore: the effective pgbackrest argument
/// vector plus a human description of the recovery target.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreSpec {
    pub target: String,
    pub args: Vec<String>,
}

/// Validate and normalize restore options. This is the one decision
/// function: both [`restore_plan`] and [`restore_resolved`] consume its
/// output.
pub fn resolve(opts: &RestoreOptions) -> crate::Result<RestoreSpec> {
    let targets = [
        opts.latest,
        opts.immediate,
        opts.time.is_some(),
        opts.name.is_some(),
        opts.lsn.is_some(),
        opts.xid.is_some(),
    ]
    .iter()
    .filter(|t| **t)
    .count();

    if targets == 0 {
        return Err(Error::InvalidInput(
            "no recovery target specified, choose one of: --latest, --immediate, --time, --name, --lsn, --xid"
                .into(),
        ));
    }
    if targets > 1 {
        return Err(Error::InvalidInput(
            "multiple recovery targets specified, choose only one".into(),
        ));
    }

    let mut args = vec!["restore".to_string()];
    let target;

    if opts.latest {
        args.push("--type=default".to_string());
        target = "latest (end of WAL stream)".to_string();
    } else if opts.immediate {
        args.push("--type=immediate".to_string());
        target = "backup consistency point".to_string();
    } else if let Some(time) = &opts.time {
        let normalized = parse_recovery_time(time)?;
        args.push("--type=time".to_string());
        args.push(format!("--target={normalized}"));
        target = format!("time: {normalized}");
    } else if let Some(name) = &opts.name {
        args.push("--type=name".to_string());
        args.push(format!("--target={name}"));
        target = format!("restore point: {name}");
    } else if let Some(lsn) = &opts.lsn {
        args.push("--type=lsn".to_string());
        args.push(format!("--target={lsn}"));
        target = format!("lsn: {lsn}");
    } else {
        let xid = opts.xid.as_deref().unwrap_or_default();
        args.push("--type=xid".to_string());
        args.push(format!("--target={xid}"));
        target = format!("xid: {xid}");
    }

    if let Some(set) = &opts.set {
        args.push(format!("--set={set}"));
    }
    if opts.exclusive {
        args.push("--target-exclusive".to_string());
    }
    if opts.promote {
        args.push("--target-action=promote".to_string());
    }

    Ok(RestoreSpec { target, args })
}

/// Parse the flexible `--time` forms: full timestamp with optional UTC
/// offset, date only (start of day), or time only (today).
pub fn parse_recovery_time(input: &str) -> crate::Result<String> {
    const FULL: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = chrono::DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%#z") {
        return Ok(dt.format("%Y-%m-%d %H:%M:%S%:z").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, FULL) {
        return Ok(dt.format(FULL).to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        return Ok(dt.format(FULL).to_string());
    }
    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M:%S") {
        let today = Local::now().date_naive();
        return Ok(today.and_time(time).format(FULL).to_string());
    }
    Err(Error::InvalidInput(format!(
        "unrecognized recovery time: {input:?} (expected \"YYYY-MM-DD HH:MM:SS[+TZ]\", \"YYYY-MM-DD\" or \"HH:MM:SS\")"
    )))
}

/// Build the restore execution plan from resolved options. Errors out on
/// invalid option combinations instead of emitting a plan for them.
pub fn restore_plan(opts: &RestoreOptions) -> crate::Result<Plan> {
    let spec = resolve(opts)?;

    let mut plan = Plan::new(format!("pgbackrest {}", spec.args.join(" ")));
    plan.step("Verify pgBackRest configuration and stanza");
    plan.step("Ensure PostgreSQL is stopped");
    plan.step(format!("Execute pgBackRest restore to {}", spec.target));
    plan.step("Start PostgreSQL in recovery mode");
    if opts.promote {
        plan.step("Promote once the recovery target is reached");
    } else {
        plan.step("Leave the instance paused at the recovery target");
    }

    plan.affects.push(Resource::new(
        "directory",
        &config::pg_data().display().to_string(),
        "overwrite",
        "data directory is rewritten from the backup repository",
    ));
    plan.affects.push(Resource::new(
        "service",
        "postgresql",
        "stop",
        "must be stopped for the duration of the restore",
    ));

    plan.expected = format!("PostgreSQL restored to {}", spec.target);
    plan.risks
        .push("data written after the recovery target is discarded".into());
    if opts.set.is_none() {
        plan.risks
            .push("backup set auto-selected by pgBackRest".into());
    }
    Ok(plan)
}

/// Execute an already-resolved restore. Prompts in text mode unless
/// `--yes`; structured mode is implicitly non-interactive.
///
/// Resolution happens at the dispatch layer so that invalid options are
/// classified as parameter errors, never as operation failures.
pub fn restore_resolved(spec: &RestoreSpec, yes: bool) -> crate::Result<()> {
    if !yes && !is_structured_output() {
        let proceed = confirm(&format!(
            "Restore will overwrite {} (target: {}). Continue?",
            config::pg_data().display(),
            spec.target
        ))?;
        if !proceed {
            return Err(Error::CommandFailed("restore cancelled".into()));
        }
    }

    pgbackrest(&spec.args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_opts(time: &str) -> RestoreOptions {
        RestoreOptions {
            time: Some(time.to_string()),
            ..RestoreOptions::default()
        }
    }

    #[test]
    fn backup_type_validation() {
        assert!(valid_backup_type("full"));
        assert!(valid_backup_type("diff"));
        assert!(valid_backup_type("incr"));
        assert!(!valid_backup_type("differential"));
    }

    #[test]
    fn resolve_rejects_no_target() {
        let err = resolve(&RestoreOptions::default()).unwrap_err();
        assert!(err.to_string().contains("no recovery target"));
    }

    #[test]
    fn resolve_rejects_multiple_targets() {
        let opts = RestoreOptions {
            latest: true,
            immediate: true,
            ..RestoreOptions::default()
        };
        let err = resolve(&opts).unwrap_err();
        assert!(err.to_string().contains("multiple recovery targets"));
    }

    #[test]
    fn resolve_builds_target_args() {
        let opts = RestoreOptions {
            lsn: Some("0/7C82CB8".into()),
            set: Some("20250101-120000F".into()),
            exclusive: true,
            promote: true,
            ..RestoreOptions::default()
        };
        let spec = resolve(&opts).unwrap();
        assert_eq!(
            spec.args,
            vec![
                "restore",
                "--type=lsn",
                "--target=0/7C82CB8",
                "--set=20250101-120000F",
                "--target-exclusive",
                "--target-action=promote",
            ]
        );
        assert_eq!(spec.target, "lsn: 0/7C82CB8");
    }

    #[test]
    fn recovery_time_forms() {
        assert_eq!(
            parse_recovery_time("2025-01-01 12:00:00").unwrap(),
            "2025-01-01 12:00:00"
        );
        assert_eq!(
            parse_recovery_time("2025-01-01").unwrap(),
            "2025-01-01 00:00:00"
        );
        assert!(parse_recovery_time("12:34:56").unwrap().ends_with("12:34:56"));
        assert!(parse_recovery_time("not a time").is_err());
        assert!(
            parse_recovery_time("2025-01-01 12:00:00+08")
                .unwrap()
                .contains("+08:00")
        );
    }

    #[test]
    fn plan_matches_execution_args() {
        let opts = time_opts("2025-01-01");
        let spec = resolve(&opts).unwrap();
        let plan = restore_plan(&opts).unwrap();
        // The plan's command line is exactly what execution would run.
        assert_eq!(plan.command, format!("pgbackrest {}", spec.args.join(" ")));
    }

    #[test]
    fn equivalent_options_produce_identical_plans() {
        // Same effective configuration through different construction.
        let a = time_opts("2025-01-01");
        let b = time_opts("2025-01-01 00:00:00");
        let plan_a = restore_plan(&a).unwrap();
        let plan_b = restore_plan(&b).unwrap();
        let steps = |p: &Plan| -> Vec<String> {
            p.actions.iter().map(|a| a.description.clone()).collect()
        };
        assert_eq!(steps(&plan_a), steps(&plan_b));
        assert_eq!(plan_a.command, plan_b.command);
    }

    #[test]
    fn plan_fails_rather_than_emitting_empty_plan() {
        assert!(restore_plan(&RestoreOptions::default()).is_err());
    }

    #[test]
    fn promote_changes_both_plan_and_args() {
        let mut opts = time_opts("2025-01-01");
        let plain = restore_plan(&opts).unwrap();
        opts.promote = true;
        let promoting = restore_plan(&opts).unwrap();
        assert_ne!(plain.command, promoting.command);
        let last = |p: &Plan| p.actions.last().unwrap().description.clone();
        assert!(last(&promoting).contains("Promote"));
        assert!(!last(&plain).contains("Promote"));
    }
}
