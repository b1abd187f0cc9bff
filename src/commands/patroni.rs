//! Patroni cluster wrappers around patronictl.

use super::run_tool;
use crate::config;

fn patronictl(args: &[String]) -> crate::Result<()> {
    let mut full = vec![
        "-c".to_string(),
        config::patroni_config().display().to_string(),
    ];
    full.extend_from_slice(args);
    run_tool("patronictl", &full)
}

pub fn list() -> crate::Result<()> {
    patronictl(&["list".to_string()])
}

pub fn restart(member: Option<&str>, force: bool) -> crate::Result<()> {
    let mut args = vec!["restart".to_string()];
    if force {
        args.push("--force".to_string());
    }
    if let Some(member) = member {
        args.push(member.to_string());
    }
    patronictl(&args)
}

pub fn reload(force: bool) -> crate::Result<()> {
    let mut args = vec!["reload".to_string()];
    if force {
        args.push("--force".to_string());
    }
    patronictl(&args)
}

pub fn reinit(member: &str, force: bool) -> crate::Result<()> {
    let mut args = vec!["reinit".to_string()];
    if force {
        args.push("--force".to_string());
    }
    args.push(member.to_string());
    patronictl(&args)
}

/// Build the patronictl argument vector for switchover/failover. Shared
/// by execution so flag handling cannot diverge between the two verbs.
fn takeover_args(
    verb: &str,
    leader: Option<&str>,
    candidate: Option<&str>,
    force: bool,
) -> Vec<String> {
    let mut args = vec![verb.to_string()];
    if let Some(leader) = leader {
        args.push("--leader".to_string());
        args.push(leader.to_string());
    }
    if let Some(candidate) = candidate {
        args.push("--candidate".to_string());
        args.push(candidate.to_string());
    }
    if force {
        args.push("--force".to_string());
    }
    args
}

pub fn switchover(
    leader: Option<&str>,
    candidate: Option<&str>,
    force: bool,
) -> crate::Result<()> {
    patronictl(&takeover_args("switchover", leader, candidate, force))
}

pub fn failover(candidate: Option<&str>, force: bool) -> crate::Result<()> {
    patronictl(&takeover_args("failover", None, candidate, force))
}

pub fn pause() -> crate::Result<()> {
    patronictl(&["pause".to_string()])
}

pub fn resume() -> crate::Result<()> {
    patronictl(&["resume".to_string()])
}
