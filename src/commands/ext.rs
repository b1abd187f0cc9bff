//! Extension package wrappers around the OS package manager.
//!
//! Catalog resolution (extension name to package name per OS/PG major)
//! lives outside this tool; these wrappers take package names as given
//! and drive the package manager directly.

use super::{run_tool_as, which};
use crate::Error;

/// Pick the system package manager from PATH.
pub fn package_manager() -> crate::Result<&'static str> {
    for pm in ["apt-get", "dnf", "yum"] {
        if which(pm).is_some() {
            return Ok(pm);
        }
    }
    Err(Error::CommandFailed(
        "no supported package manager found (apt-get, dnf, yum)".into(),
    ))
}

fn pm_run(verb: &str, packages: &[String]) -> crate::Result<()> {
    let pm = package_manager()?;
    let mut args = vec![verb.to_string(), "-y".to_string()];
    args.extend_from_slice(packages);
    run_tool_as("root", pm, &args)
}

pub fn add(packages: &[String]) -> crate::Result<()> {
    pm_run("install", packages)
}

pub fn remove(packages: &[String]) -> crate::Result<()> {
    pm_run("remove", packages)
}

pub fn update(packages: &[String]) -> crate::Result<()> {
    // With no packages given, upgrade everything the manager tracks.
    if packages.is_empty() {
        let pm = package_manager()?;
        let verb = if pm == "apt-get" { "upgrade" } else { "update" };
        return run_tool_as("root", pm, &[verb.to_string(), "-y".to_string()]);
    }
    pm_run("upgrade", packages)
}

/// List extensions available to the running server.
pub fn list() -> crate::Result<()> {
    super::run_tool_as(
        &crate::config::dbsu(),
        "psql",
        &[
            "-Xqc".to_string(),
            "SELECT name, default_version, installed_version, comment \
             FROM pg_available_extensions ORDER BY name"
                .to_string(),
        ],
    )
}
