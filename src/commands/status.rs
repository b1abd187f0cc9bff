//! Environment and tool discovery.

use serde::Serialize;

use super::{finish, which};
use crate::output::Report;
use crate::{config, sys};

#[derive(Debug, Serialize)]
struct ToolStatus {
    name: &'static str,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusData {
    user: String,
    root: bool,
    pg_data: String,
    dbsu: String,
    stanza: String,
    pigsty_home: String,
    tools: Vec<ToolStatus>,
}

const TOOLS: &[&str] = &[
    "pg_ctl",
    "psql",
    "patronictl",
    "pgbackrest",
    "ansible-playbook",
];

fn collect() -> StatusData {
    StatusData {
        user: sys::current_user().unwrap_or_else(|| "unknown".into()),
        root: sys::is_root(),
        pg_data: config::pg_data().display().to_string(),
        dbsu: config::dbsu(),
        stanza: config::stanza(),
        pigsty_home: config::pigsty_home().display().to_string(),
        tools: TOOLS
            .iter()
            .map(|name| {
                let path = which(name);
                ToolStatus {
                    name,
                    available: path.is_some(),
                    path: path.map(|p| p.display().to_string()),
                }
            })
            .collect(),
    }
}

/// Report the local environment: resolved settings and which admin tools
/// are reachable on PATH.
pub fn status() -> crate::Result<()> {
    let data = collect();
    if crate::output::is_structured_output() {
        return finish(Report::ok("pgadm environment status").with_data(&data));
    }

    println!("user:        {}{}", data.user, if data.root { " (root)" } else { "" });
    println!("pg_data:     {}", data.pg_data);
    println!("dbsu:        {}", data.dbsu);
    println!("stanza:      {}", data.stanza);
    println!("pigsty_home: {}", data.pigsty_home);
    println!("tools:");
    for tool in &data.tools {
        match &tool.path {
            Some(path) => println!("  {:<18} {}", tool.name, path),
            None => println!("  {:<18} not found", tool.name),
        }
    }
    Ok(())
}

/// Print version and build information.
pub fn version() -> crate::Result<()> {
    #[derive(Serialize)]
    struct VersionData {
        version: &'static str,
        commit: &'static str,
        built: &'static str,
    }
    let data = VersionData {
        version: env!("CARGO_PKG_VERSION"),
        commit: env!("PGADM_GIT_COMMIT"),
        built: env!("PGADM_BUILD_TIMESTAMP"),
    };
    if crate::output::is_structured_output() {
        return finish(
            Report::ok(format!("pgadm {}", data.version)).with_data(&data),
        );
    }
    println!("pgadm {} ({}, built {})", data.version, data.commit, data.built);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_resolves_every_tool_entry() {
        let data = collect();
        assert_eq!(data.tools.len(), TOOLS.len());
        assert!(!data.user.is_empty());
        assert!(!data.pg_data.is_empty());
    }
}
