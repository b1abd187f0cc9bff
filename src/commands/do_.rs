//! Pigsty playbook wrappers around ansible-playbook.
//!
//! Each verb maps to one playbook under the Pigsty home, limited to the
//! given cluster or host selector.

use super::run_tool;
use crate::config;
use crate::Error;

/// Run one playbook from the Pigsty home, limited to `selector`.
fn playbook(name: &str, selector: &str, extra: &[String]) -> crate::Result<()> {
    let home = config::pigsty_home();
    let path = home.join(name);
    if !path.is_file() {
        return Err(Error::CommandFailed(format!(
            "playbook not found: {} (set PIGSTY_HOME?)",
            path.display()
        )));
    }
    let mut args = vec![
        path.display().to_string(),
        "-l".to_string(),
        selector.to_string(),
    ];
    args.extend_from_slice(extra);
    run_tool("ansible-playbook", &args)
}

pub fn node_add(selector: &str, extra: &[String]) -> crate::Result<()> {
    playbook("node.yml", selector, extra)
}

pub fn node_rm(selector: &str, extra: &[String]) -> crate::Result<()> {
    playbook("node-rm.yml", selector, extra)
}

pub fn pgsql_add(cluster: &str, extra: &[String]) -> crate::Result<()> {
    playbook("pgsql.yml", cluster, extra)
}

pub fn pgsql_rm(cluster: &str, extra: &[String]) -> crate::Result<()> {
    playbook("pgsql-rm.yml", cluster, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_playbook_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        unsafe { std::env::set_var("PIGSTY_HOME", dir.path()) };
        let err = pgsql_add("pg-test", &[]).unwrap_err();
        unsafe { std::env::remove_var("PIGSTY_HOME") };
        assert!(err.to_string().contains("playbook not found"));
        assert!(err.to_string().contains("pgsql.yml"));
    }
}
