//! PostgreSQL control wrappers around pg_ctl and friends.
//!
//! These are legacy console operations: they print whatever the tool
//! prints and report failure through the returned error. Structured
//! output is handled by the capture bridge at the dispatch layer.

use std::fs;

use super::{run_tool, run_tool_as};
use crate::config;

fn pg_ctl(action: &str, extra: &[String]) -> crate::Result<()> {
    let mut args = vec![
        "-D".to_string(),
        config::pg_data().display().to_string(),
        action.to_string(),
    ];
    args.extend_from_slice(extra);
    run_tool_as(&config::dbsu(), "pg_ctl", &args)
}

pub fn init(initdb_args: &[String]) -> crate::Result<()> {
    let mut extra = Vec::new();
    if !initdb_args.is_empty() {
        extra.push("-o".to_string());
        extra.push(initdb_args.join(" "));
    }
    pg_ctl("initdb", &extra)
}

pub fn start() -> crate::Result<()> {
    pg_ctl("start", &["-w".to_string()])
}

pub fn stop(mode: &str) -> crate::Result<()> {
    pg_ctl("stop", &["-m".to_string(), mode.to_string(), "-w".to_string()])
}

pub fn restart(mode: &str) -> crate::Result<()> {
    pg_ctl(
        "restart",
        &["-m".to_string(), mode.to_string(), "-w".to_string()],
    )
}

pub fn reload() -> crate::Result<()> {
    pg_ctl("reload", &[])
}

pub fn promote() -> crate::Result<()> {
    pg_ctl("promote", &["-w".to_string()])
}

pub fn status() -> crate::Result<()> {
    pg_ctl("status", &[])
}

fn maintenance(tool: &str, db: Option<&str>, extra: &[String]) -> crate::Result<()> {
    let mut args = extra.to_vec();
    match db {
        Some(db) => {
            args.push("-d".to_string());
            args.push(db.to_string());
        }
        None => args.push("-a".to_string()),
    }
    run_tool_as(&config::dbsu(), tool, &args)
}

pub fn vacuum(db: Option<&str>, full: bool) -> crate::Result<()> {
    let mut extra = vec!["-v".to_string()];
    if full {
        extra.push("-f".to_string());
    }
    maintenance("vacuumdb", db, &extra)
}

pub fn analyze(db: Option<&str>) -> crate::Result<()> {
    maintenance("vacuumdb", db, &["-z".to_string(), "-v".to_string()])
}

/// List log files in the postgres log directory with their sizes,
/// newest-modified last.
pub fn log_list() -> crate::Result<()> {
    let dir = config::pg_log_dir();
    let mut entries: Vec<(String, u64, std::time::SystemTime)> = Vec::new();
    for entry in fs::read_dir(&dir).map_err(|e| {
        crate::Error::CommandFailed(format!("cannot read log dir {}: {e}", dir.display()))
    })? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if meta.is_file() {
            entries.push((
                entry.file_name().to_string_lossy().into_owned(),
                meta.len(),
                meta.modified().unwrap_or(std::time::UNIX_EPOCH),
            ));
        }
    }
    entries.sort_by_key(|(_, _, modified)| *modified);
    for (name, size, _) in &entries {
        println!("{size:>12}  {name}");
    }
    if entries.is_empty() {
        println!("no log files in {}", dir.display());
    }
    Ok(())
}

/// Tail a log file; defaults to the most recently modified one.
pub fn log_tail(file: Option<&str>, lines: usize) -> crate::Result<()> {
    let path = match file {
        Some(f) => config::pg_log_dir().join(f),
        None => latest_log_file()?,
    };
    run_tool(
        "tail",
        &[
            "-n".to_string(),
            lines.to_string(),
            path.display().to_string(),
        ],
    )
}

fn latest_log_file() -> crate::Result<std::path::PathBuf> {
    let dir = config::pg_log_dir();
    let mut newest: Option<(std::path::PathBuf, std::time::SystemTime)> = None;
    for entry in fs::read_dir(&dir).map_err(|e| {
        crate::Error::CommandFailed(format!("cannot read log dir {}: {e}", dir.display()))
    })? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().unwrap_or(std::time::UNIX_EPOCH);
        if newest.as_ref().map(|(_, m)| modified > *m).unwrap_or(true) {
            newest = Some((entry.path(), modified));
        }
    }
    newest.map(|(path, _)| path).ok_or_else(|| {
        crate::Error::CommandFailed(format!("no log files in {}", dir.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn latest_log_file_picks_newest() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("postgresql-Mon.log");
        let new = dir.path().join("postgresql-Tue.log");
        fs::File::create(&old).unwrap().write_all(b"old").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        fs::File::create(&new).unwrap().write_all(b"new").unwrap();

        unsafe { std::env::set_var("PGLOG", dir.path()) };
        let latest = latest_log_file().unwrap();
        unsafe { std::env::remove_var("PGLOG") };
        assert_eq!(latest, new);
    }

    #[test]
    #[serial]
    fn log_list_fails_on_missing_dir() {
        unsafe { std::env::set_var("PGLOG", "/no/such/dir/pgadm") };
        let err = log_list().unwrap_err();
        unsafe { std::env::remove_var("PGLOG") };
        assert!(err.to_string().contains("cannot read log dir"));
    }
}
