//! Command implementations.
//!
//! Each submodule wraps one external admin tool (pg_ctl, patronictl,
//! pgbackrest, the package manager, the Pigsty playbooks). The wrappers
//! stay thin: build the argument vector, invoke the tool with inherited
//! stdio, and let the dispatch layer route the outcome through the
//! Report path or the capture bridge.

pub mod backup;
pub mod do_;
pub mod ext;
pub mod patroni;
pub mod postgres;
pub mod schema;
pub mod status;
pub mod sty;

use std::io::{BufRead, Write};
use std::process::Command;

use tracing::debug;

use crate::output::{self, Plan, Report};
use crate::{sys, Error};

/// Render a Report and translate it into the dispatch contract: `Ok` on
/// success, otherwise an [`Error::Exit`] carrying the Report's exit code
/// for the outermost dispatcher to honor.
pub fn finish(report: Report) -> crate::Result<()> {
    output::print(&report)?;
    if report.success {
        Ok(())
    } else {
        Err(Error::Exit {
            code: report.exit_code(),
            message: report.message,
        })
    }
}

/// Render a Plan using the process-wide output format. Never executes
/// anything.
pub fn print_plan(plan: &Plan) -> crate::Result<()> {
    let mut rendered = plan.render(output::output_format())?;
    rendered.push(b'\n');
    std::io::stdout().write_all(&rendered)?;
    Ok(())
}

/// Invoke an external tool with inherited stdio, mapping a non-zero exit
/// status to an error. The inherited stdio is what the capture bridge
/// sees in structured mode.
pub fn run_tool(program: &str, args: &[String]) -> crate::Result<()> {
    debug!(program, ?args, "invoking external tool");
    let status = Command::new(program).args(args).status().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::CommandFailed(format!("{program}: command not found"))
        } else {
            Error::CommandFailed(format!("{program}: {e}"))
        }
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::CommandFailed(format!(
            "{program} exited with code {}",
            status.code().unwrap_or(-1)
        )))
    }
}

/// Invoke a tool as the given OS user, inserting `sudo -u <user>` when
/// the current user differs.
pub fn run_tool_as(user: &str, program: &str, args: &[String]) -> crate::Result<()> {
    if !sys::needs_sudo_as(user) {
        return run_tool(program, args);
    }
    let mut sudo_args = vec!["-u".to_string(), user.to_string(), program.to_string()];
    sudo_args.extend_from_slice(args);
    run_tool("sudo", &sudo_args)
}

/// Ask for interactive confirmation on stdin. Only reached in text mode;
/// structured mode is non-interactive by contract.
pub fn confirm(prompt: &str) -> crate::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Locate a program on PATH, returning its full path.
pub fn which(program: &str) -> Option<std::path::PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
