//! Legacy execution bridge.
//!
//! Most admin operations were written to talk straight to the console:
//! they print progress and results to stdout/stderr and signal failure
//! through a returned error. Under structured output mode automation
//! still needs a machine-parsable envelope, so this bridge wraps any such
//! operation: it captures the console output into a bounded buffer, folds
//! it into a [`Report`] with the module's OPERATION status code on
//! failure, and renders that envelope instead.
//!
//! In text mode the bridge is a strict no-op passthrough: the operation
//! runs with untouched stdio, keeping prompts, progress output and
//! blocking reads exactly as before.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::commands::finish;
use crate::output::code::compose;
use crate::output::{
    is_structured_output, output_format, set_output_format, Category, Module, OutputFormat, Report,
};
use crate::Error;

/// Capture bound for legacy console output. Bytes beyond the bound are
/// discarded and `output_truncated` is set; external tooling relies on
/// both the bound and the flag.
pub const CAPTURE_LIMIT: usize = 64 * 1024;

/// Flag/argument context recorded alongside a legacy invocation.
/// Null-valued entries are dropped before serialization.
pub type Params = Vec<(&'static str, Value)>;

/// Data payload of a Report produced by the bridge.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LegacyCommandData {
    pub command: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub params: serde_json::Map<String, Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub captured_output: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub output_truncated: bool,
}

/// Run a console-oriented operation through the bridge.
///
/// Text mode: calls `op` directly and returns its result unchanged.
/// Structured mode: captures the operation's console output (bounded at
/// [`CAPTURE_LIMIT`]), then renders a Report — success as
/// "`<command> completed`" with the capture as data, failure with the
/// module's generic OPERATION code and the error text as detail.
pub fn run_legacy_structured<F>(
    module: Module,
    command: &str,
    args: &[String],
    params: Params,
    op: F,
) -> crate::Result<()>
where
    F: FnOnce() -> crate::Result<()>,
{
    if !is_structured_output() {
        return op();
    }

    debug!(command, "capturing legacy command output");
    let (capture, result) = capture_legacy_output(op);

    let data = LegacyCommandData {
        command: command.to_string(),
        args: args.to_vec(),
        params: normalize_params(params),
        captured_output: capture.output.trim().to_string(),
        output_truncated: capture.truncated,
    };

    match result {
        Ok(()) => finish(Report::ok(format!("{command} completed")).with_data(&data)),
        Err(err) => finish(
            Report::fail(
                compose(module, Category::Operation, 1),
                format!("{command} failed"),
            )
            .with_detail(err.to_string())
            .with_data(&data),
        ),
    }
}

/// Report a parameter error detected before any execution was attempted,
/// e.g. a flag combination incompatible with structured mode. Never runs
/// any operation. Always returns an error.
///
/// Text mode: a plain error carrying `detail`. Structured mode: renders a
/// failing Report with the module's generic PARAM code.
pub fn structured_param_error(
    module: Module,
    command: &str,
    message: &str,
    detail: &str,
    args: &[String],
    params: Params,
) -> crate::Result<()> {
    if !is_structured_output() {
        return Err(Error::InvalidInput(detail.to_string()));
    }
    let data = LegacyCommandData {
        command: command.to_string(),
        args: args.to_vec(),
        params: normalize_params(params),
        ..LegacyCommandData::default()
    };
    finish(
        Report::fail(compose(module, Category::Param, 1), message)
            .with_detail(detail)
            .with_data(&data),
    )
}

/// Captured console output and whether the bound was exceeded.
#[derive(Debug, Default)]
pub(crate) struct Capture {
    pub output: String,
    pub truncated: bool,
}

/// Restores the process-wide output format when dropped.
struct FormatGuard {
    saved: OutputFormat,
}

impl FormatGuard {
    /// Force plain text for the duration of the guard, so nested
    /// structured-output logic inside a legacy operation cannot emit
    /// envelopes into the capture.
    fn force_text() -> Self {
        let saved = output_format();
        set_output_format(OutputFormat::Text);
        FormatGuard { saved }
    }
}

impl Drop for FormatGuard {
    fn drop(&mut self) {
        set_output_format(self.saved);
    }
}

/// Redirects fds 1 and 2 to a target fd, restoring the originals when
/// dropped. Drop-based so the process can never be left redirected, even
/// if the wrapped operation unwinds.
#[cfg(unix)]
struct StdioRedirect {
    saved_stdout: libc::c_int,
    saved_stderr: libc::c_int,
}

#[cfg(unix)]
impl StdioRedirect {
    fn to(target: libc::c_int) -> std::io::Result<Self> {
        unsafe {
            let saved_stdout = libc::dup(libc::STDOUT_FILENO);
            if saved_stdout < 0 {
                return Err(std::io::Error::last_os_error());
            }
            let saved_stderr = libc::dup(libc::STDERR_FILENO);
            if saved_stderr < 0 {
                let err = std::io::Error::last_os_error();
                libc::close(saved_stdout);
                return Err(err);
            }
            if libc::dup2(target, libc::STDOUT_FILENO) < 0
                || libc::dup2(target, libc::STDERR_FILENO) < 0
            {
                let err = std::io::Error::last_os_error();
                libc::dup2(saved_stdout, libc::STDOUT_FILENO);
                libc::dup2(saved_stderr, libc::STDERR_FILENO);
                libc::close(saved_stdout);
                libc::close(saved_stderr);
                return Err(err);
            }
            Ok(StdioRedirect {
                saved_stdout,
                saved_stderr,
            })
        }
    }
}

#[cfg(unix)]
impl Drop for StdioRedirect {
    fn drop(&mut self) {
        unsafe {
            libc::dup2(self.saved_stdout, libc::STDOUT_FILENO);
            libc::dup2(self.saved_stderr, libc::STDERR_FILENO);
            libc::close(self.saved_stdout);
            libc::close(self.saved_stderr);
        }
    }
}

/// Run `op` with fds 1/2 redirected into a pipe drained by a concurrent
/// reader thread, returning the bounded capture and the operation result.
///
/// The reader must run while `op` executes: a legacy operation can write
/// more than the OS pipe buffer holds, and with no concurrent drain it
/// would block forever. The reader thread's join handle doubles as the
/// completion signal — joining it after closing the write ends guarantees
/// end-of-stream was observed before the capture is read.
#[cfg(unix)]
pub(crate) fn capture_legacy_output<F>(op: F) -> (Capture, crate::Result<()>)
where
    F: FnOnce() -> crate::Result<()>,
{
    let mut fds = [0 as libc::c_int; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        // No pipe, no capture. Run the operation anyway.
        return (Capture::default(), op());
    }
    let (read_fd, write_fd) = (fds[0], fds[1]);

    // Flush anything buffered for the real stdio before redirecting.
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();

    let format_guard = FormatGuard::force_text();
    let redirect = match StdioRedirect::to(write_fd) {
        Ok(guard) => guard,
        Err(_) => {
            unsafe {
                libc::close(read_fd);
                libc::close(write_fd);
            }
            drop(format_guard);
            return (Capture::default(), op());
        }
    };

    let reader = std::thread::spawn(move || read_limited(read_fd, CAPTURE_LIMIT));

    let result = op();

    // Land any buffered writes in the pipe before tearing it down.
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();

    // Close every write end: our own copy first, then the fd 1/2 dups via
    // guard restore. Only then can the reader observe end-of-stream.
    unsafe { libc::close(write_fd) };
    drop(redirect);
    drop(format_guard);

    let capture = reader.join().unwrap_or_default();
    (capture, result)
}

/// Fallback for targets without fd-level redirection: run uncaptured,
/// still forcing text format for the duration.
#[cfg(not(unix))]
pub(crate) fn capture_legacy_output<F>(op: F) -> (Capture, crate::Result<()>)
where
    F: FnOnce() -> crate::Result<()>,
{
    let format_guard = FormatGuard::force_text();
    let result = op();
    drop(format_guard);
    (Capture::default(), result)
}

/// Drain a pipe into a buffer bounded at `limit` bytes. Bytes past the
/// bound are discarded but still counted, so truncation is detected even
/// for very large writers. Closes the fd on end-of-stream.
#[cfg(unix)]
fn read_limited(fd: libc::c_int, limit: usize) -> Capture {
    let mut buf: Vec<u8> = Vec::new();
    let mut tmp = [0u8; 4096];
    let mut total = 0usize;
    let mut truncated = false;

    loop {
        let n = unsafe { libc::read(fd, tmp.as_mut_ptr() as *mut libc::c_void, tmp.len()) };
        if n > 0 {
            let n = n as usize;
            if total < limit {
                let take = n.min(limit - total);
                if take < n {
                    truncated = true;
                }
                buf.extend_from_slice(&tmp[..take]);
            } else {
                truncated = true;
            }
            total += n;
        } else if n == 0 {
            break;
        } else {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            break;
        }
    }
    unsafe { libc::close(fd) };

    Capture {
        output: String::from_utf8_lossy(&buf).into_owned(),
        truncated,
    }
}

/// Convert recorded params into the serialized map form, dropping
/// null-valued entries. Shared with the dispatch layer so params are
/// filtered identically wherever a [`LegacyCommandData`] is built.
pub fn normalize_params(params: Params) -> serde_json::Map<String, Value> {
    params
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
