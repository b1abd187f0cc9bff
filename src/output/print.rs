//! Single-write render path for Report envelopes.

use std::io::Write;

use super::{output_format, Report};

/// Render a Report according to the process-wide output format and write
/// it to stdout, followed by a newline. Exactly one write per invocation.
pub fn print(report: &Report) -> crate::Result<()> {
    print_to(&mut std::io::stdout(), report)
}

/// Render a Report to the given writer.
pub fn print_to<W: Write>(w: &mut W, report: &Report) -> crate::Result<()> {
    let mut rendered = report.render(output_format())?;
    rendered.push(b'\n');
    w.write_all(&rendered)?;
    Ok(())
}
