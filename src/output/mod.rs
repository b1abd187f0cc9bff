//! Structured output: the Report and Plan envelopes, the output format
//! selector, and the stable exit-code registry.
//!
//! Every command funnels its outcome through this module. In text mode
//! output stays human-oriented; in structured mode (`-o json|json-pretty|
//! yaml`) the envelopes are serialized whole so automation can parse
//! success, code, message and data without scraping console text.

pub mod code;
mod format;
mod plan;
mod print;
mod report;

pub use code::{exit_code, Category, Module};
pub use format::{is_structured_output, output_format, set_output_format, OutputFormat};
pub use plan::{Action, Plan, Resource};
pub use print::{print, print_to};
pub use report::Report;
