//! Annotation introspection: expose the command schema registry.

use super::finish;
use crate::ancs;
use crate::output::code::CODE_SYSTEM_INVALID_ARGS;
use crate::output::{is_structured_output, Report};

/// List every registered command schema.
pub fn list() -> crate::Result<()> {
    let registry = ancs::registry();
    if is_structured_output() {
        return finish(
            Report::ok(format!("{} command schemas", registry.len())).with_data(&registry),
        );
    }

    println!(
        "{:<32} {:<7} {:<9} {:<8} {:<12} {:<8}",
        "COMMAND", "TYPE", "RISK", "CONFIRM", "OS_USER", "COST"
    );
    for schema in registry {
        let map = schema.to_map();
        println!(
            "{:<32} {:<7} {:<9} {:<8} {:<12} {:<8}",
            schema.name, map["type"], map["risk"], map["confirm"], map["os_user"], map["cost"]
        );
    }
    Ok(())
}

/// Show one command's schema by full name.
pub fn show(name: &str) -> crate::Result<()> {
    match ancs::find(name) {
        Some(schema) => {
            if is_structured_output() {
                return finish(Report::ok(schema.name).with_data(schema));
            }
            for (key, value) in schema.to_map() {
                println!("{key:<12} {value}");
            }
            Ok(())
        }
        None => finish(
            Report::fail(CODE_SYSTEM_INVALID_ARGS, "unknown command")
                .with_detail(format!("no schema registered for {name:?}")),
        ),
    }
}
