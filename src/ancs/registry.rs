//! Static registry of command schemas.
//!
//! One entry per user-facing command, authored at registration time and
//! read by the `pgadm schema` introspection commands. Action commands
//! carry the full nine-field set; queries use the cheaper defaults.

use super::schema::{CommandKind, Confirm, OsUser, ParallelSafety, Risk, Schema, Volatility};

use CommandKind::Action;
use Confirm::{None as NoConfirm, Recommended, Required};
use OsUser::{Current, Dbsu, Root};
use ParallelSafety::{Restricted, Safe, Unsafe};
use Risk::{Critical, High, Low, Medium};
use Volatility::Volatile;

// Kept as aligned one-line rows; rustfmt would break every entry.
#[rustfmt::skip]
const REGISTRY: &[Schema] = &[
    // Auxiliary
    Schema::query("pgadm status", 200),
    Schema::query("pgadm version", 10),
    Schema::query("pgadm schema list", 10),
    Schema::query("pgadm schema show", 10),
    // PostgreSQL control
    Schema::new("pgadm pg init", Action, Volatile, Unsafe, false, High, Required, Dbsu, 10_000),
    Schema::new("pgadm pg start", Action, Volatile, Restricted, true, Medium, NoConfirm, Dbsu, 5_000),
    Schema::new("pgadm pg stop", Action, Volatile, Restricted, true, High, Recommended, Dbsu, 5_000),
    Schema::new("pgadm pg restart", Action, Volatile, Restricted, true, High, Recommended, Dbsu, 10_000),
    Schema::new("pgadm pg reload", Action, Volatile, Restricted, true, Low, NoConfirm, Dbsu, 2_000),
    Schema::new("pgadm pg promote", Action, Volatile, Unsafe, false, Critical, Required, Dbsu, 10_000),
    Schema::query("pgadm pg status", 500),
    Schema::new("pgadm pg vacuum", Action, Volatile, Restricted, true, Low, NoConfirm, Dbsu, 60_000),
    Schema::new("pgadm pg analyze", Action, Volatile, Restricted, true, Low, NoConfirm, Dbsu, 60_000),
    Schema::query("pgadm pg log list", 200),
    Schema::query("pgadm pg log tail", 500),
    // Patroni
    Schema::query("pgadm patroni list", 1_000),
    Schema::new("pgadm patroni restart", Action, Volatile, Restricted, true, High, Recommended, Current, 30_000),
    Schema::new("pgadm patroni reload", Action, Volatile, Restricted, true, Low, NoConfirm, Current, 5_000),
    Schema::new("pgadm patroni reinit", Action, Volatile, Unsafe, false, High, Required, Current, 120_000),
    Schema::new("pgadm patroni switchover", Action, Volatile, Unsafe, false, Critical, Required, Current, 30_000),
    Schema::new("pgadm patroni failover", Action, Volatile, Unsafe, false, Critical, Required, Current, 30_000),
    Schema::new("pgadm patroni pause", Action, Volatile, Restricted, true, Medium, Recommended, Current, 2_000),
    Schema::new("pgadm patroni resume", Action, Volatile, Restricted, true, Medium, NoConfirm, Current, 2_000),
    // pgBackRest
    Schema::query("pgadm backup info", 2_000),
    Schema::new("pgadm backup backup", Action, Volatile, Restricted, true, Medium, Recommended, Dbsu, 300_000),
    Schema::new("pgadm backup restore", Action, Volatile, Unsafe, false, Critical, Required, Dbsu, 600_000),
    Schema::new("pgadm backup expire", Action, Volatile, Restricted, true, Medium, Recommended, Dbsu, 30_000),
    Schema::new("pgadm backup check", Action, Volatile, Safe, true, Low, NoConfirm, Dbsu, 10_000),
    Schema::new("pgadm backup stanza create", Action, Volatile, Restricted, true, Medium, Recommended, Dbsu, 10_000),
    Schema::new("pgadm backup stanza upgrade", Action, Volatile, Restricted, true, Medium, Recommended, Dbsu, 10_000),
    Schema::new("pgadm backup stanza delete", Action, Volatile, Unsafe, false, Critical, Required, Dbsu, 10_000),
    // Extensions
    Schema::new("pgadm ext add", Action, Volatile, Restricted, true, Medium, Recommended, Root, 60_000),
    Schema::new("pgadm ext rm", Action, Volatile, Restricted, false, High, Required, Root, 30_000),
    Schema::new("pgadm ext update", Action, Volatile, Restricted, true, Medium, Recommended, Root, 60_000),
    Schema::query("pgadm ext list", 500),
    // Playbooks
    Schema::new("pgadm do node-add", Action, Volatile, Restricted, true, High, Required, Root, 600_000),
    Schema::new("pgadm do node-rm", Action, Volatile, Unsafe, false, Critical, Required, Root, 300_000),
    Schema::new("pgadm do pgsql-add", Action, Volatile, Restricted, true, High, Required, Root, 600_000),
    Schema::new("pgadm do pgsql-rm", Action, Volatile, Unsafe, false, Critical, Required, Root, 300_000),
    // Pigsty
    Schema::new("pgadm sty boot", Action, Volatile, Unsafe, false, High, Required, Root, 600_000),
    Schema::new("pgadm sty conf", Action, Volatile, Restricted, true, Medium, Recommended, Current, 10_000),
];

/// All registered command schemas.
pub fn registry() -> &'static [Schema] {
    REGISTRY
}

/// Look up a schema by full command name.
pub fn find(name: &str) -> Option<&'static Schema> {
    REGISTRY.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for schema in registry() {
            assert!(seen.insert(schema.name), "duplicate schema: {}", schema.name);
        }
    }

    #[test]
    fn find_by_name() {
        let restore = find("pgadm backup restore").unwrap();
        assert_eq!(restore.risk, Risk::Critical);
        assert_eq!(restore.confirm, Confirm::Required);
        assert!(find("pgadm no such command").is_none());
    }

    #[test]
    fn actions_carry_full_metadata() {
        for schema in registry() {
            if schema.kind == CommandKind::Action {
                assert!(schema.cost > 0, "{}: action needs a cost hint", schema.name);
                assert!(
                    schema.risk != Risk::Safe,
                    "{}: actions are never risk-free",
                    schema.name
                );
            }
        }
    }

    #[test]
    fn critical_actions_require_confirmation() {
        for schema in registry() {
            if schema.risk == Risk::Critical {
                assert_eq!(
                    schema.confirm,
                    Confirm::Required,
                    "{}: critical risk must require confirmation",
                    schema.name
                );
            }
        }
    }
}
