//! Typed command metadata and its string-map adapter.
//!
//! The typed [`Schema`] struct is the source of truth; the string-keyed
//! map form exists for consumers that expect flat key/value annotations
//! (and for flag-level extension keys layered on via [`merge`]). Values
//! are advisory metadata, not security controls, so no validation happens
//! at this layer.

use std::collections::BTreeMap;

use serde::Serialize;

/// Whether a command reads or modifies state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Read-only operation
    Query,
    /// Modifies system state
    Action,
}

/// Output stability characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    /// Same input always produces same output
    Immutable,
    /// Output stable within one session
    Stable,
    /// Output may change between calls
    Volatile,
}

/// Safe parallel execution modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParallelSafety {
    /// Can run in parallel with any command
    Safe,
    /// Limited parallel execution allowed
    Restricted,
    /// Must run exclusively
    Unsafe,
}

/// Potential impact severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

/// Confirmation requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confirm {
    None,
    Recommended,
    Required,
}

/// Required operating system user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsUser {
    /// Run as the invoking user
    Current,
    /// Requires root/sudo
    Root,
    /// Requires the database superuser (e.g. postgres)
    Dbsu,
}

impl OsUser {
    pub fn as_str(self) -> &'static str {
        match self {
            OsUser::Current => "current",
            OsUser::Root => "root",
            OsUser::Dbsu => "dbsu",
        }
    }
}

/// Command metadata: the nine core annotation fields.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Schema {
    /// Command full name (e.g. "pgadm backup restore")
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub volatility: Volatility,
    pub parallel: ParallelSafety,
    /// True if repeatable safely
    pub idempotent: bool,
    pub risk: Risk,
    pub confirm: Confirm,
    pub os_user: OsUser,
    /// Expected duration in milliseconds (a hint, not a guarantee)
    pub cost: u64,
}

impl Schema {
    /// Build a schema from the fixed ordered fields.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        name: &'static str,
        kind: CommandKind,
        volatility: Volatility,
        parallel: ParallelSafety,
        idempotent: bool,
        risk: Risk,
        confirm: Confirm,
        os_user: OsUser,
        cost: u64,
    ) -> Self {
        Schema {
            name,
            kind,
            volatility,
            parallel,
            idempotent,
            risk,
            confirm,
            os_user,
            cost,
        }
    }

    /// Cheap defaults for read-only commands: stable query, safe to run
    /// in parallel, no confirmation, current user.
    pub const fn query(name: &'static str, cost: u64) -> Self {
        Schema::new(
            name,
            CommandKind::Query,
            Volatility::Stable,
            ParallelSafety::Safe,
            true,
            Risk::Safe,
            Confirm::None,
            OsUser::Current,
            cost,
        )
    }

    /// Flat string-map form for consumers that expect key/value
    /// annotations.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("name".into(), self.name.to_string());
        map.insert(
            "type".into(),
            match self.kind {
                CommandKind::Query => "query",
                CommandKind::Action => "action",
            }
            .into(),
        );
        map.insert(
            "volatility".into(),
            match self.volatility {
                Volatility::Immutable => "immutable",
                Volatility::Stable => "stable",
                Volatility::Volatile => "volatile",
            }
            .into(),
        );
        map.insert(
            "parallel".into(),
            match self.parallel {
                ParallelSafety::Safe => "safe",
                ParallelSafety::Restricted => "restricted",
                ParallelSafety::Unsafe => "unsafe",
            }
            .into(),
        );
        map.insert("idempotent".into(), self.idempotent.to_string());
        map.insert(
            "risk".into(),
            match self.risk {
                Risk::Safe => "safe",
                Risk::Low => "low",
                Risk::Medium => "medium",
                Risk::High => "high",
                Risk::Critical => "critical",
            }
            .into(),
        );
        map.insert(
            "confirm".into(),
            match self.confirm {
                Confirm::None => "none",
                Confirm::Recommended => "recommended",
                Confirm::Required => "required",
            }
            .into(),
        );
        map.insert("os_user".into(), self.os_user.as_str().into());
        map.insert("cost".into(), self.cost.to_string());
        map
    }
}

/// Union a base annotation map with overrides; override wins on key
/// collision. Returns the base untouched if the overrides are empty.
pub fn merge(
    base: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    if overrides.is_empty() {
        return base;
    }
    let mut merged = base;
    merged.extend(overrides);
    merged
}
