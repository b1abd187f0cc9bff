//! Stable status codes and their shell exit-code mapping.
//!
//! Status codes follow the MMCCNN layout: two digits of module, two of
//! category, two of local error number, composed by plain addition. The
//! numeric values are a published contract: automation keys off specific
//! codes and ranges, so the registry is strictly append-only. New modules,
//! categories or local codes may be added; existing values must never be
//! reassigned.

use serde::Serialize;

/// Functional module owning a band of status codes (the MM digits).
///
/// Module bases start at 10 to avoid leading zeros in rendered codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Module {
    /// Extension management
    Ext = 100_000,
    /// Repository management
    Repo = 110_000,
    /// Build system
    Build = 120_000,
    /// PostgreSQL control
    Pg = 130_000,
    /// pgBackRest
    Backup = 140_000,
    /// Patroni
    Patroni = 150_000,
    /// PITR recovery
    Pitr = 160_000,
    /// pg_exporter
    Exporter = 170_000,
    /// Context collection
    Ctx = 180_000,
    /// Pigsty management
    Sty = 200_000,
    /// Task orchestration (playbooks)
    Do = 210_000,
    /// Configuration system
    Config = 900_000,
    /// System-level errors
    System = 990_000,
}

impl Module {
    /// Numeric base of this module's code band.
    pub const fn base(self) -> i32 {
        self as i32
    }
}

/// Result/error category within a module (the CC digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum Category {
    /// Success / informational
    Success = 0,
    /// Parameter / usage errors
    Param = 100,
    /// Permission errors
    Perm = 200,
    /// Dependency errors
    Depend = 300,
    /// Network errors
    Network = 400,
    /// Resource errors
    Resource = 500,
    /// State errors
    State = 600,
    /// Configuration errors
    Config = 700,
    /// Operation errors
    Operation = 800,
    /// Internal errors
    Internal = 900,
}

impl Category {
    /// Numeric offset of this category within a module band.
    pub const fn offset(self) -> i32 {
        self as i32
    }
}

/// Compose a status code from module, category and local error number.
pub const fn compose(module: Module, category: Category, local: i32) -> i32 {
    module.base() + category.offset() + local
}

// Extension module codes (Module::Ext)
pub const CODE_EXT_NOT_FOUND: i32 = compose(Module::Ext, Category::Resource, 1);
pub const CODE_EXT_NO_PACKAGE: i32 = compose(Module::Ext, Category::Resource, 2);
pub const CODE_EXT_CATALOG_ERROR: i32 = compose(Module::Ext, Category::Config, 1);
pub const CODE_EXT_NO_PG: i32 = compose(Module::Ext, Category::State, 1);
pub const CODE_EXT_UNSUPPORTED_OS: i32 = compose(Module::Ext, Category::State, 2);
pub const CODE_EXT_INVALID_ARGS: i32 = compose(Module::Ext, Category::Param, 1);
pub const CODE_EXT_INSTALL_FAILED: i32 = compose(Module::Ext, Category::Operation, 1);
pub const CODE_EXT_REMOVE_FAILED: i32 = compose(Module::Ext, Category::Operation, 2);
pub const CODE_EXT_UPDATE_FAILED: i32 = compose(Module::Ext, Category::Operation, 3);

// PostgreSQL control codes (Module::Pg)
pub const CODE_PG_NOT_RUNNING: i32 = compose(Module::Pg, Category::State, 1);
pub const CODE_PG_NOT_INITIALIZED: i32 = compose(Module::Pg, Category::State, 2);
pub const CODE_PG_ALREADY_RUNNING: i32 = compose(Module::Pg, Category::State, 3);
pub const CODE_PG_DATA_DIR_NOT_FOUND: i32 = compose(Module::Pg, Category::Resource, 1);
pub const CODE_PG_INVALID_ARGS: i32 = compose(Module::Pg, Category::Param, 1);
pub const CODE_PG_START_FAILED: i32 = compose(Module::Pg, Category::Operation, 1);
pub const CODE_PG_STOP_FAILED: i32 = compose(Module::Pg, Category::Operation, 2);
pub const CODE_PG_RESTART_FAILED: i32 = compose(Module::Pg, Category::Operation, 3);
pub const CODE_PG_RELOAD_FAILED: i32 = compose(Module::Pg, Category::Operation, 4);
pub const CODE_PG_INIT_FAILED: i32 = compose(Module::Pg, Category::Operation, 6);
pub const CODE_PG_PROMOTE_FAILED: i32 = compose(Module::Pg, Category::Operation, 7);
pub const CODE_PG_NOT_FOUND: i32 = compose(Module::Pg, Category::Depend, 1);

// pgBackRest codes (Module::Backup)
pub const CODE_PB_INVALID_BACKUP_TYPE: i32 = compose(Module::Backup, Category::Param, 1);
pub const CODE_PB_INVALID_RESTORE_PARAMS: i32 = compose(Module::Backup, Category::Param, 2);
pub const CODE_PB_STANZA_DELETE_REQUIRES_FORCE: i32 = compose(Module::Backup, Category::Param, 3);
pub const CODE_PB_STANZA_NOT_FOUND: i32 = compose(Module::Backup, Category::Resource, 1);
pub const CODE_PB_PG_RUNNING: i32 = compose(Module::Backup, Category::State, 3);
pub const CODE_PB_CONFIG_NOT_FOUND: i32 = compose(Module::Backup, Category::Config, 1);
pub const CODE_PB_INFO_FAILED: i32 = compose(Module::Backup, Category::Operation, 1);
pub const CODE_PB_BACKUP_FAILED: i32 = compose(Module::Backup, Category::Operation, 2);
pub const CODE_PB_RESTORE_FAILED: i32 = compose(Module::Backup, Category::Operation, 3);
pub const CODE_PB_STANZA_CREATE_FAILED: i32 = compose(Module::Backup, Category::Operation, 4);
pub const CODE_PB_STANZA_UPGRADE_FAILED: i32 = compose(Module::Backup, Category::Operation, 5);
pub const CODE_PB_STANZA_DELETE_FAILED: i32 = compose(Module::Backup, Category::Operation, 6);

// Patroni codes (Module::Patroni)
pub const CODE_PT_NOT_FOUND: i32 = compose(Module::Patroni, Category::Depend, 1);
pub const CODE_PT_NOT_RUNNING: i32 = compose(Module::Patroni, Category::State, 1);
pub const CODE_PT_SWITCHOVER_NEED_FORCE: i32 = compose(Module::Patroni, Category::Param, 1);
pub const CODE_PT_FAILOVER_NEED_FORCE: i32 = compose(Module::Patroni, Category::Param, 2);
pub const CODE_PT_LIST_FAILED: i32 = compose(Module::Patroni, Category::Operation, 1);
pub const CODE_PT_SWITCHOVER_FAILED: i32 = compose(Module::Patroni, Category::Operation, 5);
pub const CODE_PT_FAILOVER_FAILED: i32 = compose(Module::Patroni, Category::Operation, 6);

// PITR codes (Module::Pitr)
pub const CODE_PITR_INVALID_ARGS: i32 = compose(Module::Pitr, Category::Param, 1);
pub const CODE_PITR_NO_BACKUP: i32 = compose(Module::Pitr, Category::Depend, 1);
pub const CODE_PITR_PRECHECK_FAILED: i32 = compose(Module::Pitr, Category::State, 1);
pub const CODE_PITR_RESTORE_FAILED: i32 = compose(Module::Pitr, Category::Operation, 2);

// Pigsty codes (Module::Sty)
pub const CODE_STY_CONF_INVALID_ARGS: i32 = compose(Module::Sty, Category::Param, 1);
pub const CODE_STY_CONF_TEMPLATE_NOT_FOUND: i32 = compose(Module::Sty, Category::Resource, 1);
pub const CODE_STY_CONF_FAILED: i32 = compose(Module::Sty, Category::Operation, 1);
pub const CODE_STY_BOOT_FAILED: i32 = compose(Module::Sty, Category::Operation, 2);

// System codes (Module::System)
pub const CODE_SYSTEM_INVALID_ARGS: i32 = compose(Module::System, Category::Param, 1);
pub const CODE_SYSTEM_COMMAND_FAILED: i32 = compose(Module::System, Category::Operation, 1);

/// Central registry of every named status code.
///
/// New codes must be appended here so the collision check covers them.
pub const REGISTRY: &[(i32, &str)] = &[
    (CODE_EXT_NOT_FOUND, "ext: extension not found"),
    (CODE_EXT_NO_PACKAGE, "ext: no package for current OS/PG"),
    (CODE_EXT_CATALOG_ERROR, "ext: catalog load error"),
    (CODE_EXT_NO_PG, "ext: no postgres installation found"),
    (CODE_EXT_UNSUPPORTED_OS, "ext: unsupported operating system"),
    (CODE_EXT_INVALID_ARGS, "ext: invalid arguments"),
    (CODE_EXT_INSTALL_FAILED, "ext: install failed"),
    (CODE_EXT_REMOVE_FAILED, "ext: remove failed"),
    (CODE_EXT_UPDATE_FAILED, "ext: update failed"),
    (CODE_PG_NOT_RUNNING, "pg: not running"),
    (CODE_PG_NOT_INITIALIZED, "pg: data directory not initialized"),
    (CODE_PG_ALREADY_RUNNING, "pg: already running"),
    (CODE_PG_DATA_DIR_NOT_FOUND, "pg: data directory not found"),
    (CODE_PG_INVALID_ARGS, "pg: invalid arguments"),
    (CODE_PG_START_FAILED, "pg: start failed"),
    (CODE_PG_STOP_FAILED, "pg: stop failed"),
    (CODE_PG_RESTART_FAILED, "pg: restart failed"),
    (CODE_PG_RELOAD_FAILED, "pg: reload failed"),
    (CODE_PG_INIT_FAILED, "pg: initdb failed"),
    (CODE_PG_PROMOTE_FAILED, "pg: promote failed"),
    (CODE_PG_NOT_FOUND, "pg: installation not found"),
    (CODE_PB_INVALID_BACKUP_TYPE, "pb: invalid backup type"),
    (CODE_PB_INVALID_RESTORE_PARAMS, "pb: invalid restore parameters"),
    (
        CODE_PB_STANZA_DELETE_REQUIRES_FORCE,
        "pb: stanza delete requires --force",
    ),
    (CODE_PB_STANZA_NOT_FOUND, "pb: stanza not found"),
    (CODE_PB_PG_RUNNING, "pb: postgres is running"),
    (CODE_PB_CONFIG_NOT_FOUND, "pb: config not found"),
    (CODE_PB_INFO_FAILED, "pb: info failed"),
    (CODE_PB_BACKUP_FAILED, "pb: backup failed"),
    (CODE_PB_RESTORE_FAILED, "pb: restore failed"),
    (CODE_PB_STANZA_CREATE_FAILED, "pb: stanza create failed"),
    (CODE_PB_STANZA_UPGRADE_FAILED, "pb: stanza upgrade failed"),
    (CODE_PB_STANZA_DELETE_FAILED, "pb: stanza delete failed"),
    (CODE_PT_NOT_FOUND, "pt: patronictl not found"),
    (CODE_PT_NOT_RUNNING, "pt: patroni not running"),
    (CODE_PT_SWITCHOVER_NEED_FORCE, "pt: switchover needs --force"),
    (CODE_PT_FAILOVER_NEED_FORCE, "pt: failover needs --force"),
    (CODE_PT_LIST_FAILED, "pt: list failed"),
    (CODE_PT_SWITCHOVER_FAILED, "pt: switchover failed"),
    (CODE_PT_FAILOVER_FAILED, "pt: failover failed"),
    (CODE_PITR_INVALID_ARGS, "pitr: invalid arguments"),
    (CODE_PITR_NO_BACKUP, "pitr: backup not found"),
    (CODE_PITR_PRECHECK_FAILED, "pitr: pre-check failed"),
    (CODE_PITR_RESTORE_FAILED, "pitr: restore failed"),
    (CODE_STY_CONF_INVALID_ARGS, "sty: invalid configure arguments"),
    (CODE_STY_CONF_TEMPLATE_NOT_FOUND, "sty: template not found"),
    (CODE_STY_CONF_FAILED, "sty: configure failed"),
    (CODE_STY_BOOT_FAILED, "sty: boot failed"),
    (CODE_SYSTEM_INVALID_ARGS, "system: invalid arguments"),
    (CODE_SYSTEM_COMMAND_FAILED, "system: command failed"),
];

/// Convert a status code to a shell exit code.
///
/// The category digits (CC) select the exit code, so every code in a
/// category band maps to one stable small integer:
///
/// - success → 0
/// - param → 2, perm → 3, depend → 4, network → 5, resource → 6
/// - state → 9, config → 8
/// - operation/internal → 1
pub fn exit_code(code: i32) -> i32 {
    if code == 0 {
        return 0;
    }
    if code < 0 {
        return 1;
    }

    // Category is the hundreds digit pair of the last four digits.
    let category = (code % 10_000) / 100;
    match category {
        0 => 0,
        1 => 2,
        2 => 3,
        3 => 4,
        4 => 5,
        5 => 6,
        6 => 9,
        7 => 8,
        _ => 1,
    }
}
