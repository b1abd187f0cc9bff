//! Pigsty deployment wrappers: bootstrap and configure.

use super::run_tool;
use crate::config;
use crate::Error;

fn pigsty_script(name: &str, args: &[String]) -> crate::Result<()> {
    let path = config::pigsty_home().join(name);
    if !path.is_file() {
        return Err(Error::CommandFailed(format!(
            "pigsty script not found: {} (set PIGSTY_HOME?)",
            path.display()
        )));
    }
    run_tool(&path.display().to_string(), args)
}

/// Bootstrap offline packages and the local admin environment.
pub fn boot(args: &[String]) -> crate::Result<()> {
    pigsty_script("bootstrap", args)
}

/// Generate pigsty.yml from a config template.
pub fn conf(template: &str, ip: Option<&str>, extra: &[String]) -> crate::Result<()> {
    let mut args = vec!["-c".to_string(), template.to_string()];
    if let Some(ip) = ip {
        args.push("-i".to_string());
        args.push(ip.to_string());
    }
    args.extend_from_slice(extra);
    pigsty_script("configure", &args)
}
