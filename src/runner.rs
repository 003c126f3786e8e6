//! Shell dispatch of selected option scripts.
//!
//! The execution plan comes from [`Template::select_options`]: caller
//! order, deduplicated, first declared block per name. Scripts run strictly
//! in plan order with no parallelism.

use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::template::Template;

/// Execute the scripts selected by `requested` inside `workdir`.
pub fn run_options(template: &Template, requested: &[String], workdir: &Path) -> Result<()> {
    for script in template.select_options(requested) {
        if script.is_empty() {
            debug!("selected option has no commands");
            continue;
        }
        run_script(script, workdir)?;
    }
    Ok(())
}

/// Run one script body through `sh -c` with inherited stdio. A non-zero
/// exit aborts the run.
pub fn run_script(script: &str, workdir: &Path) -> Result<()> {
    info!("running:\n{}", script);
    let status = Command::new("sh").arg("-c").arg(script).current_dir(workdir).status()?;
    if !status.success() {
        return Err(Error::Command(format!("script exited with {}", status)));
    }
    Ok(())
}
