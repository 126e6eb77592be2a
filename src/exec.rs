//! Handing the translated invocation over to `az`
//!
//! On Unix the current process image is replaced, so stdin/stdout/stderr
//! and the exit status belong to `az` directly. Elsewhere the program is
//! run as a child with inherited stdio and its exit status is propagated.

use std::convert::Infallible;
use std::process::Command;

use tracing::debug;

use crate::error::{AzSshError, Result};
use crate::plan::InvocationPlan;

/// Execute the plan in place of the current process
///
/// The success type is uninhabited: on success this function never
/// returns. The program is looked up on `PATH` unless it contains a path
/// separator.
///
/// # Returns
/// * `Err(AzSshError::NotFound)` - The program is not on `PATH`
/// * `Err(AzSshError::NotExecutable)` - The program cannot be executed
/// * `Err(AzSshError::Exec)` - Any other failure
pub fn exec(plan: &InvocationPlan) -> Result<Infallible> {
    let mut command = Command::new(&plan.program);
    command.args(plan.args());

    debug!("executing {}", plan);
    replace_process(command, &plan.program)
}

#[cfg(unix)]
fn replace_process(mut command: Command, program: &str) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    // Only returns on failure
    let err = command.exec();
    Err(AzSshError::exec(program, err))
}

#[cfg(not(unix))]
fn replace_process(mut command: Command, program: &str) -> Result<Infallible> {
    let status = command
        .status()
        .map_err(|e| AzSshError::exec(program, e))?;
    std::process::exit(status.code().unwrap_or(1))
}
