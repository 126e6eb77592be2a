//! az-ssh - An OpenSSH-compatible front end for `az ssh`
//!
//! This crate accepts the command line of the OpenSSH 8.9p1 client, as
//! produced by tools such as Ansible (`ansible_ssh_executable`), and
//! re-executes it as `az ssh` with translated arguments.
//!
//! # Translation
//!
//! - The destination becomes `--name <destination>`
//! - `--arc`, `--subscription`, `--resource-group` and `--local-user`
//!   select `az ssh arc` and its options
//! - `-o Control*` settings are dropped, as `az ssh` blocks for the
//!   `ControlPersist` duration when they are passed through
//! - All other ssh options and the remote command follow a `--` separator
//!
//! # Example Usage (CLI)
//!
//! ```bash
//! az-ssh 1.2.3.4
//! az-ssh --arc --subscription "subid" --resource-group "rg" --local-user "admin" server1
//! ```
//!
//! # Example Usage (Ansible inventory)
//!
//! ```ini
//! [azure:vars]
//! ansible_ssh_executable=/usr/local/bin/az-ssh
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod exec;
pub mod plan;
pub mod translate;

// Re-exports for convenience
pub use args::{parse, LongOption, OptionName, ParsedArgs, ParsedOption};
pub use config::Config;
pub use error::{AzSshError, Result};
pub use exec::exec;
pub use plan::InvocationPlan;
pub use translate::{build_plan, translate, ArcOptions};
