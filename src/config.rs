//! Static configuration for az-ssh
//!
//! Everything here is fixed at compile time. The only runtime knob is the
//! log filter, read by the binary from [`LOG_ENV_VAR`].

/// Program the translated arguments are handed to
pub const TARGET_PROGRAM: &str = "az";

/// Subcommand placed before the translated tokens
pub const TARGET_SUBCOMMAND: &str = "ssh";

/// Exit status for malformed arguments
pub const EXIT_USAGE: u8 = 2;

/// Exit status when the target program cannot be found
pub const EXIT_NOT_FOUND: u8 = 127;

/// Exit status when the target program cannot be executed
pub const EXIT_NOT_EXECUTABLE: u8 = 126;

/// Exit status for any other execution failure
pub const EXIT_EXEC_FAILED: u8 = 1;

/// Environment variable holding a `tracing-subscriber` filter directive
pub const LOG_ENV_VAR: &str = "AZ_SSH_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or invalid.
/// stdout belongs to the ssh session, so logs stay quiet by default.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Usage text printed after a usage error
pub const USAGE: &str = r#"
SSH wrapper for az ssh

Usage:

This wrapper emulates OpenSSH, but translates the arguments and
supplies them to az ssh so that it can be used by Ansible as the
ansible_ssh_executable.

ControlMaster, ControlPersist and ControlPath options (-o Control*) are
dropped, as az ssh blocks for the duration of ControlPersist when they
are passed through.

Additional options for Azure Arc:
    --arc                   Use Azure Arc mode
    --subscription VALUE    Azure subscription ID
    --resource-group VALUE  Azure resource group name
    --local-user VALUE      Username to connect as

All arguments accepted by OpenSSH 8.9p1 are supported:

    az-ssh [-46AaCfGgKkMNnqsTtVvXxYy] [-B bind_interface]
           [-b bind_address] [-c cipher_spec] [-D [bind_address:]port]
           [-E log_file] [-e escape_char] [-F configfile] [-I pkcs11]
           [-i identity_file] [-J [user@]host[:port]] [-L address]
           [-l login_name] [-m mac_spec] [-O ctl_cmd] [-o option] [-p port]
           [-Q query_option] [-R address] [-S ctl_path] [-W host:port]
           [-w local_tun[:remote_tun]] destination [command [argument ...]]

See the ssh man page for details.

Examples:

    az-ssh 1.2.3.4
    az-ssh --arc --subscription "subid" --resource-group "rg" --local-user "admin" server1
"#;

/// Where translated invocations are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program to execute
    pub program: String,

    /// Subcommand placed before the translated tokens
    pub subcommand: String,
}

impl Config {
    /// Create a configuration targeting `az ssh`
    pub fn new() -> Self {
        Self {
            program: TARGET_PROGRAM.to_string(),
            subcommand: TARGET_SUBCOMMAND.to_string(),
        }
    }

    /// Set the program to execute
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
