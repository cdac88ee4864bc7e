//! Shell completions command implementation.

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

/// Write completions for `shell` to stdout.
pub fn execute(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
