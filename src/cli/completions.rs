//! Static shell completions

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write completions for `shell` to `out`
pub fn write(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Print completions for `shell` to stdout
pub fn run(shell: Shell) {
    write(shell, &mut std::io::stdout());
}
