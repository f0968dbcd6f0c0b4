use clap::{CommandFactory, Parser};
use clap_complete::Shell;

/// Print shell completions.
#[derive(Parser)]
#[group(skip)]
pub struct PrintCompletions {
    /// Shell.
    #[arg(value_enum, default_value_t = Shell::Bash)]
    shell: Shell,

    /// Binary name to complete, if installed under another name.
    #[arg(long, default_value = env!("CARGO_PKG_NAME"))]
    bin_name: String,
}

impl PrintCompletions {
    pub fn run(self) {
        clap_complete::generate(
            self.shell,
            &mut crate::Command::command(),
            self.bin_name,
            &mut std::io::stdout(),
        );
    }
}
