mod command;
// the compositor api is wider than what the cli drives
#[allow(dead_code)]
mod pile;
mod preview;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
enum Command {
    Build(command::Build),
    Preview(command::Preview),
    PrintCompletions(command::PrintCompletions),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let action = Command::parse();

    match action {
        Command::Build(c) => c.run()?,
        Command::Preview(c) => c.run()?,
        Command::PrintCompletions(c) => c.run(),
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pile::Background;
    use clap::CommandFactory;

    #[test]
    fn cli() {
        Command::command().debug_assert();
    }

    #[test]
    fn build_args() {
        let Command::Build(build) = Command::try_parse_from([
            "pile", "build", "-o", "out.png", "-r", "2", "-c", "3", "-a", "--wrap", "-b",
            "#102030", "a.png", "b.png",
        ])
        .unwrap() else {
            panic!("expected build");
        };
        assert_eq!(build.output.to_str(), Some("out.png"));
        assert_eq!((build.args.rows, build.args.columns), (Some(2), Some(3)));
        assert!(build.args.keep_aspect && build.args.wrap && !build.preview);
        assert_eq!(build.args.background, Background([16, 32, 48]));
        assert_eq!(build.args.images.len(), 2);
    }

    #[test]
    fn rows_require_columns() {
        assert!(Command::try_parse_from(["pile", "preview", "-r", "2", "a.png"]).is_err());
        assert!(Command::try_parse_from(["pile", "preview", "a.png"]).is_ok());
        assert!(Command::try_parse_from(["pile", "preview"]).is_err());
    }
}
