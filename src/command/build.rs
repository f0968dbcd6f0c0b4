use crate::{
    command::{PileArgs, sh_escape},
    preview,
};
use anyhow::ensure;
use std::{path::PathBuf, time::Duration};
use tracing::info;

/// Pile images into a single grid image.
#[derive(clap::Parser, Debug, Clone)]
#[group(skip)]
pub struct Build {
    /// Output png file name.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Also show the pile in a preview window.
    #[arg(long, short)]
    pub preview: bool,

    #[clap(flatten)]
    pub args: PileArgs,
}

impl Build {
    pub fn run(self) -> anyhow::Result<()> {
        ensure!(
            self.output
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png")),
            "output must be png"
        );

        let spinner = indicatif::ProgressBar::new_spinner().with_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.cyan.bold} {elapsed_precise:.bold} {msg}")?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Piling");
        let pile = self.args.compose()?;

        spinner.set_message(format!("Saving {}", sh_escape(&self.output)));
        pile.save_pile(&self.output)?;
        spinner.finish_and_clear();
        info!("saved {}", sh_escape(&self.output));

        if self.preview {
            preview::show(pile.canvas(), "Preview")?;
        }

        Ok(())
    }
}
