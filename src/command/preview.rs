use crate::{command::PileArgs, preview};

/// Show a pile of images in a window without saving.
#[derive(clap::Parser, Debug, Clone)]
#[group(skip)]
pub struct Preview {
    /// Window title.
    #[arg(long, short, default_value = "Preview")]
    pub title: String,

    #[clap(flatten)]
    pub args: PileArgs,
}

impl Preview {
    pub fn run(self) -> anyhow::Result<()> {
        let pile = self.args.compose()?;
        preview::show(pile.canvas(), &self.title)
    }
}
