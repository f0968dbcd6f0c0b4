mod build;
mod preview;
mod print_completions;

pub use build::*;
pub use preview::*;
pub use print_completions::*;

use crate::pile::{Background, Pile, Style};
use anyhow::{Context, anyhow};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments shared by commands that compose a pile.
#[derive(clap::Args, Debug, Clone)]
pub struct PileArgs {
    /// Number of grid rows. Defaults to a near-square grid fitting all images.
    #[arg(long, short, requires = "columns")]
    pub rows: Option<u32>,

    /// Number of grid columns. Defaults to a near-square grid fitting all images.
    #[arg(long, short, requires = "rows")]
    pub columns: Option<u32>,

    /// Pixel length of each square grid cell.
    ///
    /// Defaults to the longest side of the first image.
    #[arg(long, short)]
    pub length: Option<u32>,

    /// Fit images inside their cells preserving aspect, instead of stretching.
    #[arg(long, short = 'a')]
    pub keep_aspect: bool,

    /// Cycle through the images again until every cell is filled.
    #[arg(long, short)]
    pub wrap: bool,

    /// Background colour of empty cells: black, white or #rrggbb.
    #[arg(long, short, env = "PILE_BACKGROUND", default_value_t = Background::default())]
    pub background: Background,

    /// Images to pile, placed in order row by row.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,
}

impl PileArgs {
    /// Load all images & draw them into a new pile.
    pub fn compose(&self) -> anyhow::Result<Pile> {
        let style = Style {
            maintain_aspect_ratio: self.keep_aspect,
            background: self.background,
        };

        // load images concurrently
        let images = self
            .images
            .par_iter()
            .map(|i| load_image(i).map_err(|e| anyhow!("{}: {e}", sh_escape(i))))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pile = match (self.rows, self.columns, self.length) {
            (Some(rows), Some(cols), Some(length)) => {
                Pile::with_grid_and_length(length, rows, cols, images, style)?
            }
            (Some(rows), Some(cols), None) => Pile::with_grid(rows, cols, images, style)?,
            (_, _, length) => {
                let mut pile = Pile::auto(images, style)?;
                if let Some(length) = length {
                    // blank until redrawn below
                    pile.set_length(length)?;
                }
                pile
            }
        };

        if self.wrap || (self.rows.is_none() && self.length.is_some()) {
            pile.update_graphics(self.wrap);
        }

        let (w, h) = pile.dimensions();
        info!(
            "arranged {} images in {}x{} grid of {}px cells -> {w}x{h}px",
            pile.images().len(),
            pile.cols(),
            pile.rows(),
            pile.length(),
        );
        if pile.images().len() as u64 > pile.total() {
            warn!(
                "only the first {} images fit the grid, the rest are not drawn",
                pile.total()
            );
        }

        Ok(pile)
    }
}

fn load_image(path: &Path) -> anyhow::Result<image::DynamicImage> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()
        .context("failed to read image")?
        .decode()?;
    Ok(img)
}

pub fn sh_escape(path: &Path) -> std::borrow::Cow<'_, str> {
    shell_escape::escape(path.display().to_string().into())
}
