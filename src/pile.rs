//! Grid compositing of many images into a single "pile" image.
mod background;
mod fit;
mod grid;

pub use background::*;
pub use grid::{Grid, auto_square};

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage, buffer::ConvertBuffer, imageops};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PileError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("pile of {rows}x{cols} cells of {length}px is too large")]
    Overflow { rows: u32, cols: u32, length: u32 },
    #[error("failed to write {path:?}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// How cells are painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    /// Fit images inside cells instead of stretching them.
    pub maintain_aspect_ratio: bool,
    pub background: Background,
}

/// A grid of square cells each holding at most one image.
///
/// Resizing the grid with [`Pile::set_rows`], [`Pile::set_cols`] or
/// [`Pile::set_length`] leaves a blank canvas, call [`Pile::update_graphics`]
/// afterwards.
#[derive(Debug, Clone)]
pub struct Pile {
    rows: u32,
    cols: u32,
    length: u32,
    style: Style,
    images: Vec<DynamicImage>,
    canvas: RgbaImage,
}

impl Pile {
    /// Pile of `rows x cols` cells sized by the longest side of the first image.
    pub fn with_grid(
        rows: u32,
        cols: u32,
        images: Vec<DynamicImage>,
        style: Style,
    ) -> Result<Self, PileError> {
        check_grid(rows, cols)?;
        let length = first_image_length(&images)?;
        Self::build(Grid { rows, cols }, length, images, style)
    }

    /// Empty pile of `rows x cols` cells of `length` px.
    pub fn blank(length: u32, rows: u32, cols: u32, style: Style) -> Result<Self, PileError> {
        check_grid(rows, cols)?;
        check_length(length)?;
        Self::build(Grid { rows, cols }, length, vec![], style)
    }

    /// Pile of `rows x cols` cells of `length` px.
    pub fn with_grid_and_length(
        length: u32,
        rows: u32,
        cols: u32,
        images: Vec<DynamicImage>,
        style: Style,
    ) -> Result<Self, PileError> {
        check_grid(rows, cols)?;
        check_length(length)?;
        if images.is_empty() {
            return Err(PileError::InvalidArgument("at least one image is required"));
        }
        Self::build(Grid { rows, cols }, length, images, style)
    }

    /// Near-square pile sized to fit all `images`, see [`auto_square`].
    ///
    /// Cells are sized by the longest side of the first image.
    pub fn auto(images: Vec<DynamicImage>, style: Style) -> Result<Self, PileError> {
        let length = first_image_length(&images)?;
        let grid = auto_square(images.len())
            .ok_or(PileError::InvalidArgument("at least one image is required"))?;
        Self::build(grid, length, images, style)
    }

    fn build(
        grid: Grid,
        length: u32,
        images: Vec<DynamicImage>,
        style: Style,
    ) -> Result<Self, PileError> {
        let canvas = allocate(grid, length)?;
        debug!(
            rows = grid.rows,
            cols = grid.cols,
            length,
            images = images.len(),
            "new pile"
        );
        let mut pile = Self {
            rows: grid.rows,
            cols: grid.cols,
            length,
            style,
            images,
            canvas,
        };
        pile.redraw();
        Ok(pile)
    }

    /// Re-shape the grid to the near-square fit of the current images and redraw.
    pub fn self_adjust(&mut self) -> Result<(), PileError> {
        let grid = auto_square(self.images.len())
            .ok_or(PileError::InvalidArgument("at least one image is required"))?;
        self.canvas = allocate(grid, self.length)?;
        self.rows = grid.rows;
        self.cols = grid.cols;
        debug!(rows = self.rows, cols = self.cols, "adjusted pile");
        self.redraw();
        Ok(())
    }

    /// [`Pile::update_graphics`] without wrapping.
    pub fn redraw(&mut self) {
        self.update_graphics(false);
    }

    /// Clear & draw all images into their cells, in order, row by row.
    ///
    /// `wrap`: cycle back to the first image until every cell is filled.
    /// Has no effect when images exactly fill the grid.
    pub fn update_graphics(&mut self, wrap: bool) {
        self.clear_pile();

        let plan = self.grid().placements(self.images.len(), wrap);
        let used = plan.iter().map(|(_, idx)| idx + 1).max().unwrap_or(0);

        // each image is scaled once however many cells it fills
        let length = self.length;
        let keep_aspect = self.style.maintain_aspect_ratio;
        let scaled: Vec<_> = self.images[..used]
            .par_iter()
            .map(|img| match keep_aspect {
                true => fit::fit(img, length),
                false => fit::stretch(img, length),
            })
            .collect();

        for (cell, idx) in &plan {
            let (x, y) = cell.offset(length);
            imageops::overlay(&mut self.canvas, &scaled[*idx], x, y);
        }
        debug!(cells = plan.len(), wrap, keep_aspect, "drew pile");
    }

    /// Set whether images keep their aspect ratio then draw.
    pub fn update_graphics_with(&mut self, wrap: bool, maintain_aspect_ratio: bool) {
        self.style.maintain_aspect_ratio = maintain_aspect_ratio;
        self.update_graphics(wrap);
    }

    /// Fill the whole canvas with the pile background.
    pub fn clear_pile(&mut self) {
        self.clear_pile_with(self.style.background);
    }

    /// Fill the whole canvas with `bg`.
    pub fn clear_pile_with(&mut self, bg: Background) {
        let px = bg.rgba();
        self.canvas.pixels_mut().for_each(|p| *p = px);
    }

    /// Append an image. Does not redraw.
    ///
    /// More images than cells is fine, extras are just not drawn.
    pub fn add_image(&mut self, image: DynamicImage) {
        self.images.push(image);
    }

    /// Append an image and redraw.
    pub fn add_image_and_update(&mut self, image: DynamicImage, wrap: bool) {
        self.images.push(image);
        self.update_graphics(wrap);
    }

    /// Remove the last image and redraw, if any.
    pub fn pop_image(&mut self) -> Option<DynamicImage> {
        let popped = self.images.pop()?;
        self.redraw();
        Some(popped)
    }

    /// Replace all images. Does not redraw.
    pub fn set_images(&mut self, images: Vec<DynamicImage>) {
        self.images = images;
    }

    /// Set the number of rows. Leaves a blank canvas until redrawn.
    pub fn set_rows(&mut self, rows: u32) -> Result<(), PileError> {
        if rows < 1 {
            return Err(PileError::InvalidArgument("rows must be 1 or more"));
        }
        self.resize(Grid { rows, cols: self.cols }, self.length)
    }

    /// Set the number of columns. Leaves a blank canvas until redrawn.
    pub fn set_cols(&mut self, cols: u32) -> Result<(), PileError> {
        if cols < 1 {
            return Err(PileError::InvalidArgument("columns must be 1 or more"));
        }
        self.resize(Grid { rows: self.rows, cols }, self.length)
    }

    /// Set the cell side length in px. Leaves a blank canvas until redrawn.
    pub fn set_length(&mut self, length: u32) -> Result<(), PileError> {
        check_length(length)?;
        self.resize(self.grid(), length)
    }

    fn resize(&mut self, grid: Grid, length: u32) -> Result<(), PileError> {
        self.canvas = allocate(grid, length)?;
        self.rows = grid.rows;
        self.cols = grid.cols;
        self.length = length;
        Ok(())
    }

    /// Does not redraw.
    pub fn set_maintain_aspect_ratio(&mut self, maintain_aspect_ratio: bool) {
        self.style.maintain_aspect_ratio = maintain_aspect_ratio;
    }

    /// Does not redraw.
    pub fn set_background(&mut self, background: Background) {
        self.style.background = background;
    }

    /// Write the canvas as a png.
    pub fn save_pile(&self, path: impl AsRef<Path>) -> Result<(), PileError> {
        let path = path.as_ref();
        let rgb: RgbImage = self.canvas.convert();
        rgb.save_with_format(path, ImageFormat::Png)
            .map_err(|source| PileError::IoFailure {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Canvas `(width, height)` in px.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.length * self.cols, self.length * self.rows)
    }

    pub fn grid(&self) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn total(&self) -> u64 {
        self.grid().total()
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn maintain_aspect_ratio(&self) -> bool {
        self.style.maintain_aspect_ratio
    }

    pub fn background(&self) -> Background {
        self.style.background
    }

    pub fn images(&self) -> &[DynamicImage] {
        &self.images
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }
}

fn check_grid(rows: u32, cols: u32) -> Result<(), PileError> {
    match rows < 1 || cols < 1 {
        true => Err(PileError::InvalidArgument(
            "rows & columns must be 1 or greater",
        )),
        false => Ok(()),
    }
}

fn check_length(length: u32) -> Result<(), PileError> {
    match length < 1 {
        true => Err(PileError::InvalidArgument("length must be 1 or greater")),
        false => Ok(()),
    }
}

fn first_image_length(images: &[DynamicImage]) -> Result<u32, PileError> {
    let first = images
        .first()
        .ok_or(PileError::InvalidArgument("at least one image is required"))?;
    let length = first.width().max(first.height());
    check_length(length)?;
    Ok(length)
}

/// New zeroed canvas for `grid` cells of `length` px.
fn allocate(grid: Grid, length: u32) -> Result<RgbaImage, PileError> {
    let (w, h) = grid.dimensions(length).ok_or(PileError::Overflow {
        rows: grid.rows,
        cols: grid.cols,
        length,
    })?;
    Ok(RgbaImage::new(w, h))
}
