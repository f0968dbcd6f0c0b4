use image::{DynamicImage, RgbaImage, imageops::FilterType};

const FILTER: FilterType = FilterType::CatmullRom;

/// Scale `img` to fill a `length x length` cell, ignoring aspect.
pub fn stretch(img: &DynamicImage, length: u32) -> RgbaImage {
    img.resize_exact(length, length, FILTER).into_rgba8()
}

/// Scale `img` so it fits inside a `length x length` cell preserving aspect.
///
/// The longer side becomes `length`, the other is floored (min 1px).
pub fn fit(img: &DynamicImage, length: u32) -> RgbaImage {
    let (w, h) = fit_dimensions(img.width(), img.height(), length);
    img.resize_exact(w, h, FILTER).into_rgba8()
}

/// `(width, height)` of a `w x h` source fitted into a `length` square.
pub fn fit_dimensions(w: u32, h: u32, length: u32) -> (u32, u32) {
    let scaled = |side: u32, long: u32| {
        let s = u64::from(side) * u64::from(length) / u64::from(long.max(1));
        (s as u32).max(1)
    };

    if w < h {
        // taller
        (scaled(w, h), length)
    } else {
        // wider or square
        (length, scaled(h, w))
    }
}
