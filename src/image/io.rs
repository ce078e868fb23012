//! Loading bitmap fixtures via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{Image, BLACK_LABEL, WHITE_LABEL};
use crate::util::{RegionError, RegionResult};
use std::path::Path;

/// Luma values below this threshold become black.
const BLACK_THRESHOLD: u8 = 128;

/// Converts a grayscale buffer into a black/white paletted image.
pub fn from_gray_image(img: &::image::GrayImage) -> RegionResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let labels = img
        .as_raw()
        .iter()
        .map(|&luma| {
            if luma < BLACK_THRESHOLD {
                BLACK_LABEL
            } else {
                WHITE_LABEL
            }
        })
        .collect();
    Image::from_labels(width, height, labels)
}

/// Loads a bitmap (PBM or any format the enabled decoders support) from disk.
pub fn load_bitmap<P: AsRef<Path>>(path: P) -> RegionResult<Image> {
    let img = ::image::open(path).map_err(|err| RegionError::ImageIo {
        reason: err.to_string(),
    })?;
    from_gray_image(&img.to_luma8())
}
