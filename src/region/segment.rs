//! Connected-region segmentation on top of a pluggable fill strategy.

use crate::image::{Image, Rgb, WHITE_LABEL};
use crate::instrument::Meter;
use crate::region::fill::FillStrategy;
use crate::util::RegionResult;

/// Labels every maximal 4-connected white region with its own new colour and
/// returns the number of regions found.
///
/// Pixels are scanned in row-major order; each pixel still carrying
/// [`WHITE_LABEL`] seeds a new region. Region colours come from a fixed
/// sequence, so repeated runs produce identical LUTs.
pub fn segment(img: &mut Image, strategy: FillStrategy, meter: &mut Meter) -> RegionResult<usize> {
    let mut regions = 0usize;
    for y in 0..img.height() {
        for x in 0..img.width() {
            meter.pixel_read();
            if img.label(x, y) != WHITE_LABEL {
                continue;
            }
            let label = img.alloc_color(region_color(regions))?;
            meter.lut_write();
            strategy.fill(img, x, y, label, meter)?;
            regions += 1;
        }
    }
    Ok(regions)
}

/// Deterministic, well-spread colour for the `index`-th region.
fn region_color(index: usize) -> Rgb {
    let mixed = (index as u32).wrapping_add(1).wrapping_mul(0x9e37_79b1);
    Rgb((mixed >> 8) & 0x00ff_ffff)
}

#[cfg(test)]
mod tests {
    use super::region_color;

    #[test]
    fn region_colors_differ_between_neighbours() {
        for i in 0..100 {
            assert_ne!(region_color(i), region_color(i + 1));
        }
    }
}
