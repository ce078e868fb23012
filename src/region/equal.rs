//! Structural image equality.

use crate::image::Image;
use crate::instrument::Meter;

/// Returns true when both images have the same size and every pixel maps to
/// the same colour.
///
/// Comparing an image with itself returns immediately without touching any
/// pixel. A size mismatch is detected before any pixel is read. Otherwise
/// pixels are compared in row-major order through each image's LUT and the
/// scan stops at the first difference, so labels may differ as long as the
/// colours they map to agree.
pub fn images_equal(a: &Image, b: &Image, meter: &mut Meter) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.width() != b.width() || a.height() != b.height() {
        return false;
    }

    for (&la, &lb) in a.labels().iter().zip(b.labels()) {
        meter.pixel_read();
        meter.pixel_read();
        let ca = a.color(la);
        let cb = b.color(lb);
        meter.lut_read();
        meter.lut_read();
        if ca != cb {
            return false;
        }
    }
    true
}
