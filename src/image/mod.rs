//! Paletted images used as fixtures and algorithm operands.
//!
//! An [`Image`] stores one `u16` label per pixel in a row-major buffer. Labels
//! index a colour lookup table (LUT) of at most [`LUT_CAPACITY`] entries.
//! Label [`WHITE_LABEL`] is always white and [`BLACK_LABEL`] always black.
//! Plain accessors here are uninstrumented; algorithms account for their own
//! accesses on a [`Meter`](crate::instrument::Meter).

use crate::util::{RegionError, RegionResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Maximum number of LUT entries per image.
pub const LUT_CAPACITY: usize = 1000;

/// Label of the white background colour.
pub const WHITE_LABEL: u16 = 0;

/// Label of the black colour.
pub const BLACK_LABEL: u16 = 1;

/// Packed `0xRRGGBB` colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

/// Pure white.
pub const WHITE: Rgb = Rgb(0xff_ff_ff);

/// Pure black.
pub const BLACK: Rgb = Rgb(0x00_00_00);

impl Rgb {
    /// Builds a colour from 8-bit channels.
    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Rgb((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }
}

/// Owned paletted image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    lut: Vec<Rgb>,
    labels: Vec<u16>,
}

impl Image {
    /// Creates an all-white image.
    pub fn new(width: usize, height: usize) -> RegionResult<Self> {
        let len = pixel_count(width, height)?;
        let mut labels = Vec::new();
        labels
            .try_reserve_exact(len)
            .map_err(|_| RegionError::AllocationFailed { width, height })?;
        labels.resize(len, WHITE_LABEL);
        Ok(Self::with_default_lut(width, height, labels))
    }

    /// Creates a chessboard of `edge`-sized squares.
    ///
    /// The top-left square is painted with `color`; squares alternate with
    /// white. Squares on the right and bottom borders may be truncated.
    pub fn chess(width: usize, height: usize, edge: usize, color: Rgb) -> RegionResult<Self> {
        if edge == 0 {
            return Err(RegionError::InvalidEdge { edge });
        }
        let mut img = Self::new(width, height)?;
        let painted = img.alloc_color(color)?;
        for y in 0..height {
            let row = y * width;
            for x in 0..width {
                if (x / edge + y / edge) % 2 == 0 {
                    img.labels[row + x] = painted;
                }
            }
        }
        Ok(img)
    }

    /// Creates a gradient of `edge`-sized bands.
    ///
    /// Each band gets its own colour: red grows with the band column, green
    /// with the band row, and blue alternates. Once the LUT is full, band
    /// colours are reused in allocation order.
    pub fn palette(width: usize, height: usize, edge: usize) -> RegionResult<Self> {
        if edge == 0 {
            return Err(RegionError::InvalidEdge { edge });
        }
        let mut img = Self::new(width, height)?;
        let cols = width.div_ceil(edge);
        let rows = height.div_ceil(edge);
        let free = LUT_CAPACITY - img.lut.len();
        let first = img.lut.len();

        let mut band_labels = Vec::with_capacity(cols * rows);
        for by in 0..rows {
            for bx in 0..cols {
                let idx = by * cols + bx;
                if idx < free {
                    let color = Rgb::from_channels(
                        channel(bx, cols),
                        channel(by, rows),
                        if (bx + by) % 2 == 0 { 0x40 } else { 0xc0 },
                    );
                    band_labels.push(img.alloc_color(color)?);
                } else {
                    band_labels.push((first + idx % free) as u16);
                }
            }
        }

        for y in 0..height {
            let row = y * width;
            let band_row = (y / edge) * cols;
            for x in 0..width {
                img.labels[row + x] = band_labels[band_row + x / edge];
            }
        }
        Ok(img)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `width * height`.
    pub fn pixels(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when `(x, y)` lies inside the image.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Returns the label at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn label(&self, x: usize, y: usize) -> u16 {
        assert!(self.contains(x, y), "pixel ({x}, {y}) out of bounds");
        self.labels[y * self.width + x]
    }

    /// Sets the label at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn set_label(&mut self, x: usize, y: usize, label: u16) {
        assert!(self.contains(x, y), "pixel ({x}, {y}) out of bounds");
        self.labels[y * self.width + x] = label;
    }

    /// Returns the row-major label buffer.
    pub fn labels(&self) -> &[u16] {
        &self.labels
    }

    /// Returns the colour a label maps to, if it is allocated.
    pub fn color(&self, label: u16) -> Option<Rgb> {
        self.lut.get(usize::from(label)).copied()
    }

    /// Returns the number of allocated LUT entries.
    pub fn num_colors(&self) -> usize {
        self.lut.len()
    }

    /// Appends a colour to the LUT and returns its label.
    pub fn alloc_color(&mut self, color: Rgb) -> RegionResult<u16> {
        if self.lut.len() >= LUT_CAPACITY {
            return Err(RegionError::LutExhausted {
                capacity: LUT_CAPACITY,
            });
        }
        self.lut.push(color);
        Ok((self.lut.len() - 1) as u16)
    }

    /// Returns a copy rotated by 180 degrees with the same LUT.
    pub fn rotate_180(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            lut: self.lut.clone(),
            labels: self.labels.iter().rev().copied().collect(),
        }
    }

    /// Builds an image from a label buffer over the default white/black LUT.
    pub(crate) fn from_labels(width: usize, height: usize, labels: Vec<u16>) -> RegionResult<Self> {
        let len = pixel_count(width, height)?;
        if labels.len() != len || labels.iter().any(|&l| l > BLACK_LABEL) {
            return Err(RegionError::InvalidDimensions { width, height });
        }
        Ok(Self::with_default_lut(width, height, labels))
    }

    fn with_default_lut(width: usize, height: usize, labels: Vec<u16>) -> Self {
        let mut lut = Vec::with_capacity(LUT_CAPACITY);
        lut.push(WHITE);
        lut.push(BLACK);
        Self {
            width,
            height,
            lut,
            labels,
        }
    }
}

/// Label count for a `width` x `height` buffer whose byte size fits in `isize`.
fn pixel_count(width: usize, height: usize) -> RegionResult<usize> {
    const MAX_LABELS: usize = isize::MAX as usize / std::mem::size_of::<u16>();
    if width == 0 || height == 0 {
        return Err(RegionError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .filter(|&len| len <= MAX_LABELS)
        .ok_or(RegionError::InvalidDimensions { width, height })
}

fn channel(index: usize, count: usize) -> u8 {
    if count <= 1 {
        return 0;
    }
    (index * 255 / (count - 1)) as u8
}
