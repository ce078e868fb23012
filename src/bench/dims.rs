//! Image dimension matrix and token parsing.

/// Square sizes in the built-in matrix.
pub const DEFAULT_SQUARES: [usize; 6] = [32, 64, 100, 128, 150, 256];

/// Rectangular `(width, height)` pairs in the built-in matrix.
pub const DEFAULT_RECTS: [(usize, usize); 6] = [
    (64, 128),
    (80, 160),
    (96, 192),
    (128, 256),
    (192, 256),
    (256, 512),
];

/// Width and height of one synthetic fixture set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    pub width: usize,
    pub height: usize,
}

impl Dims {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Chessboard square edge: a tenth of the shorter side, at least 1.
    pub fn tile_edge(&self) -> usize {
        (self.width.min(self.height) / 10).max(1)
    }

    /// Palette band edge: an eighth of the shorter side, at least 1.
    pub fn band_edge(&self) -> usize {
        (self.width.min(self.height) / 8).max(1)
    }
}

/// Parses `W` as a square or `WxH` (`x` or `X`) as a rectangle.
///
/// Returns `None` unless both sides are positive integers.
pub fn parse_dims(token: &str) -> Option<Dims> {
    let token = token.trim();
    let dims = match token.find(['x', 'X']) {
        Some(pos) => Dims::new(parse_side(&token[..pos])?, parse_side(&token[pos + 1..])?),
        None => Dims::square(parse_side(token)?),
    };
    Some(dims)
}

fn parse_side(text: &str) -> Option<usize> {
    match text.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(side) => Some(side),
    }
}

/// Returns the built-in matrix: all squares, then all rectangles.
pub fn default_matrix() -> Vec<Dims> {
    DEFAULT_SQUARES
        .iter()
        .map(|&side| Dims::square(side))
        .chain(DEFAULT_RECTS.iter().map(|&(w, h)| Dims::new(w, h)))
        .collect()
}

/// Builds the active matrix from invocation arguments.
///
/// With no arguments the built-in matrix is used. Otherwise every token that
/// parses is kept in order and the rest are skipped, which may leave the
/// matrix empty.
pub fn matrix_from_args<I, S>(args: I) -> Vec<Dims>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut any = false;
    let mut matrix = Vec::new();
    for arg in args {
        any = true;
        let token = arg.as_ref();
        match parse_dims(token) {
            Some(dims) => matrix.push(dims),
            None => {
                crate::trace::trace_event!("skip_dimension_token", token = token);
            }
        }
    }
    if any {
        matrix
    } else {
        default_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_dims, Dims};

    #[test]
    fn edges_are_clamped_to_one() {
        assert_eq!(Dims::new(5, 5).tile_edge(), 1);
        assert_eq!(Dims::new(5, 5).band_edge(), 1);
        assert_eq!(Dims::new(256, 512).tile_edge(), 25);
        assert_eq!(Dims::new(256, 512).band_edge(), 32);
    }

    #[test]
    fn separator_is_case_insensitive() {
        assert_eq!(parse_dims("7X3"), Some(Dims::new(7, 3)));
        assert_eq!(parse_dims("7x3"), Some(Dims::new(7, 3)));
    }
}
