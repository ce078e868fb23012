//! RegionBench characterizes image-region algorithms by operation counts.
//!
//! The crate bundles a paletted image model, structural equality, three flood
//! fill strategies, fill-based segmentation, a per-trial instrumentation
//! [`Meter`], and a harness that runs every algorithm variant over a matrix of
//! synthetic fixtures plus a maze bitmap, printing one uniform CSV record per
//! trial.

pub mod bench;
pub mod image;
pub mod instrument;
pub mod region;
mod trace;
pub mod util;

pub use crate::bench::{
    default_matrix, matrix_from_args, parse_dims, Dims, Record, Reporter, Suite, SuiteConfig,
    HEADER,
};
pub use crate::image::{Image, Rgb, BLACK, BLACK_LABEL, LUT_CAPACITY, WHITE, WHITE_LABEL};
pub use crate::instrument::{Calibration, Counter, Meter, Snapshot};
pub use crate::region::{images_equal, segment, FillStrategy};
pub use crate::util::{RegionError, RegionResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;
