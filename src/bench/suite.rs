//! Trial generators and the fixture-matrix orchestrator.
//!
//! Each trial works on its own copy of a fixture, measures exactly one
//! algorithm call with a fresh [`Meter`], and prints exactly one record.
//! Copies are dropped when their trial returns, including when the measured
//! call fails.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::bench::dims::Dims;
use crate::bench::report::{Record, Reporter};
use crate::image::{Image, Rgb, BLACK_LABEL};
use crate::instrument::{Calibration, Meter};
use crate::region::{images_equal, segment, FillStrategy};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{RegionError, RegionResult};

const EQUAL_TEST: &str = "ImageIsEqual";
const FILL_TEST: &str = "fill";
const SEGMENT_TEST: &str = "segment";

/// Colour of the painted chessboard squares.
pub const CHESS_COLOR: Rgb = Rgb(0xff_00_00);

/// Strategies used to segment synthetic fixtures.
///
/// Recursive fill is left out: segmenting a large blank canvas recurses once
/// per pixel and overflows the stack.
pub const SYNTHETIC_SEGMENT_STRATEGIES: [FillStrategy; 2] =
    [FillStrategy::Stack, FillStrategy::Queue];

/// Fill strategies in the order the maze suite runs them.
const MAZE_FILL_ORDER: [FillStrategy; 3] = [
    FillStrategy::Stack,
    FillStrategy::Queue,
    FillStrategy::Recursive,
];

/// Maze segmentation strategies; the maze is small enough for recursion.
const MAZE_SEGMENT_ORDER: [FillStrategy; 3] = [
    FillStrategy::Stack,
    FillStrategy::Queue,
    FillStrategy::Recursive,
];

/// Location of the fixed maze fixture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Bitmap loaded for the maze suite. A missing or unreadable file skips it.
    pub maze_path: PathBuf,
    /// Operand label used in maze records.
    pub maze_name: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            maze_path: PathBuf::from("img/maze41x41.pbm"),
            maze_name: "maze41x41".to_string(),
        }
    }
}

/// Runs trials and reports them on `W`.
pub struct Suite<W: Write> {
    reporter: Reporter<W>,
    calibration: Calibration,
    config: SuiteConfig,
}

impl<W: Write> Suite<W> {
    pub fn new(out: W, calibration: Calibration, config: SuiteConfig) -> Self {
        Self {
            reporter: Reporter::new(out),
            calibration,
            config,
        }
    }

    /// Prints the header, runs every fixture set of `matrix`, then the maze
    /// suite once.
    pub fn run(&mut self, matrix: &[Dims]) -> io::Result<()> {
        self.reporter.print_header()?;
        for &dims in matrix {
            self.run_dims(dims)?;
        }
        self.run_maze()?;
        self.reporter.flush()
    }

    /// Builds the chessboard, palette and blank fixtures for `dims` and runs
    /// the equality, fill and segmentation generators on them.
    pub fn run_dims(&mut self, dims: Dims) -> io::Result<()> {
        let Dims { width, height } = dims;
        let _span = trace_span!("fixture_set", width = width, height = height).entered();

        let fixtures = Image::chess(width, height, dims.tile_edge(), CHESS_COLOR).and_then(
            |chess| {
                let palette = Image::palette(width, height, dims.band_edge())?;
                let white = Image::new(width, height)?;
                Ok((chess, palette, white))
            },
        );
        let (chess, palette, white) = match fixtures {
            Ok(fixtures) => fixtures,
            Err(err) => {
                let reason = err.to_string();
                trace_warn!("fixture_set_skipped", reason = reason.as_str());
                return Ok(());
            }
        };
        let chess_name = format!("chess{width}x{height}");
        let palette_name = format!("palete{width}x{height}");
        let white_name = format!("white{width}x{height}");

        self.run_equality(&chess, &chess_name)?;
        self.run_equality(&palette, &palette_name)?;
        self.run_fill(&white, &white_name)?;
        self.run_segmentation(&chess, &chess_name, &SYNTHETIC_SEGMENT_STRATEGIES)?;
        self.run_segmentation(&white, &white_name, &SYNTHETIC_SEGMENT_STRATEGIES)?;
        Ok(())
    }

    /// Compares `base` with itself, a deep copy, a 180-degree rotation and a
    /// blank image one pixel larger in each direction.
    pub fn run_equality(&mut self, base: &Image, name: &str) -> io::Result<()> {
        let _span = trace_span!("equality_suite", image = name).entered();

        self.trial(EQUAL_TEST, "self", name, name, base, |meter| {
            Ok(u64::from(images_equal(base, base, meter)))
        })?;

        let copy = base.clone();
        self.trial(EQUAL_TEST, "deep_equal", name, "copy", base, |meter| {
            Ok(u64::from(images_equal(base, &copy, meter)))
        })?;
        drop(copy);

        let rotated = base.rotate_180();
        self.trial(EQUAL_TEST, "rotated", name, "rot180", base, |meter| {
            Ok(u64::from(images_equal(base, &rotated, meter)))
        })?;
        drop(rotated);

        let bigger = match Image::new(base.width() + 1, base.height() + 1) {
            Ok(img) => img,
            Err(err) => {
                self.drop_trial(EQUAL_TEST, "size_diff", name, &err);
                return Ok(());
            }
        };
        self.trial(EQUAL_TEST, "size_diff", name, "bigger", base, |meter| {
            Ok(u64::from(images_equal(base, &bigger, meter)))
        })
    }

    /// Fills a copy of the blank `white` fixture from its centre with every
    /// strategy.
    pub fn run_fill(&mut self, white: &Image, name: &str) -> io::Result<()> {
        let _span = trace_span!("fill_suite", image = name).entered();
        let seed = (white.width() / 2, white.height() / 2);
        for strategy in FillStrategy::ALL {
            self.fill_trial(white, name, "", strategy, seed)?;
        }
        Ok(())
    }

    /// Segments a copy of `img` once per strategy in `strategies`.
    pub fn run_segmentation(
        &mut self,
        img: &Image,
        name: &str,
        strategies: &[FillStrategy],
    ) -> io::Result<()> {
        let _span = trace_span!("segmentation_suite", image = name).entered();
        for &strategy in strategies {
            let mut work = img.clone();
            self.trial(SEGMENT_TEST, strategy.name(), name, "", img, |meter| {
                segment(&mut work, strategy, meter).map(|regions| regions as u64)
            })?;
        }
        Ok(())
    }

    /// Runs the equality suite, fills from two seeds and segmentation with
    /// every strategy on the maze fixture.
    ///
    /// Returns `Ok(false)` without printing anything when the maze cannot be
    /// loaded.
    pub fn run_maze(&mut self) -> io::Result<bool> {
        let maze = match load_maze(&self.config) {
            Ok(maze) => maze,
            Err(err) => {
                let path = self.config.maze_path.display().to_string();
                let reason = err.to_string();
                trace_event!("maze_suite_skipped", path = path.as_str(), reason = reason.as_str());
                return Ok(false);
            }
        };
        let name = self.config.maze_name.clone();
        let _span = trace_span!("maze_suite", image = name.as_str()).entered();

        self.run_equality(&maze, &name)?;

        let entrance = (0, 1);
        let center = ((maze.width() / 2).saturating_sub(1), maze.height() / 2);
        for strategy in MAZE_FILL_ORDER {
            self.fill_trial(&maze, &name, "seed01", strategy, entrance)?;
            self.fill_trial(&maze, &name, "seedCenter", strategy, center)?;
        }

        self.run_segmentation(&maze, &name, &MAZE_SEGMENT_ORDER)?;
        Ok(true)
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.reporter.into_inner()
    }

    fn fill_trial(
        &mut self,
        base: &Image,
        name: &str,
        seed_label: &str,
        strategy: FillStrategy,
        (x, y): (usize, usize),
    ) -> io::Result<()> {
        let mut work = base.clone();
        self.trial(FILL_TEST, strategy.name(), name, seed_label, base, |meter| {
            strategy
                .fill(&mut work, x, y, BLACK_LABEL, meter)
                .map(|painted| painted as u64)
        })
    }

    /// Measures one call and prints its record; a failed call is logged and
    /// produces no record.
    fn trial<F>(
        &mut self,
        test: &str,
        variant: &str,
        img_a: &str,
        img_b: &str,
        shape: &Image,
        measured: F,
    ) -> io::Result<()>
    where
        F: FnOnce(&mut Meter) -> RegionResult<u64>,
    {
        let mut meter = Meter::start();
        let outcome = measured(&mut meter);
        let snapshot = meter.snapshot(&self.calibration);
        match outcome {
            Ok(result) => self.reporter.print_record(&Record {
                test,
                variant,
                img_a,
                img_b,
                width: shape.width(),
                height: shape.height(),
                result,
                snapshot,
            }),
            Err(err) => {
                self.drop_trial(test, variant, img_a, &err);
                Ok(())
            }
        }
    }

    fn drop_trial(&self, test: &str, variant: &str, img_a: &str, err: &RegionError) {
        let reason = err.to_string();
        trace_warn!(
            "trial_dropped",
            test = test,
            variant = variant,
            image = img_a,
            reason = reason.as_str(),
        );
    }
}

#[cfg(feature = "image-io")]
fn load_maze(config: &SuiteConfig) -> RegionResult<Image> {
    crate::image::io::load_bitmap(&config.maze_path)
}

#[cfg(not(feature = "image-io"))]
fn load_maze(_config: &SuiteConfig) -> RegionResult<Image> {
    Err(RegionError::ImageIo {
        reason: "built without the image-io feature".to_string(),
    })
}
