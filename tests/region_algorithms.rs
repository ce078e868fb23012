//! Behavioural checks for equality, flood fill and segmentation, including
//! the operation counts each algorithm reports.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regionbench::{
    images_equal, segment, Calibration, Counter, FillStrategy, Image, Meter, RegionError, Rgb,
    BLACK_LABEL, WHITE_LABEL,
};

fn random_binary(width: usize, height: usize, black_ratio: f64, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = Image::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            if rng.random_bool(black_ratio) {
                img.set_label(x, y, BLACK_LABEL);
            }
        }
    }
    img
}

#[test]
fn self_comparison_takes_fast_path() {
    let img = Image::palette(40, 30, 5).unwrap();
    let mut meter = Meter::start();
    assert!(images_equal(&img, &img, &mut meter));
    let snap = meter.snapshot(&Calibration::default());
    for counter in Counter::ALL {
        assert_eq!(snap.get(counter), 0, "{}", counter.column());
    }
}

#[test]
fn deep_copy_comparison_scans_every_pixel() {
    let img = Image::chess(40, 30, 4, Rgb(0xff0000)).unwrap();
    let copy = img.clone();
    let mut meter = Meter::start();
    assert!(images_equal(&img, &copy, &mut meter));
    let pixels = img.pixels() as u64;
    assert_eq!(meter.get(Counter::PixReads), 2 * pixels);
    assert_eq!(meter.get(Counter::LutReads), 2 * pixels);
    assert_eq!(meter.get(Counter::PixWrites), 0);
}

#[test]
fn rotated_gradient_differs_early() {
    let img = Image::palette(64, 48, 8).unwrap();
    let rot = img.rotate_180();
    let mut meter = Meter::start();
    assert!(!images_equal(&img, &rot, &mut meter));
    assert!(meter.get(Counter::PixReads) < 2 * img.pixels() as u64);
}

#[test]
fn symmetric_image_equals_its_rotation() {
    let img = Image::new(9, 7).unwrap();
    let mut meter = Meter::start();
    assert!(images_equal(&img, &img.rotate_180(), &mut meter));
}

#[test]
fn size_mismatch_short_circuits() {
    let img = Image::new(10, 10).unwrap();
    let bigger = Image::new(11, 11).unwrap();
    let mut meter = Meter::start();
    assert!(!images_equal(&img, &bigger, &mut meter));
    assert_eq!(meter.get(Counter::PixReads), 0);
    assert_eq!(meter.get(Counter::LutReads), 0);
}

#[test]
fn equality_compares_colors_not_labels() {
    let mut a = Image::new(2, 1).unwrap();
    let mut b = Image::new(2, 1).unwrap();
    let la = a.alloc_color(Rgb(0x123456)).unwrap();
    b.alloc_color(Rgb(0x000001)).unwrap();
    let lb = b.alloc_color(Rgb(0x123456)).unwrap();
    assert_ne!(la, lb);
    a.set_label(1, 0, la);
    b.set_label(1, 0, lb);
    assert!(images_equal(&a, &b, &mut Meter::start()));
}

#[test]
fn every_strategy_fills_blank_canvas() {
    let base = Image::new(48, 32).unwrap();
    for strategy in FillStrategy::ALL {
        let mut img = base.clone();
        let mut meter = Meter::start();
        let painted = strategy
            .fill(&mut img, 24, 16, BLACK_LABEL, &mut meter)
            .unwrap();
        assert_eq!(painted, 48 * 32, "{}", strategy.name());
        assert!(img.labels().iter().all(|&l| l == BLACK_LABEL));
        assert_eq!(meter.get(Counter::PixWrites), 48 * 32);
    }
}

#[test]
fn strategies_report_their_own_structures() {
    let base = Image::new(16, 16).unwrap();

    let mut meter = Meter::start();
    FillStrategy::Recursive
        .fill(&mut base.clone(), 0, 0, BLACK_LABEL, &mut meter)
        .unwrap();
    assert!(meter.get(Counter::PeakRecDepth) > 1);
    assert_eq!(meter.get(Counter::StackOps), 0);
    assert_eq!(meter.get(Counter::QueueOps), 0);

    let mut meter = Meter::start();
    FillStrategy::Stack
        .fill(&mut base.clone(), 0, 0, BLACK_LABEL, &mut meter)
        .unwrap();
    assert!(meter.get(Counter::PeakStack) > 1);
    assert!(meter.get(Counter::StackOps) >= 2 * 256);
    assert_eq!(meter.get(Counter::QueueOps), 0);
    assert_eq!(meter.get(Counter::PeakRecDepth), 0);

    let mut meter = Meter::start();
    FillStrategy::Queue
        .fill(&mut base.clone(), 0, 0, BLACK_LABEL, &mut meter)
        .unwrap();
    assert!(meter.get(Counter::PeakQueue) > 1);
    assert_eq!(meter.get(Counter::QueueOps), 2 * 256);
    assert_eq!(meter.get(Counter::StackOps), 0);
}

#[test]
fn fill_with_current_label_paints_nothing() {
    let mut img = Image::new(5, 5).unwrap();
    for strategy in FillStrategy::ALL {
        let painted = strategy
            .fill(&mut img, 2, 2, WHITE_LABEL, &mut Meter::start())
            .unwrap();
        assert_eq!(painted, 0);
    }
}

#[test]
fn fill_rejects_seed_outside_image() {
    let mut img = Image::new(5, 4).unwrap();
    let err = FillStrategy::Stack
        .fill(&mut img, 5, 0, BLACK_LABEL, &mut Meter::start())
        .err()
        .unwrap();
    assert_eq!(
        err,
        RegionError::SeedOutOfBounds {
            x: 5,
            y: 0,
            width: 5,
            height: 4,
        }
    );
}

#[test]
fn fill_stays_inside_walls() {
    // A vertical black wall splits the canvas into 3 + 4 columns.
    let mut img = Image::new(8, 5).unwrap();
    for y in 0..5 {
        img.set_label(3, y, BLACK_LABEL);
    }
    let label = img.alloc_color(Rgb(0x00ff00)).unwrap();
    for strategy in FillStrategy::ALL {
        let mut work = img.clone();
        let painted = strategy
            .fill(&mut work, 0, 0, label, &mut Meter::start())
            .unwrap();
        assert_eq!(painted, 15, "{}", strategy.name());
        assert_eq!(work.label(4, 0), WHITE_LABEL);
    }
}

#[test]
fn strategies_paint_identical_regions_on_random_images() {
    for seed in 0..8 {
        let base = random_binary(24, 20, 0.35, seed);
        let mut results = Vec::new();
        for strategy in FillStrategy::ALL {
            let mut img = base.clone();
            if img.label(12, 10) != WHITE_LABEL {
                img.set_label(12, 10, WHITE_LABEL);
            }
            let painted = strategy
                .fill(&mut img, 12, 10, BLACK_LABEL, &mut Meter::start())
                .unwrap();
            results.push((painted, img));
        }
        assert_eq!(results[0], results[1]);
        assert_eq!(results[1], results[2]);
    }
}

#[test]
fn segmentation_counts_chess_white_squares() {
    // 32x32 with 3-pixel squares: an 11x11 grid whose odd-parity cells are white.
    let chess = Image::chess(32, 32, 3, Rgb(0xff0000)).unwrap();
    for strategy in FillStrategy::ALL {
        let mut img = chess.clone();
        let regions = segment(&mut img, strategy, &mut Meter::start()).unwrap();
        assert_eq!(regions, 60, "{}", strategy.name());
        assert!(!img.labels().contains(&WHITE_LABEL));
    }
}

#[test]
fn blank_canvas_is_one_region() {
    let mut img = Image::new(30, 20).unwrap();
    let mut meter = Meter::start();
    assert_eq!(segment(&mut img, FillStrategy::Queue, &mut meter).unwrap(), 1);
    assert_eq!(meter.get(Counter::LutWrites), 1);
}

#[test]
fn segmentation_is_strategy_invariant() {
    for seed in 0..6 {
        let base = random_binary(32, 24, 0.45, 100 + seed);
        let mut stack_img = base.clone();
        let mut queue_img = base.clone();
        let mut rec_img = base.clone();
        let stack = segment(&mut stack_img, FillStrategy::Stack, &mut Meter::start()).unwrap();
        let queue = segment(&mut queue_img, FillStrategy::Queue, &mut Meter::start()).unwrap();
        let rec = segment(&mut rec_img, FillStrategy::Recursive, &mut Meter::start()).unwrap();
        assert_eq!(stack, queue);
        assert_eq!(queue, rec);
        assert_eq!(stack_img, queue_img);
        assert_eq!(queue_img, rec_img);
    }
}

#[test]
fn segmentation_fails_when_lut_overflows() {
    // Single-pixel checkerboard: 1024 isolated white pixels, more than the LUT holds.
    let mut img = Image::chess(64, 32, 1, Rgb(0xff0000)).unwrap();
    let err = segment(&mut img, FillStrategy::Stack, &mut Meter::start())
        .err()
        .unwrap();
    assert!(matches!(err, RegionError::LutExhausted { .. }));
}
