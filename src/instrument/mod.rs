//! Operation counters and timing around a single measured call.
//!
//! A [`Meter`] is an explicit measurement context: the harness starts a fresh
//! one immediately before each measured call, hands it to the algorithm by
//! `&mut`, and reads a [`Snapshot`] immediately after. Nothing is shared
//! between trials.

use std::hint::black_box;
use std::time::{Duration, Instant};

/// Number of counters tracked per measurement.
pub const NUM_COUNTERS: usize = 10;

/// Instrumentation counters in their fixed reporting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Counter {
    PixReads = 0,
    PixWrites = 1,
    LutReads = 2,
    LutWrites = 3,
    PixValidations = 4,
    StackOps = 5,
    QueueOps = 6,
    PeakStack = 7,
    PeakQueue = 8,
    PeakRecDepth = 9,
}

impl Counter {
    /// All counters in reporting order.
    pub const ALL: [Counter; NUM_COUNTERS] = [
        Counter::PixReads,
        Counter::PixWrites,
        Counter::LutReads,
        Counter::LutWrites,
        Counter::PixValidations,
        Counter::StackOps,
        Counter::QueueOps,
        Counter::PeakStack,
        Counter::PeakQueue,
        Counter::PeakRecDepth,
    ];

    /// CSV column name of the counter.
    pub fn column(self) -> &'static str {
        match self {
            Counter::PixReads => "pixreads",
            Counter::PixWrites => "pixwrites",
            Counter::LutReads => "lutreads",
            Counter::LutWrites => "lutwrites",
            Counter::PixValidations => "pixvalidations",
            Counter::StackOps => "stackops",
            Counter::QueueOps => "queueops",
            Counter::PeakStack => "peakstack",
            Counter::PeakQueue => "peakqueue",
            Counter::PeakRecDepth => "peakrecdepth",
        }
    }
}

/// Counter values and elapsed time read from a [`Meter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    /// Counter values indexed by `Counter as usize`.
    pub counters: [u64; NUM_COUNTERS],
    /// Wall-clock seconds since the meter was started or reset.
    pub elapsed_sec: f64,
    /// `elapsed_sec` expressed in calibrated cost-time units.
    pub elapsed_ctu: f64,
}

impl Snapshot {
    /// Returns the value of one counter.
    pub fn get(&self, counter: Counter) -> u64 {
        self.counters[counter as usize]
    }
}

/// Per-trial measurement context.
#[derive(Clone, Debug)]
pub struct Meter {
    counters: [u64; NUM_COUNTERS],
    stack_depth: u64,
    queue_depth: u64,
    rec_depth: u64,
    started: Instant,
}

impl Meter {
    /// Creates a zeroed meter whose clock starts now.
    pub fn start() -> Self {
        Self {
            counters: [0; NUM_COUNTERS],
            stack_depth: 0,
            queue_depth: 0,
            rec_depth: 0,
            started: Instant::now(),
        }
    }

    /// Zeroes all counters and restarts the clock.
    pub fn reset(&mut self) {
        *self = Self::start();
    }

    /// Adds `n` to a counter.
    #[inline]
    pub fn add(&mut self, counter: Counter, n: u64) {
        let slot = &mut self.counters[counter as usize];
        *slot = slot.saturating_add(n);
    }

    #[inline]
    pub fn pixel_read(&mut self) {
        self.add(Counter::PixReads, 1);
    }

    #[inline]
    pub fn pixel_write(&mut self) {
        self.add(Counter::PixWrites, 1);
    }

    #[inline]
    pub fn lut_read(&mut self) {
        self.add(Counter::LutReads, 1);
    }

    #[inline]
    pub fn lut_write(&mut self) {
        self.add(Counter::LutWrites, 1);
    }

    #[inline]
    pub fn validation(&mut self) {
        self.add(Counter::PixValidations, 1);
    }

    /// Records a push onto an explicit stack.
    #[inline]
    pub fn stack_push(&mut self) {
        self.add(Counter::StackOps, 1);
        self.stack_depth += 1;
        self.raise_peak(Counter::PeakStack, self.stack_depth);
    }

    /// Records a pop from an explicit stack.
    #[inline]
    pub fn stack_pop(&mut self) {
        self.add(Counter::StackOps, 1);
        self.stack_depth = self.stack_depth.saturating_sub(1);
    }

    /// Records an enqueue.
    #[inline]
    pub fn queue_push(&mut self) {
        self.add(Counter::QueueOps, 1);
        self.queue_depth += 1;
        self.raise_peak(Counter::PeakQueue, self.queue_depth);
    }

    /// Records a dequeue.
    #[inline]
    pub fn queue_pop(&mut self) {
        self.add(Counter::QueueOps, 1);
        self.queue_depth = self.queue_depth.saturating_sub(1);
    }

    /// Records entry into a recursive call.
    #[inline]
    pub fn enter(&mut self) {
        self.rec_depth += 1;
        self.raise_peak(Counter::PeakRecDepth, self.rec_depth);
    }

    /// Records return from a recursive call.
    #[inline]
    pub fn leave(&mut self) {
        self.rec_depth = self.rec_depth.saturating_sub(1);
    }

    /// Returns the current value of one counter.
    pub fn get(&self, counter: Counter) -> u64 {
        self.counters[counter as usize]
    }

    /// Returns the wall-clock time since start or the last reset.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Reads counters and elapsed time without modifying the meter.
    pub fn snapshot(&self, calibration: &Calibration) -> Snapshot {
        let elapsed_sec = self.elapsed().as_secs_f64();
        Snapshot {
            counters: self.counters,
            elapsed_sec,
            elapsed_ctu: calibration.to_ctu(elapsed_sec),
        }
    }

    fn raise_peak(&mut self, counter: Counter, depth: u64) {
        let slot = &mut self.counters[counter as usize];
        if depth > *slot {
            *slot = depth;
        }
    }
}

/// Iterations of the calibration workload that make up one cost-time unit.
pub const CTU_ITERATIONS: u64 = 1_000_000;

const CALIBRATION_ROUNDS: usize = 5;

/// Duration of one abstract cost-time unit (CTU).
///
/// Measured once per process and then held fixed, so normalized times from
/// different trials of the same run are comparable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    ctu_sec: f64,
}

impl Calibration {
    /// Uses an explicit CTU duration. Non-positive values fall back to one second.
    pub fn fixed(ctu_sec: f64) -> Self {
        let ctu_sec = if ctu_sec.is_finite() && ctu_sec > 0.0 {
            ctu_sec
        } else {
            1.0
        };
        Self { ctu_sec }
    }

    /// Times [`CTU_ITERATIONS`] rounds of an integer mixing loop and keeps
    /// the fastest of a few repetitions.
    pub fn measure() -> Self {
        let mut best = f64::INFINITY;
        for _ in 0..CALIBRATION_ROUNDS {
            let start = Instant::now();
            let mut acc = 0x9e37_79b9_u64;
            for i in 0..CTU_ITERATIONS {
                acc = black_box(acc.rotate_left(5) ^ i).wrapping_mul(31);
            }
            black_box(acc);
            best = best.min(start.elapsed().as_secs_f64());
        }
        Self::fixed(best)
    }

    /// Seconds per cost-time unit.
    pub fn ctu_sec(&self) -> f64 {
        self.ctu_sec
    }

    /// Converts seconds to cost-time units.
    pub fn to_ctu(&self, seconds: f64) -> f64 {
        seconds / self.ctu_sec
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::fixed(1.0)
    }
}
