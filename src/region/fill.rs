//! Flood fill by recursion, explicit stack, or explicit queue.
//!
//! All strategies repaint the 4-connected region of pixels sharing the seed's
//! label and return the number of pixels painted. They visit pixels in
//! different orders but always paint the same set.

use std::collections::VecDeque;

use crate::image::Image;
use crate::instrument::Meter;
use crate::util::{RegionError, RegionResult};

/// Traversal policy used to flood a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillStrategy {
    /// Depth-first by function recursion. Recursion depth grows with region
    /// size, so large connected regions can exhaust the thread stack.
    Recursive,
    /// Depth-first with an explicit stack.
    Stack,
    /// Breadth-first with an explicit queue.
    Queue,
}

impl FillStrategy {
    /// All strategies in reporting order.
    pub const ALL: [FillStrategy; 3] = [
        FillStrategy::Recursive,
        FillStrategy::Stack,
        FillStrategy::Queue,
    ];

    /// Name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            FillStrategy::Recursive => "recursive",
            FillStrategy::Stack => "stack",
            FillStrategy::Queue => "queue",
        }
    }

    /// Repaints the region containing `(x, y)` with `label`.
    ///
    /// Returns 0 when the seed already carries `label`.
    pub fn fill(
        self,
        img: &mut Image,
        x: usize,
        y: usize,
        label: u16,
        meter: &mut Meter,
    ) -> RegionResult<usize> {
        meter.validation();
        if !img.contains(x, y) {
            return Err(RegionError::SeedOutOfBounds {
                x,
                y,
                width: img.width(),
                height: img.height(),
            });
        }
        meter.pixel_read();
        let target = img.label(x, y);
        if target == label {
            return Ok(0);
        }

        let painted = match self {
            FillStrategy::Recursive => {
                let mut ctx = RecursiveFill {
                    img,
                    meter,
                    target,
                    label,
                };
                ctx.visit(x, y)
            }
            FillStrategy::Stack => fill_stack(img, x, y, target, label, meter),
            FillStrategy::Queue => fill_queue(img, x, y, target, label, meter),
        };
        Ok(painted)
    }
}

/// 4-neighbours of `(x, y)`; coordinates left of or above the origin are `None`.
#[inline]
fn neighbors(x: usize, y: usize) -> [Option<(usize, usize)>; 4] {
    [
        x.checked_sub(1).map(|nx| (nx, y)),
        Some((x + 1, y)),
        y.checked_sub(1).map(|ny| (x, ny)),
        Some((x, y + 1)),
    ]
}

/// Validates a candidate pixel and checks that it still carries `target`.
#[inline]
fn is_fillable(img: &Image, p: Option<(usize, usize)>, target: u16, meter: &mut Meter) -> bool {
    meter.validation();
    match p {
        Some((x, y)) if img.contains(x, y) => {
            meter.pixel_read();
            img.label(x, y) == target
        }
        _ => false,
    }
}

struct RecursiveFill<'a> {
    img: &'a mut Image,
    meter: &'a mut Meter,
    target: u16,
    label: u16,
}

impl RecursiveFill<'_> {
    /// Paints `(x, y)`, which the caller has checked, then recurses.
    fn visit(&mut self, x: usize, y: usize) -> usize {
        self.meter.enter();
        self.img.set_label(x, y, self.label);
        self.meter.pixel_write();
        let mut painted = 1;
        for p in neighbors(x, y) {
            if is_fillable(&*self.img, p, self.target, &mut *self.meter) {
                if let Some((nx, ny)) = p {
                    painted += self.visit(nx, ny);
                }
            }
        }
        self.meter.leave();
        painted
    }
}

fn fill_stack(
    img: &mut Image,
    x: usize,
    y: usize,
    target: u16,
    label: u16,
    meter: &mut Meter,
) -> usize {
    let mut stack = vec![(x, y)];
    meter.stack_push();
    let mut painted = 0;
    while let Some((cx, cy)) = stack.pop() {
        meter.stack_pop();
        meter.pixel_read();
        if img.label(cx, cy) != target {
            // Pushed twice before the first copy was painted.
            continue;
        }
        img.set_label(cx, cy, label);
        meter.pixel_write();
        painted += 1;
        for p in neighbors(cx, cy) {
            if is_fillable(img, p, target, meter) {
                if let Some(next) = p {
                    stack.push(next);
                    meter.stack_push();
                }
            }
        }
    }
    painted
}

fn fill_queue(
    img: &mut Image,
    x: usize,
    y: usize,
    target: u16,
    label: u16,
    meter: &mut Meter,
) -> usize {
    let mut queue = VecDeque::new();
    img.set_label(x, y, label);
    meter.pixel_write();
    queue.push_back((x, y));
    meter.queue_push();
    let mut painted = 1;
    while let Some((cx, cy)) = queue.pop_front() {
        meter.queue_pop();
        for p in neighbors(cx, cy) {
            if is_fillable(img, p, target, meter) {
                if let Some((nx, ny)) = p {
                    img.set_label(nx, ny, label);
                    meter.pixel_write();
                    painted += 1;
                    queue.push_back((nx, ny));
                    meter.queue_push();
                }
            }
        }
    }
    painted
}
