//! Non-maximal containment filtering.
//!
//! A detection is dropped when some other detection strictly encloses it on
//! all four sides. Touching edges do not count as containment, so identical
//! duplicates and edge-sharing rectangles survive.

use gee_models::{Detection, Rectangle};

/// Whether `inner` lies strictly inside `outer`.
#[inline]
pub fn is_strictly_inside(inner: &Rectangle, outer: &Rectangle) -> bool {
    outer.strictly_contains(inner)
}

/// Keep only maximal detections, preserving input order.
pub fn filter_contained(detections: &[Detection]) -> Vec<Detection> {
    detections
        .iter()
        .enumerate()
        .filter(|(i, candidate)| {
            !detections
                .iter()
                .enumerate()
                .any(|(j, other)| *i != j && is_strictly_inside(&candidate.rect, &other.rect))
        })
        .map(|(_, d)| *d)
        .collect()
}
