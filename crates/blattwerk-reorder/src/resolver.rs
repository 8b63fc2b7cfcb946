// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Nearest-slot resolution and the commit hysteresis rule.

use crate::geometry::{Rect, TileLayout};

/// Closest slot to the pointer and how far its centre is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotHit {
    pub slot: usize,
    pub distance: f64,
}

/// Find the tile whose centre is nearest to the document-space pointer.
///
/// Ties go to the lowest slot. Returns `None` for an empty grid. Pure: the
/// answer depends only on the captured layouts and the pointer.
pub fn resolve_target_slot(layouts: &[TileLayout], doc_x: f64, doc_y: f64) -> Option<SlotHit> {
    let mut best: Option<SlotHit> = None;
    for (slot, tile) in layouts.iter().enumerate() {
        let distance = tile.rect.center_distance(doc_x, doc_y);
        match best {
            Some(hit) if distance >= hit.distance => {}
            _ => best = Some(SlotHit { slot, distance }),
        }
    }
    best
}

/// Largest pointer-to-centre distance at which a tile accepts a move.
pub fn commit_threshold(rect: &Rect, commit_ratio: f64) -> f64 {
    rect.max_dimension() * commit_ratio
}

/// Whether hovering `hit` should move the dragged page out of `current_slot`.
///
/// The distance bound keeps the order from flickering while the pointer sits
/// on the seam between two tiles.
pub fn should_commit(
    layouts: &[TileLayout],
    hit: SlotHit,
    current_slot: usize,
    commit_ratio: f64,
) -> bool {
    if hit.slot == current_slot {
        return false;
    }
    layouts
        .get(hit.slot)
        .is_some_and(|tile| hit.distance < commit_threshold(&tile.rect, commit_ratio))
}
