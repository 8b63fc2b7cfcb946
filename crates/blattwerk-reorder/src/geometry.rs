// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout geometry cache — tile rectangles captured once at drag start.
//
// Rectangles are stored in document coordinates (viewport + vertical scroll
// offset) so they stay comparable while the page auto-scrolls. Nothing else
// in the engine reads live layout during a drag.

use tracing::{debug, warn};

use crate::order::PageOrder;

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Same rectangle shifted down by `dy`.
    pub fn offset_y(&self, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            ..*self
        }
    }

    /// Euclidean distance from `(x, y)` to the rectangle's centre.
    pub fn center_distance(&self, x: f64, y: f64) -> f64 {
        let (cx, cy) = self.center();
        (x - cx).hypot(y - cy)
    }
}

/// Anything that can report its current viewport-relative rectangle.
///
/// The host implements this for whatever stands in for a rendered tile (a DOM
/// element, a widget id). A plain [`Rect`] is its own handle.
pub trait TileHandle {
    fn viewport_rect(&self) -> Rect;
}

impl TileHandle for Rect {
    fn viewport_rect(&self) -> Rect {
        *self
    }
}

impl<T: TileHandle + ?Sized> TileHandle for &T {
    fn viewport_rect(&self) -> Rect {
        (**self).viewport_rect()
    }
}

/// One grid slot as captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    /// Visual slot the tile occupied when captured.
    pub slot: usize,
    /// Page that occupied the slot when captured.
    pub original_index: usize,
    /// Document-space rectangle.
    pub rect: Rect,
}

/// Immutable per-drag geometry, indexed by slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    tiles: Vec<TileLayout>,
}

impl LayoutSnapshot {
    /// Read every tile once and convert to document coordinates.
    ///
    /// `handles` must be in current slot order. If the host supplies a
    /// different number of handles than the order has pages, only the common
    /// prefix is captured; the resulting count mismatch makes the drag
    /// controller skip commits until the next drag starts.
    pub fn capture<H: TileHandle>(handles: &[H], order: &PageOrder, scroll_offset_y: f64) -> Self {
        if handles.len() != order.len() {
            warn!(
                handles = handles.len(),
                pages = order.len(),
                "tile count differs from page count at drag start"
            );
        }

        let tiles: Vec<TileLayout> = handles
            .iter()
            .zip(order.as_slice())
            .enumerate()
            .map(|(slot, (handle, &original_index))| TileLayout {
                slot,
                original_index,
                rect: handle.viewport_rect().offset_y(scroll_offset_y),
            })
            .collect();

        debug!(tiles = tiles.len(), scroll_offset_y, "layout snapshot captured");
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&TileLayout> {
        self.tiles.get(slot)
    }

    pub fn tiles(&self) -> &[TileLayout] {
        &self.tiles
    }
}
