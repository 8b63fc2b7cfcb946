// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deterministic stand-ins for the browser window and display clock.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use blattwerk_reorder::{FrameClock, FrameHandle, Rect, ScrollSurface};

/// Scroll surface that records every `scroll_by` call.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub y: f64,
    pub max: f64,
    pub height: f64,
    pub scroll_calls: Rc<RefCell<Vec<f64>>>,
}

impl FakeWindow {
    pub fn new(y: f64, max: f64, height: f64) -> Self {
        Self {
            y,
            max,
            height,
            scroll_calls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl ScrollSurface for FakeWindow {
    fn scroll_y(&self) -> f64 {
        self.y
    }

    fn max_scroll_y(&self) -> f64 {
        self.max
    }

    fn viewport_height(&self) -> f64 {
        self.height
    }

    fn scroll_by(&mut self, dy: f64) {
        self.scroll_calls.borrow_mut().push(dy);
        self.y = (self.y + dy).clamp(0.0, self.max);
    }
}

/// Frame clock that hands out sequential handles and remembers cancellations.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    next: u64,
    pub requested: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl FakeClock {
    pub fn last_requested(&self) -> Option<FrameHandle> {
        self.requested.last().copied()
    }
}

impl FrameClock for FakeClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.requested.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

/// Viewport rectangles for a `cols`-wide grid of `size` tiles with `gap`
/// spacing, starting at the viewport origin.
pub fn grid(count: usize, cols: usize, size: f64, gap: f64) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            Rect::new(col * (size + gap), row * (size + gap), size, size)
        })
        .collect()
}

/// Document-space centre of `slot` in a grid built by [`grid`].
pub fn center_of(tiles: &[Rect], slot: usize) -> (f64, f64) {
    tiles[slot].center()
}
