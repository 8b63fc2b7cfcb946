// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge auto-scroll while dragging.
//
// Pointer moves set a signed speed (px per frame) from how deep the pointer is
// inside the top or bottom edge band. A frame-driven loop applies that speed
// with `scroll_by`, re-checking the document bounds on every frame. The loop
// is an explicit Stopped/Running state machine: starting is a no-op while
// running, stopping is a no-op while stopped, and a frame callback whose
// handle is not the live one does nothing.

use blattwerk_core::ReorderConfig;
use tracing::{debug, trace};

/// Sub-pixel slack when comparing scroll offsets against the bounds.
const BOUNDARY_EPSILON: f64 = 0.5;

/// The scrollable window the grid lives in.
pub trait ScrollSurface {
    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;
    /// Largest reachable vertical scroll offset.
    fn max_scroll_y(&self) -> f64;
    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;
    /// Scroll vertically by `dy` pixels (negative scrolls up).
    fn scroll_by(&mut self, dy: f64);
}

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Display-refresh scheduler. The host later delivers the frame by calling
/// [`AutoScroller::on_frame`] (usually via the drag controller) with the
/// handle it returned.
pub trait FrameClock {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Signed scroll speed for a pointer at `pointer_y` (viewport-relative).
///
/// Zero outside both bands, and zero when the page already sits at the
/// boundary the band points towards. `config` must be sanitized.
pub fn edge_scroll_speed(
    config: &ReorderConfig,
    pointer_y: f64,
    viewport_height: f64,
    scroll_y: f64,
    max_scroll_y: f64,
) -> f64 {
    let band = config.edge_band_px;
    if band <= 0.0 || viewport_height <= 0.0 {
        return 0.0;
    }

    if pointer_y < band {
        if scroll_y <= BOUNDARY_EPSILON {
            return 0.0;
        }
        return -ramp(config, band - pointer_y);
    }

    let bottom_edge = viewport_height - band;
    if pointer_y > bottom_edge {
        if scroll_y >= max_scroll_y - BOUNDARY_EPSILON {
            return 0.0;
        }
        return ramp(config, pointer_y - bottom_edge);
    }

    0.0
}

/// Linear ramp from the band's outer edge (0) to the viewport edge (max),
/// floored at the minimum speed.
fn ramp(config: &ReorderConfig, depth: f64) -> f64 {
    let fraction = (depth / config.edge_band_px).clamp(0.0, 1.0);
    (fraction * config.max_scroll_speed).clamp(config.min_scroll_speed, config.max_scroll_speed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Stopped,
    Running(FrameHandle),
}

/// Owns the scroll speed and the lifecycle of the frame loop.
#[derive(Debug, Clone)]
pub struct AutoScroller {
    config: ReorderConfig,
    speed: f64,
    state: LoopState,
}

impl AutoScroller {
    pub fn new(config: ReorderConfig) -> Self {
        Self {
            config: config.sanitized(),
            speed: 0.0,
            state: LoopState::Stopped,
        }
    }

    /// Current speed in px per frame; negative scrolls up.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// Handle of the frame the loop is waiting on, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        match self.state {
            LoopState::Running(handle) => Some(handle),
            LoopState::Stopped => None,
        }
    }

    /// Recompute the speed for a new pointer position and start or stop the
    /// loop to match.
    pub fn update<S, C>(&mut self, pointer_y: f64, surface: &S, clock: &mut C) -> f64
    where
        S: ScrollSurface + ?Sized,
        C: FrameClock + ?Sized,
    {
        let speed = edge_scroll_speed(
            &self.config,
            pointer_y,
            surface.viewport_height(),
            surface.scroll_y(),
            surface.max_scroll_y(),
        );

        if speed != self.speed {
            trace!(speed, pointer_y, "auto-scroll speed changed");
        }

        if speed == 0.0 {
            self.stop(clock);
        } else {
            self.speed = speed;
            self.start(clock);
        }
        self.speed
    }

    /// Begin the frame loop. No-op if it is already running.
    fn start<C: FrameClock + ?Sized>(&mut self, clock: &mut C) {
        if self.state == LoopState::Stopped {
            let handle = clock.request_frame();
            debug!(?handle, speed = self.speed, "auto-scroll started");
            self.state = LoopState::Running(handle);
        }
    }

    /// Zero the speed and cancel any pending frame. No-op if already stopped.
    pub fn stop<C: FrameClock + ?Sized>(&mut self, clock: &mut C) {
        self.speed = 0.0;
        if let LoopState::Running(handle) = self.state {
            clock.cancel_frame(handle);
            self.state = LoopState::Stopped;
            debug!(?handle, "auto-scroll stopped");
        }
    }

    /// One loop step. Returns `true` if another frame was scheduled.
    ///
    /// A frame whose handle is not the pending one (already cancelled, or a
    /// duplicate delivery) is ignored without touching the surface.
    pub fn on_frame<S, C>(&mut self, handle: FrameHandle, surface: &mut S, clock: &mut C) -> bool
    where
        S: ScrollSurface + ?Sized,
        C: FrameClock + ?Sized,
    {
        if self.state != LoopState::Running(handle) {
            trace!(?handle, "stale auto-scroll frame ignored");
            return false;
        }
        self.state = LoopState::Stopped;

        if self.speed == 0.0 {
            return false;
        }

        let current = surface.scroll_y();
        let max = surface.max_scroll_y().max(0.0);
        let target = (current + self.speed).clamp(0.0, max);
        let delta = target - current;

        if delta.abs() < f64::EPSILON {
            self.speed = 0.0;
            debug!(scroll_y = current, "auto-scroll reached boundary");
            return false;
        }

        surface.scroll_by(delta);

        if target <= 0.0 || target >= max {
            self.speed = 0.0;
            debug!(scroll_y = target, "auto-scroll reached boundary");
            return false;
        }

        self.state = LoopState::Running(clock.request_frame());
        true
    }
}
