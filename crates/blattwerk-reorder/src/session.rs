// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drag session controller — Idle -> Dragging -> Idle.
//
// Translates drag start/move/end into geometry capture, auto-scroll commands,
// and page order moves. The page order itself stays with the caller; each
// move call receives it mutably and replaces it wholesale on commit.

use blattwerk_core::ReorderConfig;
use tracing::{debug, info, warn};

use crate::autoscroll::{AutoScroller, FrameClock, FrameHandle, ScrollSurface};
use crate::geometry::{LayoutSnapshot, TileHandle};
use crate::order::PageOrder;
use crate::resolver::{self, SlotHit};

/// Pointer position in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a single drag-move did to the order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No drag is active, or the grid is empty.
    Ignored,
    /// Captured geometry no longer matches the page count; move skipped.
    StaleGeometry,
    /// Pointer resolved to a slot but the move did not pass the commit rule.
    Held { target_slot: usize, distance: f64 },
    /// The dragged page moved from one slot to another.
    Committed { from_slot: usize, to_slot: usize },
    /// The pointer moved with no button held, so the release was missed;
    /// the drag has been ended.
    Released,
}

#[derive(Debug)]
struct ActiveDrag {
    dragged_original: usize,
    layouts: LayoutSnapshot,
    commits: usize,
}

/// Orchestrates one drag at a time over an injected scroll surface and
/// frame clock.
pub struct DragController<S, C> {
    config: ReorderConfig,
    scroller: AutoScroller,
    surface: S,
    clock: C,
    active: Option<ActiveDrag>,
}

impl<S: ScrollSurface, C: FrameClock> DragController<S, C> {
    pub fn new(config: ReorderConfig, surface: S, clock: C) -> Self {
        let config = config.sanitized();
        Self {
            config,
            scroller: AutoScroller::new(config),
            surface,
            clock,
            active: None,
        }
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Original index of the page being dragged.
    pub fn dragged_original(&self) -> Option<usize> {
        self.active.as_ref().map(|drag| drag.dragged_original)
    }

    /// Current auto-scroll speed in px per frame.
    pub fn scroll_speed(&self) -> f64 {
        self.scroller.speed()
    }

    /// Captured geometry of the active drag.
    pub fn layouts(&self) -> Option<&LayoutSnapshot> {
        self.active.as_ref().map(|drag| &drag.layouts)
    }

    /// Begin dragging `original_index`, capturing tile geometry once.
    ///
    /// `tiles` must be in current slot order. Returns `false` (and changes
    /// nothing) if a drag is already active or the page is not in `order`.
    pub fn drag_start<H: TileHandle>(
        &mut self,
        order: &PageOrder,
        original_index: usize,
        tiles: &[H],
    ) -> bool {
        if let Some(active) = &self.active {
            debug!(
                active = active.dragged_original,
                requested = original_index,
                "drag start ignored while another drag is active"
            );
            return false;
        }
        if order.slot_of(original_index).is_none() {
            warn!(original_index, pages = order.len(), "drag start for unknown page");
            return false;
        }

        let layouts = LayoutSnapshot::capture(tiles, order, self.surface.scroll_y());
        info!(original_index, tiles = layouts.len(), "drag started");
        self.active = Some(ActiveDrag {
            dragged_original: original_index,
            layouts,
            commits: 0,
        });
        true
    }

    /// Process one pointer move: steer auto-scroll, then resolve the nearest
    /// slot and commit the move if it passes the hysteresis rule.
    pub fn drag_move(&mut self, order: &mut PageOrder, pointer: PointerPosition) -> MoveOutcome {
        let Some(active) = self.active.as_mut() else {
            return MoveOutcome::Ignored;
        };

        self.scroller
            .update(pointer.y, &self.surface, &mut self.clock);

        if active.layouts.len() != order.len() {
            warn!(
                tiles = active.layouts.len(),
                pages = order.len(),
                "stale tile geometry, move skipped"
            );
            return MoveOutcome::StaleGeometry;
        }

        let doc_x = pointer.x;
        let doc_y = pointer.y + self.surface.scroll_y();
        let Some(hit) = resolver::resolve_target_slot(active.layouts.tiles(), doc_x, doc_y) else {
            return MoveOutcome::Ignored;
        };
        let Some(current_slot) = order.slot_of(active.dragged_original) else {
            warn!(
                original = active.dragged_original,
                "dragged page vanished from order, move skipped"
            );
            return MoveOutcome::StaleGeometry;
        };

        let SlotHit { slot: target_slot, distance } = hit;
        if !resolver::should_commit(
            active.layouts.tiles(),
            hit,
            current_slot,
            self.config.commit_ratio,
        ) {
            return MoveOutcome::Held {
                target_slot,
                distance,
            };
        }

        *order = order.move_slot(current_slot, target_slot);
        active.commits += 1;
        debug!(
            original = active.dragged_original,
            from_slot = current_slot,
            to_slot = target_slot,
            distance,
            "reorder committed"
        );
        MoveOutcome::Committed {
            from_slot: current_slot,
            to_slot: target_slot,
        }
    }

    /// Like [`drag_move`](Self::drag_move), for hosts that can miss the
    /// release event. A move reported with no button held ends the drag
    /// instead of steering it.
    pub fn pointer_moved(
        &mut self,
        order: &mut PageOrder,
        pointer: PointerPosition,
        buttons_held: bool,
    ) -> MoveOutcome {
        if buttons_held || !self.is_dragging() {
            return self.drag_move(order, pointer);
        }
        debug!("pointer moved with no button held, ending drag");
        self.drag_end();
        MoveOutcome::Released
    }

    /// Deliver a frame from the clock to the auto-scroll loop.
    ///
    /// Returns `true` if the loop scheduled another frame. Frames arriving
    /// after the drag ended are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        self.scroller
            .on_frame(handle, &mut self.surface, &mut self.clock)
    }

    /// End the drag: stop auto-scroll immediately and drop cached geometry.
    ///
    /// Returns `true` if at least one move was committed during the drag.
    pub fn drag_end(&mut self) -> bool {
        self.scroller.stop(&mut self.clock);
        match self.active.take() {
            Some(active) => {
                info!(
                    original = active.dragged_original,
                    commits = active.commits,
                    "drag ended"
                );
                active.commits > 0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    #[derive(Default)]
    struct StillWindow {
        scrolled: u32,
    }

    impl ScrollSurface for StillWindow {
        fn scroll_y(&self) -> f64 {
            0.0
        }
        fn max_scroll_y(&self) -> f64 {
            0.0
        }
        fn viewport_height(&self) -> f64 {
            1000.0
        }
        fn scroll_by(&mut self, _dy: f64) {
            self.scrolled += 1;
        }
    }

    #[derive(Default)]
    struct NoClock;

    impl FrameClock for NoClock {
        fn request_frame(&mut self) -> FrameHandle {
            FrameHandle(0)
        }
        fn cancel_frame(&mut self, _handle: FrameHandle) {}
    }

    fn tiles(count: usize) -> Vec<Rect> {
        (0..count)
            .map(|i| Rect::new(i as f64 * 120.0, 300.0, 100.0, 100.0))
            .collect()
    }

    fn controller() -> DragController<StillWindow, NoClock> {
        DragController::new(ReorderConfig::default(), StillWindow::default(), NoClock)
    }

    #[test]
    fn moves_before_start_are_ignored() {
        let mut ctl = controller();
        let mut order = PageOrder::identity(3);
        let outcome = ctl.drag_move(&mut order, PointerPosition::new(50.0, 350.0));
        assert_eq!(outcome, MoveOutcome::Ignored);
        assert_eq!(order, PageOrder::identity(3));
    }

    #[test]
    fn second_start_is_ignored() {
        let mut ctl = controller();
        let order = PageOrder::identity(3);
        assert!(ctl.drag_start(&order, 0, &tiles(3)));
        assert!(!ctl.drag_start(&order, 2, &tiles(3)));
        assert_eq!(ctl.dragged_original(), Some(0));
    }

    #[test]
    fn unknown_page_does_not_start() {
        let mut ctl = controller();
        assert!(!ctl.drag_start(&PageOrder::identity(2), 7, &tiles(2)));
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn hovering_own_slot_holds() {
        let mut ctl = controller();
        let mut order = PageOrder::identity(3);
        ctl.drag_start(&order, 1, &tiles(3));
        let outcome = ctl.drag_move(&mut order, PointerPosition::new(170.0, 350.0));
        assert_eq!(
            outcome,
            MoveOutcome::Held {
                target_slot: 1,
                distance: 0.0
            }
        );
    }

    #[test]
    fn stale_geometry_skips_commit() {
        let mut ctl = controller();
        let mut order = PageOrder::identity(3);
        ctl.drag_start(&order, 0, &tiles(3));
        let mut grown = PageOrder::identity(4);
        let outcome = ctl.drag_move(&mut grown, PointerPosition::new(290.0, 350.0));
        assert_eq!(outcome, MoveOutcome::StaleGeometry);
        assert_eq!(grown, PageOrder::identity(4));
        // The original order is still usable.
        let outcome = ctl.drag_move(&mut order, PointerPosition::new(290.0, 350.0));
        assert_eq!(
            outcome,
            MoveOutcome::Committed {
                from_slot: 0,
                to_slot: 2
            }
        );
    }

    #[test]
    fn singleton_grid_never_commits() {
        let mut ctl = controller();
        let mut order = PageOrder::identity(1);
        ctl.drag_start(&order, 0, &tiles(1));
        let outcome = ctl.drag_move(&mut order, PointerPosition::new(900.0, 900.0));
        assert!(matches!(outcome, MoveOutcome::Held { target_slot: 0, .. }));
        assert!(!ctl.drag_end());
    }

    #[test]
    fn idle_pointer_moves_stay_ignored() {
        let mut ctl = controller();
        let mut order = PageOrder::identity(3);
        let outcome = ctl.pointer_moved(&mut order, PointerPosition::new(50.0, 350.0), false);
        assert_eq!(outcome, MoveOutcome::Ignored);
    }

    #[test]
    fn drag_end_reports_whether_anything_moved() {
        let mut ctl = controller();
        let mut order = PageOrder::identity(3);
        ctl.drag_start(&order, 2, &tiles(3));
        ctl.drag_move(&mut order, PointerPosition::new(50.0, 350.0));
        assert_eq!(order.as_slice(), &[2, 0, 1]);
        assert!(ctl.drag_end());
        assert!(!ctl.is_dragging());
        assert!(ctl.layouts().is_none());
    }
}
