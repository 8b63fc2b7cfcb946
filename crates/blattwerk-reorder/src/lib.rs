// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blattwerk-reorder — drag-to-reorder engine for the organize-pages grid.
//
// The engine is host-agnostic: the page order is plain data, tile geometry is
// read once per drag through `TileHandle`, and window scrolling plus frame
// scheduling are injected through `ScrollSurface` and `FrameClock`. The
// desktop app implements those traits over the webview; tests use fakes.

pub mod autoscroll;
pub mod geometry;
pub mod order;
pub mod resolver;
pub mod session;

pub use autoscroll::{AutoScroller, FrameClock, FrameHandle, ScrollSurface};
pub use geometry::{LayoutSnapshot, Rect, TileHandle, TileLayout};
pub use order::{PageOrder, move_slot};
pub use resolver::{SlotHit, resolve_target_slot};
pub use session::{DragController, MoveOutcome, PointerPosition};
