// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end drag scenarios against a fake window and clock.

mod common;

use blattwerk_core::ReorderConfig;
use blattwerk_reorder::{DragController, MoveOutcome, PageOrder, PointerPosition};

use common::{FakeClock, FakeWindow, center_of, grid};

fn controller(window: FakeWindow) -> DragController<FakeWindow, FakeClock> {
    DragController::new(ReorderConfig::default(), window, FakeClock::default())
}

#[test]
fn dragging_page_five_onto_slot_one() {
    // 8 pages in a 4-column grid, well inside a tall viewport.
    let tiles = grid(8, 4, 100.0, 20.0);
    let window = FakeWindow::new(0.0, 0.0, 2000.0);
    let mut ctl = controller(window);
    let mut order = PageOrder::identity(8);

    assert!(ctl.drag_start(&order, 5, &tiles));

    let (x, y) = center_of(&tiles, 1);
    let outcome = ctl.drag_move(&mut order, PointerPosition::new(x + 10.0, y - 5.0));

    assert_eq!(
        outcome,
        MoveOutcome::Committed {
            from_slot: 5,
            to_slot: 1
        }
    );
    assert_eq!(order.as_slice(), &[0, 5, 1, 2, 3, 4, 6, 7]);
    assert!(ctl.drag_end());
}

#[test]
fn successive_moves_resolve_against_the_current_order() {
    let tiles = grid(5, 5, 100.0, 20.0);
    let mut ctl = controller(FakeWindow::new(0.0, 0.0, 2000.0));
    let mut order = PageOrder::identity(5);

    ctl.drag_start(&order, 0, &tiles);
    for slot in 1..5 {
        let (x, y) = center_of(&tiles, slot);
        ctl.drag_move(&mut order, PointerPosition::new(x, y));
    }
    assert_eq!(order.as_slice(), &[1, 2, 3, 4, 0]);

    // Dragging back to the start walks it home again.
    let (x, y) = center_of(&tiles, 0);
    ctl.drag_move(&mut order, PointerPosition::new(x, y));
    assert_eq!(order, PageOrder::identity(5));
    ctl.drag_end();
}

#[test]
fn hovering_between_tiles_does_not_flicker() {
    // Wide gaps: the midpoint between two centres is beyond both thresholds.
    let tiles = grid(2, 2, 100.0, 200.0);
    let mut ctl = controller(FakeWindow::new(0.0, 0.0, 2000.0));
    let mut order = PageOrder::identity(2);

    ctl.drag_start(&order, 0, &tiles);
    for dx in [-3.0, 3.0, -3.0, 3.0] {
        let outcome = ctl.drag_move(&mut order, PointerPosition::new(200.0 + dx, 50.0));
        assert!(matches!(outcome, MoveOutcome::Held { .. }));
    }
    assert_eq!(order, PageOrder::identity(2));
    assert!(!ctl.drag_end());
}

#[test]
fn pointer_in_bottom_band_scrolls_until_end_of_document() {
    let tiles = grid(12, 3, 100.0, 20.0);
    let window = FakeWindow::new(0.0, 45.0, 400.0);
    let calls = window.scroll_calls.clone();
    let mut ctl = controller(window);
    let mut order = PageOrder::identity(12);

    ctl.drag_start(&order, 0, &tiles);
    ctl.drag_move(&mut order, PointerPosition::new(50.0, 400.0));
    assert_eq!(ctl.scroll_speed(), 20.0);

    while let Some(handle) = ctl.clock().last_requested() {
        if !ctl.on_frame(handle) {
            break;
        }
    }

    assert_eq!(*calls.borrow(), vec![20.0, 20.0, 5.0]);
    assert_eq!(ctl.surface().y, 45.0);
    assert_eq!(ctl.scroll_speed(), 0.0);
    ctl.drag_end();
}

#[test]
fn scrolled_pointer_resolves_in_document_space() {
    // Tiles captured while scrolled by 0; the page then scrolls 240px so a
    // pointer at viewport y=50 sits over the third row in document space.
    let tiles = grid(9, 3, 100.0, 20.0);
    let mut ctl = controller(FakeWindow::new(0.0, 1000.0, 2000.0));
    let mut order = PageOrder::identity(9);

    ctl.drag_start(&order, 0, &tiles);
    ctl.surface_mut().y = 240.0;
    let outcome = ctl.drag_move(&mut order, PointerPosition::new(170.0, 50.0));

    assert_eq!(
        outcome,
        MoveOutcome::Committed {
            from_slot: 0,
            to_slot: 7
        }
    );
    ctl.drag_end();
}

#[test]
fn drag_end_stops_scrolling_even_with_a_frame_in_flight() {
    let tiles = grid(4, 2, 100.0, 20.0);
    let window = FakeWindow::new(300.0, 1000.0, 600.0);
    let calls = window.scroll_calls.clone();
    let mut ctl = controller(window);
    let mut order = PageOrder::identity(4);

    ctl.drag_start(&order, 0, &tiles);
    ctl.drag_move(&mut order, PointerPosition::new(50.0, 590.0));
    assert!(ctl.scroll_speed() > 0.0);
    let in_flight = ctl.clock().last_requested().expect("frame requested");

    ctl.drag_end();

    assert_eq!(ctl.scroll_speed(), 0.0);
    assert_eq!(ctl.clock().cancelled, vec![in_flight]);
    assert!(!ctl.on_frame(in_flight));
    assert!(calls.borrow().is_empty());
}

#[test]
fn move_without_buttons_ends_a_missed_release() {
    let tiles = grid(4, 4, 100.0, 20.0);
    let window = FakeWindow::new(0.0, 1000.0, 400.0);
    let calls = window.scroll_calls.clone();
    let mut ctl = controller(window);
    let mut order = PageOrder::identity(4);

    ctl.drag_start(&order, 0, &tiles);
    // Released outside the grid while in the bottom band: scrolling began.
    ctl.pointer_moved(&mut order, PointerPosition::new(50.0, 395.0), true);
    assert!(ctl.scroll_speed() > 0.0);
    let in_flight = ctl.clock().last_requested().expect("frame requested");

    // Back over slot 3 with nothing held.
    let (x, y) = center_of(&tiles, 3);
    let outcome = ctl.pointer_moved(&mut order, PointerPosition::new(x, y), false);

    assert_eq!(outcome, MoveOutcome::Released);
    assert_eq!(order, PageOrder::identity(4));
    assert!(!ctl.is_dragging());
    assert_eq!(ctl.scroll_speed(), 0.0);
    assert!(!ctl.on_frame(in_flight));
    assert!(calls.borrow().is_empty());

    // Further hovering does nothing.
    let outcome = ctl.pointer_moved(&mut order, PointerPosition::new(x, y), false);
    assert_eq!(outcome, MoveOutcome::Ignored);
}

#[test]
fn held_buttons_keep_the_drag_going() {
    let tiles = grid(4, 4, 100.0, 20.0);
    let mut ctl = controller(FakeWindow::new(0.0, 0.0, 2000.0));
    let mut order = PageOrder::identity(4);

    ctl.drag_start(&order, 0, &tiles);
    let (x, y) = center_of(&tiles, 3);
    let outcome = ctl.pointer_moved(&mut order, PointerPosition::new(x, y), true);

    assert_eq!(
        outcome,
        MoveOutcome::Committed {
            from_slot: 0,
            to_slot: 3
        }
    );
    assert_eq!(order.as_slice(), &[1, 2, 3, 0]);
    assert!(ctl.is_dragging());
    ctl.drag_end();
}

#[test]
fn empty_document_is_a_no_op() {
    let mut ctl = controller(FakeWindow::new(0.0, 0.0, 800.0));
    let mut order = PageOrder::identity(0);
    let no_tiles: Vec<blattwerk_reorder::Rect> = Vec::new();

    assert!(!ctl.drag_start(&order, 0, &no_tiles));
    assert_eq!(
        ctl.drag_move(&mut order, PointerPosition::new(10.0, 10.0)),
        MoveOutcome::Ignored
    );
    assert!(!ctl.drag_end());
}
