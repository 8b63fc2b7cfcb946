// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Organize grid — page tiles the user can drag into a new order.
//
// Pointer events feed a `DragController`. The webview window is the scroll
// container: its metrics are mirrored into `WebviewScroll` at drag start and
// then kept current by a window listener, and scrolling is issued as
// `window.scrollBy`. The same listener reports pointer releases anywhere in
// the window. Frames come from a timer task that polls the `TaskClock` for a
// pending request.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use blattwerk_reorder::{
    DragController, FrameClock, FrameHandle, MoveOutcome, PageOrder, PointerPosition, Rect,
    ScrollSurface,
};
use dioxus::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::state::AppState;

const SCROLL_METRICS_JS: &str = "return { \
    y: window.scrollY, \
    max: Math.max(0, document.documentElement.scrollHeight - window.innerHeight), \
    height: window.innerHeight \
};";

// Installed once per grid. Replaces the listeners of an earlier grid.
const WINDOW_LISTENER_JS: &str = r#"
const metrics = () => ({
    kind: 'scroll',
    y: window.scrollY,
    max: Math.max(0, document.documentElement.scrollHeight - window.innerHeight),
    height: window.innerHeight,
});
if (window.__blattwerkGridOff) window.__blattwerkGridOff();
const onScroll = () => dioxus.send(metrics());
const onRelease = () => dioxus.send({ kind: 'release' });
window.addEventListener('scroll', onScroll, { passive: true });
window.addEventListener('resize', onScroll);
window.addEventListener('pointerup', onRelease);
window.addEventListener('pointercancel', onRelease);
window.addEventListener('blur', onRelease);
window.__blattwerkGridOff = () => {
    window.removeEventListener('scroll', onScroll);
    window.removeEventListener('resize', onScroll);
    window.removeEventListener('pointerup', onRelease);
    window.removeEventListener('pointercancel', onRelease);
    window.removeEventListener('blur', onRelease);
};
await new Promise(() => {});
"#;

/// Message posted by the window listener.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum WindowSignal {
    Scroll(WebviewScroll),
    Release,
}

/// Window scroll metrics, mirrored on the Rust side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct WebviewScroll {
    y: f64,
    max: f64,
    height: f64,
}

impl WebviewScroll {
    /// Query the live window metrics.
    async fn fetch() -> Option<Self> {
        match document::eval(SCROLL_METRICS_JS).join::<Self>().await {
            Ok(metrics) => Some(metrics),
            Err(err) => {
                warn!(?err, "cannot read window scroll metrics");
                None
            }
        }
    }
}

impl ScrollSurface for WebviewScroll {
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
        self.y = (self.y + dy).clamp(0.0, self.max);
        let _ = document::eval(&format!("window.scrollBy(0, {dy});"));
    }
}

/// Frame clock backed by a shared slot the timer task drains.
pub struct TaskClock {
    next: u64,
    pending: Rc<Cell<Option<FrameHandle>>>,
}

impl TaskClock {
    fn new(pending: Rc<Cell<Option<FrameHandle>>>) -> Self {
        Self { next: 0, pending }
    }
}

impl FrameClock for TaskClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.set(Some(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.get() == Some(handle) {
            self.pending.set(None);
        }
    }
}

type GridController = DragController<WebviewScroll, TaskClock>;

/// Fold a window signal into the controller. Returns `true` if it ended an
/// active drag.
fn apply_window_signal(ctl: &mut GridController, signal: WindowSignal) -> bool {
    match signal {
        WindowSignal::Scroll(metrics) => {
            *ctl.surface_mut() = metrics;
            false
        }
        WindowSignal::Release => {
            let was_dragging = ctl.is_dragging();
            ctl.drag_end();
            was_dragging
        }
    }
}

/// Draggable grid of page tiles. `order` is updated in place on every
/// committed move; tiles are labelled by original page number, or show
/// `previews[original]` when supplied.
#[component]
pub fn OrganizeGrid(order: Signal<PageOrder>, #[props(default)] previews: Vec<String>) -> Element {
    let mut order = order;
    let config = use_context::<Signal<AppState>>().read().config.reorder;
    let pending = use_hook(|| Rc::new(Cell::new(None::<FrameHandle>)));

    let mut controller = use_signal({
        let pending = pending.clone();
        move || GridController::new(config, WebviewScroll::default(), TaskClock::new(pending))
    });
    let tiles = use_signal(HashMap::<usize, Rc<MountedData>>::new);
    let mut pressed = use_signal(|| false);

    // Frame ticker: deliver pending frame requests to the auto-scroller.
    let interval = Duration::from_millis(config.frame_interval_ms);
    let _ticker = use_resource(move || {
        let pending = pending.clone();
        async move {
            loop {
                tokio::time::sleep(interval).await;
                if let Some(handle) = pending.take() {
                    controller.write().on_frame(handle);
                }
            }
        }
    });

    // Window listener: live scroll metrics and releases outside the grid.
    use_future(move || async move {
        let mut listener = document::eval(WINDOW_LISTENER_JS);
        loop {
            match listener.recv::<WindowSignal>().await {
                Ok(signal) => {
                    if signal == WindowSignal::Release {
                        pressed.set(false);
                    }
                    if apply_window_signal(&mut controller.write(), signal) {
                        debug!("drag ended by window release");
                    }
                }
                Err(err) => {
                    warn!(?err, "window listener closed");
                    break;
                }
            }
        }
    });

    let dragged = controller.read().dragged_original();
    let slots: Vec<usize> = order.read().as_slice().to_vec();

    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 16px; padding: 16px; user-select: none; touch-action: none;",
            onpointermove: move |evt: PointerEvent| {
                if !controller.read().is_dragging() {
                    return;
                }
                let point = evt.client_coordinates();
                let held = !evt.held_buttons().is_empty();
                let mut next = order.read().clone();
                let outcome = controller
                    .write()
                    .pointer_moved(&mut next, PointerPosition::new(point.x, point.y), held);
                match outcome {
                    MoveOutcome::Committed { from_slot, to_slot } => {
                        debug!(from_slot, to_slot, "tile moved");
                        order.set(next);
                    }
                    MoveOutcome::Released => pressed.set(false),
                    _ => {}
                }
            },
            onpointerup: move |_| {
                pressed.set(false);
                controller.write().drag_end();
            },
            onpointercancel: move |_| {
                pressed.set(false);
                controller.write().drag_end();
            },

            for (slot, original) in slots.into_iter().enumerate() {
                {
                    let is_dragged = dragged == Some(original);
                    let opacity = if is_dragged { "0.4" } else { "1" };
                    let border = if is_dragged { "2px dashed #2f6f4f" } else { "1px solid #ccc" };
                    let preview = previews.get(original).cloned();
                    let page_number = original + 1;
                    rsx! {
                        div {
                            key: "{original}",
                            style: "aspect-ratio: 0.707; border: {border}; border-radius: 6px; background: white; display: flex; flex-direction: column; align-items: center; justify-content: center; cursor: grab; opacity: {opacity};",
                            onmounted: move |evt: MountedEvent| {
                                let mut tiles = tiles;
                                tiles.write().insert(original, evt.data());
                            },
                            onpointerdown: move |_| {
                                pressed.set(true);
                                spawn(begin_drag(controller, order, tiles, pressed, original));
                            },
                            if let Some(src) = preview {
                                img { src: "{src}", draggable: false, style: "max-width: 90%; max-height: 80%; pointer-events: none;" }
                            } else {
                                span { style: "font-size: 28px; color: #444;", "{page_number}" }
                            }
                            span { style: "font-size: 12px; color: #888; margin-top: 6px;", "Position {slot + 1}" }
                        }
                    }
                }
            }
        }
    }
}

/// Capture window metrics and every tile's rectangle, then start the drag if
/// the pointer is still down.
async fn begin_drag(
    mut controller: Signal<GridController>,
    order: Signal<PageOrder>,
    tiles: Signal<HashMap<usize, Rc<MountedData>>>,
    pressed: Signal<bool>,
    original: usize,
) {
    let Some(metrics) = WebviewScroll::fetch().await else {
        return;
    };

    let slots: Vec<usize> = order.read().as_slice().to_vec();
    let mut rects = Vec::with_capacity(slots.len());
    for slot_original in slots {
        let Some(mounted) = tiles.read().get(&slot_original).cloned() else {
            warn!(page = slot_original, "tile not mounted at drag start");
            break;
        };
        match mounted.get_client_rect().await {
            Ok(r) => rects.push(Rect::new(r.origin.x, r.origin.y, r.size.width, r.size.height)),
            Err(err) => {
                warn!(page = slot_original, ?err, "cannot measure tile");
                break;
            }
        }
    }

    if !*pressed.read() {
        debug!(original, "pointer released before drag could start");
        return;
    }

    let mut ctl = controller.write();
    *ctl.surface_mut() = metrics;
    ctl.drag_start(&order.read(), original, &rects);
}
