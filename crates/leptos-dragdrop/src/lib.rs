//! Leptos DragDrop Utilities
//!
//! Mouse-driven drag-and-drop of keyed cards onto zones (board columns).
//! Uses a movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// What is being dragged: the card key and the zone it was picked up from
#[derive(Clone, Debug, PartialEq)]
pub struct DragPayload<K, Z> {
    pub key: K,
    pub source: Z,
}

/// DnD state signals
pub struct DndSignals<K, Z>
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    /// Card being dragged (threshold passed)
    pub dragging: RwSignal<Option<DragPayload<K, Z>>>,
    /// Card under the mouse button but not yet dragging
    pub pending: RwSignal<Option<DragPayload<K, Z>>>,
    /// Zone currently hovered while dragging
    pub drop_target: RwSignal<Option<Z>>,
    /// True for a short moment after a drop, so the trailing click is ignored
    pub drag_just_ended: RwSignal<bool>,
    /// Start position for movement detection
    pub start: RwSignal<(i32, i32)>,
}

impl<K, Z> Clone for DndSignals<K, Z>
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, Z> Copy for DndSignals<K, Z>
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long the trailing click is suppressed after a drop
const CLICK_SUPPRESS_MS: i32 = 100;

pub fn create_dnd_signals<K, Z>() -> DndSignals<K, Z>
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    DndSignals {
        dragging: RwSignal::new(None),
        pending: RwSignal::new(None),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        start: RwSignal::new((0, 0)),
    }
}

/// Whether the pointer moved far enough from `start` to count as a drag
pub fn passed_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// End drag operation
pub fn end_drag<K, Z>(dnd: &DndSignals<K, Z>)
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    dnd.dragging.set(None);
    dnd.drop_target.set(None);
    dnd.pending.set(None);
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            CLICK_SUPPRESS_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for a draggable card
/// Records pending drag with start position
pub fn make_on_mousedown<K, Z>(dnd: DndSignals<K, Z>, key: K, source: Z) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending.set(Some(DragPayload { key: key.clone(), source: source.clone() }));
        dnd.start.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for a zone
pub fn make_on_zone_mouseenter<K, Z>(dnd: DndSignals<K, Z>, zone: Z) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(|d| d.is_some()) {
            dnd.drop_target.set(Some(zone.clone()));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K, Z>(dnd: DndSignals<K, Z>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging.with_untracked(|d| d.is_some()) {
            dnd.drop_target.set(None);
        }
    }
}

/// Bind document mousemove - starts drag once the pointer passes the threshold
fn bind_global_mousemove<K, Z>(dnd: DndSignals<K, Z>)
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        // Listeners outlive the view; signals may already be disposed
        if dnd.dragging.try_with_untracked(|d| d.is_some()).unwrap_or(true) {
            return;
        }
        let Some(pending) = dnd.pending.try_get_untracked().flatten() else { return };
        if passed_threshold(dnd.start.get_untracked(), (ev.client_x(), ev.client_y())) {
            dnd.dragging.set(Some(pending));
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<K, Z, F>(dnd: DndSignals<K, Z>, on_drop: F)
where
    K: Clone + Send + Sync + 'static,
    Z: Clone + Send + Sync + 'static,
    F: Fn(DragPayload<K, Z>, Z) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging.try_get_untracked() else { return };
        let target = dnd.drop_target.get_untracked();

        dnd.pending.set(None);
        // A plain click falls through untouched
        let Some(payload) = dragging else { return };
        end_drag(&dnd);

        if let Some(zone) = target {
            on_drop(payload, zone);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}
