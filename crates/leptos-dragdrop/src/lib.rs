//! Leptos DragDrop Utilities
//!
//! Sortable-list drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//! Rows are addressed by their index in the rendered list.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_index_read: ReadSignal<Option<usize>>,
    pub dragging_index_write: WriteSignal<Option<usize>>,
    /// Row the dragged entry would land on
    pub drop_index_read: ReadSignal<Option<usize>>,
    pub drop_index_write: WriteSignal<Option<usize>>,
    /// Pending row (mousedown but not yet dragging)
    pub pending_index_read: ReadSignal<Option<usize>>,
    pub pending_index_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_index_read, dragging_index_write) = signal(None::<usize>);
    let (drop_index_read, drop_index_write) = signal(None::<usize>);
    let (pending_index_read, pending_index_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_index_read,
        dragging_index_write,
        drop_index_read,
        drop_index_write,
        pending_index_read,
        pending_index_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Move the element at `from` so that it ends up at index `to`.
///
/// Returns `false` (and leaves `items` untouched) when either index is out
/// of range or the move is a no-op.
pub fn move_index<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let moved = items.remove(from);
    items.insert(to, moved);
    true
}

/// Non-mutating variant of [`move_index`]
pub fn reordered<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    let mut next = items.to_vec();
    move_index(&mut next, from, to).then_some(next)
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_index_write.set(None);
    dnd.drop_index_write.set(None);
    dnd.pending_index_write.set(None);
}

/// Create mousedown handler for a draggable row
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Buttons inside the row keep their click behaviour
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_index_write.set(Some(index));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_index_read.get_untracked();

        if pending.is_some() && dnd.dragging_index_read.get_untracked().is_none() {
            let start_x = dnd.start_x_read.get_untracked();
            let start_y = dnd.start_y_read.get_untracked();
            let dx = (ev.client_x() - start_x).abs();
            let dy = (ev.client_y() - start_y).abs();

            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.dragging_index_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for rows (become the drop slot)
pub fn make_on_row_mouseenter(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_index_read.get_untracked() {
            if dragging != index {
                dnd.drop_index_write.set(Some(index));
            }
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_index_read.get_untracked().is_some() {
            dnd.drop_index_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` receives `(from, to)` row indices.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(usize, usize) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_index_read.get_untracked();
        let drop_index = dnd.drop_index_read.get_untracked();

        dnd.pending_index_write.set(None);
        end_drag(&dnd);

        // Plain clicks never reach on_drop
        if let (Some(from), Some(to)) = (dragging, drop_index) {
            on_drop(from, to);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}
