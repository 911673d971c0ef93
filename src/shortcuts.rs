//! Keyboard Shortcuts
//!
//! Key resolution and precondition checks are pure; the document binding
//! at the bottom feeds them real keyboard events.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::{TaskHierarchy, TaskStatus};
use crate::store::SelectionStore;

/// The parts of a keydown event that matter here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub meta: bool,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn from_event(ev: &web_sys::KeyboardEvent) -> Self {
        Self { key: ev.key(), meta: ev.meta_key(), ctrl: ev.ctrl_key() }
    }
}

/// Environment that decides whether shortcuts fire at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortcutGate {
    pub input_focused: bool,
    pub dialog_open: bool,
    /// Meta is the modifier on Apple platforms, Ctrl elsewhere
    pub apple_platform: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Create,
    Edit,
    Archive,
    Enqueue,
    Duplicate,
    FocusSearch,
    Dismiss,
}

/// Which shortcuts a page binds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutScope {
    TaskList,
    SearchOnly,
}

impl ShortcutScope {
    pub fn allows(&self, shortcut: Shortcut) -> bool {
        match self {
            ShortcutScope::TaskList => true,
            ShortcutScope::SearchOnly => shortcut == Shortcut::FocusSearch,
        }
    }
}

pub fn resolve(press: &KeyPress, gate: &ShortcutGate) -> Option<Shortcut> {
    if gate.input_focused {
        return None;
    }
    if press.key == "Escape" {
        return Some(Shortcut::Dismiss);
    }
    if gate.dialog_open {
        return None;
    }
    let modifier = if gate.apple_platform { press.meta } else { press.ctrl };
    if !modifier {
        return None;
    }
    match press.key.to_lowercase().as_str() {
        "n" => Some(Shortcut::Create),
        "e" => Some(Shortcut::Edit),
        "a" => Some(Shortcut::Archive),
        "q" => Some(Shortcut::Enqueue),
        "d" => Some(Shortcut::Duplicate),
        "f" => Some(Shortcut::FocusSearch),
        _ => None,
    }
}

/// Handlers invoked by [`dispatch`]
pub trait ShortcutActions {
    fn create_task(&self);
    fn edit_task(&self, task: &TaskHierarchy);
    fn archive_task(&self, task: &TaskHierarchy);
    fn add_to_queue(&self, task: &TaskHierarchy);
    fn duplicate_task(&self, task: &TaskHierarchy);
    fn focus_search(&self);
    fn dismiss(&self);
}

/// What the event handler should do after dispatching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatched {
    pub applied: bool,
    pub prevent_default: bool,
    pub clear_selection: bool,
}

pub fn dispatch<A: ShortcutActions + ?Sized>(
    shortcut: Shortcut,
    selected: Option<&TaskHierarchy>,
    actions: &A,
) -> Dispatched {
    let is_draft = |task: &&TaskHierarchy| task.status == TaskStatus::Draft;
    match shortcut {
        Shortcut::Create => {
            actions.create_task();
            Dispatched { applied: true, prevent_default: true, clear_selection: false }
        }
        Shortcut::FocusSearch => {
            actions.focus_search();
            Dispatched { applied: true, prevent_default: true, clear_selection: false }
        }
        Shortcut::Dismiss => {
            actions.dismiss();
            Dispatched { applied: true, prevent_default: false, clear_selection: true }
        }
        Shortcut::Edit => {
            let target = selected.filter(is_draft);
            if let Some(task) = target {
                actions.edit_task(task);
            }
            Dispatched { applied: target.is_some(), prevent_default: true, clear_selection: true }
        }
        Shortcut::Archive => {
            let target = selected.filter(is_draft);
            if let Some(task) = target {
                actions.archive_task(task);
            }
            Dispatched { applied: target.is_some(), prevent_default: true, clear_selection: true }
        }
        Shortcut::Enqueue => {
            let target = selected.filter(|task| !task.has_children());
            if let Some(task) = target {
                actions.add_to_queue(task);
            }
            // Cmd+Q stays with the OS when there is nothing to enqueue
            Dispatched { applied: target.is_some(), prevent_default: target.is_some(), clear_selection: true }
        }
        Shortcut::Duplicate => {
            if let Some(task) = selected {
                actions.duplicate_task(task);
            }
            Dispatched { applied: selected.is_some(), prevent_default: true, clear_selection: true }
        }
    }
}

// ========================
// DOM Binding
// ========================

pub fn is_apple_platform() -> bool {
    web_sys::window()
        .and_then(|win| win.navigator().platform().ok())
        .is_some_and(|platform| platform.to_lowercase().contains("mac"))
}

/// input, textarea, select, or contenteditable
pub fn text_input_focused() -> bool {
    let Some(active) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.active_element()) else {
        return false;
    };
    let tag = active.tag_name().to_lowercase();
    matches!(tag.as_str(), "input" | "textarea" | "select")
        || active.get_attribute("contenteditable").as_deref() == Some("true")
}

/// Bind document keydown for the lifetime of the app.
/// `scope` and `dialog_open` are read on every event.
pub fn bind_shortcuts<A>(
    selection: SelectionStore,
    scope: impl Fn() -> ShortcutScope + 'static,
    dialog_open: impl Fn() -> bool + 'static,
    actions: A,
) where
    A: ShortcutActions + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        let gate = ShortcutGate {
            input_focused: text_input_focused(),
            dialog_open: dialog_open(),
            apple_platform: is_apple_platform(),
        };
        let Some(shortcut) = resolve(&KeyPress::from_event(&ev), &gate) else {
            return;
        };
        if !scope().allows(shortcut) {
            return;
        }
        let selected = selection.selected_untracked();
        let outcome = dispatch(shortcut, selected.as_ref(), &actions);
        tracing::debug!(?shortcut, applied = outcome.applied, "shortcut");
        if outcome.prevent_default {
            ev.prevent_default();
        }
        if outcome.clear_selection {
            selection.clear();
        }
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_keydown.forget();
}
