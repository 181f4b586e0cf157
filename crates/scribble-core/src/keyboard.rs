//! Undo/redo keyboard shortcuts and the listener registry hosts feed key events into.

use crate::interaction::Whiteboard;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A key press with its modifier state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Format for display (e.g. "Ctrl+Shift+z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.meta {
            parts.push("Meta");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key.as_str());
        parts.join("+")
    }
}

/// Actions bound to keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
}

/// Map a chord to its action.
///
/// Ctrl+Z or Cmd+Z undoes; adding Shift redoes.
pub fn resolve_shortcut(chord: &KeyChord) -> Option<ShortcutAction> {
    if !(chord.ctrl || chord.meta) || !chord.key.eq_ignore_ascii_case("z") {
        return None;
    }
    Some(if chord.shift {
        ShortcutAction::Redo
    } else {
        ShortcutAction::Undo
    })
}

type KeyListener = Rc<dyn Fn(&KeyChord)>;

/// Process-wide key listener registry.
///
/// The host owns one hub and forwards every key-down to [`dispatch`](Self::dispatch).
#[derive(Default, Clone)]
pub struct KeyboardHub {
    listeners: Rc<RefCell<Vec<KeyListener>>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned subscription is dropped.
    #[must_use = "dropping the subscription deregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> KeyboardSubscription
    where
        F: Fn(&KeyChord) + 'static,
    {
        let listener: KeyListener = Rc::new(listener);
        self.listeners.borrow_mut().push(Rc::clone(&listener));
        KeyboardSubscription {
            listener,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Deliver `chord` to every registered listener.
    pub fn dispatch(&self, chord: &KeyChord) {
        // Listeners may subscribe or unsubscribe while running.
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(chord);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Live registration in a [`KeyboardHub`]. Deregisters on drop.
pub struct KeyboardSubscription {
    listener: KeyListener,
    listeners: Weak<RefCell<Vec<KeyListener>>>,
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .retain(|item| !Rc::ptr_eq(item, &self.listener));
        }
    }
}

impl Whiteboard {
    /// Route undo/redo shortcuts from `hub` to this whiteboard.
    ///
    /// The whiteboard keeps the subscription, so dropping the whiteboard
    /// removes the listener. Connecting again replaces the old listener.
    pub fn connect_keyboard(this: &Rc<RefCell<Self>>, hub: &KeyboardHub) {
        let board = Rc::downgrade(this);
        let subscription = hub.subscribe(move |chord| {
            let Some(action) = resolve_shortcut(chord) else {
                return;
            };
            let Some(board) = board.upgrade() else {
                return;
            };
            let Ok(mut board) = board.try_borrow_mut() else {
                warn!("Shortcut {} ignored: whiteboard is busy", chord.format());
                return;
            };
            debug!("Shortcut {} -> {:?}", chord.format(), action);
            match action {
                ShortcutAction::Undo => board.undo(),
                ShortcutAction::Redo => board.redo(),
            };
        });
        this.borrow_mut().keyboard = Some(subscription);
    }
}
