//! Toast queue shared via context.
//!
//! Every page reports outcomes here; `ToastHost` at the app root renders
//! the queue and each toast removes itself after a few seconds.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use super::browser;

const TOAST_MS: u64 = 3500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Info => "toast-info",
            ToastKind::Warning => "toast-warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl ToastContext {
    pub fn items(&self) -> Vec<Toast> {
        (self.items)()
    }

    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let mut items = self.items;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        items.write().push(Toast {
            id,
            kind,
            message: message.into(),
        });

        // Root-scoped so the timer survives the page that raised the toast.
        let ctx = *self;
        spawn_forever(async move {
            browser::sleep_ms(TOAST_MS).await;
            ctx.dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(ToastKind::Warning, message);
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|t| t.id != id);
    }

    /// Drop everything on screen (used before a guard redirect toast).
    pub fn clear(&self) {
        let mut items = self.items;
        items.write().clear();
    }
}

/// Initialize toast context provider - call once at app root
pub fn use_toast_provider() {
    let items = use_signal(Vec::<Toast>::new);
    let next_id = use_signal(|| 0u64);
    use_context_provider(|| ToastContext { items, next_id });
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>()
}
