//! Cross-tab notification sync through `storage` events.
//!
//! Another tab marking or dismissing a notification bumps one of the sync
//! keys; the browser then fires `storage` here and the counter ticks. The
//! counter lives in context so this tab's own pages can bump it too.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// RAII guard removing the window listener on drop
#[cfg(target_arch = "wasm32")]
struct StorageListenerGuard {
    window: web_sys::Window,
    // Dropped with the guard so the closure does not leak
    onstorage: Closure<dyn FnMut(web_sys::StorageEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for StorageListenerGuard {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "storage",
            self.onstorage.as_ref().unchecked_ref(),
        );
    }
}

#[derive(Clone, Copy)]
pub struct NotificationSync(Signal<u64>);

/// Install the shared counter and the window listener - call once at app root
pub fn use_notification_sync_provider() {
    let ticks = use_signal(|| 0u64);
    use_context_provider(|| NotificationSync(ticks));

    #[cfg(target_arch = "wasm32")]
    {
        let guard: Rc<RefCell<Option<StorageListenerGuard>>> =
            use_hook(|| Rc::new(RefCell::new(None)));

        let guard_clone = guard.clone();
        use_effect(move || {
            if guard_clone.borrow().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };

            let mut ticks = ticks;
            let onstorage = Closure::wrap(Box::new(move |e: web_sys::StorageEvent| {
                if crate::notifications::is_sync_key(e.key().as_deref()) {
                    tracing::debug!("Notification sync from another tab: {:?}", e.key());
                    let next = *ticks.peek() + 1;
                    ticks.set(next);
                }
            }) as Box<dyn FnMut(_)>);

            if window
                .add_event_listener_with_callback("storage", onstorage.as_ref().unchecked_ref())
                .is_err()
            {
                tracing::warn!("Could not listen for storage events");
                return;
            }

            *guard_clone.borrow_mut() = Some(StorageListenerGuard { window, onstorage });
        });
    }
}

/// Counter bumped on every relevant `storage` event and by [`notify_changed`];
/// read it inside a resource to refetch.
pub fn use_notification_sync() -> Signal<u64> {
    use_context::<NotificationSync>().0
}

/// Local change in this tab (storage events only reach other tabs).
pub fn notify_changed(mut ticks: Signal<u64>) {
    let next = *ticks.peek() + 1;
    ticks.set(next);
}
