//! Dashboard sidebar state shared between the sidebar and the header toggle.

use dioxus::prelude::*;

use crate::auth::permissions::{Category, SidebarState};

use super::browser;

#[derive(Clone, Copy)]
pub struct SidebarContext {
    state: Signal<SidebarState>,
}

impl SidebarContext {
    pub fn is_collapsed(&self) -> bool {
        self.state.read().collapsed
    }

    pub fn is_open(&self, category: Category) -> bool {
        self.state.read().open == Some(category)
    }

    pub fn toggle_collapsed(&self) {
        let mut state = self.state;
        state.write().toggle_collapsed();
    }

    pub fn toggle_category(&self, category: Category) {
        let mut state = self.state;
        state.write().toggle_category(category);
    }

    /// Narrow screens close the sidebar after following a link.
    pub fn after_navigate(&self) {
        if browser::viewport_width() <= crate::auth::permissions::COLLAPSE_WIDTH {
            let mut state = self.state;
            state.write().collapsed = true;
        }
    }
}

/// Initialize sidebar context provider - call once at app root
pub fn use_sidebar_provider() {
    let state = use_signal(|| SidebarState::for_width(browser::viewport_width()));
    use_context_provider(|| SidebarContext { state });
}

pub fn use_sidebar() -> SidebarContext {
    use_context::<SidebarContext>()
}
