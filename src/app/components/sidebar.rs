//! Dashboard sidebar built from the role's link table.

use dioxus::prelude::*;

use crate::app::sidebar_context::use_sidebar;
use crate::app::Route;
use crate::auth::permissions::{self, Category, SidebarLink};
use crate::models::Role;

fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Personal => "👤",
        Category::Users => "👥",
        Category::Routes => "🗺️",
        Category::Events => "📅",
        Category::Administrative => "🗂️",
        Category::Financial => "💰",
        Category::Notifications => "🔔",
        Category::Membership => "🪪",
    }
}

/// Links of one category with their target and highlight class.
fn links(role: Role, category: Category, current: &str) -> Vec<(SidebarLink, String, String)> {
    permissions::links_in(role, category)
        .into_iter()
        .map(|link| {
            let href = link.href(role);
            let class = if href == current { "active" } else { "" }.to_string();
            (link, href, class)
        })
        .collect()
}

#[component]
pub fn Sidebar(role: Role) -> Element {
    let sidebar = use_sidebar();
    let current = use_route::<Route>().to_string();
    let class = if sidebar.is_collapsed() {
        "sidebar collapsed"
    } else {
        "sidebar"
    };

    rsx! {
        aside { class,
            Link { to: role.home_path(), strong { "Club de Ciclismo EPN" } }
            for category in permissions::categories(role) {
                div { key: "{category.label()}",
                    button {
                        onclick: move |_| sidebar.toggle_category(category),
                        "{category_icon(category)} {category.label()}"
                    }
                    if sidebar.is_open(category) {
                        div { class: "category-links",
                            for (link, href, link_class) in links(role, category, &current) {
                                Link {
                                    key: "{link.path}",
                                    to: href,
                                    class: link_class,
                                    onclick: move |_| sidebar.after_navigate(),
                                    "{link.label}"
                                }
                            }
                        }
                    }
                }
            }
            Link { to: Route::Home {}, "🏠 Sitio público" }
        }
    }
}
