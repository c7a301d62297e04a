#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Client Route Contract Tests
//!
//! Bookmarked URLs, sidebar links and post-login redirects all depend on the
//! route table. The golden file at tests/fixtures/app_routes.txt is the
//! source of truth.
//!
//! If this test fails:
//! 1. Review the route changes carefully
//! 2. Update app_routes.txt if the change is intentional
//!
//! Run with: cargo test --test route_contract

use std::collections::BTreeSet;
use std::fs;

use club_ciclismo_web::auth::guard::{LOGIN_PATH, UNAUTHORIZED_PATH};
use club_ciclismo_web::auth::permissions::links_for;
use club_ciclismo_web::models::Role;

fn load_golden_routes() -> BTreeSet<String> {
    let content = fs::read_to_string("tests/fixtures/app_routes.txt")
        .expect("Failed to read app_routes.txt");

    content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .collect()
}

/// First string literal inside `#[attr("...")]`.
fn attribute_path<'a>(line: &'a str, attr: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(attr)?;
    let start = rest.find('"')? + 1;
    let end = rest[start..].find('"')? + start;
    Some(&rest[start..end])
}

/// Walk the `Routable` enum keeping track of `#[nest]` prefixes.
fn extract_routes_from_source() -> BTreeSet<String> {
    let content = fs::read_to_string("src/app/mod.rs").expect("Failed to read app/mod.rs");

    let mut routes = BTreeSet::new();
    let mut prefixes: Vec<String> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("//") {
            continue;
        }

        if let Some(nest) = attribute_path(line, "#[nest(") {
            prefixes.push(nest.to_string());
        } else if line.starts_with("#[end_nest]") {
            prefixes.pop();
        } else if let Some(path) = attribute_path(line, "#[route(") {
            let path = path.split('?').next().unwrap_or(path);
            routes.insert(format!("{}{}", prefixes.concat(), path));
        }
    }

    routes
}

#[test]
fn app_routes_match_contract() {
    let golden = load_golden_routes();
    let actual = extract_routes_from_source();

    let added: Vec<_> = actual.difference(&golden).collect();
    let removed: Vec<_> = golden.difference(&actual).collect();

    if !added.is_empty() || !removed.is_empty() {
        let mut msg = String::from("\n\nROUTE CONTRACT VIOLATION!\n\n");

        if !added.is_empty() {
            msg.push_str("Routes ADDED (not in contract):\n");
            for route in &added {
                msg.push_str(&format!("  + {}\n", route));
            }
            msg.push('\n');
        }

        if !removed.is_empty() {
            msg.push_str("Routes REMOVED (missing from implementation):\n");
            for route in &removed {
                msg.push_str(&format!("  - {}\n", route));
            }
            msg.push('\n');
        }

        msg.push_str("If intentional: update tests/fixtures/app_routes.txt\n");
        panic!("{}", msg);
    }
}

#[test]
fn golden_file_is_sorted() {
    let content = fs::read_to_string("tests/fixtures/app_routes.txt")
        .expect("Failed to read app_routes.txt");

    let routes: Vec<_> = content
        .lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .collect();

    let mut sorted = routes.clone();
    sorted.sort();

    assert_eq!(
        routes, sorted,
        "app_routes.txt is not sorted! Please sort alphabetically."
    );
}

#[test]
fn sidebar_links_point_at_declared_routes() {
    let routes = extract_routes_from_source();

    for role in [Role::Admin, Role::Normal] {
        assert!(
            routes.contains(&format!("{}/", role.home_path())),
            "missing home for {:?}",
            role
        );
        for link in links_for(role) {
            let href = link.href(role);
            assert!(routes.contains(&href), "sidebar link {} has no route", href);
        }
    }
}

#[test]
fn guard_redirects_exist() {
    let routes = extract_routes_from_source();
    assert!(routes.contains(LOGIN_PATH));
    assert!(routes.contains(UNAUTHORIZED_PATH));
}
