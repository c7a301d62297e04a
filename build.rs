// Build script: inject version and git SHA at compile time.
// Priority: CLUB_VERSION env > git describe > Cargo.toml version

use std::process::Command;

fn main() {
    let version = std::env::var("CLUB_VERSION").unwrap_or_else(|_| {
        Command::new("git")
            .args(["describe", "--tags", "--always"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().trim_start_matches('v').to_string())
            .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default())
    });

    let git_sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=CLUB_VERSION={}", version);
    println!("cargo:rustc-env=CLUB_GIT_SHA={}", git_sha);
    println!("cargo:rerun-if-env-changed=CLUB_VERSION");
    println!("cargo:rerun-if-env-changed=CLUB_API_URL");
    println!("cargo:rerun-if-env-changed=CLUB_WHATSAPP_PHONE");
    println!("cargo:rerun-if-env-changed=CLUB_MAPS_API_KEY");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
