//! Club de Ciclismo EPN - web client entry point.
//!
//! Built for the browser with `dx serve --features web`.

use club_ciclismo_web::app::App;

fn main() {
    dioxus::logger::initialize_default();

    tracing::info!(
        "Starting club web client v{} ({})",
        env!("CLUB_VERSION"),
        env!("CLUB_GIT_SHA")
    );

    dioxus::launch(App);
}
