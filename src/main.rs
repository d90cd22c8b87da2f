//! Minimal Organizer entry point
//!
//! On the web this only sets up logging; the view constructs a
//! `WebOrganizer`. Natively it inspects a saved project or export file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    use minimal_organizer::Settings;
    use minimal_organizer::platform::{KeyValueStore, LocalStore, MemoryStore};

    console_error_panic_hook::set_once();

    // Provisional level so settings loading is logged; narrowed below
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }

    let store: Box<dyn KeyValueStore> = match LocalStore::open() {
        Some(store) => Box::new(store),
        None => Box::new(MemoryStore::new()),
    };
    log::set_max_level(Settings::load(store.as_ref()).log_level.to_level_filter());

    log::info!("Minimal Organizer starting...");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use minimal_organizer::persistence::{Document, decode_document};
    use minimal_organizer::{Project, Session};

    env_logger::init();
    log::info!("Minimal Organizer (native) starting...");
    log::info!("The organizer UI runs in the browser - run with `trunk serve` for the web version");

    let Some(path) = std::env::args().nth(1) else {
        summarize(Session::new().project());
        return;
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            log::error!("Could not read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    match decode_document(&text) {
        Ok(Document::Project(project)) => summarize(&project),
        Ok(Document::Cards(cards)) => {
            println!("{}: card list ({} cards)", path, cards.len());
            for (i, card) in cards.iter().enumerate() {
                println!("  {:>3}. {} [{}]", i + 1, card.title, card.tech);
            }
        }
        Err(e) => {
            log::error!("Error parsing {}: {}", path, e);
            std::process::exit(1);
        }
    }

    fn summarize(project: &Project) {
        println!(
            "Project: {} workspace(s), {} card(s)",
            project.len(),
            project.card_count()
        );
        for (name, cards) in project.iter() {
            println!("  {} ({} cards)", name, cards.len());
            for (i, card) in cards.iter().enumerate() {
                println!("    {:>3}. {}", i + 1, card.title);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
