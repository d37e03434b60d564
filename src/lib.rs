//! Spell Sparkle core crate.
//!
//! Two independent pieces share one page: a mouse-trail particle animation on a
//! full-window canvas (`particles`) and a spoken spelling quiz (`spelling`).
//! Both are written against the small collaborator traits in `host`; the
//! browser implementations and the event wiring live in `web`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod host;
pub mod particles;
pub mod spelling;
mod web;

pub use config::PageConfig;
pub use error::PageError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Quiz vocabulary
// Lower-case ASCII, no duplicates. Picks are uniform over this slice.
// -----------------------------------------------------------------------------

pub const WORD_LIST: &[&str] = &[
    "cat", "dog", "apple", "ball", "tree", "house", "sun", "moon", "star", "flower", "bird",
    "fish", "book", "cup", "pen", "desk", "chair", "shoe", "hand", "foot", "window", "door",
    "car", "bus", "hat", "sock", "banana", "orange", "keyboard", "mouse", "clock", "doggy",
    "kitty", "parrot", "rain", "snow", "cloud", "computer", "mountain", "bicycle", "universe",
    "elephant", "football", "rainbow", "island", "jungle", "forest", "cupcake", "telephone",
    "soccer", "guitar", "kangaroo", "city", "airport", "travelling", "swimming", "candle",
    "school", "library", "rocket", "highway", "volcano", "giraffe", "piano", "robot", "grape",
    "lemon", "education", "vacation", "adventure", "rainstorm", "butterfly", "waterfall",
    "compass", "pyramid", "parachute", "treasure", "hurricane", "zebra", "woodland",
    "development", "programming", "algorithm", "javascript", "architecture", "information",
    "equilibrium", "hypothesis", "mathematics", "philosophy", "creativity", "computation",
    "experiment", "processor", "innovation", "integrity", "psychology", "sociology",
    "microbiology", "neurology", "chemistry", "communication", "database", "statistics",
    "equation", "feedback", "cipher", "component", "exponent", "scalability", "optimization",
    "antibody", "parameter", "strategy", "reliability", "debugging", "synchronization",
    "abstraction", "complexity", "resolution", "software", "digital", "repository",
    "technology", "pneumonoultramicroscopicsilicovolcanoconiosis",
    "supercalifragilisticexpialidocious", "floccinaucinihilipilification",
    "hippopotomonstrosesquipedaliophobia", "antidisestablishmentarianism", "triskaidekaphobia",
    "dermatoglyphics", "uncharacteristically", "incomprehensibilities", "anticonstitutionally",
    "overcompensated", "counterproductive", "photoautotrophically", "unconstitutional",
    "unsystematically", "microangiopathies", "intercontinental", "thermodynamically",
    "unbelievably", "overindulgence", "misunderstanding", "epidemiologically",
    "unbelievability", "counterintuitively", "disenfranchisement", "spectrophotometrically",
    "unforeseeably", "subcompartmentalized", "counterproductively", "hypermetropia",
];

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Start the particle trail and the first spelling round with default settings.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    web::start(PageConfig::default())?;
    Ok(())
}

/// Same as [`start_page`] but with a partial JSON `PageConfig` override.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(json)?;
    web::start(config)?;
    Ok(())
}

/// Submit whatever is typed in the input box (bound to the page's check button).
#[wasm_bindgen]
pub fn check_answer() {
    web::with_page(|page| page.check_answer());
}

/// Abandon the current word and start a new round immediately.
#[wasm_bindgen]
pub fn skip_word() {
    web::with_page(|page| page.skip_word());
}
