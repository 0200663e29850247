//! Shell chrome helpers: start-menu shortcut, fullscreen detection, and wallpaper urls.

use crate::model::Wallpaper;

/// How long the sleep overlay ignores user activity, in ms.
pub const SLEEP_LOCK_MS: u32 = 12_000;
/// Delay between showing the restart banner and reloading the page, in ms.
pub const RESTART_DELAY_MS: u32 = 2_000;
/// Window event that requests a fresh wallpaper.
pub const WALLPAPER_CHANGE_EVENT: &str = "wallpaper:change";
/// Document events that signal a fullscreen transition.
pub const FULLSCREEN_CHANGE_EVENTS: [&str; 2] = ["fullscreenchange", "webkitfullscreenchange"];

const WALLPAPER_SEED_LEN: usize = 8;

/// Returns `true` for keydowns that toggle the start menu: a bare Control/Meta press or any chord
/// holding one of them.
pub fn is_start_menu_chord(key: &str, ctrl: bool, meta: bool) -> bool {
    ctrl || meta || matches!(key, "Control" | "Meta" | "OS")
}

/// The page counts as fullscreen when an element holds fullscreen or the viewport matches the
/// screen exactly.
pub fn is_fullscreen(
    has_fullscreen_element: bool,
    viewport: Option<(i32, i32)>,
    screen: Option<(i32, i32)>,
) -> bool {
    has_fullscreen_element || (viewport.is_some() && viewport == screen)
}

/// Derives a base-36 wallpaper seed from a uniform sample in `[0, 1)`.
///
/// Out-of-range samples are folded into the unit interval; non-finite ones yield an all-zero seed.
pub fn wallpaper_seed(sample: f64) -> String {
    let mut fraction = if sample.is_finite() {
        sample.abs().fract()
    } else {
        0.0
    };
    (0..WALLPAPER_SEED_LEN)
        .map(|_| {
            fraction *= 36.0;
            let digit = fraction.trunc();
            fraction -= digit;
            char::from_digit(digit as u32, 36).unwrap_or('0')
        })
        .collect()
}

impl Wallpaper {
    pub fn from_sample(sample: f64, cache_bust: u64) -> Self {
        Self {
            seed: wallpaper_seed(sample),
            cache_bust,
        }
    }

    /// Remote 1920x1080 image for this seed. `cache_bust` forces a fresh fetch per roll.
    pub fn url(&self) -> String {
        format!(
            "https://picsum.photos/seed/{}/1920/1080?cache-bust={}",
            self.seed, self.cache_bust
        )
    }
}
