//! Small, stateless page enhancements the host wires to its observers.

use std::time::Duration;

/// Reveal-on-scroll observer: fraction of the element that must be visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Reveal-on-scroll observer root margin.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
/// Section observer threshold for navigation highlighting.
pub const NAV_SECTION_THRESHOLD: f64 = 0.5;
pub const RIPPLE_DURATION: Duration = Duration::from_millis(600);

const CARD_STAGGER_STEP: Duration = Duration::from_millis(100);
const DEFAULT_PAGE: &str = "index.html";

/// Animation delay of the `index`-th card.
pub fn stagger_delay(index: usize) -> Duration {
    CARD_STAGGER_STEP * index as u32
}

/// File name of the current page: the last path segment, or `index.html`.
pub fn current_page(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => DEFAULT_PAGE,
    }
}

/// Marks which navigation hrefs are active for `pathname`.
pub fn highlight_nav(hrefs: &[&str], pathname: &str) -> Vec<bool> {
    let page = current_page(pathname);
    hrefs.iter().map(|href| *href == page).collect()
}

/// Target element id of an in-page anchor (`#about` → `about`).
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// An image whose source is deferred until it scrolls into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImage {
    pub data_src: String,
    pub src: Option<String>,
    pub lazy: bool,
}

impl LazyImage {
    pub fn new(data_src: impl Into<String>) -> Self {
        Self {
            data_src: data_src.into(),
            src: None,
            lazy: true,
        }
    }

    /// Swaps in the real source. Returns `false` when already revealed, so the
    /// host can stop observing after the first call.
    pub fn reveal(&mut self) -> bool {
        if !self.lazy {
            return false;
        }
        self.src = Some(self.data_src.clone());
        self.lazy = false;
        true
    }
}
