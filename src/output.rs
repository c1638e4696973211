use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Whether human-mode banners are suppressed (`WORDCOUNTER_QUIET=1`).
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("WORDCOUNTER_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
