//! Custom widget components

mod error_banner;
mod filter_bar;
mod footer;
mod header;
mod record_table;
mod stats_bar;

pub use error_banner::ErrorBanner;
pub use filter_bar::FilterBar;
pub use footer::Footer;
pub use header::ViewHeader;
pub use record_table::{RecordTable, EMPTY_STATE_TEXT};
pub use stats_bar::StatsBar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` terminal cells, marking the cut with `…`.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("login", 10), "login");
        assert_eq!(truncate("login flow", 6), "login…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }
}
