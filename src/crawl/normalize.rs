// src/crawl/normalize.rs
// =============================================================================
// Canonical form for URLs, so equivalent spellings dedupe to one entry.
//
// Deliberately minimal: lower-case everything, default to http:// when no
// scheme is given. Trailing slashes, percent-encoding and query strings are
// left alone, which is exactly the dedup granularity the crawl wants.
// =============================================================================

// Returns the canonical form of a raw URL
//
// Examples:
//   "Example.COM/Page.html"  -> "http://example.com/page.html"
//   "HTTPS://x.com"          -> "https://x.com"
//   ""                       -> "http://"
pub fn normalize(raw: &str) -> String {
    // Plain lowercasing, not full Unicode case folding: "ß" stays "ß"
    let lowered = raw.to_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        lowered
    } else {
        format!("http://{}", lowered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_default_scheme() {
        assert_eq!(normalize("example.com"), "http://example.com");
    }

    #[test]
    fn test_case_folds_everything() {
        assert_eq!(normalize("HTTPS://Example.COM/A.HTML?Q=1"), "https://example.com/a.html?q=1");
    }

    #[test]
    fn test_keeps_trailing_slash_and_query() {
        assert_eq!(normalize("http://x.com/"), "http://x.com/");
        assert_eq!(normalize("http://x.com/?a=1&b=2"), "http://x.com/?a=1&b=2");
    }

    #[test]
    fn test_lowercases_without_case_folding() {
        assert_eq!(normalize("Straße.de/SS.html"), "http://straße.de/ss.html");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "example.com",
            "HTTP://Example.com",
            "https://x.com/A.html",
            "ftp://files.example.com",
            "  spaced.com ",
            "İstanbul.example",
            "http:/missing-slash.com",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", raw);
        }
    }
}
