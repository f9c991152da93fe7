// Deep links of the form <scheme>://article/<id>
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_SCHEME: &str = "newsreel";

static ARTICLE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://article/(\d+)(?:[/?#]|$)").expect("valid deep link pattern")
});

/// Pull the numeric article id out of a deep link
///
/// Anything that doesn't look like `<scheme>://article/<digits>` gives
/// `None`, including an empty id.
pub fn extract_article_id_from_url(url: &str) -> Option<String> {
    ARTICLE_LINK
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

/// Build the deep link that opens an article
pub fn article_deep_link(scheme: &str, article_id: &str) -> String {
    format!("{}://article/{}", scheme, article_id)
}
