// Interest matching - the "should we ping the user about this?" logic
//
// Every filter is a pure predicate over the article and one settings field.
// An empty filter always passes, so a fresh install notifies on everything.
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use crate::models::{Article, CategoryFilter, KeywordMatchMode, PlatformFilter};
use crate::quiet_hours::{Clock, TimeOfDay};
use crate::settings::Settings;

/// Which check turned an article down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotificationsDisabled,
    QuietHours,
    Platform,
    Category,
    Keywords,
    Score,
    Domain,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotificationsDisabled => write!(f, "notifications disabled"),
            Rejection::QuietHours => write!(f, "quiet hours"),
            Rejection::Platform => write!(f, "platform filter"),
            Rejection::Category => write!(f, "category filter"),
            Rejection::Keywords => write!(f, "keyword filter"),
            Rejection::Score => write!(f, "score threshold"),
            Rejection::Domain => write!(f, "domain whitelist"),
        }
    }
}

/// Lowercased "title url" haystack shared by the text filters
fn search_text(article: &Article) -> String {
    format!("{} {}", article.title, article.url.as_deref().unwrap_or("")).to_lowercase()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

pub fn matches_platform_filter(article: &Article, platforms: &BTreeSet<PlatformFilter>) -> bool {
    if platforms.is_empty() {
        return true;
    }

    let text = search_text(article);
    platforms.iter().any(|p| contains_any(&text, p.keywords()))
}

pub fn matches_category_filter(article: &Article, categories: &BTreeSet<CategoryFilter>) -> bool {
    if categories.is_empty() {
        return true;
    }

    let text = search_text(article);
    categories.iter().any(|c| contains_any(&text, c.keywords()))
}

/// Custom keywords, OR-ed in `Any` mode and AND-ed in `All` mode
pub fn matches_custom_keywords(article: &Article, keywords: &[String], mode: KeywordMatchMode) -> bool {
    if keywords.is_empty() {
        return true;
    }

    let text = search_text(article);
    let found = |keyword: &String| text.contains(&keyword.to_lowercase());

    match mode {
        KeywordMatchMode::Any => keywords.iter().any(found),
        KeywordMatchMode::All => keywords.iter().all(found),
    }
}

/// A missing score counts as 0, so any real threshold rejects it
pub fn meets_score_threshold(article: &Article, min_score: u32) -> bool {
    min_score == 0 || article.score.unwrap_or(0) >= min_score
}

/// Lowercased host with a leading "www." removed
///
/// Returns an empty string for anything that doesn't parse as a URL with
/// a host. Never fails.
pub fn extract_domain_from_url(url: &str) -> String {
    let host = match url::Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_lowercase),
        Err(_) => None,
    };

    match host {
        Some(host) => host.strip_prefix("www.").map(str::to_string).unwrap_or(host),
        None => String::new(),
    }
}

/// Whitelist check; entries match as substrings of the host, so "github"
/// lets "github.com" through (and "git" lets "digital.com" through too).
pub fn matches_domain_filter(article: &Article, allowed_domains: &[String]) -> bool {
    if allowed_domains.is_empty() {
        return true;
    }

    let Some(url) = article.url.as_deref() else {
        return false;
    };

    let domain = extract_domain_from_url(url);
    allowed_domains
        .iter()
        .any(|allowed| domain.contains(&allowed.to_lowercase()))
}

/// Run every check in order and report the first one that fails
pub fn evaluate(article: &Article, settings: &Settings, clock: &dyn Clock) -> Result<(), Rejection> {
    if !settings.notifications_enabled {
        return Err(Rejection::NotificationsDisabled);
    }

    if settings.quiet_hours_enabled
        && settings
            .quiet_hours()
            .contains(TimeOfDay::from_time(clock.now()))
    {
        return Err(Rejection::QuietHours);
    }

    if !matches_platform_filter(article, &settings.platform_filters) {
        return Err(Rejection::Platform);
    }
    if !matches_category_filter(article, &settings.category_filters) {
        return Err(Rejection::Category);
    }
    if !matches_custom_keywords(article, &settings.custom_keywords, settings.keyword_match_mode) {
        return Err(Rejection::Keywords);
    }
    if !meets_score_threshold(article, settings.min_score) {
        return Err(Rejection::Score);
    }
    if !matches_domain_filter(article, &settings.allowed_domains) {
        return Err(Rejection::Domain);
    }

    Ok(())
}

/// True only when the article clears the master switch, quiet hours and
/// all five content filters
pub fn is_article_of_interest(article: &Article, settings: &Settings, clock: &dyn Clock) -> bool {
    match evaluate(article, settings, clock) {
        Ok(()) => true,
        Err(reason) => {
            debug!("Skipping article {} ({}): {}", article.id, article.title, reason);
            false
        }
    }
}
