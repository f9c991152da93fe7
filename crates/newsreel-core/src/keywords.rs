// Static keyword tables for free-text platform/category detection
use crate::models::{CategoryFilter, PlatformFilter};

/// Substrings that give away a platform in a title or URL
pub const PLATFORM_KEYWORDS: &[(PlatformFilter, &[&str])] = &[
    (
        PlatformFilter::Android,
        &["android", "kotlin", "jetpack", "google play"],
    ),
    (
        PlatformFilter::Ios,
        &["ios", "swift", "apple", "iphone", "ipad", "xcode", "app store"],
    ),
];

/// Substrings that give away a topic category
///
/// These are plain substrings, so short entries like "go", "ai" or "db"
/// fire on plenty of unrelated words. That's the tradeoff for matching
/// titles without any tokenizing.
pub const CATEGORY_KEYWORDS: &[(CategoryFilter, &[&str])] = &[
    (
        CategoryFilter::Web,
        &[
            "javascript", "react", "vue", "angular", "web", "frontend", "css", "html", "browser",
            "dom",
        ],
    ),
    (
        CategoryFilter::Mobile,
        &[
            "android", "ios", "swift", "kotlin", "react-native", "flutter", "mobile", "app",
        ],
    ),
    (
        CategoryFilter::Backend,
        &[
            "node", "python", "java", "go", "rust", "backend", "api", "server", "express",
            "django",
        ],
    ),
    (
        CategoryFilter::Frontend,
        &[
            "react", "vue", "angular", "svelte", "ui", "ux", "css", "tailwind", "component",
        ],
    ),
    (
        CategoryFilter::Devops,
        &[
            "docker", "kubernetes", "aws", "cloud", "ci/cd", "devops", "deployment",
            "infrastructure", "terraform",
        ],
    ),
    (
        CategoryFilter::Ai,
        &[
            "ai", "machine learning", "deep learning", "neural", "tensorflow", "pytorch", "llm",
            "gpt", "ml",
        ],
    ),
    (
        CategoryFilter::Security,
        &[
            "security", "vulnerability", "encryption", "auth", "oauth", "cybersecurity", "hack",
            "exploit",
        ],
    ),
    (
        CategoryFilter::Database,
        &[
            "database", "sql", "postgres", "mongodb", "redis", "db", "query", "mysql", "nosql",
        ],
    ),
];

impl PlatformFilter {
    pub fn keywords(&self) -> &'static [&'static str] {
        lookup(PLATFORM_KEYWORDS, self)
    }
}

impl CategoryFilter {
    pub fn keywords(&self) -> &'static [&'static str] {
        lookup(CATEGORY_KEYWORDS, self)
    }
}

fn lookup<K: PartialEq>(
    table: &'static [(K, &'static [&'static str])],
    key: &K,
) -> &'static [&'static str] {
    table
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_has_keywords() {
        for platform in PlatformFilter::all() {
            assert!(!platform.keywords().is_empty(), "{} has no keywords", platform);
        }
    }

    #[test]
    fn test_every_category_has_keywords() {
        for category in CategoryFilter::all() {
            assert!(!category.keywords().is_empty(), "{} has no keywords", category);
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        let all = PLATFORM_KEYWORDS
            .iter()
            .map(|(_, w)| *w)
            .chain(CATEGORY_KEYWORDS.iter().map(|(_, w)| *w));

        for words in all {
            for word in words {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_lookup_by_variant() {
        assert!(PlatformFilter::Ios.keywords().contains(&"xcode"));
        assert!(PlatformFilter::Android.keywords().contains(&"google play"));
        assert!(CategoryFilter::Devops.keywords().contains(&"ci/cd"));
        assert!(!CategoryFilter::Database.keywords().contains(&"react"));
    }
}
