use serde::{Deserialize, Deserializer, Serialize};

/// A single story from the search API
///
/// Only `id` identifies an article. Everything else is display data or
/// input to the interest filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    #[serde(rename = "objectID")]
    pub id: String,
    /// Comment hits come back with a null title, so null reads as empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub url: Option<String>,
    #[serde(rename = "points", default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub story_title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub story_url: Option<String>,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            score: None,
            author: None,
            created_at: None,
            story_title: None,
            story_url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Title shown in lists: the parent story's title wins for comment hits
    pub fn display_title(&self) -> &str {
        self.story_title.as_deref().unwrap_or(&self.title)
    }

    /// Link opened on tap, preferring the parent story's URL
    pub fn link(&self) -> Option<&str> {
        self.story_url.as_deref().or(self.url.as_deref())
    }
}

/// One page of search results, as the search API returns it
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub hits: Vec<Article>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub nb_pages: u32,
    #[serde(default)]
    pub hits_per_page: u32,
    #[serde(default)]
    pub nb_hits: u64,
}

impl SearchPage {
    pub fn has_next_page(&self) -> bool {
        self.page + 1 < self.nb_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then_some(self.page + 1)
    }
}

/// Mobile platforms a user can follow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFilter {
    Android,
    Ios,
}

impl PlatformFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFilter::Android => "android",
            PlatformFilter::Ios => "ios",
        }
    }

    pub fn all() -> Vec<PlatformFilter> {
        vec![PlatformFilter::Android, PlatformFilter::Ios]
    }
}

impl std::fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformFilter::Android => write!(f, "Android"),
            PlatformFilter::Ios => write!(f, "iOS"),
        }
    }
}

/// Topic categories matched against article text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    Web,
    Mobile,
    Backend,
    Frontend,
    Devops,
    Ai,
    Security,
    Database,
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::Web => "web",
            CategoryFilter::Mobile => "mobile",
            CategoryFilter::Backend => "backend",
            CategoryFilter::Frontend => "frontend",
            CategoryFilter::Devops => "devops",
            CategoryFilter::Ai => "ai",
            CategoryFilter::Security => "security",
            CategoryFilter::Database => "database",
        }
    }

    pub fn all() -> Vec<CategoryFilter> {
        vec![
            CategoryFilter::Web,
            CategoryFilter::Mobile,
            CategoryFilter::Backend,
            CategoryFilter::Frontend,
            CategoryFilter::Devops,
            CategoryFilter::Ai,
            CategoryFilter::Security,
            CategoryFilter::Database,
        ]
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::Web => write!(f, "Web"),
            CategoryFilter::Mobile => write!(f, "Mobile"),
            CategoryFilter::Backend => write!(f, "Backend"),
            CategoryFilter::Frontend => write!(f, "Frontend"),
            CategoryFilter::Devops => write!(f, "DevOps"),
            CategoryFilter::Ai => write!(f, "AI"),
            CategoryFilter::Security => write!(f, "Security"),
            CategoryFilter::Database => write!(f, "Database"),
        }
    }
}

/// How custom keywords combine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeywordMatchMode {
    /// At least one keyword must appear (OR)
    #[default]
    Any,
    /// Every keyword must appear (AND)
    All,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
