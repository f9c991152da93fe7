use serde::{Deserialize, Serialize};

use crate::models::Article;

/// Discussion page used when an article has no outbound link
pub const FALLBACK_ITEM_URL: &str = "https://news.ycombinator.com/item?id=";

pub const ARTICLE_NOTIFICATION_TITLE: &str = "📰 New Article";

/// Ready-to-schedule notification content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleNotification {
    pub title: String,
    pub body: String,
    pub data: NotificationData,
}

/// Payload attached to a notification, read back when the user taps it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub article_id: String,
    pub article_url: String,
    pub article_title: String,
}

/// Where a tapped notification should take the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRoute {
    pub url: String,
    pub title: String,
}

impl NotificationData {
    /// `None` when the payload lacks a URL or id to open
    pub fn route(&self) -> Option<ArticleRoute> {
        if self.article_url.is_empty() || self.article_id.is_empty() {
            return None;
        }

        Some(ArticleRoute {
            url: self.article_url.clone(),
            title: self.article_title.clone(),
        })
    }
}

pub fn create_article_notification(article: &Article) -> ArticleNotification {
    let article_url = article
        .url
        .clone()
        .unwrap_or_else(|| format!("{}{}", FALLBACK_ITEM_URL, article.id));

    ArticleNotification {
        title: ARTICLE_NOTIFICATION_TITLE.to_string(),
        body: article.title.clone(),
        data: NotificationData {
            article_id: article.id.clone(),
            article_url,
            article_title: article.title.clone(),
        },
    }
}

/// Canned notification for the "send test" button in settings
///
/// Carries an empty payload, so tapping it routes nowhere.
pub fn create_test_notification() -> ArticleNotification {
    ArticleNotification {
        title: "🧪 Test Notification".to_string(),
        body: "This is a test notification from your settings".to_string(),
        data: NotificationData {
            article_id: String::new(),
            article_url: String::new(),
            article_title: String::new(),
        },
    }
}
