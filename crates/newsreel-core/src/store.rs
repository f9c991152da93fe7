use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::Article;

/// Per-article user state: what's been deleted and what's been starred
///
/// Deleting an article also unfavorites it. Restoring doesn't bring the
/// star back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleStore {
    deleted_ids: BTreeSet<String>,
    favorite_ids: BTreeSet<String>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_article(&mut self, id: &str) {
        self.deleted_ids.insert(id.to_string());
        self.favorite_ids.remove(id);
    }

    pub fn restore_article(&mut self, id: &str) {
        self.deleted_ids.remove(id);
    }

    /// Flip the favorite flag, returning the new state
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        if self.favorite_ids.remove(id) {
            false
        } else {
            self.favorite_ids.insert(id.to_string());
            true
        }
    }

    pub fn is_deleted(&self, id: &str) -> bool {
        self.deleted_ids.contains(id)
    }

    pub fn is_favorited(&self, id: &str) -> bool {
        self.favorite_ids.contains(id)
    }

    pub fn deleted_ids(&self) -> &BTreeSet<String> {
        &self.deleted_ids
    }

    pub fn favorite_ids(&self) -> &BTreeSet<String> {
        &self.favorite_ids
    }

    /// The main feed: everything not deleted
    pub fn visible<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| !self.is_deleted(&a.id)).collect()
    }

    pub fn favorites<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.is_favorited(&a.id)).collect()
    }

    pub fn deleted<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.is_deleted(&a.id)).collect()
    }

    pub fn clear_deleted(&mut self) {
        self.deleted_ids.clear();
    }

    pub fn clear_favorites(&mut self) {
        self.favorite_ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Vec<Article> {
        vec![
            Article::new("1", "First"),
            Article::new("2", "Second"),
            Article::new("3", "Third"),
        ]
    }

    fn ids(articles: Vec<&Article>) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_delete_and_restore() {
        let mut store = ArticleStore::new();
        store.delete_article("2");
        assert!(store.is_deleted("2"));

        let articles = feed();
        assert_eq!(ids(store.visible(&articles)), vec!["1", "3"]);
        assert_eq!(ids(store.deleted(&articles)), vec!["2"]);

        store.restore_article("2");
        assert!(!store.is_deleted("2"));
        assert_eq!(store.visible(&articles).len(), 3);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut store = ArticleStore::new();
        assert!(store.toggle_favorite("1"));
        assert!(store.is_favorited("1"));
        assert!(!store.toggle_favorite("1"));
        assert!(!store.is_favorited("1"));
    }

    #[test]
    fn test_delete_removes_favorite() {
        let mut store = ArticleStore::new();
        store.toggle_favorite("3");
        store.delete_article("3");

        assert!(!store.is_favorited("3"));
        store.restore_article("3");
        assert!(!store.is_favorited("3"));
    }

    #[test]
    fn test_favorites_view() {
        let mut store = ArticleStore::new();
        store.toggle_favorite("1");
        store.toggle_favorite("3");

        let articles = feed();
        assert_eq!(ids(store.favorites(&articles)), vec!["1", "3"]);

        store.clear_favorites();
        assert!(store.favorites(&articles).is_empty());
    }

    #[test]
    fn test_snapshot_shape() {
        let mut store = ArticleStore::new();
        store.delete_article("9");
        store.toggle_favorite("4");

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["deletedIds"], serde_json::json!(["9"]));
        assert_eq!(json["favoriteIds"], serde_json::json!(["4"]));

        let restored: ArticleStore = serde_json::from_value(json).unwrap();
        assert_eq!(restored, store);

        let empty: ArticleStore = serde_json::from_str("{}").unwrap();
        assert!(empty.deleted_ids().is_empty());
    }
}
