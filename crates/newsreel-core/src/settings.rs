use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::models::{CategoryFilter, KeywordMatchMode, PlatformFilter};
use crate::quiet_hours::{QuietHours, TimeOfDay};
use crate::Result;

/// Notification settings snapshot
///
/// Every set or list starts empty, and an empty filter never rejects an
/// article. Serialized with camelCase names and sets as arrays; any field
/// missing from a stored snapshot falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch
    pub notifications_enabled: bool,
    pub platform_filters: BTreeSet<PlatformFilter>,
    pub category_filters: BTreeSet<CategoryFilter>,
    /// Free-text keywords, matched case-insensitively
    pub custom_keywords: Vec<String>,
    pub keyword_match_mode: KeywordMatchMode,
    /// 0 disables the score filter
    pub min_score: u32,
    /// Host substrings; empty allows every domain
    pub allowed_domains: Vec<String>,
    pub quiet_hours_enabled: bool,
    pub quiet_hours_start: TimeOfDay,
    pub quiet_hours_end: TimeOfDay,
    /// Unix millis of the last background poll, 0 if never
    pub last_background_fetch: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            platform_filters: BTreeSet::new(),
            category_filters: BTreeSet::new(),
            custom_keywords: Vec::new(),
            keyword_match_mode: KeywordMatchMode::Any,
            min_score: 0,
            allowed_domains: Vec::new(),
            quiet_hours_enabled: false,
            quiet_hours_start: TimeOfDay::DEFAULT_QUIET_START,
            quiet_hours_end: TimeOfDay::DEFAULT_QUIET_END,
            last_background_fetch: 0,
        }
    }
}

impl Settings {
    pub fn quiet_hours(&self) -> QuietHours {
        QuietHours::new(self.quiet_hours_start, self.quiet_hours_end)
    }

    /// True when no content filter is configured at all
    pub fn is_unfiltered(&self) -> bool {
        self.platform_filters.is_empty()
            && self.category_filters.is_empty()
            && self.custom_keywords.is_empty()
            && self.min_score == 0
            && self.allowed_domains.is_empty()
    }
}

/// Owns the live settings and enforces the mutation rules
///
/// Hands out snapshots by value, so a matcher run never sees a change
/// made halfway through it.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn snapshot(&self) -> Settings {
        self.settings.clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn toggle_notifications(&mut self) {
        self.settings.notifications_enabled = !self.settings.notifications_enabled;
    }

    pub fn toggle_platform_filter(&mut self, platform: PlatformFilter) {
        if !self.settings.platform_filters.remove(&platform) {
            self.settings.platform_filters.insert(platform);
        }
    }

    pub fn toggle_category_filter(&mut self, category: CategoryFilter) {
        if !self.settings.category_filters.remove(&category) {
            self.settings.category_filters.insert(category);
        }
    }

    /// Adds a trimmed, lowercased keyword; blanks and duplicates are ignored
    pub fn add_custom_keyword(&mut self, keyword: &str) -> bool {
        push_normalized(&mut self.settings.custom_keywords, keyword)
    }

    pub fn remove_custom_keyword(&mut self, keyword: &str) {
        self.settings.custom_keywords.retain(|k| k != keyword);
    }

    pub fn set_keyword_match_mode(&mut self, mode: KeywordMatchMode) {
        self.settings.keyword_match_mode = mode;
    }

    /// Negative scores clamp to 0 (filter off)
    pub fn set_min_score(&mut self, score: i64) {
        self.settings.min_score = score.clamp(0, u32::MAX as i64) as u32;
    }

    /// Same normalization as keywords
    pub fn add_allowed_domain(&mut self, domain: &str) -> bool {
        push_normalized(&mut self.settings.allowed_domains, domain)
    }

    pub fn remove_allowed_domain(&mut self, domain: &str) {
        self.settings.allowed_domains.retain(|d| d != domain);
    }

    pub fn toggle_quiet_hours(&mut self) {
        self.settings.quiet_hours_enabled = !self.settings.quiet_hours_enabled;
    }

    /// Rejects malformed times and leaves the old value in place
    pub fn set_quiet_hours_start(&mut self, time: &str) -> Result<()> {
        self.settings.quiet_hours_start = time.parse()?;
        Ok(())
    }

    pub fn set_quiet_hours_end(&mut self, time: &str) -> Result<()> {
        self.settings.quiet_hours_end = time.parse()?;
        Ok(())
    }

    pub fn set_last_background_fetch(&mut self, timestamp_ms: i64) {
        self.settings.last_background_fetch = timestamp_ms;
    }

    pub fn reset_to_defaults(&mut self) {
        debug!("Resetting notification settings to defaults");
        self.settings = Settings::default();
    }
}

fn push_normalized(list: &mut Vec<String>, value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() || list.contains(&normalized) {
        return false;
    }
    list.push(normalized);
    true
}
