// Notification dispatch - runs the matcher over a batch and hands matches off
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::matcher::is_article_of_interest;
use crate::models::Article;
use crate::notification::{create_article_notification, ArticleNotification};
use crate::quiet_hours::Clock;
use crate::settings::Settings;
use crate::store::ArticleStore;
use crate::Result;

/// Whatever actually shows the notification to the user
///
/// Platform integrations implement this. The scheduler doesn't care how
/// delivery happens, only whether it worked.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: &ArticleNotification) -> Result<()>;
}

/// Sink that just logs - handy for the CLI and dry runs
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, notification: &ArticleNotification) -> Result<()> {
        info!(
            article_id = %notification.data.article_id,
            url = %notification.data.article_url,
            "{}: {}",
            notification.title,
            notification.body
        );
        Ok(())
    }
}

/// What happened to one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Articles looked at, including skipped ones
    pub examined: usize,
    pub delivered: Vec<String>,
    pub rejected: usize,
    /// Deleted by the user or already notified
    pub skipped: usize,
    pub failed: usize,
}

/// Evaluates fetched articles and delivers notifications for the matches
///
/// Remembers which ids it already notified about, so polling the same page
/// twice doesn't ping twice. A failed delivery isn't remembered and will be
/// retried on the next batch.
pub struct NotificationScheduler {
    sink: Box<dyn NotificationSink>,
    clock: Box<dyn Clock>,
    notified: HashSet<String>,
}

impl NotificationScheduler {
    pub fn new(sink: Box<dyn NotificationSink>, clock: Box<dyn Clock>) -> Self {
        Self {
            sink,
            clock,
            notified: HashSet::new(),
        }
    }

    pub fn process(
        &mut self,
        articles: &[Article],
        settings: &Settings,
        store: &ArticleStore,
    ) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for article in articles {
            summary.examined += 1;

            if store.is_deleted(&article.id) || self.notified.contains(&article.id) {
                debug!("Skipping article {}: deleted or already notified", article.id);
                summary.skipped += 1;
                continue;
            }

            if !is_article_of_interest(article, settings, self.clock.as_ref()) {
                summary.rejected += 1;
                continue;
            }

            let notification = create_article_notification(article);
            match self.sink.deliver(&notification) {
                Ok(()) => {
                    self.notified.insert(article.id.clone());
                    summary.delivered.push(article.id.clone());
                }
                Err(e) => {
                    warn!("Failed to deliver notification for {}: {}", article.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Processed {} articles: {} delivered, {} rejected, {} skipped, {} failed",
            summary.examined,
            summary.delivered.len(),
            summary.rejected,
            summary.skipped,
            summary.failed
        );

        summary
    }

    pub fn has_notified(&self, article_id: &str) -> bool {
        self.notified.contains(article_id)
    }

    /// Forget delivery history, e.g. after the user clears notifications
    pub fn reset_history(&mut self) {
        self.notified.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiet_hours::FixedClock;
    use crate::Error;

    fn noon() -> Box<dyn Clock> {
        Box::new(FixedClock::at(12, 0).unwrap())
    }

    fn batch() -> Vec<Article> {
        vec![
            Article::new("1", "Jetpack Compose tips").with_url("https://android.dev/compose"),
            Article::new("2", "Gardening for beginners"),
            Article::new("3", "Kotlin coroutines deep dive"),
        ]
    }

    fn android_only() -> Settings {
        Settings {
            platform_filters: [crate::PlatformFilter::Android].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_delivers_only_matches() {
        let mut sink = MockNotificationSink::new();
        sink.expect_deliver()
            .withf(|n| n.data.article_id == "1" || n.data.article_id == "3")
            .times(2)
            .returning(|_| Ok(()));

        let mut scheduler = NotificationScheduler::new(Box::new(sink), noon());
        let summary = scheduler.process(&batch(), &android_only(), &ArticleStore::new());

        assert_eq!(summary.examined, 3);
        assert_eq!(summary.delivered, vec!["1", "3"]);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_skips_deleted_and_repeats() {
        let mut sink = MockNotificationSink::new();
        sink.expect_deliver()
            .withf(|n| n.data.article_id == "3")
            .times(1)
            .returning(|_| Ok(()));

        let mut store = ArticleStore::new();
        store.delete_article("1");

        let mut scheduler = NotificationScheduler::new(Box::new(sink), noon());
        let first = scheduler.process(&batch(), &android_only(), &store);
        assert_eq!(first.delivered, vec!["3"]);
        assert_eq!(first.skipped, 1);

        // Same page again: nothing new to say
        let second = scheduler.process(&batch(), &android_only(), &store);
        assert!(second.delivered.is_empty());
        assert_eq!(second.skipped, 2);
        assert!(scheduler.has_notified("3"));
    }

    #[test]
    fn test_failed_delivery_is_retried() {
        let mut sink = MockNotificationSink::new();
        let mut calls = 0;
        sink.expect_deliver().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(Error::DeliveryError("permission denied".into()))
            } else {
                Ok(())
            }
        });

        let articles = vec![Article::new("5", "Android 15 released")];
        let mut scheduler = NotificationScheduler::new(Box::new(sink), noon());

        let first = scheduler.process(&articles, &Settings::default(), &ArticleStore::new());
        assert_eq!(first.failed, 1);
        assert!(!scheduler.has_notified("5"));

        let second = scheduler.process(&articles, &Settings::default(), &ArticleStore::new());
        assert_eq!(second.delivered, vec!["5"]);
    }

    #[test]
    fn test_quiet_hours_suppress_batch() {
        let mut sink = MockNotificationSink::new();
        sink.expect_deliver().never();

        let settings = Settings {
            quiet_hours_enabled: true,
            ..Default::default()
        };
        let clock = Box::new(FixedClock::at(2, 0).unwrap());
        let mut scheduler = NotificationScheduler::new(Box::new(sink), clock);

        let summary = scheduler.process(&batch(), &settings, &ArticleStore::new());
        assert_eq!(summary.rejected, 3);
    }

    #[test]
    fn test_reset_history() {
        let mut scheduler = NotificationScheduler::new(Box::new(LogSink), noon());
        let articles = vec![Article::new("8", "anything")];

        scheduler.process(&articles, &Settings::default(), &ArticleStore::new());
        assert!(scheduler.has_notified("8"));

        scheduler.reset_history();
        assert!(!scheduler.has_notified("8"));
    }
}
