// Core notification logic - decides which articles are worth a ping
pub mod config;
pub mod deep_link;
pub mod error;
pub mod keywords;
pub mod matcher;
pub mod models;
pub mod notification;
pub mod quiet_hours;
pub mod scheduler;
pub mod settings;
pub mod store;

pub use config::Config;
pub use deep_link::{article_deep_link, extract_article_id_from_url};
pub use error::Error;
pub use matcher::{evaluate, is_article_of_interest, Rejection};
pub use models::{Article, CategoryFilter, KeywordMatchMode, PlatformFilter, SearchPage};
pub use notification::{create_article_notification, ArticleNotification, NotificationData};
pub use quiet_hours::{Clock, FixedClock, QuietHours, SystemClock, TimeOfDay};
pub use scheduler::{DispatchSummary, LogSink, NotificationScheduler, NotificationSink};
pub use settings::{Settings, SettingsStore};
pub use store::ArticleStore;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
