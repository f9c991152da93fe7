use anyhow::Context;
use clap::Parser;
use newsreel_core::{
    evaluate, extract_article_id_from_url, Article, ArticleStore, Clock, Config, FixedClock,
    LogSink, NotificationScheduler, SearchPage, SystemClock, TimeOfDay,
};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "newsreel")]
#[command(version, about = "Decide which news articles deserve a notification", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/newsreel/config.toml)
    #[arg(long, global = true, env = "NEWSREEL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the notification filters over a page of search results
    Check {
        /// JSON file with a search page or an array of articles (stdin if omitted)
        file: Option<PathBuf>,
        /// Pretend the local time is HH:MM (for quiet hours)
        #[arg(long)]
        at: Option<String>,
        /// Print the verdict for every article instead of dispatching
        #[arg(long)]
        explain: bool,
    },
    /// Extract the article id from a deep link
    Link {
        /// Deep link, e.g. newsreel://article/42
        url: String,
    },
    /// Print the effective settings
    Settings,
}

/// Feeds come either as a raw search page or as a bare list of hits
#[derive(Deserialize)]
#[serde(untagged)]
enum Feed {
    Articles(Vec<Article>),
    Page(SearchPage),
}

impl Feed {
    fn into_articles(self) -> Vec<Article> {
        match self {
            Feed::Articles(articles) => articles,
            Feed::Page(page) => page.hits,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsreel_cli=info,newsreel_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { file, at, explain }) => {
            let config = load_config(cli.config.as_deref())?;
            let articles = read_feed(file.as_deref())?;
            let clock = clock_for(at.as_deref())?;
            let settings = config.notifications;

            tracing::info!("Checking {} articles", articles.len());

            if explain {
                for article in &articles {
                    match evaluate(article, &settings, clock.as_ref()) {
                        Ok(()) => println!("NOTIFY  {}  {}", article.id, article.display_title()),
                        Err(reason) => {
                            println!("SKIP    {}  {}  ({})", article.id, article.display_title(), reason)
                        }
                    }
                }
            } else {
                let mut scheduler = NotificationScheduler::new(Box::new(LogSink), clock);
                let summary = scheduler.process(&articles, &settings, &ArticleStore::new());
                println!(
                    "{} of {} articles would notify",
                    summary.delivered.len(),
                    summary.examined
                );
            }
        }
        Some(Commands::Link { url }) => match extract_article_id_from_url(&url) {
            Some(id) => println!("{}", id),
            None => anyhow::bail!("Not an article link: {}", url),
        },
        Some(Commands::Settings) => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", config.to_toml()?);
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    Ok(config)
}

fn read_feed(path: Option<&std::path::Path>) -> anyhow::Result<Vec<Article>> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let feed: Feed = serde_json::from_str(&contents).context("Feed is not valid article JSON")?;
    Ok(feed.into_articles())
}

fn clock_for(at: Option<&str>) -> anyhow::Result<Box<dyn Clock>> {
    let Some(at) = at else {
        return Ok(Box::new(SystemClock));
    };

    let time: TimeOfDay = at.parse()?;
    let clock = FixedClock::at(time.hour().into(), time.minute().into())
        .context("Time out of range")?;
    Ok(Box::new(clock))
}
