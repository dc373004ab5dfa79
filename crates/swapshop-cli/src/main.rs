use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use swapshop_api::MarketClient;
use swapshop_core::{
    filter_items, providers::HttpMarketSource, Config, FilterCriteria, Item, MarketContext,
    UserId,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "swapshop")]
#[command(version, about = "Browse and shortlist items on the swapshop trading marketplace", long_about = None)]
struct Cli {
    /// User whose market to browse
    #[arg(long, global = true, env = "SWAPSHOP_USER_ID")]
    user: Option<String>,

    /// Marketplace API root
    #[arg(long, global = true, env = "SWAPSHOP_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Interactive market browser (default)
    Browse,
    /// List market items matching tag filters
    Market {
        /// Tags the owner should want (repeatable); defaults from config
        #[arg(long = "looking-for", value_name = "TAG")]
        looking_for: Vec<String>,
        /// Tags the item should be (repeatable); defaults from config
        #[arg(long = "trading", value_name = "TAG")]
        trading: Vec<String>,
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List your own items
    Mine {
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log lines would scribble over the TUI, so it stays quiet unless RUST_LOG says otherwise
    let default_filter = match cli.command {
        None | Some(Commands::Browse) => "swapshop=off",
        _ => "swapshop=info",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load()?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(user) = &cli.user {
        config.api.user_id = Some(user.clone());
    }

    match cli.command {
        None | Some(Commands::Browse) => {
            let (context, source) = connect(&config)?;
            let app = swapshop_tui::App::new(context, config.filters.criteria());
            swapshop_tui::run_tui(app, &source).await?;
        }
        Some(Commands::Market {
            looking_for,
            trading,
            search,
            json,
        }) => {
            let (mut context, source) = connect(&config)?;
            load_or_bail(&mut context, &source).await?;

            let criteria = build_criteria(&config, looking_for, trading, search);
            let matches = filter_items(context.market_items(), &criteria);
            tracing::info!(
                "{} of {} listings match",
                matches.len(),
                context.market_items().len()
            );
            print_items(&matches, json)?;
        }
        Some(Commands::Mine { json }) => {
            let (mut context, source) = connect(&config)?;
            load_or_bail(&mut context, &source).await?;

            let mine: Vec<&Item> = context.user_items().iter().collect();
            print_items(&mine, json)?;
        }
        Some(Commands::Config { init }) => {
            let path = Config::config_path()?;
            if init && !path.exists() {
                let written = Config::default().save()?;
                println!("Wrote default config to {}", written.display());
            } else {
                println!("Config file: {}", path.display());
            }
            println!();
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn connect(config: &Config) -> anyhow::Result<(MarketContext, HttpMarketSource)> {
    let user = config.api.user_id.clone().with_context(|| {
        format!(
            "No user id. Pass --user, set SWAPSHOP_USER_ID, or add user_id under [api] in {}",
            Config::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".into())
        )
    })?;

    let client = MarketClient::with_timeout(
        config.api.base_url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?
    .with_retry_config(config.retry_config());

    Ok((
        MarketContext::new(UserId::new(user)),
        HttpMarketSource::new(client),
    ))
}

async fn load_or_bail(context: &mut MarketContext, source: &HttpMarketSource) -> anyhow::Result<()> {
    let outcome = context.load(source).await;
    match outcome.failure() {
        Some(reason) => anyhow::bail!("Could not load the marketplace: {}", reason),
        None => Ok(()),
    }
}

/// CLI tags replace the configured defaults side by side
fn build_criteria(
    config: &Config,
    looking_for: Vec<String>,
    trading: Vec<String>,
    search: Option<String>,
) -> FilterCriteria {
    let looking_for = if looking_for.is_empty() {
        config.filters.looking_for.clone()
    } else {
        looking_for
    };
    let trading = if trading.is_empty() {
        config.filters.trading_away.clone()
    } else {
        trading
    };

    FilterCriteria::new(looking_for, trading).with_name_query(search.unwrap_or_default())
}

fn print_items(items: &[&Item], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No items.");
        return Ok(());
    }

    for item in items {
        println!("{:<6} {}", item.id, item.name);
        if !item.description.is_empty() {
            println!("       {}", item.description);
        }
        println!("       Tags: {}", item.trade_tags.join(", "));
        println!("       Looking for: {}", item.looking_for.join(", "));
        println!("       Location: {}", item.location_display());
        println!("       Posted: {}", item.posted_display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_market_filters() {
        let cli = Cli::parse_from([
            "swapshop",
            "--user",
            "2",
            "market",
            "--looking-for",
            "books",
            "--looking-for",
            "toys",
            "--search",
            "lamp",
        ]);
        assert_eq!(cli.user.as_deref(), Some("2"));
        match cli.command {
            Some(Commands::Market {
                looking_for,
                trading,
                search,
                json,
            }) => {
                assert_eq!(looking_for, vec!["books", "toys"]);
                assert!(trading.is_empty());
                assert_eq!(search.as_deref(), Some("lamp"));
                assert!(!json);
            }
            _ => panic!("expected market command"),
        }
    }

    #[test]
    fn test_build_criteria_falls_back_to_config() {
        let config = Config::default();
        let criteria = build_criteria(&config, vec!["books".into()], Vec::new(), None);

        assert_eq!(criteria.looking_for.len(), 1);
        assert!(criteria.looking_for.contains("books"));
        assert_eq!(criteria.trading_away, FilterCriteria::default().trading_away);
        assert!(criteria.name_query.is_empty());
    }

    #[test]
    fn test_connect_requires_user() {
        let config = Config::default();
        let err = connect(&config).err().expect("connect should fail without a user");
        assert!(err.to_string().contains("No user id"));
    }
}
