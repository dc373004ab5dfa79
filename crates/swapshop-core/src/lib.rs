// Marketplace logic: items, tag filtering, interest tracking, startup load
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod interest;
pub mod models;
pub mod providers;
pub mod source;

pub use config::Config;
pub use context::{LoadOutcome, MarketContext};
pub use error::Error;
pub use filter::{filter_items, FilterCriteria, ALLOWED_TAGS};
pub use interest::InterestSet;
pub use models::{Item, ItemId, Location, UserId};
pub use source::MarketSource;

pub type Result<T> = std::result::Result<T, Error>;
