// Market source implementations
pub mod http;

pub use http::HttpMarketSource;
