pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod utils;

pub use collector::NbaDataCollector;
pub use config::ScrapeConfig;
pub use error::StatsError;
pub use models::*;
pub use parsers::*;
pub use scrapers::*;
pub use utils::*;
