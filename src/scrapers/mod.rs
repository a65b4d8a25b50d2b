pub mod nba_stats;
pub mod navigator;
pub mod webdriver;

pub use navigator::{ElementLocator, Navigator};
pub use webdriver::FantocciniNavigator;
