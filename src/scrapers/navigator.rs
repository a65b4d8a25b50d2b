use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// How to find an element on a rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementLocator<'a> {
    XPath(&'a str),
    ClassName(&'a str),
}

impl fmt::Display for ElementLocator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementLocator::XPath(xpath) => write!(f, "xpath:{}", xpath),
            ElementLocator::ClassName(class) => write!(f, "class:{}", class),
        }
    }
}

/// Browser-side collaborator used by the page flows.
///
/// Every lookup waits a fixed interval for the page to settle and then fails
/// with [`StatsError::NavigationTimeout`](crate::error::StatsError) if the
/// element is not there. Implementations never retry.
#[async_trait]
pub trait Navigator: Send {
    /// Load `url` in the current browser session.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Click the dropdown option found at `xpath`.
    async fn select_option(&mut self, xpath: &str) -> Result<()>;

    /// Return the rendered (visible) text of the element at `locator`.
    async fn fetch_rendered_text(&mut self, locator: ElementLocator<'_>) -> Result<String>;
}
