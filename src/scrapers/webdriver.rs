use crate::config::ScrapeConfig;
use crate::error::{Result, StatsError};
use crate::scrapers::navigator::{ElementLocator, Navigator};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// [`Navigator`] backed by a Chrome session behind a WebDriver endpoint
pub struct FantocciniNavigator {
    client: Client,
    page_wait: Duration,
}

impl FantocciniNavigator {
    /// Open a new browser session against `config.webdriver_url`
    pub async fn connect(config: &ScrapeConfig) -> Result<Self> {
        let mut args = vec!["--window-size=1920,1080"];
        if config.headless {
            args.push("--headless");
            args.push("--disable-gpu");
        }

        let mut caps = Capabilities::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        info!(url = %config.webdriver_url, headless = config.headless, "starting browser session");
        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await?;

        Ok(Self {
            client,
            page_wait: config.page_wait,
        })
    }

    /// Close the underlying browser session
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }

    async fn find(&self, locator: ElementLocator<'_>) -> Result<Element> {
        tokio::time::sleep(self.page_wait).await;

        let css;
        let wd_locator = match locator {
            ElementLocator::XPath(xpath) => Locator::XPath(xpath),
            ElementLocator::ClassName(class) => {
                css = format!(".{}", class);
                Locator::Css(&css)
            }
        };

        self.client
            .find(wd_locator)
            .await
            .map_err(|e| lookup_error(e, locator, self.page_wait))
    }
}

/// A missing element after the fixed wait is a navigation timeout; anything
/// else is a browser failure
fn lookup_error(e: CmdError, locator: ElementLocator<'_>, waited: Duration) -> StatsError {
    if e.is_no_such_element() {
        StatsError::NavigationTimeout {
            locator: locator.to_string(),
            waited,
        }
    } else {
        StatsError::Browser(e)
    }
}

#[async_trait]
impl Navigator for FantocciniNavigator {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.client.goto(url).await?;
        Ok(())
    }

    async fn select_option(&mut self, xpath: &str) -> Result<()> {
        let element = self.find(ElementLocator::XPath(xpath)).await?;
        element.click().await?;
        Ok(())
    }

    async fn fetch_rendered_text(&mut self, locator: ElementLocator<'_>) -> Result<String> {
        let element = self.find(locator).await?;
        Ok(element.text().await?)
    }
}
