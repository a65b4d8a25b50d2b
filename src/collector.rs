use crate::config::DEFAULT_MAX_PAGES;
use crate::error::Result;
use crate::models::{Season, StatRecord, StatTable, TableShape};
use crate::parsers::table::parse_table;
use crate::scrapers::nba_stats;
use crate::scrapers::navigator::Navigator;
use tracing::info;

/// Collects NBA statistics tables from stats.nba.com.
///
/// Each `collect_*` call validates the season label before touching the
/// browser, then navigates, reads and parses in that order.
pub struct NbaDataCollector<N> {
    navigator: N,
    max_pages: usize,
}

impl<N: Navigator> NbaDataCollector<N> {
    pub fn new(navigator: N) -> Self {
        Self {
            navigator,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Cap on the number of pages read from paginated box-score tables
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Hand back the navigator, e.g. to close the browser session
    pub fn into_navigator(self) -> N {
        self.navigator
    }

    /// Every player box score of `season`
    pub async fn collect_player_box_scores(&mut self, season: &str) -> Result<StatTable> {
        let season: Season = season.parse()?;
        let pages =
            nba_stats::fetch_player_box_scores(&mut self.navigator, season, self.max_pages).await?;
        build_table(TableShape::PlayerBoxScore, season, &pages)
    }

    /// Season totals of every player in `season`
    pub async fn collect_player_season_stats(&mut self, season: &str) -> Result<StatTable> {
        let season: Season = season.parse()?;
        let page = nba_stats::fetch_player_season_stats(&mut self.navigator, season).await?;
        build_table(TableShape::PlayerSeasonStats, season, &[page])
    }

    /// Every team box score of `season`
    pub async fn collect_team_box_scores(&mut self, season: &str) -> Result<StatTable> {
        let season: Season = season.parse()?;
        let pages =
            nba_stats::fetch_team_box_scores(&mut self.navigator, season, self.max_pages).await?;
        build_table(TableShape::TeamBoxScore, season, &pages)
    }

    /// Team box scores from a single page of the `season` table
    pub async fn collect_team_box_score_page(
        &mut self,
        season: &str,
        page: usize,
    ) -> Result<StatTable> {
        let season: Season = season.parse()?;
        let text = nba_stats::fetch_team_box_score_page(&mut self.navigator, season, page).await?;
        build_table(TableShape::TeamBoxScore, season, &[text])
    }

    /// Season totals of every team in `season`
    pub async fn collect_team_season_stats(&mut self, season: &str) -> Result<StatTable> {
        let season: Season = season.parse()?;
        let page = nba_stats::fetch_team_season_stats(&mut self.navigator, season).await?;
        build_table(TableShape::TeamSeasonStats, season, &[page])
    }
}

/// Parse each page on its own so every page's header row is handled the same way
fn build_table(shape: TableShape, season: Season, pages: &[String]) -> Result<StatTable> {
    let mut records: Vec<StatRecord> = Vec::new();
    for page in pages {
        records.extend(parse_table(page, season, shape)?);
    }

    info!(%shape, %season, pages = pages.len(), records = records.len(), "collected table");
    Ok(StatTable {
        shape,
        season,
        records,
    })
}
