//! Page flows for stats.nba.com.
//!
//! The site renders its tables client-side, so every flow is a fixed sequence
//! of clicks on dropdown options followed by a read of the table element's
//! visible text. Locators below are absolute XPaths into the current page
//! layout and break whenever the site changes its markup.

use crate::error::Result;
use crate::models::Season;
use crate::scrapers::navigator::{ElementLocator, Navigator};
use tracing::{debug, info};

pub const PLAYER_BOX_SCORES_URL: &str = "https://stats.nba.com/players/boxscores/";
pub const PLAYER_SEASON_STATS_URL: &str = "https://stats.nba.com/players/traditional/?sort=PTS&dir=-1";
pub const TEAM_BOX_SCORES_URL: &str = "https://stats.nba.com/teams/boxscores/";
pub const TEAM_SEASON_STATS_URL: &str = "https://stats.nba.com/teams/traditional/?sort=W_PCT&dir=-1";

/// Class of the element wrapping the rendered stats table
pub const STAT_TABLE_CLASS: &str = "nba-stat-table__overflow";

const SEASON_SELECT_XPATH: &str =
    "/html/body/main/div[2]/div/div[2]/div/div/div[1]/div[1]/div/div/label/select";
const PAGE_SELECT_XPATH: &str =
    "/html/body/main/div[2]/div/div[2]/div/div/nba-stat-table/div[1]/div/div/select";

/// The "All" entry of the page dropdown, which shows every row on one page
pub fn all_rows_option() -> String {
    format!("{}/option[1]", PAGE_SELECT_XPATH)
}

/// Season dropdown option on the season-stats pages (most recent season first)
pub fn season_stats_option(season: Season) -> String {
    format!("{}/option[{}]", SEASON_SELECT_XPATH, season.dropdown_position() + 1)
}

/// Season dropdown option on the box-score pages, which carry one extra
/// entry ahead of the seasons
pub fn box_score_season_option(season: Season) -> String {
    format!("{}/option[{}]", SEASON_SELECT_XPATH, season.dropdown_position() + 2)
}

/// Page dropdown option for 1-based table page `page`
pub fn page_option(page: usize) -> String {
    format!("{}/option[{}]", PAGE_SELECT_XPATH, page + 1)
}

async fn read_table<N: Navigator + ?Sized>(navigator: &mut N) -> Result<String> {
    navigator
        .fetch_rendered_text(ElementLocator::ClassName(STAT_TABLE_CLASS))
        .await
}

/// Walk the page dropdown from page 1 until an option is missing or
/// `max_pages` is reached, returning each page's table text in order
async fn read_paged_table<N: Navigator + ?Sized>(
    navigator: &mut N,
    max_pages: usize,
) -> Result<Vec<String>> {
    let mut pages = Vec::new();

    for page in 1..=max_pages {
        match navigator.select_option(&page_option(page)).await {
            Ok(()) => {}
            Err(e) if e.is_navigation_timeout() => {
                info!(pages = pages.len(), "reached end of box score table");
                break;
            }
            Err(e) => return Err(e),
        }

        info!(page, "reading box score table page");
        let text = read_table(navigator).await?;
        debug!(page, bytes = text.len(), "read page");
        pages.push(text);
    }

    Ok(pages)
}

/// Raw table text of every player box-score page for `season`
pub async fn fetch_player_box_scores<N: Navigator + ?Sized>(
    navigator: &mut N,
    season: Season,
    max_pages: usize,
) -> Result<Vec<String>> {
    info!(%season, "getting player box scores");
    navigator.goto(PLAYER_BOX_SCORES_URL).await?;
    navigator
        .select_option(&box_score_season_option(season))
        .await?;
    read_paged_table(navigator, max_pages).await
}

/// Raw table text of the player season-stats page with every player shown
pub async fn fetch_player_season_stats<N: Navigator + ?Sized>(
    navigator: &mut N,
    season: Season,
) -> Result<String> {
    info!(%season, "getting player season stats");
    navigator.goto(PLAYER_SEASON_STATS_URL).await?;
    navigator.select_option(&season_stats_option(season)).await?;
    navigator.select_option(&all_rows_option()).await?;
    read_table(navigator).await
}

/// Raw table text of every team box-score page for `season`
pub async fn fetch_team_box_scores<N: Navigator + ?Sized>(
    navigator: &mut N,
    season: Season,
    max_pages: usize,
) -> Result<Vec<String>> {
    info!(%season, "getting team box scores");
    navigator.goto(TEAM_BOX_SCORES_URL).await?;
    navigator
        .select_option(&box_score_season_option(season))
        .await?;
    read_paged_table(navigator, max_pages).await
}

/// Raw table text of a single team box-score page
pub async fn fetch_team_box_score_page<N: Navigator + ?Sized>(
    navigator: &mut N,
    season: Season,
    page: usize,
) -> Result<String> {
    info!(%season, page, "getting team box score page");
    navigator.goto(TEAM_BOX_SCORES_URL).await?;
    navigator
        .select_option(&box_score_season_option(season))
        .await?;
    navigator.select_option(&page_option(page)).await?;
    read_table(navigator).await
}

/// Raw table text of the team season-stats page
pub async fn fetch_team_season_stats<N: Navigator + ?Sized>(
    navigator: &mut N,
    season: Season,
) -> Result<String> {
    info!(%season, "getting team season stats");
    navigator.goto(TEAM_SEASON_STATS_URL).await?;
    navigator.select_option(&season_stats_option(season)).await?;
    read_table(navigator).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use crate::scrapers::navigator::testing::ScriptedNavigator;

    #[test]
    fn test_locators() {
        assert!(season_stats_option(Season::S2018_19).ends_with("label/select/option[1]"));
        assert!(season_stats_option(Season::S2010_11).ends_with("label/select/option[9]"));
        assert!(box_score_season_option(Season::S2018_19).ends_with("label/select/option[2]"));
        assert!(box_score_season_option(Season::S2010_11).ends_with("label/select/option[10]"));
        assert!(page_option(1).ends_with("div/select/option[2]"));
        assert!(all_rows_option().ends_with("div/select/option[1]"));
    }

    #[tokio::test]
    async fn test_paged_table_stops_at_missing_page() {
        let mut navigator = ScriptedNavigator::new()
            .with_option(box_score_season_option(Season::S2017_18))
            .with_page(page_option(1), "page one")
            .with_page(page_option(2), "page two");

        let pages = fetch_player_box_scores(&mut navigator, Season::S2017_18, 50)
            .await
            .unwrap();

        assert_eq!(pages, vec!["page one", "page two"]);
        assert_eq!(navigator.calls[0], format!("goto {}", PLAYER_BOX_SCORES_URL));
        assert_eq!(
            navigator.calls.last().unwrap(),
            &format!("select {}", page_option(3))
        );
    }

    #[tokio::test]
    async fn test_paged_table_respects_max_pages() {
        let mut navigator = ScriptedNavigator::new()
            .with_option(box_score_season_option(Season::S2018_19))
            .with_page(page_option(1), "page one")
            .with_page(page_option(2), "page two");

        let pages = fetch_team_box_scores(&mut navigator, Season::S2018_19, 1)
            .await
            .unwrap();

        assert_eq!(pages, vec!["page one"]);
    }

    #[tokio::test]
    async fn test_missing_season_option_is_fatal() {
        let mut navigator = ScriptedNavigator::new();

        let err = fetch_team_season_stats(&mut navigator, Season::S2015_16)
            .await
            .unwrap_err();

        assert!(matches!(err, StatsError::NavigationTimeout { .. }));
        assert!(!navigator.calls.iter().any(|c| c.starts_with("text")));
    }

    #[tokio::test]
    async fn test_player_season_stats_selects_all_rows() {
        let mut navigator = ScriptedNavigator::new()
            .with_option(season_stats_option(Season::S2014_15))
            .with_page(all_rows_option(), "every player");

        let text = fetch_player_season_stats(&mut navigator, Season::S2014_15)
            .await
            .unwrap();

        assert_eq!(text, "every player");
        assert_eq!(
            navigator.calls,
            vec![
                format!("goto {}", PLAYER_SEASON_STATS_URL),
                format!("select {}", season_stats_option(Season::S2014_15)),
                format!("select {}", all_rows_option()),
                format!("text class:{}", STAT_TABLE_CLASS),
            ]
        );
    }

    #[tokio::test]
    async fn test_single_team_box_score_page() {
        let mut navigator = ScriptedNavigator::new()
            .with_option(box_score_season_option(Season::S2018_19))
            .with_page(page_option(4), "fourth page");

        let text = fetch_team_box_score_page(&mut navigator, Season::S2018_19, 4)
            .await
            .unwrap();
        assert_eq!(text, "fourth page");
    }
}
