use crate::error::{Result, StatsError};
use crate::models::{Layout, Season, Source, StatRecord, TableShape};
use tracing::{debug, info, warn};

/// Column header row rendered at the top of every player box-score page
pub const PLAYER_BOX_SCORE_HEADER: &str = "PLAYER TEAM MATCH UP GAME DATE W/L MIN PTS FGM FGA FG% 3PM 3PA 3P% FTM FTA FT% OREB DREB REB AST STL BLK TOV PF +/-";

/// Parse the rendered text of one stats table into records.
///
/// Tokens are assigned to columns by fixed position (see
/// [`TableShape::columns`]); the page's own header row is never consulted.
/// The season is appended to every record as given.
pub fn parse_table(raw: &str, season: Season, shape: TableShape) -> Result<Vec<StatRecord>> {
    info!(%shape, %season, "parsing table");

    let lines = split_lines(raw);
    let records = match shape.layout() {
        Layout::Paired => parse_paired(&lines, season, shape)?,
        Layout::SingleLine => parse_single_line(&lines, season, shape)?,
        Layout::Triple => parse_triple(&lines, season, shape)?,
    };

    debug!(%shape, count = records.len(), "parsed records");
    Ok(records)
}

fn split_lines(raw: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    // A terminating newline leaves one empty segment behind
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn clean_name(line: &str) -> String {
    line.replace('\'', "")
}

fn parse_paired(lines: &[&str], season: Season, shape: TableShape) -> Result<Vec<StatRecord>> {
    let mut records = Vec::new();
    let mut pending_name: Option<(usize, String)> = None;

    for (line_num, &line) in lines.iter().enumerate() {
        if line == PLAYER_BOX_SCORE_HEADER {
            continue;
        }

        match pending_name.take() {
            None => pending_name = Some((line_num, clean_name(line))),
            Some((_, name)) => {
                // Page texts glued together can leave the header stuck to a stat line
                let stats = line.replace(PLAYER_BOX_SCORE_HEADER, "");
                records.push(build_record(shape, season, Some(name), &stats, line_num)?);
            }
        }
    }

    if let Some((line_num, name)) = pending_name {
        warn!(%shape, line = line_num, "name line without stats");
        return Err(StatsError::malformed(
            shape,
            line_num,
            format!("name `{}` has no stat line", name),
        ));
    }

    Ok(records)
}

fn parse_single_line(
    lines: &[&str],
    season: Season,
    shape: TableShape,
) -> Result<Vec<StatRecord>> {
    lines
        .iter()
        .enumerate()
        .skip(1)
        .map(|(line_num, line)| build_record(shape, season, None, line, line_num))
        .collect()
}

fn parse_triple(lines: &[&str], season: Season, shape: TableShape) -> Result<Vec<StatRecord>> {
    let mut records = Vec::new();
    let mut pending_name: Option<(usize, String)> = None;

    for (line_num, &line) in lines.iter().enumerate().skip(1) {
        match line_num % 3 {
            2 => pending_name = Some((line_num, clean_name(line))),
            0 => {
                let (_, name) = pending_name.take().ok_or_else(|| {
                    StatsError::malformed(shape, line_num, "stat line without a name line")
                })?;
                records.push(build_record(shape, season, Some(name), line, line_num)?);
            }
            _ => {}
        }
    }

    // An ordinal with nothing after it is a group cut short
    let last = lines.len().saturating_sub(1);
    if last > 0 && last % 3 == 1 {
        warn!(%shape, line = last, "ordinal line without name or stats");
        return Err(StatsError::malformed(
            shape,
            last,
            format!("ordinal `{}` has no name or stat line", lines[last]),
        ));
    }

    if let Some((line_num, name)) = pending_name {
        warn!(%shape, line = line_num, "name line without stats");
        return Err(StatsError::malformed(
            shape,
            line_num,
            format!("name `{}` has no stat line", name),
        ));
    }

    Ok(records)
}

fn build_record(
    shape: TableShape,
    season: Season,
    name: Option<String>,
    stat_line: &str,
    line_num: usize,
) -> Result<StatRecord> {
    let tokens: Vec<&str> = stat_line.split(' ').collect();
    let required = shape.required_tokens();

    if tokens.len() < required {
        warn!(%shape, line = line_num, found = tokens.len(), required, "short stat line");
        return Err(StatsError::malformed(
            shape,
            line_num,
            format!("expected at least {} fields, found {}", required, tokens.len()),
        ));
    }

    let mut name = name;
    let values = shape
        .columns()
        .iter()
        .map(|column| match column.source {
            Source::Name => name.take().unwrap_or_default(),
            Source::Token(i) => tokens[i].to_string(),
            Source::Season => season.as_str().to_string(),
        })
        .collect();

    Ok(StatRecord { shape, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER_BOX_LINE: &str =
        "LAL LAL @ POR 10/18/2018 L 35 26 10 20 .500 2 5 .400 4 6 .667 1 11 12 6 1 1 5 1 -9";
    const TEAM_BOX_LINE: &str =
        "GSW GSW vs. OKC 10/16/2018 W 240 108 42 95 44.2 11 30 36.7 13 18 72.2 12 46 58 28 7 7 21 22 8";
    const PLAYER_SEASON_LINE: &str =
        "GSW 31 69 51 18 34.8 27.3 9.2 19.4 47.2 5.1 11.7 43.7 3.8 4.2 91.6 0.7 4.7 5.3 5.2 2.8 1.3 0.4 2.4 46.4 10 0 6.9";
    const TEAM_SEASON_LINE: &str =
        "82 57 25 .695 48.2 117.7 44.0 89.8 49.1 13.3 34.4 38.5 16.3 20.4 80.1 9.8 36.5 46.2 29.4 14.3 7.6 6.4 4.3 21.4 19.9 6.5";

    #[test]
    fn test_player_box_scores() {
        let raw = format!(
            "{}\nLeBron James\n{}\nD'Angelo Russell\n{}",
            PLAYER_BOX_SCORE_HEADER, PLAYER_BOX_LINE, PLAYER_BOX_LINE
        );
        let records = parse_table(&raw, Season::S2018_19, TableShape::PlayerBoxScore).unwrap();

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.get("player"), Some("LeBron James"));
        assert_eq!(first.get("team"), Some("LAL"));
        assert_eq!(first.get("matchup"), Some("POR"));
        assert_eq!(first.get("gamedate"), Some("10/18/2018"));
        assert_eq!(first.get("pts"), Some("26"));
        assert_eq!(first.get("pm"), Some("-9"));
        assert_eq!(first.season(), "2018-2019");

        assert_eq!(records[1].get("player"), Some("DAngelo Russell"));
    }

    #[test]
    fn test_header_repeated_mid_stream_is_skipped() {
        let raw = format!(
            "{h}\nLeBron James\n{l}\n{h}\nKyle Kuzma\n{l}",
            h = PLAYER_BOX_SCORE_HEADER,
            l = PLAYER_BOX_LINE
        );
        let records = parse_table(&raw, Season::S2018_19, TableShape::PlayerBoxScore).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("player"), Some("Kyle Kuzma"));
        assert!(records
            .iter()
            .all(|r| r.get("player") != Some(PLAYER_BOX_SCORE_HEADER)));
    }

    #[test]
    fn test_inline_header_is_stripped_from_stat_line() {
        let raw = format!(
            "LeBron James\n{}{}\nKyle Kuzma\n{}",
            PLAYER_BOX_LINE, PLAYER_BOX_SCORE_HEADER, PLAYER_BOX_LINE
        );
        let records = parse_table(&raw, Season::S2017_18, TableShape::PlayerBoxScore).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("pm"), Some("-9"));
    }

    #[test]
    fn test_trailing_name_without_stats_fails() {
        let raw = format!("LeBron James\n{}\nKyle Kuzma", PLAYER_BOX_LINE);
        let err = parse_table(&raw, Season::S2018_19, TableShape::PlayerBoxScore).unwrap_err();

        assert!(matches!(err, StatsError::MalformedTable { line: 2, .. }));
    }

    #[test]
    fn test_short_stat_line_fails() {
        // 24 tokens, two short of what the box score layout indexes into
        let raw = "LeBron James\nLAL 2 3 W 35 28 10 20 .500 2 5 .400 6 8 .750 2 8 10 8 1 1 3 2 8";
        let err = parse_table(raw, Season::S2018_19, TableShape::PlayerBoxScore).unwrap_err();

        match err {
            StatsError::MalformedTable { shape, line, reason } => {
                assert_eq!(shape, TableShape::PlayerBoxScore);
                assert_eq!(line, 1);
                assert!(reason.contains("found 24"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_newline_is_ignored() {
        let raw = format!("LeBron James\r\n{}\r\n", PLAYER_BOX_LINE);
        let records = parse_table(&raw, Season::S2018_19, TableShape::PlayerBoxScore).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("pm"), Some("-9"));
    }

    #[test]
    fn test_team_box_scores_skip_header_line() {
        let raw = format!(
            "TEAM MATCH UP GAME DATE W/L MIN PTS\n{}\n{}",
            TEAM_BOX_LINE, TEAM_BOX_LINE
        );
        let records = parse_table(&raw, Season::S2018_19, TableShape::TeamBoxScore).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("team"), Some("GSW"));
        assert_eq!(records[0].get("opp"), Some("OKC"));
        assert_eq!(records[0].get("date"), Some("10/16/2018"));
        assert_eq!(records[0].get("wl"), Some("W"));
        assert_eq!(records[0].get("pts"), Some("108"));
        assert_eq!(records[0].get("pm"), Some("8"));
    }

    #[test]
    fn test_player_season_stats() {
        let raw = format!(
            "PLAYER TEAM AGE GP W L\n1\nStephen Curry\n{l}\n2\nDe'Aaron Fox\n{l}",
            l = PLAYER_SEASON_LINE
        );
        let records = parse_table(&raw, Season::S2018_19, TableShape::PlayerSeasonStats).unwrap();

        assert_eq!(records.len(), 2);
        let curry = &records[0];
        assert_eq!(curry.get("player"), Some("Stephen Curry"));
        assert_eq!(curry.get("team"), Some("GSW"));
        assert_eq!(curry.get("age"), Some("31"));
        assert_eq!(curry.get("pts"), Some("27.3"));
        assert_eq!(curry.get("dd2"), Some("10"));
        assert_eq!(curry.get("td3"), Some("0"));
        assert_eq!(curry.get("pm"), Some("6.9"));
        assert_eq!(records[1].get("player"), Some("DeAaron Fox"));
    }

    #[test]
    fn test_first_line_is_always_skipped_for_season_stats() {
        // Even a line that looks like data is dropped when it is line 0
        let raw = format!("{l}\n1\nStephen Curry\n{l}", l = PLAYER_SEASON_LINE);
        let records = parse_table(&raw, Season::S2016_17, TableShape::PlayerSeasonStats).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].season(), "2016-2017");
    }

    #[test]
    fn test_incomplete_triple_fails() {
        let raw = format!("header\n1\nStephen Curry\n{}\n2\nKlay Thompson", PLAYER_SEASON_LINE);
        let err = parse_table(&raw, Season::S2018_19, TableShape::PlayerSeasonStats).unwrap_err();

        assert!(matches!(err, StatsError::MalformedTable { line: 5, .. }));
    }

    #[test]
    fn test_trailing_ordinal_without_group_fails() {
        let raw = format!("header\n1\nStephen Curry\n{}\n2", PLAYER_SEASON_LINE);
        let err = parse_table(&raw, Season::S2018_19, TableShape::PlayerSeasonStats).unwrap_err();

        match err {
            StatsError::MalformedTable { shape, line, reason } => {
                assert_eq!(shape, TableShape::PlayerSeasonStats);
                assert_eq!(line, 4);
                assert!(reason.contains("`2`"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_team_season_stats() {
        let raw = format!("TEAM GP W L WIN%\n1\nMilwaukee Bucks\n{}", TEAM_SEASON_LINE);
        let records = parse_table(&raw, Season::S2018_19, TableShape::TeamSeasonStats).unwrap();

        assert_eq!(records.len(), 1);
        let bucks = &records[0];
        assert_eq!(bucks.get("team"), Some("Milwaukee Bucks"));
        assert_eq!(bucks.get("gp"), Some("82"));
        assert_eq!(bucks.get("winpct"), Some(".695"));
        assert_eq!(bucks.get("blka"), Some("4.3"));
        assert_eq!(bucks.get("pfd"), Some("19.9"));
        assert_eq!(bucks.get("pm"), Some("6.5"));
        assert_eq!(bucks.values.len(), TableShape::TeamSeasonStats.columns().len());
    }

    #[test]
    fn test_every_record_carries_season() {
        let mut raw = String::from("header");
        for i in 1..=5 {
            raw.push_str(&format!("\n{}\nTeam {}\n{}", i, i, TEAM_SEASON_LINE));
        }
        let records = parse_table(&raw, Season::S2012_13, TableShape::TeamSeasonStats).unwrap();

        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.season() == "2012-2013"));
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        for shape in TableShape::ALL {
            let records = parse_table("", Season::S2018_19, shape).unwrap();
            assert!(records.is_empty(), "{} produced records", shape);
        }
    }
}
