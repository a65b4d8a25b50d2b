use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine seasons the stats pages expose in their season dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "2018-2019")]
    S2018_19,
    #[serde(rename = "2017-2018")]
    S2017_18,
    #[serde(rename = "2016-2017")]
    S2016_17,
    #[serde(rename = "2015-2016")]
    S2015_16,
    #[serde(rename = "2014-2015")]
    S2014_15,
    #[serde(rename = "2013-2014")]
    S2013_14,
    #[serde(rename = "2012-2013")]
    S2012_13,
    #[serde(rename = "2011-2012")]
    S2011_12,
    #[serde(rename = "2010-2011")]
    S2010_11,
}

impl Season {
    /// Newest first, matching the order of the dropdown options.
    pub const ALL: [Season; 9] = [
        Season::S2018_19,
        Season::S2017_18,
        Season::S2016_17,
        Season::S2015_16,
        Season::S2014_15,
        Season::S2013_14,
        Season::S2012_13,
        Season::S2011_12,
        Season::S2010_11,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::S2018_19 => "2018-2019",
            Season::S2017_18 => "2017-2018",
            Season::S2016_17 => "2016-2017",
            Season::S2015_16 => "2015-2016",
            Season::S2014_15 => "2014-2015",
            Season::S2013_14 => "2013-2014",
            Season::S2012_13 => "2012-2013",
            Season::S2011_12 => "2011-2012",
            Season::S2010_11 => "2010-2011",
        }
    }

    /// Zero-based position in the season dropdown (0 = most recent season)
    pub fn dropdown_position(&self) -> usize {
        Season::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }
}

impl FromStr for Season {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| StatsError::UnsupportedSeason(s.to_string()))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How rendered table text groups its lines into records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Name line followed by a stat line
    Paired,
    /// One stat line per record, after a single header line
    SingleLine,
    /// `[ordinal, name, stats]` groups, after a single leading line
    Triple,
}

/// Where a column's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The record's name line
    Name,
    /// Token at this index of the space-split stat line
    Token(usize),
    /// The caller-supplied season label
    Season,
}

/// How a column is rendered in a SQL value tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Date,
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub source: Source,
    pub kind: ColumnKind,
}

const fn text(name: &'static str, index: usize) -> Column {
    Column {
        name,
        source: Source::Token(index),
        kind: ColumnKind::Text,
    }
}

const fn num(name: &'static str, index: usize) -> Column {
    Column {
        name,
        source: Source::Token(index),
        kind: ColumnKind::Numeric,
    }
}

const fn date(name: &'static str, index: usize) -> Column {
    Column {
        name,
        source: Source::Token(index),
        kind: ColumnKind::Date,
    }
}

const fn name(name: &'static str) -> Column {
    Column {
        name,
        source: Source::Name,
        kind: ColumnKind::Text,
    }
}

const SEASON: Column = Column {
    name: "season",
    source: Source::Season,
    kind: ColumnKind::Text,
};

// Token positions are tied to the current stats.nba.com table layout. If the
// site adds or reorders a column these tables have to be updated by hand.

const PLAYER_BOX_SCORE_COLUMNS: &[Column] = &[
    name("player"),
    text("team", 0),
    text("matchup", 3),
    date("gamedate", 4),
    text("wl", 5),
    num("min", 6),
    num("pts", 7),
    num("fgm", 8),
    num("fga", 9),
    num("fgp", 10),
    num("3pm", 11),
    num("3pa", 12),
    num("3pp", 13),
    num("ftm", 14),
    num("fta", 15),
    num("ftp", 16),
    num("oreb", 17),
    num("dreb", 18),
    num("reb", 19),
    num("ast", 20),
    num("stl", 21),
    num("blk", 22),
    num("tov", 23),
    num("pf", 24),
    num("pm", 25),
    SEASON,
];

const PLAYER_SEASON_STATS_COLUMNS: &[Column] = &[
    name("player"),
    text("team", 0),
    num("age", 1),
    num("gp", 2),
    num("w", 3),
    num("l", 4),
    num("min", 5),
    num("pts", 6),
    num("fgm", 7),
    num("fga", 8),
    num("fgp", 9),
    num("3pm", 10),
    num("3pa", 11),
    num("3pp", 12),
    num("ftm", 13),
    num("fta", 14),
    num("ftp", 15),
    num("oreb", 16),
    num("dreb", 17),
    num("reb", 18),
    num("ast", 19),
    num("tov", 20),
    num("stl", 21),
    num("blk", 22),
    num("pf", 23),
    num("fp", 24),
    num("dd2", 25),
    num("td3", 26),
    num("pm", 27),
    SEASON,
];

const TEAM_BOX_SCORE_COLUMNS: &[Column] = &[
    text("team", 0),
    text("opp", 3),
    date("date", 4),
    text("wl", 5),
    num("min", 6),
    num("pts", 7),
    num("fgm", 8),
    num("fga", 9),
    num("fgp", 10),
    num("3pm", 11),
    num("3pa", 12),
    num("3pp", 13),
    num("ftm", 14),
    num("fta", 15),
    num("ftp", 16),
    num("oreb", 17),
    num("dreb", 18),
    num("reb", 19),
    num("ast", 20),
    num("stl", 21),
    num("blk", 22),
    num("tov", 23),
    num("pf", 24),
    num("pm", 25),
    SEASON,
];

const TEAM_SEASON_STATS_COLUMNS: &[Column] = &[
    name("team"),
    num("gp", 0),
    num("w", 1),
    num("l", 2),
    num("winpct", 3),
    num("min", 4),
    num("pts", 5),
    num("fgm", 6),
    num("fga", 7),
    num("fgp", 8),
    num("3pm", 9),
    num("3pa", 10),
    num("3pp", 11),
    num("ftm", 12),
    num("fta", 13),
    num("ftp", 14),
    num("oreb", 15),
    num("dreb", 16),
    num("reb", 17),
    num("ast", 18),
    num("tov", 19),
    num("stl", 20),
    num("blk", 21),
    num("blka", 22),
    num("pf", 23),
    num("pfd", 24),
    num("pm", 25),
    SEASON,
];

/// The four table kinds scraped from stats.nba.com
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    PlayerBoxScore,
    PlayerSeasonStats,
    TeamBoxScore,
    TeamSeasonStats,
}

impl TableShape {
    pub const ALL: [TableShape; 4] = [
        TableShape::PlayerBoxScore,
        TableShape::PlayerSeasonStats,
        TableShape::TeamBoxScore,
        TableShape::TeamSeasonStats,
    ];

    pub fn layout(&self) -> Layout {
        match self {
            TableShape::PlayerBoxScore => Layout::Paired,
            TableShape::TeamBoxScore => Layout::SingleLine,
            TableShape::PlayerSeasonStats | TableShape::TeamSeasonStats => Layout::Triple,
        }
    }

    /// Output columns in canonical order, `season` last
    pub fn columns(&self) -> &'static [Column] {
        match self {
            TableShape::PlayerBoxScore => PLAYER_BOX_SCORE_COLUMNS,
            TableShape::PlayerSeasonStats => PLAYER_SEASON_STATS_COLUMNS,
            TableShape::TeamBoxScore => TEAM_BOX_SCORE_COLUMNS,
            TableShape::TeamSeasonStats => TEAM_SEASON_STATS_COLUMNS,
        }
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns().iter().map(|c| c.name).collect()
    }

    /// Number of space-separated tokens a stat line needs
    pub fn required_tokens(&self) -> usize {
        self.columns()
            .iter()
            .filter_map(|c| match c.source {
                Source::Token(i) => Some(i + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Default database table name used when rendering INSERT statements
    pub fn table_name(&self) -> &'static str {
        match self {
            TableShape::PlayerBoxScore => "player_box_scores",
            TableShape::PlayerSeasonStats => "player_season_stats",
            TableShape::TeamBoxScore => "team_box_scores",
            TableShape::TeamSeasonStats => "team_season_stats",
        }
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TableShape::PlayerBoxScore => "player box score",
            TableShape::PlayerSeasonStats => "player season stats",
            TableShape::TeamBoxScore => "team box score",
            TableShape::TeamSeasonStats => "team season stats",
        };
        f.write_str(label)
    }
}

/// One parsed table row; `values` line up with `shape.columns()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub shape: TableShape,
    pub values: Vec<String>,
}

impl StatRecord {
    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.shape
            .columns()
            .iter()
            .position(|c| c.name == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    pub fn season(&self) -> &str {
        self.values.last().map(String::as_str).unwrap_or_default()
    }

    /// Column/value pairs in canonical order
    pub fn fields(&self) -> impl Iterator<Item = (&'static Column, &str)> + '_ {
        self.shape
            .columns()
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }
}

/// Everything one collection call produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTable {
    pub shape: TableShape,
    pub season: Season,
    pub records: Vec<StatRecord>,
}

impl StatTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> &'static [Column] {
        self.shape.columns()
    }
}
