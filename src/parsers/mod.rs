pub mod table;

pub use table::{parse_table, PLAYER_BOX_SCORE_HEADER};
