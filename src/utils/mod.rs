pub mod data;
pub mod date;
pub mod sql;
