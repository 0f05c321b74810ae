pub mod points;
pub mod tier;
