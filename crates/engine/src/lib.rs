pub mod database;
pub mod filter;
pub mod neo;
