pub mod activity;
pub mod filter;
