pub mod activity_store;
