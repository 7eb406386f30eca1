pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod show;
pub mod status;
pub mod store_helpers;
