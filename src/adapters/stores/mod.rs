pub mod json_file_store;
pub mod rest_store;
