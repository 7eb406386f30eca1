pub mod activity_service;
pub mod csv_export;
pub mod pagination;
