pub mod auth;
pub mod cells;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod spreadsheet_write;
pub mod value_range_factory;
