pub mod entry;
pub mod filter;
pub mod timeline;
