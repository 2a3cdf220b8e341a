pub mod app;
pub mod cmr;
pub mod config;
pub mod error;
pub mod page;
pub mod writer;
