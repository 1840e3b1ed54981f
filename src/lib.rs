pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod storage;
