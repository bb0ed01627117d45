pub mod config;
pub mod error;
pub mod shutdown;
pub mod startup;
pub mod storage;
pub mod tracker;
