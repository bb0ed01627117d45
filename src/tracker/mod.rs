mod actor;
pub mod date;
mod handle;
pub mod input;
pub mod models;
mod rate;
mod store;
pub mod summary;
pub mod time;
pub mod week;

pub use handle::TrackerHandle;
