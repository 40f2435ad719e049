pub mod calendar;
pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod mail;
pub mod model;
pub mod summary;

pub use error::{FolioError, Result};
