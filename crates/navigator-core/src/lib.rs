pub mod answers;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod navigation;
pub mod paths;
pub mod score;
pub mod session;
pub mod summary;

pub use error::{NavigatorError, Result};
