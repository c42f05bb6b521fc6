//! Resume viewer for a static portfolio site.
//!
//! Content is loaded once into a read-only [`store::RecordStore`], rendered
//! into escaped markup trees by [`render`], and shown through the modal state
//! machine in [`viewer`]. [`export`] prints or downloads what is mounted.

pub mod check;
pub mod config;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod page;
pub mod render;
pub mod store;
pub mod theme;
pub mod viewer;

pub use errors::{FolioError, Result};
pub use store::{Content, RecordStore};
