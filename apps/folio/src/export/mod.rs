//! Export adapters. Both read what the viewer currently shows, never the
//! record data it was rendered from.

pub mod download;
pub mod print;

pub use download::{DownloadLink, DownloadRegistry, DownloadSink};
pub use print::{print_document, PrintSurface, PrintWindow};
