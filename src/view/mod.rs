//! The page: named regions, their formatting, and the writer that fills them.

pub mod chart;
pub mod format;
pub mod page;
pub mod writer;

pub use page::{Page, Region, RegionContent, RegionState};
pub use writer::DomWriter;
