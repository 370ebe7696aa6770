pub mod page;
pub mod pipeline;

pub use page::{segment_page, PageInput};
pub use pipeline::{ExtractionResult, PageWeeks, SchedulePipeline};
