//! Data models shared by the fetcher, the pipeline steps and the session.
//!
//! - [`ClipId`] / [`MediaPair`]: the resolved clip and its temporary files
//! - [`OutputTarget`]: where the merged file goes
//! - [`ToolOutput`]: what an external process left behind

mod clip;
mod output;
mod tool;

pub use clip::{ClipId, MediaPair};
pub use output::{has_video_extension, normalize_output_name, OutputTarget};
pub use tool::ToolOutput;
