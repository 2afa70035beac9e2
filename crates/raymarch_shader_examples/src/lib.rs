#![forbid(unsafe_code)]

mod output;
mod program;

pub use output::{init_tracing, rand01, write_shader};
pub use program::RecordingProgram;
