//! zplane command-line tool library

pub mod common;
pub mod config;
pub mod plot;
pub mod replay;
pub mod response;

pub use common::{format_complex, init_logging, parse_complex, OutputFormat, ScaleArg};
pub use config::FilterConfig;
pub use plot::{render_chart, ChartSize};
pub use replay::{replay, RecordedEvent, ReplayOutcome, ReplayScript};
pub use response::{ResponseConfig, ResponseReport, ResponseTool};
