pub mod logging;
pub mod output;

pub use self::logging::{init_logging, RunTimer};
pub use self::output::{open_output, output_name};
