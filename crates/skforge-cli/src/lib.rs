pub mod run;

pub use run::{execute, RunError};
