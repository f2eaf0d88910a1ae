pub mod descriptor;
pub mod error;
pub mod snapshot;
