pub mod error;
pub mod io;
pub mod load;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod project;
pub mod reconcile;
pub mod schema;
pub mod validate;

pub use error::{Result, ToolError};
