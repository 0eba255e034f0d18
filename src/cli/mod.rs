//! CLI command implementations
//!
//! - `mine`: rule mining over an ARFF file
//! - `schema`: JSON Schema of the config and result types
//! - `util`: shared argument and output helpers

pub mod mine;
pub mod schema;
pub mod util;

pub use mine::cmd_mine;
pub use schema::cmd_schema;
