//! Redis IAM discovery driver
//!
//! Configuration loading and the commands behind the `redis-iam` binary.

pub mod config;
pub mod driver;

pub use config::NodeConfig;
