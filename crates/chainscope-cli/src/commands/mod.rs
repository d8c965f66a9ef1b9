//! Command implementations.

pub mod canonicalize;
pub mod cluster;
pub mod config;
pub mod detect;
pub mod validate;

pub use self::canonicalize::execute_canonicalize;
pub use self::cluster::execute_cluster;
pub use self::config::execute_config;
pub use self::detect::execute_detect;
pub use self::validate::execute_validate;
