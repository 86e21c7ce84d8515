//! Command implementations.

pub mod classify;
pub mod predict;
pub mod profile;
pub mod resolve;

pub use self::classify::execute_classify;
pub use self::predict::execute_predict;
pub use self::profile::execute_profile;
pub use self::resolve::execute_resolve;
