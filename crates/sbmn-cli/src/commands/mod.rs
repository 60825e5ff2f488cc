//! Command implementations.

pub mod interview;
pub mod plan;
pub mod profile;

pub use self::interview::execute_interview;
pub use self::plan::execute_plan;
pub use self::profile::execute_profile;
