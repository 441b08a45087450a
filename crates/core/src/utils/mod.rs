pub mod format;
pub mod time_utils;
pub mod user_locks;

pub use user_locks::UserLocks;
