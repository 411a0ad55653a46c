pub mod collector;
pub mod delta;
pub mod kill;
pub mod process;
pub mod snapshot;
pub mod stat;
pub mod users;
