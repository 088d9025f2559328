pub mod frame;
pub mod handle_replay;
pub mod loader;
pub mod registry;
pub mod scheduler;
