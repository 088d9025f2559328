pub mod replay_interface;
