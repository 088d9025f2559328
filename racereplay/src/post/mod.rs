pub mod replay_result;
