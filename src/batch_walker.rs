pub mod core;
pub mod main;
pub mod run_effect;
