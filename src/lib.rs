pub mod ai;
pub mod config;
pub mod docu_brain;
pub mod models;
pub mod sniper;
pub mod sources;
pub mod state;
pub mod storage;
pub mod store;

pub use config::Config;
pub use state::AppState;
