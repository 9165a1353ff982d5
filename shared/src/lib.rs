// Data models and calendar helpers shared between the engine and its clients.
pub mod models;
pub mod utils;
