pub mod appState;
pub mod db;
pub mod mediator;
pub mod redisServer;
pub mod sessions;
