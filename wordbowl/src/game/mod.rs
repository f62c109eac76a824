mod client_game;
mod game_service;
mod host_game;
mod inner;

pub use game_service::GameService;
