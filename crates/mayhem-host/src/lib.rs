pub mod error;
pub mod game_loop;
pub mod input;
pub mod scenario;
