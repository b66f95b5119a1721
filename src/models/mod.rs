pub mod admin;
pub mod leaderboard;
pub mod player;
pub mod round;
pub mod schema;
pub mod visitor;
