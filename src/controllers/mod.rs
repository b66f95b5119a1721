pub mod admin_auth;
pub mod admin_browse;
pub mod leaderboard;
pub mod pages;
pub mod rounds;
pub mod visitor;
