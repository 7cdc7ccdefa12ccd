pub mod account;
pub mod article;
pub mod config;
pub mod cookie;
pub mod database;
pub mod error;
pub mod handlers;
pub mod session;
pub mod tmdb;
pub mod util;
