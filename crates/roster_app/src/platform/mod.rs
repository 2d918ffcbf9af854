mod app;
mod config;
mod controller;
mod effects;
mod input;
mod ui;

pub use app::run_app;
