mod actions;
mod app;
mod dom;
mod export;
mod render;
mod state;

pub use app::run;
