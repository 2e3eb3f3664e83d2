//! egui front end of the roster editor

mod app;
mod board_view;
mod components;
mod constants;

pub use app::run_gui;
