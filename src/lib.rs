pub mod app;
pub mod data;
pub mod model;
pub mod state;
pub mod ui;
