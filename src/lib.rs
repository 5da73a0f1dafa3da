pub mod app;
pub mod monitor;
pub mod ui;
pub mod util;
