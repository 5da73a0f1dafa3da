pub mod actions;
pub mod event_loop;
pub mod sort;
pub mod state;
pub mod update;
pub mod view;
