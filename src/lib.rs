pub mod config;
pub mod controller;
pub mod logging;
pub mod normalize;
pub mod store;
pub mod ui;
