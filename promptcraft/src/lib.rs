pub mod cli;
pub mod commands;
pub mod logging;
pub mod redirect;
pub mod render;
