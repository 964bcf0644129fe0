pub mod catalog;
pub mod config;
pub mod export;
pub mod game;
pub mod roster;
pub mod strategy;
