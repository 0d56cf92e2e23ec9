pub mod analytics;
pub mod asset;
pub mod catalog;
pub mod command;
pub mod portfolio;
pub mod sentiment;
pub mod settings;
pub mod snapshot;
pub mod transaction;
