pub mod alerts;
pub mod api;
pub mod core;
pub mod scanner;
pub mod store;
pub mod strategy;
pub mod web;
