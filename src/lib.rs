pub mod catalog;
pub mod config;
pub mod predict;
pub mod scheduler;
pub mod timeexpr;
pub mod web;
