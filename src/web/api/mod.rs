pub mod catalog;
pub mod error;
pub mod next_pass;
