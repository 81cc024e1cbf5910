pub mod core;
pub mod persons;
pub mod utils;
