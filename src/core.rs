pub mod command;
pub mod controller;
pub mod domain;
pub mod error;
pub mod repository;
