//! Core business logic

pub mod application;
