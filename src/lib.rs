// lib.rs
pub mod admin;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod handlers;
pub mod identity;
pub mod memory;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;
