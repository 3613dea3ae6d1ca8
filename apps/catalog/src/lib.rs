//! Cat-breed catalog: a SQLite-backed breed store with a seeder, an in-memory
//! query engine, favorites and search history, and a lifestyle quiz that maps
//! answers to a personality profile and matching breeds.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod query;
pub mod quiz;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod tracker;
