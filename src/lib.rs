#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

pub mod config;
pub mod error;
pub mod commands;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
