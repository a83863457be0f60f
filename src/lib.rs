#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod config;
pub mod validation;
pub mod model;
pub mod api;
pub mod store;
pub mod cache;
pub mod services;
pub mod queries;
pub mod report;
pub mod cli;
