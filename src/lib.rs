pub mod analysis;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod presentation;
pub mod requirements;
pub mod routes;
pub mod service;
pub mod transport;
pub mod validation;

pub use crate::config::Config;
pub use crate::error::{Result, SpecCheckError};
pub use crate::service::SpecCheckService;
