//! Caddy 관리 API 클라이언트.

mod client;
mod error;
pub mod objects;

pub use client::{CaddyApi, HttpCaddyApi};
pub use error::CaddyError;
