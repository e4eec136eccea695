#![forbid(unsafe_code)]

pub mod routes;

pub use routes::{router, serve};
