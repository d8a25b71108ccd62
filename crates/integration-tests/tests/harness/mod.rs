#![allow(dead_code)]

#[cfg(unix)]
pub mod config;
pub mod engines;
pub mod server;
