//! Application layer - The export pipeline and the ports it drives

pub mod dto;
pub mod ports;
pub mod services;
