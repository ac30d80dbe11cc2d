//! Session lifecycle: repository port and service

pub mod ports;
pub mod service;

pub use ports::SessionRepository;
pub use service::SessionService;
