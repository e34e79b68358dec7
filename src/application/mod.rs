// Application layer - Use cases and capability seams
pub mod analysis;
pub mod session_service;
