// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service discovery, health, and token acquisition.
//
// Security Level: None
// Middleware: None

pub mod auth;
pub mod home;
