// Tool-Call Relay API Library
// Decision: Shared library for binaries (API server, OpenAPI export) and router tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Services layer
pub mod services;
pub use services::MessageService;

// OpenAPI document generation
pub mod openapi;
