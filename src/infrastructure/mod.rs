// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_repository;
pub mod location;
pub mod scene_transformer;
pub mod session_context;
