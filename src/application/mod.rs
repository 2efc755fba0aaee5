// Application layer - Load orchestration, caches and collaborator seams
pub mod clock;
pub mod collaborators;
pub mod dashboard_repository;
pub mod dashboard_service;
pub mod definition_cache;
pub mod error;
pub mod fetch_strategy;
pub mod navigation_service;
pub mod scene_cache;
#[cfg(test)]
pub mod testing;
