// Domain layer - Dashboard definitions, scenes and load state
pub mod dashboard;
pub mod lifecycle;
pub mod location;
pub mod navigation;
pub mod route;
