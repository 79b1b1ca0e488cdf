pub mod availability_resolver;
pub mod duration_estimator;
pub mod planning_service;
pub mod priority_scorer;
pub mod schedule_utils;
pub mod session_allocator;
pub mod task_service;
