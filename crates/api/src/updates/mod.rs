//! Event update orchestration.

mod orchestrator;

pub use orchestrator::UpdateOrchestrator;
