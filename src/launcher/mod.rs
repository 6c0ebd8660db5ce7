/// Process launcher
///
/// Sequences the startup of the prediction service and the dashboard UI:
/// spawn the API, block behind the readiness barrier, spawn the UI, open a
/// browser tab. All children are supervised and torn down on every exit
/// path.
pub mod readiness;
pub mod supervisor;

pub use readiness::wait_until_healthy;
pub use supervisor::Supervisor;
