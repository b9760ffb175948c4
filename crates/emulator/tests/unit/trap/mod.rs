
/// Multi-step scenarios crossing both handlers.
pub mod scenario;
