//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Operator actions (new, edit, typing, cancel)
/// - Store outcomes (entries loaded, submission failed)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
