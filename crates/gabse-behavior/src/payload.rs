//! Action payloads.

use std::fmt::Debug;

/// A tagged action payload.
///
/// Scenarios normally define one enum covering every action their agents can
/// take, and map each variant to a stable kind name:
///
/// ```rust,ignore
/// #[derive(Debug, Clone)]
/// enum Zombie { Wander, Bite(AgentId), Census }
///
/// impl Payload for Zombie {
///     fn kind(&self) -> &'static str {
///         match self {
///             Zombie::Wander  => "wander",
///             Zombie::Bite(_) => "bite",
///             Zombie::Census  => "census",
///         }
///     }
/// }
/// ```
///
/// `Clone` is required so recurring actions can be re-issued.
pub trait Payload: Clone + Debug + Send + 'static {
    /// Dispatch key used by [`HandlerTable`][crate::HandlerTable].
    fn kind(&self) -> &'static str;
}

/// Static strings are their own kind.  Handy for small models and tests.
impl Payload for &'static str {
    fn kind(&self) -> &'static str {
        self
    }
}
