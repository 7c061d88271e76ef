//! The `ActionHandler` trait — the main extension point for scenario code.

use gabse_schedule::Action;

use crate::{Payload, Resolve, ResolutionResult};

/// Resolves actions against the simulation context.
///
/// The engine calls [`resolve`][Self::resolve] exactly once per popped
/// action whose agent is still active.  The handler reads and writes state
/// through `scope` and may submit or cancel actions there.  Returning `Err`
/// marks this one action as failed; it does not abort the tick unless the
/// error is [`ResolutionError::Fatal`][crate::ResolutionError::Fatal].
///
/// # Contract
///
/// - Must not block or perform I/O on the tick's critical path.
/// - Must be deterministic given the same context and agent RNG state.
/// - Cannot move the clock; `scope.now()` is fixed for the whole tick.
///
/// Behavior that varies per agent belongs in agent state, not in the
/// handler, which is why `resolve` takes `&self`.
pub trait ActionHandler<W, A, P: Payload>: Send + Sync + 'static {
    fn resolve(&self, action: &Action<P>, scope: &mut Resolve<'_, W, A, P>) -> ResolutionResult<()>;
}

/// Adapter turning a closure into an [`ActionHandler`].  Build with
/// [`handler_fn`].
pub struct FnHandler<F>(F);

/// Wrap a closure as an [`ActionHandler`].
///
/// ```rust,ignore
/// let wander = handler_fn(|action: &Action<Zombie>, scope: &mut Resolve<'_, World, Body, Zombie>| {
///     scope.state_mut()?.steps += 1;
///     Ok(())
/// });
/// ```
pub fn handler_fn<W, A, P, F>(f: F) -> FnHandler<F>
where
    P: Payload,
    F: Fn(&Action<P>, &mut Resolve<'_, W, A, P>) -> ResolutionResult<()> + Send + Sync + 'static,
{
    FnHandler(f)
}

impl<W, A, P, F> ActionHandler<W, A, P> for FnHandler<F>
where
    P: Payload,
    F: Fn(&Action<P>, &mut Resolve<'_, W, A, P>) -> ResolutionResult<()> + Send + Sync + 'static,
{
    fn resolve(&self, action: &Action<P>, scope: &mut Resolve<'_, W, A, P>) -> ResolutionResult<()> {
        (self.0)(action, scope)
    }
}
