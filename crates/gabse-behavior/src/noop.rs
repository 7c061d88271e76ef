//! A no-op handler — every action resolves successfully and does nothing.

use gabse_schedule::Action;

use crate::{ActionHandler, Payload, Resolve, ResolutionResult};

/// An [`ActionHandler`] that accepts every action without side effects.
///
/// Useful as a placeholder in tests, or as a [`HandlerTable`][crate::HandlerTable]
/// fallback for marker actions that only exist to be observed.
pub struct NoopHandler;

impl<W, A, P: Payload> ActionHandler<W, A, P> for NoopHandler {
    fn resolve(&self, _action: &Action<P>, _scope: &mut Resolve<'_, W, A, P>) -> ResolutionResult<()> {
        Ok(())
    }
}
