//! `HandlerTable` — dispatch by payload kind.

use std::collections::HashMap;

use gabse_schedule::Action;

use crate::{ActionHandler, Payload, Resolve, ResolutionError, ResolutionResult, handler_fn};

/// Registered-handler table keyed by [`Payload::kind`].
///
/// Actions whose kind has no entry go to the fallback handler if one is
/// set, and otherwise fail with [`ResolutionError::NoHandler`].  Like any
/// resolution failure, that is isolated to the one action.
///
/// ```rust,ignore
/// let handlers = HandlerTable::new()
///     .on("wander", |action, scope| { /* … */ Ok(()) })
///     .register("bite", BiteHandler { infection_rate: 0.3 });
/// ```
pub struct HandlerTable<W, A, P: Payload> {
    handlers: HashMap<&'static str, Box<dyn ActionHandler<W, A, P>>>,
    fallback: Option<Box<dyn ActionHandler<W, A, P>>>,
}

impl<W: 'static, A: 'static, P: Payload> Default for HandlerTable<W, A, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: 'static, A: 'static, P: Payload> HandlerTable<W, A, P> {
    pub fn new() -> Self {
        Self { handlers: HashMap::new(), fallback: None }
    }

    /// Route `kind` to `handler`.  A second registration for the same kind
    /// replaces the first.
    pub fn register<H: ActionHandler<W, A, P>>(mut self, kind: &'static str, handler: H) -> Self {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    /// Route `kind` to a closure.
    pub fn on<F>(self, kind: &'static str, f: F) -> Self
    where
        F: Fn(&Action<P>, &mut Resolve<'_, W, A, P>) -> ResolutionResult<()> + Send + Sync + 'static,
    {
        self.register(kind, handler_fn(f))
    }

    /// Handler for every kind without an entry.
    pub fn fallback<H: ActionHandler<W, A, P>>(mut self, handler: H) -> Self {
        self.fallback = Some(Box::new(handler));
        self
    }

    pub fn handles(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind) || self.fallback.is_some()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<W: 'static, A: 'static, P: Payload> ActionHandler<W, A, P> for HandlerTable<W, A, P> {
    fn resolve(&self, action: &Action<P>, scope: &mut Resolve<'_, W, A, P>) -> ResolutionResult<()> {
        let kind = action.payload().kind();
        match self.handlers.get(kind).or(self.fallback.as_ref()) {
            Some(handler) => handler.resolve(action, scope),
            None => Err(ResolutionError::NoHandler(kind)),
        }
    }
}
