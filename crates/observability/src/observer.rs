//! Injected logging collaborator.

use std::fmt;

use tracing::Dispatch;

/// Per-component logging handle
///
/// Holds the `Dispatch` that receives every event the owning component emits.
/// Cloning is cheap (the dispatch is reference counted).
#[derive(Clone)]
pub struct Observer {
    component: &'static str,
    dispatch: Dispatch,
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

impl Observer {
    /// Observer bound to the dispatcher active at construction time
    pub fn current(component: &'static str) -> Self {
        Self {
            component,
            dispatch: tracing::dispatcher::get_default(Dispatch::clone),
        }
    }

    /// Observer bound to an explicit dispatch
    pub fn with_dispatch(component: &'static str, dispatch: Dispatch) -> Self {
        Self {
            component,
            dispatch,
        }
    }

    /// Observer that discards every event
    pub fn silent(component: &'static str) -> Self {
        Self::with_dispatch(component, Dispatch::none())
    }

    /// Component name attached to events
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Run `f` with this observer's dispatch as the default
    ///
    /// Events emitted by tracing macros inside `f` go to the injected dispatch.
    pub fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}
