/// Watches an integration step by step.
///
/// An integrator that supports observation hands each event (for example the
/// state reached after a step) to [`Observer::observe`]. Returning `None`
/// continues; returning `Some(action)` asks the integrator to act, e.g. to
/// stop and return the partial trajectory. The event and action types are
/// chosen by each integrator.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. Pass `()` to observe
/// nothing.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// A closure observes by being called with each event.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// Ignores every event and never acts.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
