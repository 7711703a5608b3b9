use ::std::sync::Arc;
use ::std::sync::Mutex;

///
/// Locks the state, and runs the action against it.
///
/// A poisoned lock is recovered rather than failing. The form state is
/// only changed in whole steps, so it is still consistent after a panic.
///
pub fn with_this_mut<T, F, R>(this: &Arc<Mutex<T>>, name: &str, some_action: F) -> R
where
    F: FnOnce(&mut T) -> R,
{
    let mut this_locked = this.lock().unwrap_or_else(|err| {
        ::tracing::warn!("Recovering poisoned lock on InnerFormStream for `{}`", name);
        err.into_inner()
    });

    some_action(&mut this_locked)
}
