use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// A panicking collaborator must not wedge the form, so poisoned locks are
// recovered rather than propagated.
pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
