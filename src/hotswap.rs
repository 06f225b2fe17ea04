//! In-place updates of cached resources.
//!
//! [`ResourceManager::force_update`](crate::ResourceManager::force_update) hands
//! the replacement to the cached instance first. Types with interior mutability
//! take it in place, so every holder of the old `Arc` sees the new state. Types
//! that cannot do that hand the value back and the manager swaps the stored
//! `Arc` instead.

use std::path::PathBuf;
use std::sync::atomic::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32,
    AtomicU64, AtomicU8, AtomicUsize, Ordering,
};

/// Capability for resources that can absorb a replacement in place.
pub trait ForceUpdate: Sized {
    /// Take on the state of `replacement`.
    ///
    /// Returns the replacement back when in-place update is unsupported.
    fn update_in_place(&self, replacement: Self) -> Result<(), Self> {
        Err(replacement)
    }
}

impl<U> ForceUpdate for parking_lot::RwLock<U> {
    fn update_in_place(&self, replacement: Self) -> Result<(), Self> {
        *self.write() = replacement.into_inner();
        Ok(())
    }
}

impl<U> ForceUpdate for parking_lot::Mutex<U> {
    fn update_in_place(&self, replacement: Self) -> Result<(), Self> {
        *self.lock() = replacement.into_inner();
        Ok(())
    }
}

impl<U> ForceUpdate for std::sync::RwLock<U> {
    fn update_in_place(&self, replacement: Self) -> Result<(), Self> {
        let value = replacement.into_inner().unwrap_or_else(|e| e.into_inner());
        let mut guard = self.write().unwrap_or_else(|e| {
            tracing::warn!("resource RwLock poisoned, recovering for hot swap");
            e.into_inner()
        });
        *guard = value;
        Ok(())
    }
}

impl<U> ForceUpdate for std::sync::Mutex<U> {
    fn update_in_place(&self, replacement: Self) -> Result<(), Self> {
        let value = replacement.into_inner().unwrap_or_else(|e| e.into_inner());
        let mut guard = self.lock().unwrap_or_else(|e| {
            tracing::warn!("resource Mutex poisoned, recovering for hot swap");
            e.into_inner()
        });
        *guard = value;
        Ok(())
    }
}

macro_rules! impl_atomic {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ForceUpdate for $ty {
                fn update_in_place(&self, replacement: Self) -> Result<(), Self> {
                    self.store(replacement.into_inner(), Ordering::SeqCst);
                    Ok(())
                }
            }
        )*
    };
}

impl_atomic!(
    AtomicBool, AtomicI8, AtomicI16, AtomicI32, AtomicI64, AtomicIsize,
    AtomicU8, AtomicU16, AtomicU32, AtomicU64, AtomicUsize,
);

macro_rules! impl_replace_only {
    ($($ty:ty),* $(,)?) => {
        $( impl ForceUpdate for $ty {} )*
    };
}

impl_replace_only!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, PathBuf,
);

impl<U> ForceUpdate for Vec<U> {}
impl<U> ForceUpdate for Box<U> {}
impl<U> ForceUpdate for Option<U> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values_hand_replacement_back() {
        assert_eq!(5i32.update_in_place(7), Err(7));
        assert_eq!(String::from("a").update_in_place("b".into()), Err(String::from("b")));
    }

    #[test]
    fn test_locks_update_in_place() {
        let lock = parking_lot::RwLock::new(vec![1, 2]);
        assert!(lock.update_in_place(parking_lot::RwLock::new(vec![3])).is_ok());
        assert_eq!(*lock.read(), vec![3]);

        let mutex = std::sync::Mutex::new("old");
        assert!(mutex.update_in_place(std::sync::Mutex::new("new")).is_ok());
        assert_eq!(*mutex.lock().unwrap(), "new");
    }

    #[test]
    fn test_atomics_update_in_place() {
        let counter = AtomicU32::new(1);
        assert!(counter.update_in_place(AtomicU32::new(9)).is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 9);
    }
}
