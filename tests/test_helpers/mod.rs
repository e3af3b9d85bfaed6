//! Scoped environment overrides for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the process environment lock and restores the overridden
/// variables when dropped.
pub struct EnvVarGuard {
    saved: Vec<(String, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies the given overrides. `None` removes the variable.
    pub fn set_many(overrides: &[(&str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let saved = overrides
            .iter()
            .map(|&(name, value)| {
                let before = env::var_os(name);
                apply(name, value.map(OsString::from));
                (name.to_owned(), before)
            })
            .collect();

        Self { saved, _lock: lock }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, before) in self.saved.drain(..) {
            apply(&name, before);
        }
    }
}

fn apply(name: &str, value: Option<OsString>) {
    unsafe {
        // SAFETY: ENV_MUTEX is held for every mutation made through this module.
        match value {
            Some(new_value) => env::set_var(name, new_value),
            None => env::remove_var(name),
        }
    }
}
