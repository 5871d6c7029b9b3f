use std::sync::{LazyLock, Mutex};

pub(super) static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Every variable `Config::apply_env_overrides` reads.
pub(super) const OVERRIDE_VARS: [&str; 7] = [
    "NEWSROOM_FETCH_URL",
    "NEWSROOM_SAVE_URL",
    "NEWSROOM_TEST_URL",
    "NEWSROOM_COMMENT_URL",
    "NEWSROOM_TIMEOUT_SECS",
    "NEWSROOM_LOG",
    "NEWSROOM_LANG",
];

/// Restores the previous value of `key` on drop.
pub(super) struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

fn write_env(key: &str, value: Option<&str>) {
    // SAFETY: test-only. Callers hold ENV_LOCK for the guard's whole
    // lifetime, so no other test thread touches the environment.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

impl EnvVarGuard {
    fn replace(key: &'static str, value: Option<&str>) -> Self {
        let previous = std::env::var(key).ok();
        write_env(key, value);
        Self { key, previous }
    }

    pub(super) fn set(key: &'static str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    pub(super) fn unset(key: &'static str) -> Self {
        Self::replace(key, None)
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        write_env(self.key, self.previous.as_deref());
    }
}

/// Unset every override variable until the returned guards drop.
pub(super) fn clear_overrides() -> Vec<EnvVarGuard> {
    OVERRIDE_VARS.into_iter().map(EnvVarGuard::unset).collect()
}
