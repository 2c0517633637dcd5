//! Runtime abstraction layer for background tile fetches
//!
//! The loader only needs "spawn this future" and "abort it later". Tokio is
//! the default; a host that owns a different executor can install its own
//! spawner with [`init_runtime`] before the first fetch is queued.

use futures::future::BoxFuture;
use std::future::Future;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Spawn onto the installed runtime
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    /// Spawns onto the tokio runtime the caller is running inside.
    ///
    /// Panics (like `tokio::spawn`) when used outside a runtime context.
    pub struct TokioSpawner;

    impl AsyncSpawner for TokioSpawner {
        fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Box<dyn AsyncHandle> {
            Box::new(TokioHandle(tokio::spawn(future)))
        }
    }

    struct TokioHandle(tokio::task::JoinHandle<()>);

    impl AsyncHandle for TokioHandle {
        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn cancel(&self) {
            self.0.abort();
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Install a spawner. Only the first call has an effect.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) -> bool {
    let installed = RUNTIME.set(spawner).is_ok();
    if !installed {
        log::debug!("runtime already initialised, keeping the existing spawner");
    }
    installed
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| Box::new(spawners::TokioSpawner))
        .as_ref()
}
