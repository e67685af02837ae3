use crate::callbacks::Payload;
use crate::error::IndyError;
use crate::types::CommandHandle;
use indy_common::logging::{Component, Logger};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Delivers the outcome of one native command to whoever is waiting on it
pub type Continuation = Box<dyn FnOnce(Result<Payload, IndyError>) + Send + 'static>;

/// Registry of pending native commands keyed by [`CommandHandle`].
///
/// Continuations can only leave the registry through [`remove`], so each one
/// is handed out at most once.
///
/// [`remove`]: CallbackRegistry::remove
pub struct CallbackRegistry {
    pending: Mutex<HashMap<CommandHandle, Continuation>>,
    logger: Logger,
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            logger: Logger::new_root(Component::Registry),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CommandHandle, Continuation>> {
        // Continuations never run under the lock, a poisoned map is still consistent.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a continuation under a fresh random handle
    pub fn register(&self, continuation: Continuation) -> CommandHandle {
        let mut rng = rand::thread_rng();
        let mut pending = self.lock();
        loop {
            let candidate = CommandHandle(rng.gen_range(1..=i32::MAX));
            if !pending.contains_key(&candidate) {
                pending.insert(candidate, continuation);
                self.logger
                    .debug_args(format_args!("registered command {candidate} ({} pending)", pending.len()));
                return candidate;
            }
        }
    }

    /// Take the continuation registered under `handle`, if it is still pending
    pub fn remove(&self, handle: CommandHandle) -> Option<Continuation> {
        let removed = self.lock().remove(&handle);
        if removed.is_none() {
            self.logger
                .debug_args(format_args!("command {handle} is not pending"));
        }
        removed
    }

    /// Number of commands still waiting for completion
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

lazy_static::lazy_static! {
    static ref COMMAND_REGISTRY: CallbackRegistry = CallbackRegistry::new();
}

/// The process-wide registry the callback entry points resolve against
pub fn command_registry() -> &'static CallbackRegistry {
    &COMMAND_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    fn noop() -> Continuation {
        Box::new(|_| {})
    }

    #[test]
    fn test_remove_hands_out_continuation_once() {
        let registry = CallbackRegistry::new();
        let handle = registry.register(noop());

        assert!(registry.remove(handle).is_some());
        assert!(registry.remove(handle).is_none(), "second remove must miss");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_handle_is_not_found() {
        let registry = CallbackRegistry::new();
        assert!(registry.remove(CommandHandle(7)).is_none());
    }

    #[test]
    fn test_handles_are_positive() {
        let registry = CallbackRegistry::new();
        for _ in 0..1000 {
            let handle = registry.register(noop());
            assert!(handle.0 > 0);
        }
        assert_eq!(registry.len(), 1000);
    }

    #[test]
    fn test_removed_continuation_delivers() {
        let registry = CallbackRegistry::new();
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = delivered.clone();
        let handle = registry.register(Box::new(move |result| {
            assert_eq!(result, Ok(Payload::Bool(true)));
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let continuation = registry.remove(handle).expect("handle should be pending");
        continuation(Ok(Payload::Bool(true)));
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_registrations_never_collide() {
        let registry = Arc::new(CallbackRegistry::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || (0..500).map(|_| registry.register(noop())).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for t in threads {
            for handle in t.join().expect("registering thread panicked") {
                assert!(seen.insert(handle), "handle {handle} issued twice");
            }
        }
        assert_eq!(seen.len(), 4000);
        assert_eq!(registry.len(), 4000);
    }

    #[test]
    fn test_concurrent_register_remove_delivers_exactly_once() {
        let registry = Arc::new(CallbackRegistry::new());
        let successes = Arc::new(AtomicUsize::new(0));
        let misses = Arc::new(AtomicUsize::new(0));

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                let successes = successes.clone();
                let misses = misses.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        let handle = registry.register(noop());
                        // Two racing removers per handle
                        let racer = {
                            let registry = registry.clone();
                            thread::spawn(move || registry.remove(handle).is_some())
                        };
                        let mine = registry.remove(handle).is_some();
                        let theirs = racer.join().expect("racing remover panicked");
                        for won in [mine, theirs] {
                            if won {
                                successes.fetch_add(1, Ordering::SeqCst);
                            } else {
                                misses.fetch_add(1, Ordering::SeqCst);
                            }
                        }
                    }
                })
            })
            .collect();

        for t in threads {
            t.join().expect("worker panicked");
        }
        assert_eq!(successes.load(Ordering::SeqCst), 2000);
        assert_eq!(misses.load(Ordering::SeqCst), 2000);
        assert!(registry.is_empty());
    }
}
