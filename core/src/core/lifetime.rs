// agrirent-flow/src/core/lifetime.rs

//! View-scoped cancellation for flow runs.
//!
//! A `ViewLifetime` is opened when a view (a screen, or the HTTP request
//! standing in for one) starts asynchronous work. The paired `LifetimeGuard`
//! is held by the view; when the guard is dropped, or `dismiss` is called, the
//! lifetime is over. `Flow::run_within` checks the lifetime before every stage
//! and returns `FlowOutcome::Dismissed` instead of applying further results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ViewLifetime {
  dismissed: Arc<AtomicBool>,
}

impl ViewLifetime {
  /// Opens a lifetime and returns it with the guard that ends it on drop.
  pub fn open() -> (ViewLifetime, LifetimeGuard) {
    let lifetime = ViewLifetime {
      dismissed: Arc::new(AtomicBool::new(false)),
    };
    let guard = LifetimeGuard {
      lifetime: lifetime.clone(),
    };
    (lifetime, guard)
  }

  /// A lifetime that is never dismissed. Used by `Flow::run`.
  pub fn detached() -> ViewLifetime {
    ViewLifetime {
      dismissed: Arc::new(AtomicBool::new(false)),
    }
  }

  pub fn is_active(&self) -> bool {
    !self.dismissed.load(Ordering::Acquire)
  }

  pub fn dismiss(&self) {
    self.dismissed.store(true, Ordering::Release);
  }
}

/// Ends its `ViewLifetime` when dropped.
#[derive(Debug)]
pub struct LifetimeGuard {
  lifetime: ViewLifetime,
}

impl LifetimeGuard {
  pub fn lifetime(&self) -> &ViewLifetime {
    &self.lifetime
  }
}

impl Drop for LifetimeGuard {
  fn drop(&mut self) {
    self.lifetime.dismiss();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guard_drop_dismisses_every_clone() {
    let (lifetime, guard) = ViewLifetime::open();
    let seen_by_task = lifetime.clone();
    assert!(seen_by_task.is_active());
    drop(guard);
    assert!(!lifetime.is_active());
    assert!(!seen_by_task.is_active());
  }

  #[test]
  fn detached_lifetime_stays_active_until_dismissed() {
    let lifetime = ViewLifetime::detached();
    assert!(lifetime.is_active());
    lifetime.dismiss();
    assert!(!lifetime.is_active());
  }
}
