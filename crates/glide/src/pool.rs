//! Free-list pooling for per-animation objects.
//!
//! Timers and option bundles are created and discarded on every animation
//! attempt, a per-frame hot path. Pooling them keeps that path allocation
//! free after warm-up. An instance sitting in a pool holds no references to
//! a prior animation's state: items are reset when returned and reset again
//! on checkout, so a stale reference can never leak between animations.

/// A poolable object.
pub trait PoolItem {
    /// Construct a brand-new instance.
    fn fresh() -> Self;

    /// Return the instance to its pristine state, dropping every reference
    /// to prior animation state.
    fn reset(&mut self);
}

/// A free-list of previously used instances.
///
/// Mutated only from the single execution context; no interior locking.
#[derive(Debug, Default)]
pub struct Pool<T> {
    free: Vec<T>,
}

impl<T: PoolItem> Pool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self { free: Vec::new() }
    }

    /// Take an instance out of the pool, reinitializing it, or build a fresh
    /// one when the pool is empty.
    pub fn checkout(&mut self) -> T {
        match self.free.pop() {
            Some(mut item) => {
                item.reset();
                item
            }
            None => T::fresh(),
        }
    }

    /// Return an instance to the pool for reuse.
    pub fn give_back(&mut self, mut item: T) {
        item.reset();
        self.free.push(item);
    }

    /// Number of idle instances currently pooled.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Returns true when no idle instances are pooled.
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: u32,
        resets: u32,
    }

    impl PoolItem for Counter {
        fn fresh() -> Self {
            Self { value: 0, resets: 0 }
        }

        fn reset(&mut self) {
            self.value = 0;
            self.resets += 1;
        }
    }

    #[test]
    fn test_checkout_from_empty_builds_fresh() {
        let mut pool: Pool<Counter> = Pool::new();
        let item = pool.checkout();
        assert_eq!(item.value, 0);
        assert_eq!(item.resets, 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_give_back_and_reuse() {
        let mut pool: Pool<Counter> = Pool::new();
        let mut item = pool.checkout();
        item.value = 42;

        pool.give_back(item);
        assert_eq!(pool.idle(), 1);

        // Reset on return and again on checkout: no stale state survives.
        let reused = pool.checkout();
        assert_eq!(reused.value, 0);
        assert_eq!(reused.resets, 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_grows_to_peak_concurrency() {
        let mut pool: Pool<Counter> = Pool::new();
        let a = pool.checkout();
        let b = pool.checkout();
        pool.give_back(a);
        pool.give_back(b);
        assert_eq!(pool.idle(), 2);

        // Sequential reuse does not grow the pool further.
        let c = pool.checkout();
        pool.give_back(c);
        assert_eq!(pool.idle(), 2);
    }
}
