//! Generic object pool.
//!
//! Two disjoint subsets:
//! - `available`: inactive objects, already reset, ready to hand out (LIFO).
//! - `in_use`: objects currently attached to live entity lists.
//!
//! `acquire` moves available -> in use (creating through the caller's factory when
//! empty), `release` resets through the caller's routine and moves in use -> available.
//! Pools grow monotonically and never shrink.
//!
//! The factory and reset routine are passed per call rather than stored, so a pool of
//! ECS entities can create/reset through `Commands` without owning a world borrow.

use std::fmt::Debug;
use std::hash::Hash;

use bevy::platform::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("released an object that is not in use (double release or foreign object)")]
    NotInUse,
    #[error("stocked an object the pool already tracks")]
    AlreadyTracked,
}

#[derive(Debug)]
pub struct ObjectPool<T> {
    available: Vec<T>,
    in_use: HashSet<T>,
    created: usize,
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self {
            available: Vec::new(),
            in_use: HashSet::default(),
            created: 0,
        }
    }
}

impl<T: Copy + Eq + Hash + Debug> ObjectPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out an available object, or construct a new one with `create`.
    pub fn acquire(&mut self, create: impl FnOnce() -> T) -> T {
        let obj = match self.available.pop() {
            Some(obj) => obj,
            None => {
                self.created += 1;
                create()
            }
        };
        self.in_use.insert(obj);
        obj
    }

    /// Reset `obj` and make it available again.
    ///
    /// Releasing an object that is not in use leaves the pool untouched and does not
    /// run `reset`.
    pub fn release(&mut self, obj: T, reset: impl FnOnce(T)) -> Result<(), PoolError> {
        if !self.in_use.remove(&obj) {
            return Err(PoolError::NotInUse);
        }
        reset(obj);
        self.available.push(obj);
        Ok(())
    }

    /// Add an already-inactive object (prewarm).
    pub fn stock(&mut self, obj: T) -> Result<(), PoolError> {
        if self.owns(obj) {
            return Err(PoolError::AlreadyTracked);
        }
        self.created += 1;
        self.available.push(obj);
        Ok(())
    }

    #[inline]
    pub fn owns(&self, obj: T) -> bool {
        self.in_use.contains(&obj) || self.available.contains(&obj)
    }

    #[inline]
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    #[inline]
    pub fn in_use_len(&self) -> usize {
        self.in_use.len()
    }

    /// Total objects ever created by (or stocked into) this pool.
    #[inline]
    pub fn created(&self) -> usize {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_factory(next: &mut u32) -> impl FnOnce() -> u32 + '_ {
        move || {
            *next += 1;
            *next
        }
    }

    #[test]
    fn acquire_from_empty_pool_creates_distinct_objects() {
        let mut pool = ObjectPool::<u32>::new();
        let mut next = 0;

        let a = pool.acquire(counter_factory(&mut next));
        let b = pool.acquire(counter_factory(&mut next));
        let c = pool.acquire(counter_factory(&mut next));

        assert!(a != b && b != c && a != c);
        assert_eq!(pool.in_use_len(), 3);
        assert_eq!(pool.created(), 3);
    }

    #[test]
    fn acquire_after_release_reuses_a_released_object() {
        let mut pool = ObjectPool::<u32>::new();
        let mut next = 0;

        let a = pool.acquire(counter_factory(&mut next));
        let b = pool.acquire(counter_factory(&mut next));
        let _c = pool.acquire(counter_factory(&mut next));

        pool.release(a, |_| {}).unwrap();
        pool.release(b, |_| {}).unwrap();

        let reused = pool.acquire(counter_factory(&mut next));
        assert!(reused == a || reused == b);
        assert_eq!(pool.created(), 3, "no new allocation");
        assert_eq!(next, 3);
    }

    #[test]
    fn release_runs_reset_once() {
        let mut pool = ObjectPool::<u32>::new();
        let obj = pool.acquire(|| 7);

        let mut resets = Vec::new();
        pool.release(obj, |o| resets.push(o)).unwrap();

        assert_eq!(resets, vec![7]);
        assert_eq!(pool.available_len(), 1);
        assert_eq!(pool.in_use_len(), 0);
    }

    #[test]
    fn double_release_is_rejected_without_reset() {
        let mut pool = ObjectPool::<u32>::new();
        let obj = pool.acquire(|| 1);
        pool.release(obj, |_| {}).unwrap();

        let mut reset_ran = false;
        let err = pool.release(obj, |_| reset_ran = true);

        assert_eq!(err, Err(PoolError::NotInUse));
        assert!(!reset_ran);
        assert_eq!(pool.available_len(), 1, "no duplicate in the free list");
    }

    #[test]
    fn foreign_release_is_rejected() {
        let mut pool = ObjectPool::<u32>::new();
        assert_eq!(pool.release(99, |_| {}), Err(PoolError::NotInUse));
    }

    #[test]
    fn stock_prewarms_without_marking_in_use() {
        let mut pool = ObjectPool::<u32>::new();
        pool.stock(10).unwrap();
        pool.stock(11).unwrap();
        assert_eq!(pool.stock(10), Err(PoolError::AlreadyTracked));

        let got = pool.acquire(|| unreachable!("prewarmed pool must not allocate"));
        assert!(got == 10 || got == 11);
        assert_eq!(pool.created(), 2);
    }

    /// Scripted acquire/release sequence: live objects never exceed
    /// acquires - releases and are always distinct.
    #[test]
    fn live_set_never_aliases_under_mixed_sequence() {
        let mut pool = ObjectPool::<u32>::new();
        let mut next = 0;
        let mut live: Vec<u32> = Vec::new();
        let mut acquires = 0usize;
        let mut releases = 0usize;

        // Deterministic op pattern: a = acquire, r = release oldest.
        for op in "aaararraaaarrrraarar".chars() {
            match op {
                'a' => {
                    let obj = pool.acquire(counter_factory(&mut next));
                    assert!(!live.contains(&obj), "pooled object handed out twice");
                    live.push(obj);
                    acquires += 1;
                }
                _ => {
                    if live.is_empty() {
                        continue;
                    }
                    let obj = live.remove(0);
                    pool.release(obj, |_| {}).unwrap();
                    releases += 1;
                }
            }
            assert_eq!(live.len(), acquires - releases);
            assert_eq!(pool.in_use_len(), live.len());
        }
    }
}
