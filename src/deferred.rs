// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Write-once asynchronous values and join combinators.
//!
//! A [`Deferred`] is a value a resource provider has promised but not yet
//! delivered. Consumers register continuations against it; the continuation
//! runs once the value arrives. Joining several deferreds produces a deferred
//! that resolves only after all of its inputs have.

use futures::future;
use tokio::sync::watch;
use tracing::debug;

/// A cloneable handle to a value that resolves at most once.
#[derive(Debug, Clone)]
pub struct Deferred<T> {
    rx: watch::Receiver<Option<T>>,
}

/// The producing side of a [`Deferred`]. Consuming `resolve` enforces
/// single assignment; dropping the resolver abandons the value.
#[derive(Debug)]
pub struct Resolver<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> Resolver<T> {
    /// Deliver the value. Consumers waiting on the paired [`Deferred`]
    /// wake up; later clones observe it immediately.
    pub fn resolve(self, value: T) {
        if self.tx.send(Some(value)).is_err() {
            debug!("Deferred value resolved after all consumers were dropped");
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Deferred<T> {
    /// Create an unresolved value and the resolver that completes it.
    pub fn pending() -> (Resolver<T>, Deferred<T>) {
        let (tx, rx) = watch::channel(None);
        (Resolver { tx }, Deferred { rx })
    }

    /// A value that is already available.
    pub fn resolved(value: T) -> Deferred<T> {
        let (tx, rx) = watch::channel(Some(value));
        drop(tx);
        Deferred { rx }
    }

    /// A value that will never resolve. Consumers observe it as permanently
    /// pending; `wait` reports abandonment instead of suspending forever.
    pub fn never() -> Deferred<T> {
        let (_, deferred) = Self::pending();
        deferred
    }

    /// Non-blocking peek at the current state.
    pub fn try_get(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Suspend until the value is delivered. Returns `None` when the
    /// producer was dropped without resolving (an aborted run).
    pub async fn wait(mut self) -> Option<T> {
        match self.rx.wait_for(|value| value.is_some()).await {
            Ok(value) => value.clone(),
            Err(_) => None,
        }
    }

    /// Register a continuation over the resolved value, producing a new
    /// deferred. Registration schedules a task and never blocks; if this
    /// value never resolves, neither does the result.
    pub fn apply<U, F>(self, f: F) -> Deferred<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.and_then(|value| Some(f(value)))
    }

    /// Like [`Deferred::apply`], but the continuation may decline to resolve
    /// the result by returning `None`. Non-completion then propagates to all
    /// downstream consumers without an error payload.
    pub fn and_then<U, F>(self, f: F) -> Deferred<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Option<U> + Send + 'static,
    {
        let (resolver, result) = Deferred::pending();
        tokio::spawn(async move {
            if let Some(value) = self.wait().await {
                if let Some(mapped) = f(value) {
                    resolver.resolve(mapped);
                }
            }
        });
        result
    }
}

/// Join two deferred values into a deferred pair.
pub fn zip<A, B>(a: Deferred<A>, b: Deferred<B>) -> Deferred<(A, B)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    let (resolver, result) = Deferred::pending();
    tokio::spawn(async move {
        let (a, b) = tokio::join!(a.wait(), b.wait());
        if let (Some(a), Some(b)) = (a, b) {
            resolver.resolve((a, b));
        }
    });
    result
}

/// Join three deferred values into a deferred triple. The continuation
/// behind the result fires only once all three inputs have resolved.
pub fn zip3<A, B, C>(a: Deferred<A>, b: Deferred<B>, c: Deferred<C>) -> Deferred<(A, B, C)>
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    let (resolver, result) = Deferred::pending();
    tokio::spawn(async move {
        let (a, b, c) = tokio::join!(a.wait(), b.wait(), c.wait());
        if let (Some(a), Some(b), Some(c)) = (a, b, c) {
            resolver.resolve((a, b, c));
        }
    });
    result
}

/// Join a homogeneous list of deferred values.
pub fn all<T>(items: Vec<Deferred<T>>) -> Deferred<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    let (resolver, result) = Deferred::pending();
    tokio::spawn(async move {
        let resolved = future::join_all(items.into_iter().map(Deferred::wait)).await;
        if let Some(values) = resolved.into_iter().collect::<Option<Vec<T>>>() {
            resolver.resolve(values);
        }
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn test_resolved_value_is_immediately_available() {
        let value = Deferred::resolved(42);
        assert_eq!(value.try_get(), Some(42));
        assert_eq!(value.wait().await, Some(42));
    }

    #[tokio::test]
    async fn test_pending_value_resolves_once_delivered() {
        let (resolver, value) = Deferred::pending();
        assert_eq!(value.try_get(), None);

        resolver.resolve("endpoint".to_string());
        assert_eq!(value.wait().await, Some("endpoint".to_string()));
    }

    #[tokio::test]
    async fn test_clones_observe_the_same_value() {
        let (resolver, value) = Deferred::pending();
        let copy = value.clone();

        resolver.resolve(7);
        assert_eq!(value.wait().await, Some(7));
        assert_eq!(copy.wait().await, Some(7));
    }

    #[tokio::test]
    async fn test_unresolved_value_never_completes() {
        let (_resolver, value) = Deferred::<i32>::pending();
        assert!(timeout(WAIT, value.wait()).await.is_err());
    }

    #[tokio::test]
    async fn test_dropped_resolver_reports_abandonment() {
        let (resolver, value) = Deferred::<i32>::pending();
        drop(resolver);
        assert_eq!(value.wait().await, None);
    }

    #[tokio::test]
    async fn test_never_reports_abandonment() {
        assert_eq!(Deferred::<i32>::never().wait().await, None);
        assert_eq!(Deferred::<i32>::never().try_get(), None);
    }

    #[tokio::test]
    async fn test_apply_transforms_the_resolved_value() {
        let (resolver, value) = Deferred::pending();
        let doubled = value.apply(|v: i32| v * 2);

        resolver.resolve(21);
        assert_eq!(doubled.wait().await, Some(42));
    }

    #[tokio::test]
    async fn test_apply_on_unresolved_input_never_completes() {
        let (_resolver, value) = Deferred::<i32>::pending();
        let mapped = value.apply(|v| v + 1);
        assert!(timeout(WAIT, mapped.wait()).await.is_err());
    }

    #[tokio::test]
    async fn test_and_then_declining_propagates_non_completion() {
        let mapped = Deferred::resolved(1).and_then(|_| None::<i32>);
        assert_eq!(mapped.wait().await, None);
    }

    #[tokio::test]
    async fn test_zip3_resolves_after_all_inputs() {
        let (ra, a) = Deferred::pending();
        let (rb, b) = Deferred::pending();
        let (rc, c) = Deferred::pending();
        let joined = zip3(a, b, c);

        // Deliver out of declaration order
        rc.resolve("c".to_string());
        ra.resolve("a".to_string());
        rb.resolve("b".to_string());

        assert_eq!(
            joined.wait().await,
            Some(("a".to_string(), "b".to_string(), "c".to_string()))
        );
    }

    #[tokio::test]
    async fn test_zip3_with_one_unresolved_input_never_completes() {
        let (ra, a) = Deferred::pending();
        let (rb, b) = Deferred::pending();
        let (_rc, c) = Deferred::<String>::pending();
        let joined = zip3(a, b, c);

        ra.resolve("a".to_string());
        rb.resolve("b".to_string());

        assert!(timeout(WAIT, joined.wait()).await.is_err());
    }

    #[tokio::test]
    async fn test_zip_resolves_pairs() {
        let pair = zip(Deferred::resolved(1), Deferred::resolved("x"));
        assert_eq!(pair.wait().await, Some((1, "x")));
    }

    #[tokio::test]
    async fn test_all_joins_every_input() {
        let (resolver, pending) = Deferred::pending();
        let joined = all(vec![Deferred::resolved(1), Deferred::resolved(2), pending]);

        resolver.resolve(3);
        assert_eq!(joined.wait().await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_all_with_abandoned_input_reports_abandonment() {
        let joined = all(vec![Deferred::resolved(1), Deferred::never()]);
        assert_eq!(joined.wait().await, None);
    }
}
