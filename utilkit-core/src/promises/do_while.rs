//! Sequential do-while loops over async actions

use std::future::{Future, Ready};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::trace;

/// A value that is either available now or produced by a future
///
/// Lets a loop condition be synchronous (`|| count < 3`) or asynchronous
/// (`|| MaybeFuture::pending(check())`) behind one signature.
pub enum MaybeFuture<'a, T> {
    Ready(Ready<T>),
    Pending(BoxFuture<'a, T>),
}

impl<'a, T> MaybeFuture<'a, T> {
    pub fn ready(value: T) -> Self {
        MaybeFuture::Ready(std::future::ready(value))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'a,
    {
        MaybeFuture::Pending(future.boxed())
    }
}

impl<'a, T> From<T> for MaybeFuture<'a, T> {
    fn from(value: T) -> Self {
        MaybeFuture::ready(value)
    }
}

impl<'a, T> Future for MaybeFuture<'a, T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        match self.get_mut() {
            MaybeFuture::Ready(ready) => Pin::new(ready).poll(cx),
            MaybeFuture::Pending(future) => future.as_mut().poll(cx),
        }
    }
}

/// Run `action`, then keep running it while `condition` holds
///
/// The action always runs at least once. Iterations never overlap: the next
/// action starts only after the previous action and the condition have both
/// completed. The action's output is discarded. Returns the number of times
/// the action ran.
///
/// # Example
/// ```rust
/// # tokio_test::block_on(async {
/// use utilkit_core::promises::do_while;
///
/// let mut polls = 0;
/// let runs = do_while(|| async {}, || {
///     polls += 1;
///     polls < 3
/// })
/// .await;
/// assert_eq!(runs, 3);
/// # });
/// ```
pub async fn do_while<'a, A, AF, T, C, M>(mut action: A, mut condition: C) -> usize
where
    A: FnMut() -> AF,
    AF: Future<Output = T>,
    C: FnMut() -> M,
    M: Into<MaybeFuture<'a, bool>>,
{
    let mut iterations = 0;
    loop {
        action().await;
        iterations += 1;
        let next: MaybeFuture<'a, bool> = condition().into();
        if !next.await {
            break;
        }
        trace!(iterations, "do_while continuing");
    }
    iterations
}

/// Fallible [`do_while`]: stops at the first action error and returns it
pub async fn try_do_while<'a, A, AF, T, E, C, M>(
    mut action: A,
    mut condition: C,
) -> Result<usize, E>
where
    A: FnMut() -> AF,
    AF: Future<Output = Result<T, E>>,
    C: FnMut() -> M,
    M: Into<MaybeFuture<'a, bool>>,
{
    let mut iterations = 0;
    loop {
        action().await?;
        iterations += 1;
        let next: MaybeFuture<'a, bool> = condition().into();
        if !next.await {
            break;
        }
        trace!(iterations, "try_do_while continuing");
    }
    Ok(iterations)
}
