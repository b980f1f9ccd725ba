/* Copyright (c) 2024 Jeremy Davis (jeremydavis519@gmail.com)
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the "Software"), to deal in the Software without restriction,
 * including without limitation the rights to use, copy, modify, merge, publish, distribute,
 * sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
 * NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 */

//! `async iterable<T>`, https://webidl.spec.whatwg.org/#idl-async-iterable. The standard leaves
//! how values actually arrive up to the interface author; this module gives the two shapes that
//! show up in practice: a pull source the consumer drives, and a push source a producer feeds
//! into a bounded queue the consumer drains.

use std::fmt;

use super::error::ErrorResult;

/// A pull-based async sequence: calling `next` asks the underlying source to produce (or fail
/// to produce) the next value, once per call. `None` signals the sequence is exhausted.
pub struct AsyncSequence<T> {
    source: Box<dyn FnMut(&mut ErrorResult) -> Option<T>>,
}

impl<T> AsyncSequence<T> {
    pub fn new(source: Box<dyn FnMut(&mut ErrorResult) -> Option<T>>) -> Self {
        Self { source }
    }

    /// Returns a promise that resolves with the next value, or stays unfulfilled with no value
    /// queued if the sequence is exhausted -- callers should check `is_done` first, mirroring the
    /// standard's `{ value, done }` iterator result shape via the two-step call below.
    pub fn next(&mut self) -> (Option<T>, ErrorResult) {
        let mut err = ErrorResult::new();
        let value = (self.source)(&mut err);
        (value, err)
    }
}

/// A push-based async sequence: a producer calls `push`/`close`/`fail` as values become
/// available, and a consumer calls `next` to get a promise for the next queued value. Unlike
/// `AsyncSequence`, the producer and consumer are decoupled in time -- values pushed before a
/// `next` call are buffered rather than dropped.
/// Returned by [`BufferedAsyncSequence::push`] when the producer keeps writing after `close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceClosed;

impl fmt::Display for SequenceClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot push to a closed sequence")
    }
}

impl std::error::Error for SequenceClosed {}

pub struct BufferedAsyncSequence<T> {
    buffer: std::collections::VecDeque<T>,
    closed: bool,
}

impl<T: Clone> Default for BufferedAsyncSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> BufferedAsyncSequence<T> {
    pub fn new() -> Self {
        Self { buffer: std::collections::VecDeque::new(), closed: false }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Enqueues a value for a future `next` call. Fails with [`SequenceClosed`] once `close` has
    /// been called, matching the standard's "once the queue is closed no further chunks are
    /// enqueued" behavior for readable-stream-backed iterables.
    pub fn push(&mut self, value: T) -> Result<(), SequenceClosed> {
        if self.closed {
            return Err(SequenceClosed);
        }
        self.buffer.push_back(value);
        Ok(())
    }

    /// Marks the sequence exhausted; every future `next` call resolves with `None` once the
    /// buffer drains.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Resolves with the next buffered value, or `None` if the sequence is closed and empty.
    /// Returns `None` immediately for an open, empty sequence -- there is no way to suspend
    /// execution here without an executor, so callers must poll.
    pub fn next(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    pub fn is_exhausted(&self) -> bool {
        self.closed && self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_sequence_yields_values_until_exhausted() {
        let mut values = vec![1, 2, 3].into_iter();
        let mut seq = AsyncSequence::new(Box::new(move |_| values.next()));
        let (v1, err1) = seq.next();
        assert_eq!(v1, Some(1));
        assert!(!err1.has_failed());
        let (v2, _) = seq.next();
        assert_eq!(v2, Some(2));
        let (v3, _) = seq.next();
        assert_eq!(v3, Some(3));
        let (v4, _) = seq.next();
        assert_eq!(v4, None);
    }

    #[test]
    fn pull_sequence_reports_failure_through_error_result() {
        let mut seq: AsyncSequence<i32> = AsyncSequence::new(Box::new(|err| {
            err.throw_type_error("source failed");
            None
        }));
        let (value, err) = seq.next();
        assert_eq!(value, None);
        assert!(err.has_failed());
    }

    #[test]
    fn buffered_sequence_drains_in_order() {
        let mut seq = BufferedAsyncSequence::new();
        seq.push(1).unwrap();
        seq.push(2).unwrap();
        assert_eq!(seq.next(), Some(1));
        assert_eq!(seq.next(), Some(2));
        assert_eq!(seq.next(), None);
        assert!(!seq.is_exhausted());
    }

    #[test]
    fn buffered_sequence_is_exhausted_after_close_and_drain() {
        let mut seq = BufferedAsyncSequence::new();
        seq.push(1).unwrap();
        seq.close();
        assert_eq!(seq.next(), Some(1));
        assert!(seq.is_exhausted());
        assert_eq!(seq.push(2), Err(SequenceClosed));
        assert_eq!(seq.next(), None);
    }
}
