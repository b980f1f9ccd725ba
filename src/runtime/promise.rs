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

//! `Promise<T>`, https://webidl.spec.whatwg.org/#idl-promise. This crate has no event loop or
//! microtask queue of its own, so a `Promise` here is just its resolution state plus the
//! callbacks waiting on it; a host environment drives `resolve`/`reject` and this module's job
//! is only to get the settled value to every callback exactly once, in order.

use super::error::Exception;

#[derive(Debug, Clone, PartialEq)]
enum Settlement<T> {
    Pending,
    Fulfilled(T),
    Rejected(Exception),
}

/// A `Promise<T>`. Unlike the JS original, there is no automatic "thenable unwrapping" here --
/// this crate has no engine to recursively resolve a value against -- so resolving with a `T`
/// always fulfills directly.
pub struct Promise<T> {
    settlement: Settlement<T>,
    on_fulfill: Vec<Box<dyn FnOnce(&T)>>,
    on_reject: Vec<Box<dyn FnOnce(&Exception)>>,
}

impl<T: Clone> Default for Promise<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Promise<T> {
    pub fn new() -> Self {
        Self { settlement: Settlement::Pending, on_fulfill: Vec::new(), on_reject: Vec::new() }
    }

    pub fn resolved(value: T) -> Self {
        let mut p = Self::new();
        p.resolve(value);
        p
    }

    pub fn rejected(exception: Exception) -> Self {
        let mut p = Self::new();
        p.reject(exception);
        p
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.settlement, Settlement::Pending)
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self.settlement, Settlement::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.settlement, Settlement::Rejected(_))
    }

    /// Fulfills the promise. A promise settles at most once; calling this (or `reject`) again
    /// after settlement is a no-op, matching the standard's "resolving functions" idempotence.
    pub fn resolve(&mut self, value: T) {
        if !self.is_pending() {
            return;
        }
        for callback in self.on_fulfill.drain(..) {
            callback(&value);
        }
        self.on_reject.clear();
        self.settlement = Settlement::Fulfilled(value);
    }

    pub fn reject(&mut self, exception: Exception) {
        if !self.is_pending() {
            return;
        }
        for callback in self.on_reject.drain(..) {
            callback(&exception);
        }
        self.on_fulfill.clear();
        self.settlement = Settlement::Rejected(exception);
    }

    /// Registers callbacks, running the applicable one immediately if already settled.
    pub fn then(&mut self, on_fulfill: Box<dyn FnOnce(&T)>, on_reject: Box<dyn FnOnce(&Exception)>) {
        match &self.settlement {
            Settlement::Pending => {
                self.on_fulfill.push(on_fulfill);
                self.on_reject.push(on_reject);
            }
            Settlement::Fulfilled(value) => on_fulfill(value),
            Settlement::Rejected(exception) => on_reject(exception),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::SimpleException;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn resolve_settles_and_notifies_pending_callback() {
        let seen = Rc::new(RefCell::new(None));
        let mut p = Promise::new();
        let seen2 = seen.clone();
        p.then(Box::new(move |v: &i32| *seen2.borrow_mut() = Some(*v)), Box::new(|_| {}));
        p.resolve(42);
        assert_eq!(*seen.borrow(), Some(42));
        assert!(p.is_fulfilled());
    }

    #[test]
    fn then_after_settlement_runs_immediately() {
        let mut p = Promise::resolved(7);
        let seen = Rc::new(RefCell::new(None));
        let seen2 = seen.clone();
        p.then(Box::new(move |v: &i32| *seen2.borrow_mut() = Some(*v)), Box::new(|_| {}));
        assert_eq!(*seen.borrow(), Some(7));
    }

    #[test]
    fn second_settlement_is_ignored() {
        let mut p = Promise::new();
        p.resolve(1);
        p.resolve(2);
        assert!(p.is_fulfilled());
        match p.settlement {
            Settlement::Fulfilled(v) => assert_eq!(v, 1),
            _ => panic!("expected fulfilled"),
        }
    }

    #[test]
    fn reject_notifies_rejection_callback() {
        let seen = Rc::new(RefCell::new(false));
        let mut p: Promise<i32> = Promise::new();
        let seen2 = seen.clone();
        p.then(Box::new(|_| {}), Box::new(move |_| *seen2.borrow_mut() = true));
        p.reject(Exception::Simple(SimpleException::type_error("nope")));
        assert!(*seen.borrow());
        assert!(p.is_rejected());
    }
}
