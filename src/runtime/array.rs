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

//! `FrozenArray<T>` (https://webidl.spec.whatwg.org/#idl-frozen-array) and `ObservableArray<T>`
//! (https://webidl.spec.whatwg.org/#idl-observable-array).

use super::error::ErrorResult;

/// An immutable snapshot taken at construction time. There is no setter at all: producing a new
/// value means building a new `FrozenArray`, matching how the standard's "frozen array type"
/// is really just `Object.freeze`'d once and never touched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenArray<T>(Vec<T>);

impl<T> FrozenArray<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

/// A callback invoked before an `ObservableArray` mutation is committed. Returning an error
/// aborts the mutation: the backing storage is left exactly as it was.
pub type MutationObserver<T> = dyn Fn(&ObservableArrayOp<'_, T>, &mut ErrorResult);

/// Describes the pending mutation an observer is asked to approve, mirroring the algorithm steps
/// in https://webidl.spec.whatwg.org/#observable-array-exotic-object-set (set/delete-by-index
/// and the indirect mutations `push`/`pop`/`shift`/`unshift`/`splice`/`length=` reduce to).
pub enum ObservableArrayOp<'a, T> {
    SetIndex { index: usize, value: &'a T },
    DeleteIndex { index: usize },
}

/// A live array whose mutations are observable: every insert/removal calls a caller-supplied
/// callback first, and a failing callback aborts the mutation entirely instead of leaving the
/// array partially updated.
pub struct ObservableArray<T> {
    items: Vec<T>,
    on_set: Box<MutationObserver<T>>,
    on_delete: Box<MutationObserver<T>>,
}

impl<T> ObservableArray<T> {
    pub fn new(on_set: Box<MutationObserver<T>>, on_delete: Box<MutationObserver<T>>) -> Self {
        Self { items: Vec::new(), on_set, on_delete }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Sets (or appends, if `index == len()`) the element at `index`. If the observer callback
    /// throws, the array is left untouched and the exception is reported through `err`.
    pub fn set(&mut self, index: usize, value: T, err: &mut ErrorResult) {
        (self.on_set)(&ObservableArrayOp::SetIndex { index, value: &value }, err);
        if err.has_failed() {
            return;
        }
        if index == self.items.len() {
            self.items.push(value);
        } else if index < self.items.len() {
            self.items[index] = value;
        } else {
            err.throw_range_error("index out of bounds for ObservableArray");
        }
    }

    pub fn push(&mut self, value: T, err: &mut ErrorResult) {
        let index = self.items.len();
        self.set(index, value, err);
    }

    /// Removes the element at `index`, shifting later elements down. Aborts (leaving the array
    /// untouched) if the observer callback throws.
    pub fn delete(&mut self, index: usize, err: &mut ErrorResult) {
        if index >= self.items.len() {
            err.throw_range_error("index out of bounds for ObservableArray");
            return;
        }
        (self.on_delete)(&ObservableArrayOp::DeleteIndex { index }, err);
        if err.has_failed() {
            return;
        }
        self.items.remove(index);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_array_has_no_mutation_methods() {
        let arr = FrozenArray::new(vec![1, 2, 3]);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(1), Some(&2));
    }

    #[test]
    fn observable_array_set_commits_on_success() {
        let mut arr = ObservableArray::new(Box::new(|_, _| {}), Box::new(|_, _| {}));
        let mut err = ErrorResult::new();
        arr.push(10, &mut err);
        arr.push(20, &mut err);
        assert!(!err.has_failed());
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.get(0), Some(&10));
    }

    #[test]
    fn observable_array_set_aborts_when_observer_throws() {
        let mut arr = ObservableArray::new(
            Box::new(|_, err: &mut ErrorResult| err.throw_type_error("rejected")),
            Box::new(|_, _| {}),
        );
        let mut err = ErrorResult::new();
        arr.push(10, &mut err);
        assert!(err.has_failed());
        assert_eq!(arr.len(), 0);
    }

    #[test]
    fn observable_array_delete_aborts_when_observer_throws() {
        let mut arr = ObservableArray::new(Box::new(|_, _| {}), Box::new(|_, err: &mut ErrorResult| err.throw_type_error("rejected")));
        let mut ok_err = ErrorResult::new();
        arr.push(10, &mut ok_err);
        let mut err = ErrorResult::new();
        arr.delete(0, &mut err);
        assert!(err.has_failed());
        assert_eq!(arr.len(), 1);
    }
}
