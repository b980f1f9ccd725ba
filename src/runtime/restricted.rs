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

//! Extensions to Rust's floating-point numbers needed for type safety in IDL's `float`/`double`
//! conversions, which reject NaN and infinities (`unrestricted float`/`unrestricted double` do
//! not, and skip this wrapper entirely).

pub trait Float: Copy {
    fn is_finite_value(self) -> bool;
}

impl Float for f32 {
    fn is_finite_value(self) -> bool {
        f32::is_finite(self)
    }
}

impl Float for f64 {
    fn is_finite_value(self) -> bool {
        f64::is_finite(self)
    }
}

/// A floating-point number guaranteed to be finite (not infinite, not NaN).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Restricted<T: Float>(T);

impl<T: Float> Restricted<T> {
    /// Constructs a restricted float from `val`, if it is finite; `None` otherwise.
    pub fn try_new(val: T) -> Option<Self> {
        if val.is_finite_value() {
            Some(Self(val))
        } else {
            None
        }
    }

    /// Constructs a restricted float without checking finiteness. Misusing this breaks the
    /// invariant every other method relies on.
    pub unsafe fn new_unchecked(val: T) -> Self {
        Self(val)
    }

    pub fn get(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_and_infinities() {
        assert!(Restricted::try_new(f64::NAN).is_none());
        assert!(Restricted::try_new(f64::INFINITY).is_none());
        assert!(Restricted::try_new(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn accepts_finite_values() {
        let r = Restricted::try_new(3.5_f64).unwrap();
        assert_eq!(r.get(), 3.5);
    }
}
