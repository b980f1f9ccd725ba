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

//! Union types, https://webidl.spec.whatwg.org/#idl-union. `(A or B)` maps to `Union2<A, B>`;
//! wider unions nest, e.g. `(A or B or C)` is `Union2<A, Union2<B, C>>`, the same way the parsed
//! [`crate::ast::Type::Union`] variant is just a flat member list a binding generator flattens
//! back into nested pairs.

#[derive(Debug, Clone, PartialEq)]
pub enum Union2<A, B> {
    First(A),
    Second(B),
}

impl<A, B> Union2<A, B> {
    pub fn first(&self) -> Option<&A> {
        match self {
            Union2::First(a) => Some(a),
            Union2::Second(_) => None,
        }
    }

    pub fn second(&self) -> Option<&B> {
        match self {
            Union2::First(_) => None,
            Union2::Second(b) => Some(b),
        }
    }

    pub fn map<A2, B2>(self, f: impl FnOnce(A) -> A2, g: impl FnOnce(B) -> B2) -> Union2<A2, B2> {
        match self {
            Union2::First(a) => Union2::First(f(a)),
            Union2::Second(b) => Union2::Second(g(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_second_are_mutually_exclusive() {
        let u: Union2<i32, String> = Union2::First(1);
        assert_eq!(u.first(), Some(&1));
        assert_eq!(u.second(), None);
    }

    #[test]
    fn nesting_models_wider_unions() {
        let u: Union2<i32, Union2<String, bool>> = Union2::Second(Union2::Second(true));
        assert_eq!(u.second().and_then(|inner| inner.second()), Some(&true));
    }
}
