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

//! `enum`, https://webidl.spec.whatwg.org/#idl-enums. A binding generator would normally turn
//! each `enum` definition into its own Rust enum with a generated `TryFrom<&str>`; this module is
//! the runtime-checked fallback for callers that only have the value set at hand (e.g. while
//! still holding an [`crate::ast::Enum`] rather than code generated from one), and it's what the
//! conversion-by-string-match half of that generated `TryFrom` would actually call.

use super::error::ErrorResult;

/// A string value whose membership in `VALUES` is checked at conversion time rather than
/// encoded in the type itself. `VALUES` should match an IDL `enum`'s declared value list
/// verbatim, including casing -- enum matching is exact, not case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration<const N: usize> {
    value: &'static str,
}

impl<const N: usize> Enumeration<N> {
    /// https://webidl.spec.whatwg.org/#es-enumeration -- throws `TypeError` if `candidate` is not
    /// one of `values` (for `[LegacyNullToEmptyString]`-free enums, `null`/`undefined` are simply
    /// stringified first by the caller's `ToDOMString` step, same as for any other string type).
    pub fn try_from_str(candidate: &str, values: &[&'static str; N], err: &mut ErrorResult) -> Option<Self> {
        match values.iter().find(|v| **v == candidate) {
            Some(matched) => Some(Self { value: matched }),
            None => {
                err.throw_type_error(format!("\"{candidate}\" is not a valid value for this enumeration"));
                None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: [&str; 3] = ["red", "green", "blue"];

    #[test]
    fn accepts_member_of_value_set() {
        let mut err = ErrorResult::new();
        let e = Enumeration::try_from_str("green", &COLORS, &mut err);
        assert!(!err.has_failed());
        assert_eq!(e.unwrap().as_str(), "green");
    }

    #[test]
    fn rejects_value_outside_set() {
        let mut err = ErrorResult::new();
        let e = Enumeration::try_from_str("purple", &COLORS, &mut err);
        assert!(err.has_failed());
        assert!(e.is_none());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut err = ErrorResult::new();
        let e = Enumeration::try_from_str("Red", &COLORS, &mut err);
        assert!(err.has_failed());
        assert!(e.is_none());
    }
}
