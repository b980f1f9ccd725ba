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

//! [`JSValue`], the sole input accepted by every conversion function in [`super::convert`].

use num_bigint::BigInt;

/// An opaque handle to a JavaScript object. This crate never executes script, so an `object`
/// value carries nothing but an identity a caller's host environment can resolve; equality is
/// by handle, not by structural value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub u64);

/// A JS-shaped value: the tagged sum every conversion algorithm in [`super::convert`] consumes.
/// Nothing else is an acceptable input to `ToBoolean`, `ToLong`, `ToDOMString`, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum JSValue {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    BigInt(BigInt),
    /// A UTF-16 code unit sequence, matching how ECMAScript strings are actually indexed; this
    /// is what lets `ToByteString`/`ToUSVString` reason about unpaired surrogates.
    String(Vec<u16>),
    Object(ObjectHandle),
}

impl JSValue {
    pub fn from_str(s: &str) -> Self {
        JSValue::String(s.encode_utf16().collect())
    }

    /// ECMAScript `ToBoolean`: everything is truthy except `undefined`, `null`, `false`, `±0`,
    /// `NaN`, `BigInt` zero, and the empty string.
    pub fn to_boolean(&self) -> bool {
        match self {
            JSValue::Undefined | JSValue::Null => false,
            JSValue::Boolean(b) => *b,
            JSValue::Number(n) => *n != 0.0 && !n.is_nan(),
            JSValue::BigInt(b) => !b.eq(&BigInt::from(0)),
            JSValue::String(s) => !s.is_empty(),
            JSValue::Object(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_boolean_matches_ecmascript_falsy_set() {
        assert!(!JSValue::Undefined.to_boolean());
        assert!(!JSValue::Null.to_boolean());
        assert!(!JSValue::Number(0.0).to_boolean());
        assert!(!JSValue::Number(f64::NAN).to_boolean());
        assert!(!JSValue::from_str("").to_boolean());
        assert!(JSValue::from_str("a").to_boolean());
        assert!(JSValue::Number(1.0).to_boolean());
    }
}
