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

//! `DOMException`, `SimpleException`, and `ErrorResult`: the universal error-propagation channel
//! for every conversion and wrapper operation in [`super`].
//!
//! https://webidl.spec.whatwg.org/#idl-DOMException

use std::fmt;

/// https://webidl.spec.whatwg.org/#dom-domexception-code -- a legacy numeric code for the
/// original 21 CSS/DOM exception names, 0 for everything added since.
#[derive(Debug, Clone, PartialEq)]
pub struct DOMException {
    name: String,
    message: String,
}

impl DOMException {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), message: message.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    // https://webidl.spec.whatwg.org/#dom-domexception-code
    pub fn code(&self) -> u16 {
        [
            ("IndexSizeError", 1),
            ("HierarchyRequestError", 3),
            ("WrongDocumentError", 4),
            ("InvalidCharacterError", 5),
            ("NoModificationAllowedError", 7),
            ("NotFoundError", 8),
            ("NotSupportedError", 9),
            ("InUseAttributeError", 10),
            ("InvalidStateError", 11),
            ("SyntaxError", 12),
            ("InvalidModificationError", 13),
            ("NamespaceError", 14),
            ("InvalidAccessError", 15),
            ("TypeMismatchError", 17),
            ("SecurityError", 18),
            ("NetworkError", 19),
            ("AbortError", 20),
            ("URLMismatchError", 21),
            ("QuotaExceededError", 22),
            ("TimeoutError", 23),
            ("InvalidNodeTypeError", 24),
            ("DataCloneError", 25),
        ]
        .iter()
        .find(|&&(name, _)| name == self.name)
        .map(|&(_, code)| code)
        .unwrap_or(0)
    }
}

impl fmt::Display for DOMException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for DOMException {}

/// The full set of accepted `DOMException` names, in the order the standard lists them.
pub const DOM_EXCEPTION_NAMES: &[&str] = &[
    "IndexSizeError",
    "HierarchyRequestError",
    "WrongDocumentError",
    "InvalidCharacterError",
    "NoModificationAllowedError",
    "NotFoundError",
    "NotSupportedError",
    "InUseAttributeError",
    "InvalidStateError",
    "SyntaxError",
    "InvalidModificationError",
    "NamespaceError",
    "InvalidAccessError",
    "TypeMismatchError",
    "SecurityError",
    "NetworkError",
    "AbortError",
    "URLMismatchError",
    "QuotaExceededError",
    "TimeoutError",
    "InvalidNodeTypeError",
    "DataCloneError",
    "EncodingError",
    "NotReadableError",
    "UnknownError",
    "ConstraintError",
    "DataError",
    "TransactionInactiveError",
    "ReadOnlyError",
    "VersionError",
    "OperationError",
    "NotAllowedError",
    "OptOutError",
];

/// The ECMAScript "simple" exceptions that conversion algorithms throw directly, as opposed to a
/// named `DOMException`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleExceptionKind {
    TypeError,
    RangeError,
    SyntaxError,
    URIError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleException {
    pub kind: SimpleExceptionKind,
    pub message: String,
}

impl SimpleException {
    pub fn new(kind: SimpleExceptionKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(SimpleExceptionKind::TypeError, message)
    }

    pub fn range_error(message: impl Into<String>) -> Self {
        Self::new(SimpleExceptionKind::RangeError, message)
    }

    pub fn syntax_error(message: impl Into<String>) -> Self {
        Self::new(SimpleExceptionKind::SyntaxError, message)
    }

    pub fn uri_error(message: impl Into<String>) -> Self {
        Self::new(SimpleExceptionKind::URIError, message)
    }
}

impl fmt::Display for SimpleException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SimpleException {}

#[derive(Debug, Clone, PartialEq)]
pub enum Exception {
    Simple(SimpleException),
    Dom(DOMException),
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exception::Simple(e) => e.fmt(f),
            Exception::Dom(e) => e.fmt(f),
        }
    }
}

/// The universal non-unwinding error channel conversion functions and wrapper operations use:
/// they return their ordinary result (possibly a sentinel value on failure) and populate this
/// out-parameter instead of raising. Callers must check [`ErrorResult::has_failed`] before
/// trusting the accompanying result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorResult {
    exception: Option<Exception>,
}

impl ErrorResult {
    pub fn new() -> Self {
        Self { exception: None }
    }

    pub fn has_failed(&self) -> bool {
        self.exception.is_some()
    }

    pub fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    pub fn clear(&mut self) {
        self.exception = None;
    }

    pub fn throw_simple(&mut self, exc: SimpleException) {
        self.exception = Some(Exception::Simple(exc));
    }

    pub fn throw_dom(&mut self, exc: DOMException) {
        self.exception = Some(Exception::Dom(exc));
    }

    pub fn throw_type_error(&mut self, message: impl Into<String>) {
        self.throw_simple(SimpleException::type_error(message));
    }

    pub fn throw_range_error(&mut self, message: impl Into<String>) {
        self.throw_simple(SimpleException::range_error(message));
    }

    pub fn throw_syntax_error(&mut self, message: impl Into<String>) {
        self.throw_simple(SimpleException::syntax_error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_codes_match_the_fixed_table() {
        assert_eq!(DOMException::new("IndexSizeError", "").code(), 1);
        assert_eq!(DOMException::new("DataCloneError", "").code(), 25);
    }

    #[test]
    fn post_2022_names_have_code_zero() {
        assert_eq!(DOMException::new("EncodingError", "").code(), 0);
        assert_eq!(DOMException::new("OptOutError", "").code(), 0);
    }

    #[test]
    fn unknown_name_has_code_zero() {
        assert_eq!(DOMException::new("NotARealError", "").code(), 0);
    }

    #[test]
    fn error_result_replaces_prior_exception_on_rethrow() {
        let mut result = ErrorResult::new();
        result.throw_type_error("first");
        result.throw_range_error("second");
        assert!(result.has_failed());
        match result.exception().unwrap() {
            Exception::Simple(e) => assert_eq!(e.kind, SimpleExceptionKind::RangeError),
            _ => panic!("expected a simple exception"),
        }
    }

    #[test]
    fn all_thirty_three_names_are_listed() {
        assert_eq!(DOM_EXCEPTION_NAMES.len(), 33);
    }
}
