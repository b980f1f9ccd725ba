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

//! Buffer source conversion, https://webidl.spec.whatwg.org/#es-buffer-source-types. This crate
//! has no JS engine behind it, so a `BufferSourceDescriptor` is the caller's declaration of the
//! state a real `ArrayBuffer`/typed array would be in; `check` applies the same
//! detached/shared/resizable rules the spec's conversion algorithm does.

use crate::ast::BufferSourceKind;

use super::error::ErrorResult;

/// The state of a host-provided buffer source at the point of conversion. A real binding layer
/// would read these off the underlying `ArrayBuffer`/typed array rather than construct this by
/// hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSourceDescriptor {
    pub kind: BufferSourceKind,
    pub shared: bool,
    pub resizable: bool,
    pub detached: bool,
}

impl BufferSourceDescriptor {
    pub fn new(kind: BufferSourceKind) -> Self {
        Self { kind, shared: false, resizable: false, detached: false }
    }

    /// https://webidl.spec.whatwg.org/#es-buffer-source-types -- a detached buffer always fails
    /// conversion; a shared buffer only passes if `[AllowShared]` was declared on the IDL type,
    /// and likewise a resizable one needs `[AllowResizable]`.
    pub fn check(&self, allow_shared: bool, allow_resizable: bool, err: &mut ErrorResult) {
        if self.detached {
            err.throw_type_error("buffer source is detached");
            return;
        }
        if self.shared && !allow_shared {
            err.throw_type_error("a SharedArrayBuffer is not allowed here; the IDL type lacks [AllowShared]");
            return;
        }
        if self.resizable && !allow_resizable {
            err.throw_type_error("a resizable buffer is not allowed here; the IDL type lacks [AllowResizable]");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_buffer_always_fails() {
        let mut err = ErrorResult::new();
        let desc = BufferSourceDescriptor { detached: true, ..BufferSourceDescriptor::new(BufferSourceKind::ArrayBuffer) };
        desc.check(true, true, &mut err);
        assert!(err.has_failed());
    }

    #[test]
    fn shared_buffer_needs_allow_shared() {
        let mut err = ErrorResult::new();
        let desc = BufferSourceDescriptor { shared: true, ..BufferSourceDescriptor::new(BufferSourceKind::Int8Array) };
        desc.check(false, false, &mut err);
        assert!(err.has_failed());

        let mut err2 = ErrorResult::new();
        desc.check(true, false, &mut err2);
        assert!(!err2.has_failed());
    }

    #[test]
    fn resizable_buffer_needs_allow_resizable() {
        let mut err = ErrorResult::new();
        let desc = BufferSourceDescriptor { resizable: true, ..BufferSourceDescriptor::new(BufferSourceKind::Uint8Array) };
        desc.check(false, false, &mut err);
        assert!(err.has_failed());

        let mut err2 = ErrorResult::new();
        desc.check(false, true, &mut err2);
        assert!(!err2.has_failed());
    }

    #[test]
    fn ordinary_buffer_passes() {
        let mut err = ErrorResult::new();
        let desc = BufferSourceDescriptor::new(BufferSourceKind::DataView);
        desc.check(false, false, &mut err);
        assert!(!err.has_failed());
    }
}
