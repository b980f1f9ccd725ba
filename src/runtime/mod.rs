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

//! The runtime half of the crate: JS-to-IDL conversions, the error-propagation model, and the
//! generic wrapper types a binding generator would hand out for `sequence<T>`, `record<K,V>`,
//! `Promise<T>`, and friends.

pub mod array;
pub mod async_sequence;
pub mod buffer;
pub mod collections;
pub mod convert;
pub mod enumeration;
pub mod error;
pub mod jsvalue;
pub mod maplike_setlike;
pub mod primitive;
pub mod promise;
pub mod restricted;
pub mod union;

pub use collections::{OrderedMap, OrderedSet, Record, Sequence};
pub use convert::ConversionModifiers;
pub use error::{DOMException, ErrorResult, SimpleException};
pub use jsvalue::JSValue;
pub use primitive::{forgiving_base64_decode, forgiving_base64_encode, Base64DecodeError, Utf16CodeUnits};
