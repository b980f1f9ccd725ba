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

//! The abstract syntax tree produced by [`crate::parser`].
//!
//! Every string here is owned: unlike the macro-expansion-scoped AST this module is grounded
//! on, `parse()` is a library entry point whose result may outlive the source buffer it was
//! parsed from (see DESIGN.md).

/// A fully parsed WebIDL fragment: every top-level definition in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ast {
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Interface(Interface),
    InterfaceMixin(InterfaceMixin),
    Dictionary(Dictionary),
    Enum(Enum),
    Typedef(Typedef),
    Callback(Callback),
    CallbackInterface(CallbackInterface),
    Includes(Includes),
    Namespace(Namespace),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: String,
    pub inherits: Option<String>,
    pub members: Vec<InterfaceMember>,
    pub extended_attributes: Vec<ExtendedAttribute>,
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceMixin {
    pub name: String,
    pub members: Vec<InterfaceMember>,
    pub extended_attributes: Vec<ExtendedAttribute>,
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    pub name: String,
    pub inherits: Option<String>,
    pub members: Vec<DictionaryMember>,
    pub extended_attributes: Vec<ExtendedAttribute>,
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryMember {
    pub name: String,
    pub ty: Type,
    pub required: bool,
    pub default: Option<Value>,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<String>,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Typedef {
    pub name: String,
    pub ty: Type,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Callback {
    pub name: String,
    pub return_type: Type,
    pub arguments: Vec<Argument>,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallbackInterface {
    pub name: String,
    pub members: Vec<InterfaceMember>,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Includes {
    pub interface: String,
    pub mixin: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: String,
    pub members: Vec<InterfaceMember>,
    pub extended_attributes: Vec<ExtendedAttribute>,
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceMember {
    Attribute(Attribute),
    Operation(Operation),
    Const(Const),
    Constructor(Vec<Argument>, Vec<ExtendedAttribute>),
    Stringifier(Stringifier),
    Iterable(Iterable),
    AsyncIterable(AsyncIterable),
    Maplike(Maplike),
    Setlike(Setlike),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub ty: Type,
    pub readonly: bool,
    pub static_: bool,
    pub stringifier: bool,
    pub inherit: bool,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOperation {
    Getter,
    Setter,
    Deleter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub name: Option<String>,
    pub return_type: Type,
    pub arguments: Vec<Argument>,
    pub static_: bool,
    pub special: Option<SpecialOperation>,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Const {
    pub name: String,
    pub ty: Type,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stringifier {
    Bare,
    Attribute(Attribute),
    Operation(Operation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Iterable {
    pub key_type: Option<Type>,
    pub value_type: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsyncIterable {
    pub key_type: Option<Type>,
    pub value_type: Type,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Maplike {
    pub key_type: Type,
    pub value_type: Type,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Setlike {
    pub value_type: Type,
    pub readonly: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
    pub variadic: bool,
    pub default: Option<Value>,
    pub extended_attributes: Vec<ExtendedAttribute>,
}

/// Every WebIDL type, in the shape the parser builds them: primitives as bare variants,
/// parameterized forms recursively boxing their element type(s).
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Any,
    Undefined,
    Boolean,
    Byte,
    Octet,
    Short,
    UnsignedShort,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    UnrestrictedFloat,
    Double,
    UnrestrictedDouble,
    BigInt,
    DOMString,
    ByteString,
    USVString,
    Object,
    Symbol,
    Identifier(String),
    Sequence(Box<Type>),
    FrozenArray(Box<Type>),
    ObservableArray(Box<Type>),
    Record(Box<Type>, Box<Type>),
    Promise(Box<Type>),
    Nullable(Box<Type>),
    Union(Vec<Type>),
    BufferSource(BufferSourceKind),
}

impl Type {
    /// `true` for the string-keyed primitive types `record<K, _>` requires as its key type.
    pub fn is_valid_record_key(&self) -> bool {
        matches!(self, Type::DOMString | Type::ByteString | Type::USVString)
    }
}

/// The buffer source types, https://webidl.spec.whatwg.org/#idl-buffer-source-types -- each is
/// its own grammar terminal (not a plain identifier), like `Promise` or `FrozenArray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferSourceKind {
    ArrayBuffer,
    SharedArrayBuffer,
    DataView,
    Int8Array,
    Int16Array,
    Int32Array,
    Uint8Array,
    Uint16Array,
    Uint32Array,
    Uint8ClampedArray,
    BigInt64Array,
    BigUint64Array,
    Float32Array,
    Float64Array,
}

/// A literal or structural value, as it appears in a `const` declaration or a default argument
/// or dictionary-member value. Integer and float variants retain the original source lexeme
/// alongside the parsed number, per the literal-preservation requirement in the external
/// interface (round-trip tools need to tell `0` from `0.0`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer { value: i64, lexeme: String },
    Float { value: f64, lexeme: String },
    String(String),
    EmptySequence,
    EmptyDictionary,
    Infinity,
    NegativeInfinity,
    NaN,
}

/// An extended attribute, recorded verbatim for later passes; the parser never interprets the
/// value shapes itself (see COMPONENT DESIGN §4.2).
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedAttribute {
    pub name: String,
    pub value: Option<ExtendedAttributeValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtendedAttributeValue {
    Identifier(String),
    IdentifierList(Vec<String>),
    ArgumentList(Vec<Argument>),
    NamedArgumentList(String, Vec<Argument>),
}

impl ExtendedAttribute {
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_validity() {
        assert!(Type::DOMString.is_valid_record_key());
        assert!(!Type::Long.is_valid_record_key());
    }

    #[test]
    fn extended_attribute_matching() {
        let attr = ExtendedAttribute { name: "Clamp".into(), value: None };
        assert!(attr.is_named("Clamp"));
        assert!(!attr.is_named("EnforceRange"));
    }
}
