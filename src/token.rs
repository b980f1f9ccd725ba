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

//! The token kinds produced by [`crate::lexer`], shared with [`crate::parser`].

/// A single lexical token: a kind, the exact source text it was recognized from, and its
/// starting position. `lexeme` is kept even for keywords and punctuation so that error messages
/// can quote the offending text verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: String, line: u32, column: u32) -> Self {
        Self { kind, lexeme, line, column }
    }
}

/// Every distinguishable kind of WebIDL token, including reserved words that this crate
/// recognizes but never requires (the legacy CORBA-IDL leftovers `in`, `raises`, `pragma`,
/// `module`; see DESIGN.md Open Question 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literal categories
    Identifier,
    StringLiteral,
    IntegerLiteral,
    FloatLiteral,

    // Boolean/null/numeric keywords that double as literal values
    True,
    False,
    Null,
    Infinity,
    NegativeInfinity,
    NaN,

    // Punctuation
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Less,
    Greater,
    Equals,
    Colon,
    DoubleColon,
    Semicolon,
    Comma,
    Question,
    Ellipsis,
    Minus,
    Star,

    // Reserved words used by the grammar
    Attribute,
    Callback,
    Const,
    Constructor,
    Deleter,
    Dictionary,
    Enum,
    Getter,
    Includes,
    Inherit,
    Interface,
    Iterable,
    Maplike,
    Mixin,
    Namespace,
    Partial,
    Readonly,
    Required,
    Setlike,
    Setter,
    Static,
    Stringifier,
    Typedef,
    Unrestricted,

    // Type keywords
    Any,
    Boolean,
    Byte,
    ByteString,
    DOMString,
    Double,
    Float,
    FrozenArray,
    Long,
    Object,
    ObservableArray,
    Octet,
    Promise,
    Record,
    Sequence,
    Short,
    Symbol,
    Undefined,
    Unsigned,
    USVString,
    BigInt,

    // Buffer source types, https://webidl.spec.whatwg.org/#idl-buffer-source-types
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

    Or,
    Optional,

    // Legacy CORBA-IDL tokens: recognized, never required by any grammar production
    In,
    Raises,
    Pragma,
    Module,

    Eof,
    Invalid,
}

/// Maps a collected identifier-like lexeme to its keyword token kind, if any. Lookup happens
/// after the lexer has already collected the full run of identifier characters, mirroring
/// `idl2rust::parser::keyword`'s longest-match-first approach (it never mistakes `longWord` for
/// the keyword `long` followed by an identifier because it always verifies against the whole
/// identifier run, not a prefix).
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match word {
        "true" => True,
        "false" => False,
        "null" => Null,
        "Infinity" => Infinity,
        "-Infinity" => NegativeInfinity,
        "NaN" => NaN,

        "attribute" => Attribute,
        "callback" => Callback,
        "const" => Const,
        "constructor" => Constructor,
        "deleter" => Deleter,
        "dictionary" => Dictionary,
        "enum" => Enum,
        "getter" => Getter,
        "includes" => Includes,
        "inherit" => Inherit,
        "interface" => Interface,
        "iterable" => Iterable,
        "maplike" => Maplike,
        "mixin" => Mixin,
        "namespace" => Namespace,
        "partial" => Partial,
        "readonly" => Readonly,
        "required" => Required,
        "setlike" => Setlike,
        "setter" => Setter,
        "static" => Static,
        "stringifier" => Stringifier,
        "typedef" => Typedef,
        "unrestricted" => Unrestricted,

        "any" => Any,
        "boolean" => Boolean,
        "byte" => Byte,
        "ByteString" => ByteString,
        "DOMString" => DOMString,
        "double" => Double,
        "float" => Float,
        "FrozenArray" => FrozenArray,
        "long" => Long,
        "object" => Object,
        "ObservableArray" => ObservableArray,
        "octet" => Octet,
        "Promise" => Promise,
        "record" => Record,
        "sequence" => Sequence,
        "short" => Short,
        "symbol" => Symbol,
        "undefined" => Undefined,
        "unsigned" => Unsigned,
        "USVString" => USVString,
        "bigint" => BigInt,

        "ArrayBuffer" => ArrayBuffer,
        "SharedArrayBuffer" => SharedArrayBuffer,
        "DataView" => DataView,
        "Int8Array" => Int8Array,
        "Int16Array" => Int16Array,
        "Int32Array" => Int32Array,
        "Uint8Array" => Uint8Array,
        "Uint16Array" => Uint16Array,
        "Uint32Array" => Uint32Array,
        "Uint8ClampedArray" => Uint8ClampedArray,
        "BigInt64Array" => BigInt64Array,
        "BigUint64Array" => BigUint64Array,
        "Float32Array" => Float32Array,
        "Float64Array" => Float64Array,

        "or" => Or,
        "optional" => Optional,

        "in" => In,
        "raises" => Raises,
        "pragma" => Pragma,
        "module" => Module,

        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_type_keywords() {
        assert_eq!(lookup_keyword("unsigned"), Some(TokenKind::Unsigned));
        assert_eq!(lookup_keyword("DOMString"), Some(TokenKind::DOMString));
    }

    #[test]
    fn leaves_unknown_words_as_identifiers() {
        assert_eq!(lookup_keyword("longWord"), None);
        assert_eq!(lookup_keyword("HTMLElement"), None);
    }

    #[test]
    fn recognizes_legacy_corba_keywords() {
        assert_eq!(lookup_keyword("raises"), Some(TokenKind::Raises));
        assert_eq!(lookup_keyword("module"), Some(TokenKind::Module));
    }
}
