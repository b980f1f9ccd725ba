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

//! A parser and runtime type system for the WHATWG WebIDL language, as specified at
//! [https://webidl.spec.whatwg.org/].
//!
//! This crate is split into two halves that only share the [`error`] module's conventions:
//!
//! * [`lex`] and [`parse`] turn WebIDL source text into a typed [`ast::Ast`], covering the full
//!   grammar -- interfaces (including `partial` and `mixin` variants), dictionaries,
//!   enumerations, typedefs, callbacks, callback interfaces, namespaces, `includes` statements,
//!   extended attributes, and every nested/parameterized/union/nullable type shape the grammar
//!   allows.
//! * [`runtime`] implements the JavaScript-to-IDL conversion algorithms from WebIDL's section on
//!   ECMAScript binding (`ToBoolean`, the integer family with `[Clamp]`/`[EnforceRange]`,
//!   `ToFloat`/`ToDouble`, `ToBigInt`, the string conversions), the `DOMException`/`ErrorResult`
//!   error-propagation model, and the generic wrapper types (`Sequence`, `Record`, `Maplike`,
//!   `Setlike`, `FrozenArray`, `ObservableArray`, `Promise`, `AsyncSequence`) that binding
//!   generators target.
//!
//! This crate does not generate code from the parsed AST and does not execute WebIDL bindings
//! against a real JavaScript engine; both are left to callers built on top of it.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod token;

pub use ast::Ast;
pub use error::ParseError;
pub use parser::{parse, ParserOptions};
pub use token::{Token, TokenKind};

/// Tokenizes `source` into its full token stream, ending with an [`TokenKind::Eof`] token.
/// Exposed for test harnesses and tools that want to inspect lexing independently of parsing.
pub fn lex(source: &str) -> Vec<Token> {
    lexer::lex(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Definition;

    #[test]
    fn parses_and_converts_end_to_end() {
        let ast = parse(
            "[Exposed=Window]\n\
             interface Point {\n\
                 constructor(double x, double y);\n\
                 readonly attribute double x;\n\
                 readonly attribute double y;\n\
                 DOMString toString();\n\
             };",
            ParserOptions::default(),
        )
        .expect("valid WebIDL should parse");

        assert_eq!(ast.definitions.len(), 1);
        match &ast.definitions[0] {
            Definition::Interface(iface) => {
                assert_eq!(iface.name, "Point");
                assert_eq!(iface.extended_attributes[0].name, "Exposed");
                assert_eq!(iface.members.len(), 4);
            }
            other => panic!("expected an interface, got {other:?}"),
        }
    }
}
