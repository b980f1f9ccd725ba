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

//! This module defines the parser that powers the whole crate. It's all based directly on the
//! grammar and semantics at [https://webidl.spec.whatwg.org/].
//!
//! Every grammar production gets its own method, named and commented the way the fused
//! lexer-parser this crate started from names and comments its own `nom` parsers -- but this
//! parser consumes a token stream rather than raw text, since the separate `Lexer` is part of
//! the public surface and error positions need to survive past tokenization.

use crate::ast::*;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::lex_with_options;
use crate::token::{Token, TokenKind};

/// Configuration passed into [`Parser::new`] / [`parse`](crate::parse). There is presently one
/// knob: whether to tolerate hyphens inside identifiers, a WebIDL-adjacent convention some older
/// IDL files use that the WHATWG grammar itself does not sanction.
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    pub legacy_identifier_hyphens: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        // The lexer this crate is grounded on accepted internal hyphens unconditionally; no
        // caller in its own codebase ever needed to turn that off.
        Self { legacy_identifier_hyphens: true }
    }
}

type PResult<T> = Result<T, ParseError>;

pub fn parse(source: &str, options: ParserOptions) -> PResult<Ast> {
    let tokens = lex_with_options(source, options);
    let mut parser = Parser::new(&tokens, options);
    parser.parse_ast()
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    // Consulted by the lexer before `Parser::new` is ever called (see `parse` above); kept here
    // too so a grammar-level option could read it without changing every call site's signature.
    #[allow(dead_code)]
    options: ParserOptions,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], options: ParserOptions) -> Self {
        Self { tokens, pos: 0, options }
    }

    // ---- token-stream primitives ----------------------------------------------------------

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("expected {:?}", kind)))
        }
    }

    fn unexpected(&self, message: &str) -> ParseError {
        let tok = self.peek();
        ParseError::new(
            ParseErrorKind::UnexpectedToken,
            tok.line,
            tok.column,
            format!("{message}, found {:?} ({:?})", tok.kind, tok.lexeme),
        )
    }

    fn err_at(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        let tok = self.peek();
        ParseError::new(kind, tok.line, tok.column, message.into())
    }

    // https://webidl.spec.whatwg.org/#index-prod-Definitions
    pub fn parse_ast(&mut self) -> PResult<Ast> {
        let mut definitions = Vec::new();
        while !self.at(TokenKind::Eof) {
            let attrs = self.extended_attribute_list()?;
            definitions.push(self.definition(attrs)?);
        }
        Ok(Ast { definitions })
    }

    // https://webidl.spec.whatwg.org/#index-prod-Definition
    fn definition(&mut self, attrs: Vec<ExtendedAttribute>) -> PResult<Definition> {
        match self.peek_kind() {
            TokenKind::Callback => self.callback_or_callback_interface(attrs),
            TokenKind::Interface => self.interface_or_mixin(attrs, false),
            TokenKind::Partial => self.partial_definition(attrs),
            TokenKind::Dictionary => Ok(Definition::Dictionary(self.dictionary(attrs, false)?)),
            TokenKind::Enum => Ok(Definition::Enum(self.idl_enum(attrs)?)),
            TokenKind::Typedef => Ok(Definition::Typedef(self.typedef(attrs)?)),
            TokenKind::Namespace => Ok(Definition::Namespace(self.namespace(attrs, false)?)),
            TokenKind::Identifier if self.peek_at(1).kind == TokenKind::Includes => {
                Ok(Definition::Includes(self.includes_statement()?))
            }
            _ => Err(self.unexpected("expected a definition")),
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-CallbackOrInterfaceOrMixin (callback half)
    fn callback_or_callback_interface(&mut self, attrs: Vec<ExtendedAttribute>) -> PResult<Definition> {
        self.expect(TokenKind::Callback)?;
        if self.at(TokenKind::Interface) {
            self.advance();
            let name = self.identifier()?;
            let members = self.delimited_members(Self::interface_member)?;
            Ok(Definition::CallbackInterface(CallbackInterface { name, members, extended_attributes: attrs }))
        } else {
            let name = self.identifier()?;
            self.expect(TokenKind::Equals)?;
            let return_type = self.ty()?;
            let arguments = self.argument_list_parens()?;
            self.expect(TokenKind::Semicolon)?;
            Ok(Definition::Callback(Callback { name, return_type, arguments, extended_attributes: attrs }))
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-InterfaceOrMixin
    fn interface_or_mixin(&mut self, attrs: Vec<ExtendedAttribute>, partial: bool) -> PResult<Definition> {
        self.expect(TokenKind::Interface)?;
        if self.at(TokenKind::Mixin) {
            self.advance();
            let name = self.identifier()?;
            let members = self.delimited_members(Self::interface_member)?;
            Ok(Definition::InterfaceMixin(InterfaceMixin { name, members, extended_attributes: attrs, partial }))
        } else {
            let name = self.identifier()?;
            let inherits = self.inheritance()?;
            let members = self.delimited_members(Self::interface_member)?;
            Ok(Definition::Interface(Interface { name, inherits, members, extended_attributes: attrs, partial }))
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-Partial
    fn partial_definition(&mut self, attrs: Vec<ExtendedAttribute>) -> PResult<Definition> {
        self.expect(TokenKind::Partial)?;
        match self.peek_kind() {
            TokenKind::Interface => self.interface_or_mixin(attrs, true),
            TokenKind::Dictionary => Ok(Definition::Dictionary(self.dictionary(attrs, true)?)),
            TokenKind::Namespace => Ok(Definition::Namespace(self.namespace(attrs, true)?)),
            _ => Err(self.unexpected("expected interface, dictionary or namespace after 'partial'")),
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-Inheritance
    fn inheritance(&mut self) -> PResult<Option<String>> {
        if self.eat(TokenKind::Colon) {
            Ok(Some(self.identifier()?))
        } else {
            Ok(None)
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-IncludesStatement
    fn includes_statement(&mut self) -> PResult<Includes> {
        let interface = self.identifier()?;
        self.expect(TokenKind::Includes)?;
        let mixin = self.identifier()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Includes { interface, mixin })
    }

    // https://webidl.spec.whatwg.org/#index-prod-Dictionary
    fn dictionary(&mut self, attrs: Vec<ExtendedAttribute>, partial: bool) -> PResult<Dictionary> {
        self.expect(TokenKind::Dictionary)?;
        let name = self.identifier()?;
        let inherits = self.inheritance()?;
        let members = self.delimited_members(Self::dictionary_member)?;
        Ok(Dictionary { name, inherits, members, extended_attributes: attrs, partial })
    }

    // https://webidl.spec.whatwg.org/#index-prod-DictionaryMember
    fn dictionary_member(&mut self) -> PResult<DictionaryMember> {
        let member_attrs = self.extended_attribute_list()?;
        let required = self.eat(TokenKind::Required);
        let ty = self.ty()?;
        let name = self.identifier()?;
        let default = if self.eat(TokenKind::Equals) { Some(self.default_value()?) } else { None };
        if required && default.is_some() {
            return Err(self.err_at(
                ParseErrorKind::UnexpectedDefaultValue,
                "a 'required' dictionary member cannot have a default value",
            ));
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(DictionaryMember { name, ty, required, default, extended_attributes: member_attrs })
    }

    // https://webidl.spec.whatwg.org/#index-prod-Enum
    fn idl_enum(&mut self, attrs: Vec<ExtendedAttribute>) -> PResult<Enum> {
        self.expect(TokenKind::Enum)?;
        let name = self.identifier()?;
        self.expect(TokenKind::OpenBrace)?;
        let mut values = Vec::new();
        loop {
            let tok = self.expect(TokenKind::StringLiteral)?;
            if values.contains(&tok.lexeme) {
                return Err(ParseError::new(
                    ParseErrorKind::DuplicateEnumValue,
                    tok.line,
                    tok.column,
                    format!("duplicate enum value {:?}", tok.lexeme),
                ));
            }
            values.push(tok.lexeme);
            if !self.eat(TokenKind::Comma) {
                break;
            }
            // Trailing comma before the closing brace is allowed.
            if self.at(TokenKind::CloseBrace) {
                break;
            }
        }
        self.expect(TokenKind::CloseBrace)?;
        self.expect(TokenKind::Semicolon)?;
        if values.is_empty() {
            return Err(self.err_at(ParseErrorKind::EmptyEnum, "an enum must have at least one value"));
        }
        Ok(Enum { name, values, extended_attributes: attrs })
    }

    // https://webidl.spec.whatwg.org/#index-prod-Typedef
    fn typedef(&mut self, attrs: Vec<ExtendedAttribute>) -> PResult<Typedef> {
        self.expect(TokenKind::Typedef)?;
        let ty = self.ty()?;
        let name = self.identifier()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Typedef { name, ty, extended_attributes: attrs })
    }

    // https://webidl.spec.whatwg.org/#index-prod-Namespace
    fn namespace(&mut self, attrs: Vec<ExtendedAttribute>, partial: bool) -> PResult<Namespace> {
        self.expect(TokenKind::Namespace)?;
        let name = self.identifier()?;
        let members = self.delimited_members(Self::interface_member)?;
        Ok(Namespace { name, members, extended_attributes: attrs, partial })
    }

    fn delimited_members<T>(&mut self, mut one: impl FnMut(&mut Self) -> PResult<T>) -> PResult<Vec<T>> {
        self.expect(TokenKind::OpenBrace)?;
        let mut members = Vec::new();
        while !self.at(TokenKind::CloseBrace) {
            members.push(one(self)?);
        }
        self.expect(TokenKind::CloseBrace)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(members)
    }

    // https://webidl.spec.whatwg.org/#index-prod-InterfaceMember (covers mixin/namespace/callback
    // interface members too; the grammar's productions overlap heavily and the parser here
    // mirrors the original's choice to fold them into one dispatcher).
    fn interface_member(&mut self) -> PResult<InterfaceMember> {
        let attrs = self.extended_attribute_list()?;

        if self.at(TokenKind::Const) {
            return self.idl_const();
        }
        if self.at(TokenKind::Constructor) {
            self.advance();
            let args = self.argument_list_parens()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(InterfaceMember::Constructor(args, attrs));
        }
        if self.at(TokenKind::Stringifier) {
            return self.stringifier_rest(attrs);
        }

        let static_ = self.eat(TokenKind::Static);

        if self.at(TokenKind::Iterable) {
            self.advance();
            return self.iterable_rest();
        }
        // `async iterable<...>` -- `async` is lexed as a plain identifier since it is only a
        // reserved word in this one position.
        if self.at(TokenKind::Identifier) && self.peek().lexeme == "async" && self.peek_at(1).kind == TokenKind::Iterable {
            self.advance();
            self.advance();
            return self.async_iterable_rest(attrs);
        }
        let readonly = self.eat(TokenKind::Readonly);

        if self.at(TokenKind::Maplike) {
            self.advance();
            return self.maplike_rest(readonly);
        }
        if self.at(TokenKind::Setlike) {
            self.advance();
            return self.setlike_rest(readonly);
        }

        let inherit = self.eat(TokenKind::Inherit);

        if self.at(TokenKind::Attribute) {
            self.advance();
            let ty = self.ty()?;
            let name = self.identifier()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(InterfaceMember::Attribute(Attribute {
                name,
                ty,
                readonly,
                static_,
                stringifier: false,
                inherit,
                extended_attributes: attrs,
            }));
        }

        // Regular (or special) operation.
        let special = self.special_operation_tag();
        let return_type = self.ty()?;
        let name = if self.at(TokenKind::Identifier) { Some(self.identifier()?) } else { None };
        let arguments = self.argument_list_parens()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(InterfaceMember::Operation(Operation { name, return_type, arguments, static_, special, extended_attributes: attrs }))
    }

    fn special_operation_tag(&mut self) -> Option<SpecialOperation> {
        if self.eat(TokenKind::Getter) {
            Some(SpecialOperation::Getter)
        } else if self.eat(TokenKind::Setter) {
            Some(SpecialOperation::Setter)
        } else if self.eat(TokenKind::Deleter) {
            Some(SpecialOperation::Deleter)
        } else {
            None
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-Const
    fn idl_const(&mut self) -> PResult<InterfaceMember> {
        self.expect(TokenKind::Const)?;
        let ty = self.ty()?;
        let name = self.identifier()?;
        self.expect(TokenKind::Equals)?;
        let value = self.const_value()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(InterfaceMember::Const(Const { name, ty, value }))
    }

    // https://webidl.spec.whatwg.org/#index-prod-StringifierRest
    fn stringifier_rest(&mut self, attrs: Vec<ExtendedAttribute>) -> PResult<InterfaceMember> {
        self.expect(TokenKind::Stringifier)?;
        if self.eat(TokenKind::Semicolon) {
            return Ok(InterfaceMember::Stringifier(Stringifier::Bare));
        }
        let readonly = self.eat(TokenKind::Readonly);
        if self.at(TokenKind::Attribute) {
            self.advance();
            let ty = self.ty()?;
            let name = self.identifier()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(InterfaceMember::Stringifier(Stringifier::Attribute(Attribute {
                name,
                ty,
                readonly,
                static_: false,
                stringifier: true,
                inherit: false,
                extended_attributes: attrs,
            })));
        }
        let return_type = self.ty()?;
        let name = if self.at(TokenKind::Identifier) { Some(self.identifier()?) } else { None };
        let arguments = self.argument_list_parens()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(InterfaceMember::Stringifier(Stringifier::Operation(Operation {
            name,
            return_type,
            arguments,
            static_: false,
            special: None,
            extended_attributes: attrs,
        })))
    }

    // https://webidl.spec.whatwg.org/#index-prod-IterableRest / SyncIterable
    fn iterable_rest(&mut self) -> PResult<InterfaceMember> {
        self.expect(TokenKind::Less)?;
        let first = self.ty()?;
        let (key_type, value_type) = if self.eat(TokenKind::Comma) {
            let second = self.ty()?;
            (Some(first), second)
        } else {
            (None, first)
        };
        self.expect(TokenKind::Greater)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(InterfaceMember::Iterable(Iterable { key_type, value_type }))
    }

    // https://webidl.spec.whatwg.org/#index-prod-AsyncIterable
    fn async_iterable_rest(&mut self, _attrs: Vec<ExtendedAttribute>) -> PResult<InterfaceMember> {
        self.expect(TokenKind::Less)?;
        let first = self.ty()?;
        let (key_type, value_type) = if self.eat(TokenKind::Comma) {
            let second = self.ty()?;
            (Some(first), second)
        } else {
            (None, first)
        };
        self.expect(TokenKind::Greater)?;
        let arguments = if self.at(TokenKind::OpenParen) { self.argument_list_parens()? } else { Vec::new() };
        self.expect(TokenKind::Semicolon)?;
        Ok(InterfaceMember::AsyncIterable(AsyncIterable { key_type, value_type, arguments }))
    }

    // https://webidl.spec.whatwg.org/#index-prod-MaplikeRest
    fn maplike_rest(&mut self, readonly: bool) -> PResult<InterfaceMember> {
        self.expect(TokenKind::Less)?;
        let key_type = self.ty()?;
        self.expect(TokenKind::Comma)?;
        let value_type = self.ty()?;
        self.expect(TokenKind::Greater)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(InterfaceMember::Maplike(Maplike { key_type, value_type, readonly }))
    }

    // https://webidl.spec.whatwg.org/#index-prod-SetlikeRest
    fn setlike_rest(&mut self, readonly: bool) -> PResult<InterfaceMember> {
        self.expect(TokenKind::Less)?;
        let value_type = self.ty()?;
        self.expect(TokenKind::Greater)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(InterfaceMember::Setlike(Setlike { value_type, readonly }))
    }

    // https://webidl.spec.whatwg.org/#index-prod-DictionaryMember (argument half) /
    // https://webidl.spec.whatwg.org/#index-prod-ArgumentList
    fn argument_list_parens(&mut self) -> PResult<Vec<Argument>> {
        self.expect(TokenKind::OpenParen)?;
        let mut arguments = Vec::new();
        if !self.at(TokenKind::CloseParen) {
            loop {
                arguments.push(self.argument()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen)?;
        for (i, arg) in arguments.iter().enumerate() {
            if arg.variadic && i != arguments.len() - 1 {
                return Err(self.err_at(
                    ParseErrorKind::MisplacedVariadic,
                    "a variadic argument must be the last argument",
                ));
            }
        }
        Ok(arguments)
    }

    // https://webidl.spec.whatwg.org/#index-prod-Argument
    fn argument(&mut self) -> PResult<Argument> {
        let attrs = self.extended_attribute_list()?;
        let optional = self.eat(TokenKind::Optional);
        let ty = self.ty()?;
        let variadic = self.eat(TokenKind::Ellipsis);
        let name = self.argument_name()?;
        let default = if optional && self.eat(TokenKind::Equals) { Some(self.default_value()?) } else { None };
        if variadic && optional {
            return Err(self.err_at(
                ParseErrorKind::MisplacedVariadic,
                "an argument cannot be both 'optional' and variadic",
            ));
        }
        Ok(Argument { name, ty, optional, variadic, default, extended_attributes: attrs })
    }

    /// Argument names may reuse a handful of reserved words (`async`, `required`, etc. lexed as
    /// keywords in other positions); here any identifier-shaped token is accepted.
    fn argument_name(&mut self) -> PResult<String> {
        if self.at(TokenKind::Identifier) {
            Ok(self.advance().lexeme)
        } else {
            Err(self.unexpected("expected an argument name"))
        }
    }

    fn identifier(&mut self) -> PResult<String> {
        if self.at(TokenKind::Identifier) {
            Ok(self.advance().lexeme)
        } else {
            Err(self.unexpected("expected an identifier"))
        }
    }

    // ---- types ------------------------------------------------------------------------------

    // https://webidl.spec.whatwg.org/#index-prod-Type
    fn ty(&mut self) -> PResult<Type> {
        // Leading extended attributes on a type attach to the surrounding construct, not the
        // type itself (COMPONENT DESIGN §4.2); discard them here.
        let _ = self.extended_attribute_list()?;
        let base = self.distinguishable_or_union_type()?;
        self.maybe_nullable(base)
    }

    fn maybe_nullable(&mut self, base: Type) -> PResult<Type> {
        if self.eat(TokenKind::Question) {
            if matches!(base, Type::Nullable(_)) {
                return Err(self.err_at(
                    ParseErrorKind::InvalidTypeComposition,
                    "a nullable type cannot directly wrap another nullable type",
                ));
            }
            if matches!(base, Type::Promise(_)) {
                return Err(self.err_at(
                    ParseErrorKind::InvalidTypeComposition,
                    "a promise type is never nullable",
                ));
            }
            Ok(Type::Nullable(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    fn distinguishable_or_union_type(&mut self) -> PResult<Type> {
        if self.at(TokenKind::OpenParen) {
            return self.union_type();
        }
        self.distinguishable_type()
    }

    // https://webidl.spec.whatwg.org/#index-prod-UnionType
    fn union_type(&mut self) -> PResult<Type> {
        self.expect(TokenKind::OpenParen)?;
        let mut members = vec![self.union_member_type()?];
        while self.eat(TokenKind::Or) {
            members.push(self.union_member_type()?);
        }
        self.expect(TokenKind::CloseParen)?;
        if members.len() < 2 {
            return Err(self.err_at(
                ParseErrorKind::InvalidTypeComposition,
                "a union type must have at least two members",
            ));
        }
        let mut seen: Vec<&Type> = Vec::new();
        for m in &members {
            let flattened = if let Type::Nullable(inner) = m { inner.as_ref() } else { m };
            if seen.iter().any(|s| *s == flattened) {
                return Err(self.err_at(
                    ParseErrorKind::InvalidTypeComposition,
                    "a union type's members must be pairwise distinguishable",
                ));
            }
            seen.push(flattened);
        }
        Ok(Type::Union(members))
    }

    fn union_member_type(&mut self) -> PResult<Type> {
        let _ = self.extended_attribute_list()?;
        let base = self.distinguishable_or_union_type()?;
        self.maybe_nullable(base)
    }

    // https://webidl.spec.whatwg.org/#index-prod-DistinguishableType
    fn distinguishable_type(&mut self) -> PResult<Type> {
        match self.peek_kind() {
            TokenKind::Any => {
                self.advance();
                Ok(Type::Any)
            }
            TokenKind::Undefined => {
                self.advance();
                Ok(Type::Undefined)
            }
            TokenKind::Boolean => {
                self.advance();
                Ok(Type::Boolean)
            }
            TokenKind::Byte => {
                self.advance();
                Ok(Type::Byte)
            }
            TokenKind::Octet => {
                self.advance();
                Ok(Type::Octet)
            }
            TokenKind::Short => {
                self.advance();
                Ok(Type::Short)
            }
            TokenKind::Long => {
                self.advance();
                if self.eat(TokenKind::Long) {
                    Ok(Type::LongLong)
                } else {
                    Ok(Type::Long)
                }
            }
            TokenKind::Unsigned => {
                self.advance();
                match self.peek_kind() {
                    TokenKind::Short => {
                        self.advance();
                        Ok(Type::UnsignedShort)
                    }
                    TokenKind::Long => {
                        self.advance();
                        if self.eat(TokenKind::Long) {
                            Ok(Type::UnsignedLongLong)
                        } else {
                            Ok(Type::UnsignedLong)
                        }
                    }
                    _ => Err(self.unexpected("expected 'short' or 'long' after 'unsigned'")),
                }
            }
            TokenKind::Unrestricted => {
                self.advance();
                match self.peek_kind() {
                    TokenKind::Float => {
                        self.advance();
                        Ok(Type::UnrestrictedFloat)
                    }
                    TokenKind::Double => {
                        self.advance();
                        Ok(Type::UnrestrictedDouble)
                    }
                    _ => Err(self.unexpected("expected 'float' or 'double' after 'unrestricted'")),
                }
            }
            TokenKind::Float => {
                self.advance();
                Ok(Type::Float)
            }
            TokenKind::Double => {
                self.advance();
                Ok(Type::Double)
            }
            TokenKind::BigInt => {
                self.advance();
                Ok(Type::BigInt)
            }
            TokenKind::DOMString => {
                self.advance();
                Ok(Type::DOMString)
            }
            TokenKind::ByteString => {
                self.advance();
                Ok(Type::ByteString)
            }
            TokenKind::USVString => {
                self.advance();
                Ok(Type::USVString)
            }
            TokenKind::Object => {
                self.advance();
                Ok(Type::Object)
            }
            TokenKind::Symbol => {
                self.advance();
                Ok(Type::Symbol)
            }
            TokenKind::Sequence => {
                self.advance();
                Ok(Type::Sequence(Box::new(self.angle_bracketed_type()?)))
            }
            TokenKind::FrozenArray => {
                self.advance();
                Ok(Type::FrozenArray(Box::new(self.angle_bracketed_type()?)))
            }
            TokenKind::ObservableArray => {
                self.advance();
                Ok(Type::ObservableArray(Box::new(self.angle_bracketed_type()?)))
            }
            TokenKind::Promise => {
                self.advance();
                let inner = self.angle_bracketed_type()?;
                Ok(Type::Promise(Box::new(inner)))
            }
            TokenKind::Record => self.record_type(),
            TokenKind::ArrayBuffer => self.buffer_source_type(BufferSourceKind::ArrayBuffer),
            TokenKind::SharedArrayBuffer => self.buffer_source_type(BufferSourceKind::SharedArrayBuffer),
            TokenKind::DataView => self.buffer_source_type(BufferSourceKind::DataView),
            TokenKind::Int8Array => self.buffer_source_type(BufferSourceKind::Int8Array),
            TokenKind::Int16Array => self.buffer_source_type(BufferSourceKind::Int16Array),
            TokenKind::Int32Array => self.buffer_source_type(BufferSourceKind::Int32Array),
            TokenKind::Uint8Array => self.buffer_source_type(BufferSourceKind::Uint8Array),
            TokenKind::Uint16Array => self.buffer_source_type(BufferSourceKind::Uint16Array),
            TokenKind::Uint32Array => self.buffer_source_type(BufferSourceKind::Uint32Array),
            TokenKind::Uint8ClampedArray => self.buffer_source_type(BufferSourceKind::Uint8ClampedArray),
            TokenKind::BigInt64Array => self.buffer_source_type(BufferSourceKind::BigInt64Array),
            TokenKind::BigUint64Array => self.buffer_source_type(BufferSourceKind::BigUint64Array),
            TokenKind::Float32Array => self.buffer_source_type(BufferSourceKind::Float32Array),
            TokenKind::Float64Array => self.buffer_source_type(BufferSourceKind::Float64Array),
            TokenKind::Identifier => Ok(Type::Identifier(self.identifier()?)),
            _ => Err(self.unexpected("expected a type")),
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-BufferRelatedType
    fn buffer_source_type(&mut self, kind: BufferSourceKind) -> PResult<Type> {
        self.advance();
        Ok(Type::BufferSource(kind))
    }

    fn angle_bracketed_type(&mut self) -> PResult<Type> {
        self.expect(TokenKind::Less)?;
        let ty = self.ty()?;
        self.expect(TokenKind::Greater)?;
        Ok(ty)
    }

    // https://webidl.spec.whatwg.org/#index-prod-RecordType
    fn record_type(&mut self) -> PResult<Type> {
        self.expect(TokenKind::Record)?;
        self.expect(TokenKind::Less)?;
        let key = self.ty()?;
        if !key.is_valid_record_key() {
            return Err(self.err_at(
                ParseErrorKind::InvalidTypeComposition,
                "a record's key type must be DOMString, ByteString or USVString",
            ));
        }
        self.expect(TokenKind::Comma)?;
        let value = self.ty()?;
        self.expect(TokenKind::Greater)?;
        Ok(Type::Record(Box::new(key), Box::new(value)))
    }

    // ---- values -----------------------------------------------------------------------------

    // https://webidl.spec.whatwg.org/#index-prod-ConstValue
    fn const_value(&mut self) -> PResult<Value> {
        match self.peek_kind() {
            TokenKind::True => {
                self.advance();
                Ok(Value::Boolean(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Value::Boolean(false))
            }
            TokenKind::Infinity => {
                self.advance();
                Ok(Value::Infinity)
            }
            TokenKind::NegativeInfinity => {
                self.advance();
                Ok(Value::NegativeInfinity)
            }
            TokenKind::NaN => {
                self.advance();
                Ok(Value::NaN)
            }
            TokenKind::Minus if self.peek_at(1).kind == TokenKind::Infinity => {
                self.advance();
                self.advance();
                Ok(Value::NegativeInfinity)
            }
            TokenKind::IntegerLiteral | TokenKind::Minus => self.integer_value(),
            TokenKind::FloatLiteral => self.float_value(),
            _ => Err(self.unexpected("expected a constant value")),
        }
    }

    // https://webidl.spec.whatwg.org/#index-prod-DefaultValue
    fn default_value(&mut self) -> PResult<Value> {
        match self.peek_kind() {
            TokenKind::OpenBracket => {
                self.advance();
                self.expect(TokenKind::CloseBracket)?;
                Ok(Value::EmptySequence)
            }
            TokenKind::OpenBrace => {
                self.advance();
                self.expect(TokenKind::CloseBrace)?;
                Ok(Value::EmptyDictionary)
            }
            TokenKind::Null => {
                self.advance();
                Ok(Value::Null)
            }
            TokenKind::StringLiteral => {
                let tok = self.advance();
                Ok(Value::String(tok.lexeme))
            }
            _ => self.const_value(),
        }
    }

    fn integer_value(&mut self) -> PResult<Value> {
        let negative = self.eat(TokenKind::Minus);
        let tok = self.expect(TokenKind::IntegerLiteral)?;
        let magnitude = parse_integer_lexeme(&tok.lexeme)
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnexpectedToken, tok.line, tok.column, "malformed integer literal"))?;
        let value = if negative { -magnitude } else { magnitude };
        let lexeme = if negative { format!("-{}", tok.lexeme) } else { tok.lexeme };
        Ok(Value::Integer { value, lexeme })
    }

    fn float_value(&mut self) -> PResult<Value> {
        let negative = self.eat(TokenKind::Minus);
        let tok = self.expect(TokenKind::FloatLiteral)?;
        let magnitude: f64 = tok
            .lexeme
            .parse()
            .map_err(|_| ParseError::new(ParseErrorKind::UnexpectedToken, tok.line, tok.column, "malformed float literal"))?;
        let value = if negative { -magnitude } else { magnitude };
        let lexeme = if negative { format!("-{}", tok.lexeme) } else { tok.lexeme };
        Ok(Value::Float { value, lexeme })
    }

    // ---- extended attributes ------------------------------------------------------------------

    // https://webidl.spec.whatwg.org/#index-prod-ExtendedAttributeList
    fn extended_attribute_list(&mut self) -> PResult<Vec<ExtendedAttribute>> {
        if !self.eat(TokenKind::OpenBracket) {
            return Ok(Vec::new());
        }
        let mut attrs = vec![self.extended_attribute()?];
        while self.eat(TokenKind::Comma) {
            attrs.push(self.extended_attribute()?);
        }
        self.expect(TokenKind::CloseBracket)?;
        Ok(attrs)
    }

    // https://webidl.spec.whatwg.org/#index-prod-ExtendedAttribute
    fn extended_attribute(&mut self) -> PResult<ExtendedAttribute> {
        let name = self.identifier()?;
        if self.at(TokenKind::OpenParen) {
            let args = self.argument_list_parens()?;
            return Ok(ExtendedAttribute { name, value: Some(ExtendedAttributeValue::ArgumentList(args)) });
        }
        if self.eat(TokenKind::Equals) {
            if self.at(TokenKind::OpenParen) {
                self.advance();
                let mut idents = vec![self.identifier()?];
                while self.eat(TokenKind::Comma) {
                    idents.push(self.identifier()?);
                }
                self.expect(TokenKind::CloseParen)?;
                return Ok(ExtendedAttribute { name, value: Some(ExtendedAttributeValue::IdentifierList(idents)) });
            }
            let rhs = self.identifier()?;
            if self.at(TokenKind::OpenParen) {
                let args = self.argument_list_parens()?;
                return Ok(ExtendedAttribute { name, value: Some(ExtendedAttributeValue::NamedArgumentList(rhs, args)) });
            }
            return Ok(ExtendedAttribute { name, value: Some(ExtendedAttributeValue::Identifier(rhs)) });
        }
        Ok(ExtendedAttribute { name, value: None })
    }
}

/// Parses an `integer_literal` lexeme (as collected by the lexer: `0x`/`0X` hex, leading-`0`
/// octal, or plain decimal) into its magnitude. The lexer reports `-` as a separate token except
/// inside hex literals, where it folds straight into the lexeme (`-0xFF`), so that is the only
/// shape handled here; a bare decimal/octal lexeme never carries one.
fn parse_integer_lexeme(lexeme: &str) -> Option<i64> {
    let (negative, unsigned) = match lexeme.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, lexeme),
    };
    let magnitude = if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        i64::from_str_radix(&unsigned[1..], 8).ok()?
    } else {
        unsigned.parse().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> Ast {
        parse(src, ParserOptions::default()).expect("expected parse to succeed")
    }

    #[test]
    fn parses_empty_interface() {
        let ast = parse_ok("interface Foo { };");
        assert_eq!(ast.definitions.len(), 1);
        match &ast.definitions[0] {
            Definition::Interface(i) => {
                assert_eq!(i.name, "Foo");
                assert!(i.members.is_empty());
                assert!(!i.partial);
            }
            other => panic!("expected an interface, got {other:?}"),
        }
    }

    #[test]
    fn parses_interface_with_inheritance_and_members() {
        let ast = parse_ok(
            "interface Base { };\n\
             interface Derived : Base {\n\
                 readonly attribute DOMString name;\n\
                 undefined doIt(long x, optional DOMString y = \"z\");\n\
                 const long ANSWER = 42;\n\
             };",
        );
        let derived = match &ast.definitions[1] {
            Definition::Interface(i) => i,
            other => panic!("expected an interface, got {other:?}"),
        };
        assert_eq!(derived.inherits.as_deref(), Some("Base"));
        assert_eq!(derived.members.len(), 3);
        match &derived.members[1] {
            InterfaceMember::Operation(op) => {
                assert_eq!(op.name.as_deref(), Some("doIt"));
                assert_eq!(op.arguments.len(), 2);
                assert!(op.arguments[1].optional);
            }
            other => panic!("expected an operation, got {other:?}"),
        }
    }

    #[test]
    fn parses_partial_interface_mixin_dictionary_enum_typedef_namespace() {
        let ast = parse_ok(
            "partial interface Foo { };\n\
             interface mixin Bar { };\n\
             dictionary Opts { required DOMString id; long count = 0; };\n\
             enum Color { \"red\", \"green\", \"blue\" };\n\
             typedef sequence<long> LongList;\n\
             namespace Utils { const long VERSION = 1; };",
        );
        assert_eq!(ast.definitions.len(), 6);
        assert!(matches!(&ast.definitions[0], Definition::Interface(i) if i.partial));
        assert!(matches!(&ast.definitions[1], Definition::InterfaceMixin(_)));
        match &ast.definitions[2] {
            Definition::Dictionary(d) => {
                assert_eq!(d.members.len(), 2);
                assert!(d.members[0].required);
                assert!(d.members[1].default.is_some());
            }
            other => panic!("expected a dictionary, got {other:?}"),
        }
        match &ast.definitions[3] {
            Definition::Enum(e) => assert_eq!(e.values, vec!["red", "green", "blue"]),
            other => panic!("expected an enum, got {other:?}"),
        }
        assert!(matches!(&ast.definitions[4], Definition::Typedef(t) if matches!(t.ty, Type::Sequence(_))));
        assert!(matches!(&ast.definitions[5], Definition::Namespace(_)));
    }

    #[test]
    fn parses_includes_statement() {
        let ast = parse_ok("Window includes WindowOrWorkerGlobalScope;");
        match &ast.definitions[0] {
            Definition::Includes(i) => {
                assert_eq!(i.interface, "Window");
                assert_eq!(i.mixin, "WindowOrWorkerGlobalScope");
            }
            other => panic!("expected includes, got {other:?}"),
        }
    }

    #[test]
    fn parses_union_and_nullable_types() {
        let ast = parse_ok("typedef (long or DOMString)? MaybeLongOrString;");
        match &ast.definitions[0] {
            Definition::Typedef(t) => assert!(matches!(&t.ty, Type::Nullable(inner) if matches!(**inner, Type::Union(_)))),
            other => panic!("expected typedef, got {other:?}"),
        }
    }

    #[test]
    fn rejects_double_nullable() {
        let err = parse("typedef long?? Bad;", ParserOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn rejects_nullable_promise() {
        let err = parse("typedef Promise<long>? Bad;", ParserOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidTypeComposition);
    }

    #[test]
    fn rejects_duplicate_enum_values() {
        let err = parse("enum E { \"a\", \"a\" };", ParserOptions::default()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateEnumValue);
    }

    #[test]
    fn rejects_empty_union() {
        let err = parse("typedef (long) Bad;", ParserOptions::default());
        assert!(err.is_err());
    }

    #[test]
    fn parses_maplike_and_setlike_and_iterable() {
        let ast = parse_ok(
            "interface Foo {\n\
                 readonly maplike<DOMString, long>;\n\
                 setlike<long>;\n\
                 iterable<long>;\n\
             };",
        );
        match &ast.definitions[0] {
            Definition::Interface(i) => {
                assert!(matches!(&i.members[0], InterfaceMember::Maplike(m) if m.readonly));
                assert!(matches!(&i.members[1], InterfaceMember::Setlike(s) if !s.readonly));
                assert!(matches!(&i.members[2], InterfaceMember::Iterable(_)));
            }
            other => panic!("expected an interface, got {other:?}"),
        }
    }

    #[test]
    fn parses_extended_attributes() {
        let ast = parse_ok("[Exposed=Window, LegacyNoInterfaceObject] interface Foo { };");
        match &ast.definitions[0] {
            Definition::Interface(i) => {
                assert_eq!(i.extended_attributes.len(), 2);
                assert!(i.extended_attributes[0].is_named("Exposed"));
            }
            other => panic!("expected an interface, got {other:?}"),
        }
    }

    #[test]
    fn parses_buffer_source_types() {
        let ast = parse_ok(
            "interface Foo {\n\
                 undefined write(Uint8Array data);\n\
                 readonly attribute ArrayBuffer buffer;\n\
             };",
        );
        match &ast.definitions[0] {
            Definition::Interface(i) => {
                match &i.members[0] {
                    InterfaceMember::Operation(op) => {
                        assert!(matches!(op.arguments[0].ty, Type::BufferSource(BufferSourceKind::Uint8Array)));
                    }
                    other => panic!("expected an operation, got {other:?}"),
                }
                match &i.members[1] {
                    InterfaceMember::Attribute(a) => {
                        assert!(matches!(a.ty, Type::BufferSource(BufferSourceKind::ArrayBuffer)));
                    }
                    other => panic!("expected an attribute, got {other:?}"),
                }
            }
            other => panic!("expected an interface, got {other:?}"),
        }
    }

    #[test]
    fn parses_negative_decimal_octal_and_hex_const_values() {
        let ast = parse_ok(
            "interface Foo {\n\
                 const long a = -5;\n\
                 const long b = -010;\n\
                 const long c = -0xFF;\n\
             };",
        );
        let values: Vec<i64> = match &ast.definitions[0] {
            Definition::Interface(i) => i
                .members
                .iter()
                .map(|m| match m {
                    InterfaceMember::Const(c) => match c.value {
                        Value::Integer { value, .. } => value,
                        _ => panic!("expected an integer const value"),
                    },
                    other => panic!("expected a const, got {other:?}"),
                })
                .collect(),
            other => panic!("expected an interface, got {other:?}"),
        };
        assert_eq!(values, vec![-5, -8, -255]);
    }

    #[test]
    fn parses_callback_and_callback_interface() {
        let ast = parse_ok(
            "callback Cb = undefined (long x);\n\
             callback interface CbI { undefined run(); };",
        );
        assert!(matches!(&ast.definitions[0], Definition::Callback(_)));
        assert!(matches!(&ast.definitions[1], Definition::CallbackInterface(_)));
    }
}
