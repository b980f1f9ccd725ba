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

//! Tokenizes WebIDL source text into a stream of [`Token`]s, tracking line and column.
//!
//! The sub-token recognizers below (`uint_dec`, `uint_hex`, `uint_oct`, `decimal`,
//! `identifier_str`, `string_body`, `whitespace`, `comment`) are `nom` combinators carried over
//! from the fused lexer-parser this crate is grounded on; unlike that version, which folded
//! lexing directly into `nom` parsers over `&str` and never needed positions, this lexer is a
//! standalone pass so it wraps each recognizer with line/column bookkeeping and hands back a
//! `Token`, not a generated Rust token stream.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_until},
    character::complete::{char, digit0, digit1, hex_digit1, oct_digit0, one_of, satisfy},
    combinator::{map, opt, recognize, verify},
    multi::many0_count,
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::parser::ParserOptions;
use crate::token::{lookup_keyword, Token, TokenKind};

type LexResult<'a, T> = IResult<&'a str, T>;

/// Tokenizes an entire source string eagerly with [`ParserOptions::default`]. Exposed as the
/// crate's `lex()` entry point (see `lib.rs`) for callers (test harnesses, the excluded CLI) that
/// want the raw token stream without invoking the parser.
pub fn lex(source: &str) -> Vec<Token> {
    lex_with_options(source, ParserOptions::default())
}

/// Same as [`lex`], but honors `options` (presently just `legacy_identifier_hyphens`). This is
/// the path [`crate::parse`] actually calls, so a caller that turns hyphen tolerance off sees
/// that reflected in both the token stream and the parse.
pub fn lex_with_options(source: &str, options: ParserOptions) -> Vec<Token> {
    let mut lexer = Lexer::with_options(source, options);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}

pub struct Lexer<'a> {
    rest: &'a str,
    line: u32,
    column: u32,
    legacy_identifier_hyphens: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &'a str, options: ParserOptions) -> Self {
        let mut lexer = Self {
            rest: source,
            line: 1,
            column: 1,
            legacy_identifier_hyphens: options.legacy_identifier_hyphens,
        };
        lexer.eat_wsc();
        lexer
    }

    /// Produces the next token, advancing past it (and any trailing whitespace/comments).
    /// Never fails: unrecognized input becomes a single-character `Invalid` token so the parser
    /// can report a precise error at the offending position.
    pub fn next_token(&mut self) -> Token {
        if self.rest.is_empty() {
            return Token::new(TokenKind::Eof, String::new(), self.line, self.column);
        }

        let start_line = self.line;
        let start_column = self.column;

        if let Some(tok) = self.try_string(start_line, start_column) {
            return self.finish(tok);
        }
        if let Some(tok) = self.try_number(start_line, start_column) {
            return self.finish(tok);
        }
        if let Some(tok) = self.try_identifier(start_line, start_column) {
            return self.finish(tok);
        }
        if let Some(tok) = self.try_punctuation(start_line, start_column) {
            return self.finish(tok);
        }

        // Unrecognized character: consume exactly one char as Invalid.
        let mut chars = self.rest.chars();
        let c = chars.next().expect("checked rest.is_empty() above");
        let len = c.len_utf8();
        let lexeme = self.rest[..len].to_string();
        self.advance(len);
        Token::new(TokenKind::Invalid, lexeme, start_line, start_column)
    }

    fn finish(&mut self, token: Token) -> Token {
        self.eat_wsc();
        token
    }

    fn try_string(&mut self, line: u32, column: u32) -> Option<Token> {
        let (rest, body) = string_body(self.rest).ok()?;
        let consumed = self.rest.len() - rest.len();
        self.advance(consumed);
        Some(Token::new(TokenKind::StringLiteral, body.to_string(), line, column))
    }

    fn try_number(&mut self, line: u32, column: u32) -> Option<Token> {
        // decimal (float) must be tried before integer, since e.g. "1.5" would otherwise be
        // read as the integer "1" followed by the punctuation ".".
        if let Ok((rest, lexeme)) = decimal_literal(self.rest) {
            let consumed = self.rest.len() - rest.len();
            self.advance(consumed);
            return Some(Token::new(TokenKind::FloatLiteral, lexeme.to_string(), line, column));
        }
        if let Ok((rest, lexeme)) = integer_literal(self.rest) {
            let consumed = self.rest.len() - rest.len();
            self.advance(consumed);
            return Some(Token::new(TokenKind::IntegerLiteral, lexeme.to_string(), line, column));
        }
        None
    }

    fn try_identifier(&mut self, line: u32, column: u32) -> Option<Token> {
        let (rest, ident) = identifier_str(self.rest, self.legacy_identifier_hyphens).ok()?;
        let consumed = self.rest.len() - rest.len();
        self.advance(consumed);
        let kind = lookup_keyword(ident).unwrap_or(TokenKind::Identifier);
        Some(Token::new(kind, ident.to_string(), line, column))
    }

    fn try_punctuation(&mut self, line: u32, column: u32) -> Option<Token> {
        if self.rest.starts_with("...") {
            self.advance(3);
            return Some(Token::new(TokenKind::Ellipsis, "...".to_string(), line, column));
        }
        if self.rest.starts_with("::") {
            self.advance(2);
            return Some(Token::new(TokenKind::DoubleColon, "::".to_string(), line, column));
        }
        let kind = match self.rest.chars().next()? {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '=' => TokenKind::Equals,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            _ => return None,
        };
        let c = self.rest.chars().next().expect("checked above");
        let lexeme = c.to_string();
        self.advance(c.len_utf8());
        Some(Token::new(kind, lexeme, line, column))
    }

    /// Skips whitespace, `//`/`/* */` comments, and `#`-prefixed legacy preprocessor lines,
    /// updating line/column as it goes.
    fn eat_wsc(&mut self) {
        loop {
            if let Some(rest) = self.rest.strip_prefix('#') {
                let end = rest.find('\n').unwrap_or(rest.len());
                self.advance(1 + end);
                continue;
            }
            if let Ok((rest, matched)) = whitespace(self.rest) {
                let consumed = self.rest.len() - rest.len();
                self.advance_counting_lines(matched);
                debug_assert_eq!(consumed, matched.len());
                continue;
            }
            if let Ok((rest, matched)) = comment(self.rest) {
                let consumed = self.rest.len() - rest.len();
                self.advance_counting_lines(matched);
                debug_assert_eq!(consumed, matched.len());
                continue;
            }
            break;
        }
    }

    /// Advances past `len` bytes of `rest` with no embedded newlines (used for tokens, which
    /// never span lines except string literals that escape across one, handled separately).
    fn advance(&mut self, len: usize) {
        let (consumed, rest) = self.rest.split_at(len);
        self.column += consumed.chars().count() as u32;
        self.rest = rest;
    }

    fn advance_counting_lines(&mut self, consumed: &str) {
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.rest = &self.rest[consumed.len()..];
    }
}

// https://webidl.spec.whatwg.org/#prod-identifier
fn identifier_str(input: &str, legacy_hyphens: bool) -> LexResult<'_, &str> {
    let leading = if legacy_hyphens { "_-" } else { "_" };
    let body: fn(char) -> bool = if legacy_hyphens {
        |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-'
    } else {
        |c: char| c.is_ascii_alphanumeric() || c == '_'
    };
    map(
        recognize(tuple((
            opt(one_of(leading)),
            satisfy(|c| c.is_ascii_alphabetic()),
            many0_count(satisfy(body)),
        ))),
        |ident: &str| {
            // "the identifier is the value of the identifier token with any leading U+005F LOW
            // LINE (\"_\") character removed" -- WebIDL #prod-identifier.
            ident.strip_prefix('_').unwrap_or(ident)
        },
    )(input)
}

// https://webidl.spec.whatwg.org/#prod-integer -- a leading `-` only ever folds into the token
// for hex literals (`-0xFF`); `-5`/`-010` tokenize as a separate `Minus` token followed by the
// unsigned literal, which the parser recombines in `integer_value`.
fn integer_literal(input: &str) -> LexResult<'_, &str> {
    alt((recognize(pair(char('-'), uint_hex)), uint_hex, uint_oct, uint_dec))(input)
}

fn uint_dec(input: &str) -> LexResult<'_, &str> {
    recognize(pair(verify(satisfy(|c| c.is_ascii_digit()), |c| *c != '0'), digit0))(input)
}

fn uint_hex(input: &str) -> LexResult<'_, &str> {
    recognize(preceded(tag_no_case("0x"), hex_digit1))(input)
}

fn uint_oct(input: &str) -> LexResult<'_, &str> {
    recognize(preceded(char('0'), oct_digit0))(input)
}

// https://webidl.spec.whatwg.org/#prod-decimal -- unlike `integer_literal`, no literal shape here
// folds a leading `-`; the parser's `Minus` token handles negation uniformly.
fn decimal_literal(input: &str) -> LexResult<'_, &str> {
    alt((
        recognize(tuple((
            digit0,
            char('.'),
            digit1,
            opt(tuple((one_of("Ee"), opt(one_of("+-")), digit1))),
        ))),
        recognize(tuple((digit1, opt(char('.')), digit0, one_of("Ee"), opt(one_of("+-")), digit1))),
    ))(input)
}

// https://webidl.spec.whatwg.org/#prod-string -- returns the body, without quotes.
fn string_body(input: &str) -> LexResult<'_, &str> {
    use nom::sequence::delimited;
    delimited(char('"'), take_until("\""), char('"'))(input)
}

// https://webidl.spec.whatwg.org/#prod-whitespace
fn whitespace(input: &str) -> LexResult<'_, &str> {
    use nom::character::complete::multispace1;
    recognize(multispace1)(input)
}

// https://webidl.spec.whatwg.org/#prod-comment
fn comment(input: &str) -> LexResult<'_, &str> {
    use nom::character::complete::not_line_ending;
    recognize(alt((
        preceded(tag("//"), not_line_ending),
        delimited_comment,
    )))(input)
}

fn delimited_comment(input: &str) -> LexResult<'_, &str> {
    use nom::sequence::delimited;
    recognize(delimited(tag("/*"), take_until("*/"), tag("*/")))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_simple_interface() {
        let tokens = kinds("interface Foo { };");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Interface,
                TokenKind::Identifier,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_line_and_block_comments() {
        let tokens = lex("// hello\ninterface /* skip me */ Foo {};");
        assert_eq!(tokens[0].kind, TokenKind::Interface);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn distinguishes_integer_and_float_literals() {
        let tokens = kinds("const long x = 42; const double y = 4.2;");
        assert!(tokens.contains(&TokenKind::IntegerLiteral));
        assert!(tokens.contains(&TokenKind::FloatLiteral));
    }

    #[test]
    fn hyphenated_identifier_is_tolerated() {
        let tokens = lex("typedef long my-type;");
        let ident = tokens.iter().find(|t| t.kind == TokenKind::Identifier).unwrap();
        assert_eq!(ident.lexeme, "my-type");
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = lex("interface\nFoo {};");
        let foo = &tokens[1];
        assert_eq!(foo.line, 2);
        assert_eq!(foo.column, 1);
    }

    #[test]
    fn recognizes_ellipsis_and_double_colon() {
        let tokens = kinds("(... ::)");
        assert!(tokens.contains(&TokenKind::Ellipsis));
        assert!(tokens.contains(&TokenKind::DoubleColon));
    }

    #[test]
    fn unrecognized_character_becomes_invalid() {
        let tokens = kinds("@");
        assert_eq!(tokens[0], TokenKind::Invalid);
    }

    #[test]
    fn negative_decimal_and_octal_tokenize_as_minus_plus_literal() {
        let tokens = lex("-5 -010");
        assert_eq!(
            tokens[0..4].iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Minus, TokenKind::IntegerLiteral, TokenKind::Minus, TokenKind::IntegerLiteral]
        );
        assert_eq!(tokens[1].lexeme, "5");
        assert_eq!(tokens[3].lexeme, "010");
    }

    #[test]
    fn negative_hex_literal_folds_into_one_token() {
        let tokens = lex("-0xFF");
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].lexeme, "-0xFF");
    }

    #[test]
    fn negative_float_tokenizes_as_minus_plus_literal() {
        let tokens = lex("-4.2");
        assert_eq!(tokens[0].kind, TokenKind::Minus);
        assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[1].lexeme, "4.2");
    }

    #[test]
    fn hyphenated_identifier_is_rejected_when_legacy_hyphens_disabled() {
        let options = ParserOptions { legacy_identifier_hyphens: false };
        let tokens = lex_with_options("typedef long my-type;", options);
        // Without hyphen tolerance, "my" is a plain identifier and "-type" is lexed separately.
        let ident = tokens.iter().find(|t| t.kind == TokenKind::Identifier).unwrap();
        assert_eq!(ident.lexeme, "my");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Minus));
    }
}
