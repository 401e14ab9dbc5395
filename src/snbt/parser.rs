use std::borrow::Cow;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    error::{ErrorKind, ParseError},
    sequence::{pair, tuple},
    IResult,
};

use crate::{
    error::{Error, Result},
    ByteArray, Compound, IntArray, LongArray, Value,
};

use super::ParseOptions;

/// Characters allowed in unquoted strings and keys.
pub(crate) fn is_unquoted(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '_' | '-')
}

fn unquoted(input: &str) -> IResult<&str, &str> {
    take_while1(is_unquoted)(input)
}

// An optional minus, digits, then at most one decimal point and more digits.
// Whether there was a digit at all is checked by the caller.
fn number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(char('-')),
        digit0,
        opt(pair(char('.'), digit0)),
    )))(input)
}

fn integer(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(char('-')), digit1))(input)
}

fn suffix(input: &str) -> IResult<&str, Option<char>> {
    opt(one_of("bBsSlLfFdD"))(input)
}

/// Parse the body of a quoted string up to and including the closing
/// `surround`. A backslash makes the next character literal, whatever it is.
/// Borrows from the input when there is nothing to unescape.
fn quoted<'a, E: ParseError<&'a str>>(
    surround: char,
) -> impl FnMut(&'a str) -> IResult<&'a str, Cow<'a, str>, E> {
    move |input: &'a str| {
        let mut owned = String::new();
        let mut escaped = false;
        let mut start = 0;

        for (i, c) in input.char_indices() {
            if escaped {
                escaped = false;
                owned.push(c);
                start = i + c.len_utf8();
            } else if c == '\\' {
                owned.push_str(&input[start..i]);
                escaped = true;
            } else if c == surround {
                let rest = &input[i + c.len_utf8()..];
                if owned.is_empty() {
                    return Ok((rest, Cow::from(&input[..i])));
                }
                owned.push_str(&input[start..i]);
                return Ok((rest, Cow::from(owned)));
            }
        }

        Err(nom::Err::Error(E::from_error_kind(input, ErrorKind::Eof)))
    }
}

/// Parse a complete SNBT document. Anything but whitespace after the root
/// value is an error.
pub(crate) fn parse_root(input: &str, options: &ParseOptions) -> Result<Value> {
    let mut parser = Parser {
        src: input,
        index: 0,
        options,
    };

    let value = parser.parse_value()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(Error::unexpected_char(parser.index, c)),
    }
}

struct Parser<'a> {
    src: &'a str,
    index: usize,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.index..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Move the cursor to where `rest` begins. `rest` must be a suffix of
    /// the remaining input.
    fn advance_to(&mut self, rest: &'a str) {
        self.index = self.src.len() - rest.len();
    }

    fn unexpected(&self) -> Error {
        match self.peek() {
            Some(c) => Error::unexpected_char(self.index, c),
            None => Error::unexpected_eof(),
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.peek() == Some(c) {
            self.index += c.len_utf8();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Skip whitespace, returning whether a newline was among it.
    fn skip_whitespace(&mut self) -> bool {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'));
        let newline = rest[..rest.len() - trimmed.len()].contains('\n');
        self.advance_to(trimmed);
        newline
    }

    /// Handle what sits between two siblings of a compound, list or array,
    /// leaving the cursor on the next sibling or on `close`.
    ///
    /// A comma is required between siblings unless `skip_comma` is set and
    /// the siblings are on separate lines. A single trailing comma before
    /// `close` is fine, but a comma before the first sibling is not.
    fn skip_commas(&mut self, first: bool, close: char) -> Result<()> {
        let newline = self.skip_whitespace();
        match self.peek() {
            Some(',') if !first => {
                self.index += 1;
                self.skip_whitespace();
                Ok(())
            }
            Some(c) if c == close => Ok(()),
            Some(',') | None => Err(self.unexpected()),
            Some(_) if first || (self.options.skip_comma && newline) => Ok(()),
            Some(_) => Err(self.unexpected()),
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(Error::unexpected_eof()),
            Some('{') => self.parse_compound(),
            Some('[') => self.parse_list(),
            Some(q @ ('"' | '\'')) => Ok(Value::String(self.parse_quoted(q)?)),
            Some(c) if c == '-' || c.is_ascii_digit() => match self.parse_number() {
                Some(v) => Ok(v),
                None => self.parse_unquoted_value(),
            },
            Some(_) => self.parse_unquoted_value(),
        }
    }

    fn parse_quoted(&mut self, surround: char) -> Result<String> {
        self.index += surround.len_utf8();
        match quoted::<nom::error::Error<&str>>(surround)(self.rest()) {
            Ok((rest, s)) => {
                self.advance_to(rest);
                Ok(s.into_owned())
            }
            Err(_) => Err(Error::unexpected_eof()),
        }
    }

    fn parse_unquoted(&mut self) -> Result<&'a str> {
        match unquoted(self.rest()) {
            Ok((rest, token)) => {
                self.advance_to(rest);
                Ok(token)
            }
            Err(_) => Err(self.unexpected()),
        }
    }

    fn parse_unquoted_value(&mut self) -> Result<Value> {
        let token = self.parse_unquoted()?;
        Ok(match token {
            "true" if self.options.use_boolean => Value::Bool(true),
            "false" if self.options.use_boolean => Value::Bool(false),
            _ => Value::String(token.to_owned()),
        })
    }

    /// Try to read a number at the cursor. Returns `None` without moving if
    /// the token is not a number after all, such as `12abc` or `1.5b`, or if
    /// the number does not fit the type its suffix asks for. The caller then
    /// reads the token as an unquoted string.
    fn parse_number(&mut self) -> Option<Value> {
        let input = self.rest();
        let (rest, text) = number(input).ok()?;
        if !text.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }

        let (rest, kind) = suffix(rest).ok()?;
        if rest.starts_with(is_unquoted) {
            return None;
        }

        let fractional = text.contains('.');
        let value = match kind {
            None if fractional => Value::Double(text.parse().ok()?),
            None => Value::Int(text.parse().ok()?),
            Some('b' | 'B') if !fractional => Value::Byte(text.parse().ok()?),
            Some('s' | 'S') if !fractional => Value::Short(text.parse().ok()?),
            Some('l' | 'L') if !fractional => Value::Long(text.parse().ok()?),
            Some('f' | 'F') => Value::Float(text.parse().ok()?),
            Some('d' | 'D') => Value::Double(text.parse().ok()?),
            Some(_) => return None,
        };

        self.advance_to(rest);
        Some(value)
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.parse_quoted(q),
            _ => self.parse_unquoted().map(str::to_owned),
        }
    }

    fn parse_compound(&mut self) -> Result<Value> {
        self.expect('{')?;
        let mut compound = Compound::new();
        let mut first = true;

        loop {
            self.skip_commas(first, '}')?;
            if self.peek() == Some('}') {
                self.index += 1;
                return Ok(Value::Compound(compound));
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;

            // Later duplicates win but keep the position of the first.
            compound.insert(key, value);
            first = false;
        }
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.expect('[')?;

        let mut prefix = self.rest().chars();
        if let (Some(kind @ ('B' | 'b' | 'I' | 'i' | 'L' | 'l')), Some(';')) =
            (prefix.next(), prefix.next())
        {
            self.index += 2;
            return self.parse_array(kind.to_ascii_uppercase());
        }

        let mut items = Vec::new();
        let mut first = true;
        loop {
            self.skip_commas(first, ']')?;
            if self.peek() == Some(']') {
                self.index += 1;
                return Ok(Value::List(items));
            }

            items.push(self.parse_value()?);
            first = false;
        }
    }

    /// Parse the elements of a typed array, the `[B;`, `[I;` or `[L;` prefix
    /// having been consumed. Elements are plain integers, optionally with the
    /// suffix matching the array type.
    fn parse_array(&mut self, kind: char) -> Result<Value> {
        let suffixes = match kind {
            'B' => "bB",
            'L' => "lL",
            _ => "",
        };

        let mut values = Vec::new();
        let mut first = true;
        loop {
            self.skip_commas(first, ']')?;
            if self.peek() == Some(']') {
                self.index += 1;
                break;
            }

            let start = self.index;
            let (rest, text) = integer(self.rest()).map_err(|_| self.unexpected())?;
            let (rest, _) = opt(one_of::<_, _, nom::error::Error<&str>>(suffixes))(rest)
                .map_err(|_| self.unexpected())?;

            let value: i64 = text
                .parse()
                .map_err(|_| Error::invalid_number(start, text))?;
            let fits = match kind {
                'B' => i8::try_from(value).is_ok(),
                'I' => i32::try_from(value).is_ok(),
                _ => true,
            };
            if !fits {
                return Err(Error::invalid_number(start, text));
            }

            values.push(value);
            self.advance_to(rest);
            first = false;
        }

        Ok(match kind {
            'B' => Value::ByteArray(ByteArray::new(values.into_iter().map(|v| v as i8).collect())),
            'I' => Value::IntArray(IntArray::new(values.into_iter().map(|v| v as i32).collect())),
            _ => Value::LongArray(LongArray::new(values)),
        })
    }
}
