//! Color values for design tokens.
//!
//! A [`Color`] remembers the literal it was parsed from so configuration can
//! be passed through to the styling engine byte-for-byte, while also exposing
//! the decoded channels for the derived forms the prose overrides need.
//!
//! # Accepted Syntax
//!
//! | Form | Example |
//! |------|---------|
//! | Hex | `#ebdbb2`, `#fff`, `#1d202180` |
//! | Channel triple | `235 219 178` |
//! | Functional | `rgb(235, 219, 178)`, `rgb(235 219 178)`, `rgba(235, 219, 178, 0.5)` |
//!
//! Parsing goes through the `cssparser` tokenizer, so whitespace and case
//! follow CSS rules. Anything else is rejected; nothing is coerced.

use std::fmt;
use std::str::FromStr;

use cssparser::{ParseError, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// A validated color literal.
///
/// Equality compares the decoded channels and the original text, so two
/// spellings of the same color are distinct values (they serialize differently).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    literal: String,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Parses a color literal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prosetheme::Color;
    ///
    /// let link = Color::parse("#7daea3").unwrap();
    /// assert_eq!(link.channels(), "125 174 163");
    ///
    /// let same = Color::parse("125 174 163").unwrap();
    /// assert_eq!(same.to_hex(), "#7daea3");
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let (r, g, b, a) = parse_components(trimmed)?;
        Ok(Self {
            literal: trimmed.to_string(),
            r,
            g,
            b,
            a,
        })
    }

    /// Builds a color from channels, spelled as lowercase hex.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            literal: format!("#{:02x}{:02x}{:02x}", r, g, b),
            r,
            g,
            b,
            a: 255,
        }
    }

    /// The literal text this color was parsed from.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Alpha channel, `255` when the literal carried none.
    pub fn alpha(&self) -> u8 {
        self.a
    }

    /// Lowercase hex form, with an alpha pair only when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Space-separated channel triple, the form stored in CSS custom
    /// properties that are later composited with `rgb(var(--x) / alpha)`.
    pub fn channels(&self) -> String {
        format!("{} {} {}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.literal
    }
}

/// Renders an alpha-channel color function over a channel variable.
///
/// With an alpha the result is `rgb(var(--name)/alpha)`, matching what the
/// typography plugin expects for compositing; without one it is
/// `rgb(var(--name))`.
///
/// ```rust
/// use prosetheme::color::alpha_channel;
///
/// assert_eq!(
///     alpha_channel("--color-text-link", Some("1")),
///     "rgb(var(--color-text-link)/1)"
/// );
/// assert_eq!(alpha_channel("--color-text-link", None), "rgb(var(--color-text-link))");
/// ```
pub fn alpha_channel(var_name: &str, alpha: Option<&str>) -> String {
    match alpha {
        Some(alpha) => format!("rgb(var({})/{})", var_name, alpha),
        None => format!("rgb(var({}))", var_name),
    }
}

fn malformed(input: &str, reason: &str) -> ColorError {
    ColorError::Malformed {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_components(input: &str) -> Result<(u8, u8, u8, u8), ColorError> {
    if input.is_empty() {
        return Err(malformed(input, "empty color value"));
    }

    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);
    let start = parser.state();

    let first = parser
        .next()
        .cloned()
        .map_err(|_| malformed(input, "empty color value"))?;

    let components = match first {
        Token::Hash(ref digits) | Token::IDHash(ref digits) => parse_hex(input, digits)?,
        Token::Function(ref name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            let args = parser
                .parse_nested_block(|p| collect_args(p))
                .map_err(|_| malformed(input, "unexpected token in rgb() arguments"))?;
            from_function_args(input, &args)?
        }
        Token::Number { .. } => {
            parser.reset(&start);
            let args = collect_args(&mut parser)
                .map_err(|_| malformed(input, "unexpected token in channel triple"))?;
            from_channel_triple(input, &args)?
        }
        _ => return Err(malformed(input, "expected #hex, rgb() or a channel triple")),
    };

    if parser.expect_exhausted().is_err() {
        return Err(malformed(input, "trailing characters after color"));
    }
    Ok(components)
}

fn parse_hex(input: &str, digits: &str) -> Result<(u8, u8, u8, u8), ColorError> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed(input, "hex color contains non-hex digits"));
    }
    let nibble = |i: usize| -> u8 {
        let v = u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
        v * 17
    };
    let byte = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };

    match digits.len() {
        3 => Ok((nibble(0), nibble(1), nibble(2), 255)),
        4 => Ok((nibble(0), nibble(1), nibble(2), nibble(3))),
        6 => Ok((byte(0), byte(2), byte(4), 255)),
        8 => Ok((byte(0), byte(2), byte(4), byte(6))),
        _ => Err(malformed(input, "hex color must have 3, 4, 6 or 8 digits")),
    }
}

/// A numeric argument or separator inside a color expression.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Arg {
    Number(f32),
    Comma,
    Slash,
}

fn collect_args<'i, 't>(parser: &mut Parser<'i, 't>) -> Result<Vec<Arg>, ParseError<'i, ()>> {
    let mut args = Vec::new();
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Number { value, .. } => args.push(Arg::Number(value)),
            Token::Comma => args.push(Arg::Comma),
            Token::Delim('/') => args.push(Arg::Slash),
            other => return Err(parser.new_unexpected_token_error(other)),
        }
    }
    Ok(args)
}

fn channel(input: &str, value: f32) -> Result<u8, ColorError> {
    if value.fract() != 0.0 {
        return Err(malformed(input, "channel values must be integers"));
    }
    let value = value as i64;
    u8::try_from(value).map_err(|_| ColorError::ChannelOutOfRange {
        input: input.to_string(),
        value,
    })
}

fn numbers(args: &[Arg]) -> Vec<f32> {
    args.iter()
        .filter_map(|arg| match arg {
            Arg::Number(n) => Some(*n),
            _ => None,
        })
        .collect()
}

fn from_channel_triple(input: &str, args: &[Arg]) -> Result<(u8, u8, u8, u8), ColorError> {
    if args.iter().any(|arg| !matches!(arg, Arg::Number(_))) {
        return Err(malformed(input, "channel triples are whitespace separated"));
    }
    match numbers(args).as_slice() {
        [r, g, b] => Ok((channel(input, *r)?, channel(input, *g)?, channel(input, *b)?, 255)),
        _ => Err(malformed(input, "channel triple needs exactly three values")),
    }
}

fn from_function_args(input: &str, args: &[Arg]) -> Result<(u8, u8, u8, u8), ColorError> {
    let commas = args.iter().filter(|a| matches!(a, Arg::Comma)).count();
    let slashes = args.iter().filter(|a| matches!(a, Arg::Slash)).count();
    let values = numbers(args);

    // Legacy syntax is fully comma separated; modern syntax uses spaces and an optional `/ alpha`.
    let well_formed = match values.len() {
        3 => (commas == 2 && slashes == 0) || (commas == 0 && slashes == 0),
        4 => (commas == 3 && slashes == 0) || (commas == 0 && slashes == 1),
        _ => false,
    };
    if !well_formed {
        return Err(malformed(input, "rgb() takes three channels and an optional alpha"));
    }

    let r = channel(input, values[0])?;
    let g = channel(input, values[1])?;
    let b = channel(input, values[2])?;
    let a = match values.get(3) {
        Some(alpha) if (0.0..=1.0).contains(alpha) => (alpha * 255.0).round() as u8,
        Some(_) => return Err(malformed(input, "alpha must be between 0 and 1")),
        None => 255,
    };
    Ok((r, g, b, a))
}
