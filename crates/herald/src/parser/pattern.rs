//! Pattern parser using winnow.
//!
//! Handles the pieces shared by standalone patterns and catalog resources:
//! - Text runs
//! - Placeables with variables, string and number literals, message
//!   references, and select expressions
//! - Indented continuation lines inside catalog resources

use std::cell::Cell;

use winnow::ascii::{digit1, line_ending, multispace0, space0, space1};
use winnow::combinator::{
    alt, cut_err, delimited, fail, not, opt, peek, preceded, repeat, terminated,
};
use winnow::error::{ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{none_of, one_of, take_while};

use super::ast::{Expression, InlineExpression, Pattern, PatternElement, Variant, VariantKey};
use super::error::ParseError;
use crate::types::Value;

/// Parse a standalone pattern string.
///
/// Newlines are ordinary text here; indentation rules only apply inside
/// catalog resources.
pub fn parse_pattern(input: &str) -> Result<Pattern, ParseError> {
    let mut remaining = input;
    let result = standalone_pattern(&mut remaining);
    finish(input, remaining, result)
}

/// Convert the outcome of a top-level parser into a [`ParseError`] with
/// position information.
pub(super) fn finish<T>(
    original: &str,
    remaining: &str,
    result: ModalResult<T>,
) -> Result<T, ParseError> {
    let (line, column) = calculate_position(original, remaining);
    let unexpected = || {
        format!(
            "unexpected character: '{}'",
            remaining.chars().next().unwrap_or('?')
        )
    };
    match result {
        Ok(value) if remaining.is_empty() => Ok(value),
        Ok(_) => Err(ParseError::Syntax {
            line,
            column,
            message: unexpected(),
        }),
        Err(_) if remaining.is_empty() => Err(ParseError::UnexpectedEof { line, column }),
        Err(e) => {
            let message = match e {
                ErrMode::Backtrack(context) | ErrMode::Cut(context) => {
                    context.to_string().replace('\n', "; ")
                }
                ErrMode::Incomplete(_) => String::new(),
            };
            Err(ParseError::Syntax {
                line,
                column,
                message: if message.is_empty() {
                    unexpected()
                } else {
                    message
                },
            })
        }
    }
}

/// Calculate line and column from original input and remaining input.
///
/// Columns count characters, not bytes.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let line_start = consumed_str.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed_str[line_start..].chars().count() + 1;
    (line, column)
}

fn standalone_pattern(input: &mut &str) -> ModalResult<Pattern> {
    let elements: Vec<PatternElement> = repeat(0.., alt((free_text, placeable))).parse_next(input)?;
    Ok(Pattern {
        elements: merge_text(elements),
    })
}

/// Text up to the next brace, newlines included.
fn free_text(input: &mut &str) -> ModalResult<PatternElement> {
    take_while(1.., |c: char| c != '{' && c != '}')
        .map(|s: &str| PatternElement::Text(s.to_string()))
        .parse_next(input)
}

/// A pattern that starts on the current line and may continue on indented
/// lines below it.
pub(super) fn inline_pattern(input: &mut &str) -> ModalResult<Pattern> {
    let first = alt((line_text, placeable)).parse_next(input)?;
    let mut elements: Vec<PatternElement> =
        repeat(0.., alt((line_text, placeable, continuation))).parse_next(input)?;
    elements.insert(0, first);
    Ok(trimmed(elements))
}

/// A pattern that starts on the line after `=`.
pub(super) fn block_pattern(input: &mut &str) -> ModalResult<Pattern> {
    line_ending.parse_next(input)?;
    let _: usize = repeat(0.., blank_line).parse_next(input)?;
    space1.parse_next(input)?;
    peek(none_of(['.', '[', '*', '}', '\n', '\r'])).parse_next(input)?;
    inline_pattern(input)
}

/// An indented line continuing the current pattern. Lines starting with
/// `.`, `[`, `*` or `}` belong to the surrounding syntax instead.
fn continuation(input: &mut &str) -> ModalResult<PatternElement> {
    line_ending.parse_next(input)?;
    let blank_lines: usize = repeat(0.., blank_line).parse_next(input)?;
    space1.parse_next(input)?;
    peek(none_of(['.', '[', '*', '}', '\n', '\r'])).parse_next(input)?;
    Ok(PatternElement::Text("\n".repeat(blank_lines + 1)))
}

/// A line holding only whitespace.
pub(super) fn blank_line(input: &mut &str) -> ModalResult<()> {
    (space0, line_ending).void().parse_next(input)
}

/// Text up to the next brace or line break.
fn line_text(input: &mut &str) -> ModalResult<PatternElement> {
    take_while(1.., |c: char| !matches!(c, '{' | '}' | '\n' | '\r'))
        .map(|s: &str| PatternElement::Text(s.to_string()))
        .parse_next(input)
}

/// Text inside a select variant; also stops at the next variant marker.
fn variant_text(input: &mut &str) -> ModalResult<PatternElement> {
    take_while(1.., |c: char| {
        !matches!(c, '{' | '}' | '[' | '*' | '\n' | '\r')
    })
    .map(|s: &str| PatternElement::Text(s.to_string()))
    .parse_next(input)
}

/// Deepest placeable nesting accepted, counting select variants.
const MAX_NESTING: usize = 32;

const NESTING_LIMIT: StrContext =
    StrContext::Expected(StrContextValue::Description("at most 32 nested placeables"));

thread_local! {
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// One level of placeable nesting on the current thread, released on drop.
struct NestingGuard;

impl NestingGuard {
    fn enter() -> Option<Self> {
        let depth = NESTING.get();
        if depth >= MAX_NESTING {
            return None;
        }
        NESTING.set(depth + 1);
        Some(NestingGuard)
    }
}

impl Drop for NestingGuard {
    fn drop(&mut self) {
        NESTING.set(NESTING.get().saturating_sub(1));
    }
}

/// Parse a placeable: `{ expression }`
fn placeable(input: &mut &str) -> ModalResult<PatternElement> {
    '{'.parse_next(input)?;
    let Some(_guard) = NestingGuard::enter() else {
        return cut_err(fail).context(NESTING_LIMIT).parse_next(input);
    };
    cut_err(placeable_body)
        .map(PatternElement::Placeable)
        .parse_next(input)
}

fn placeable_body(input: &mut &str) -> ModalResult<Expression> {
    multispace0.parse_next(input)?;
    let expression = expression
        .context(StrContext::Label("placeable"))
        .parse_next(input)?;
    multispace0.parse_next(input)?;
    '}'.context(StrContext::Expected(StrContextValue::CharLiteral('}')))
        .parse_next(input)?;
    Ok(expression)
}

/// Parse an inline expression, optionally followed by `->` and variants.
fn expression(input: &mut &str) -> ModalResult<Expression> {
    let selector = inline_expression(input)?;
    multispace0.parse_next(input)?;
    if opt("->").parse_next(input)?.is_none() {
        return Ok(Expression::Inline(selector));
    }
    let variants = variant_list(input)?;
    Ok(Expression::Select { selector, variants })
}

fn variant_list(input: &mut &str) -> ModalResult<Vec<Variant>> {
    let variants: Vec<Variant> = repeat(1.., preceded(multispace0, variant))
        .context(StrContext::Label("select expression"))
        .parse_next(input)?;
    if variants.iter().filter(|v| v.default).count() != 1 {
        return fail::<_, Vec<Variant>, _>
            .context(StrContext::Expected(StrContextValue::Description(
                "exactly one default variant marked with `*`",
            )))
            .parse_next(input);
    }
    Ok(variants)
}

/// Parse a variant: `[key] pattern` or `*[key] pattern`
fn variant(input: &mut &str) -> ModalResult<Variant> {
    let default = opt('*').parse_next(input)?.is_some();
    '['.parse_next(input)?;
    let key = cut_err(delimited(space0, variant_key, (space0, ']')))
        .context(StrContext::Label("variant key"))
        .parse_next(input)?;
    space0.parse_next(input)?;
    let elements: Vec<PatternElement> =
        repeat(0.., alt((variant_text, placeable))).parse_next(input)?;
    Ok(Variant {
        key,
        value: trimmed(elements),
        default,
    })
}

fn variant_key(input: &mut &str) -> ModalResult<VariantKey> {
    alt((
        number_str.parse_to().map(VariantKey::Number),
        identifier.map(str::to_string).map(VariantKey::Identifier),
    ))
    .parse_next(input)
}

fn inline_expression(input: &mut &str) -> ModalResult<InlineExpression> {
    alt((
        string_literal.map(InlineExpression::StringLiteral),
        number_str.map(number_literal),
        preceded(
            '$',
            cut_err(identifier.context(StrContext::Label("variable name"))),
        )
        .map(|s: &str| InlineExpression::Variable(s.to_string())),
        message_reference,
    ))
    .parse_next(input)
}

/// Parse a message reference: `id` or `id.attribute`
fn message_reference(input: &mut &str) -> ModalResult<InlineExpression> {
    let id = identifier(input)?;
    let attribute = opt(preceded(
        '.',
        cut_err(identifier.context(StrContext::Label("attribute name"))),
    ))
    .parse_next(input)?;
    Ok(InlineExpression::MessageReference {
        id: id.to_string(),
        attribute: attribute.map(str::to_string),
    })
}

/// Parse a quoted string literal with `\"` and `\\` escapes.
fn string_literal(input: &mut &str) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat::<_, _, String, _, _>(
                0..,
                alt((preceded('\\', one_of(['"', '\\'])), none_of(['"', '\\', '\n']))),
            ),
            '"'.context(StrContext::Expected(StrContextValue::CharLiteral('"'))),
        )),
    )
    .parse_next(input)
}

fn number_str<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .parse_next(input)
}

fn number_literal(raw: &str) -> InlineExpression {
    let value = if !raw.contains('.')
        && let Ok(n) = raw.parse::<i64>()
    {
        Value::Number(n)
    } else {
        Value::Float(raw.parse().unwrap_or_default())
    };
    InlineExpression::NumberLiteral(value)
}

/// Parse an identifier: `[a-zA-Z][a-zA-Z0-9_-]*`.
///
/// A `-` directly followed by `>` is left for the select arrow.
pub(super) fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        repeat::<_, _, (), _, _>(
            0..,
            alt((
                one_of(|c: char| c.is_ascii_alphanumeric() || c == '_').void(),
                terminated('-', not('>')).void(),
            )),
        ),
    )
        .take()
        .parse_next(input)
}

/// Merge adjacent text elements into single elements.
fn merge_text(elements: Vec<PatternElement>) -> Vec<PatternElement> {
    let mut result = Vec::with_capacity(elements.len());

    for element in elements {
        match element {
            PatternElement::Text(text) => {
                if let Some(PatternElement::Text(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(PatternElement::Text(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Merge text and strip trailing whitespace from every line and from the
/// end of the pattern.
fn trimmed(elements: Vec<PatternElement>) -> Pattern {
    let mut merged = merge_text(elements);
    for element in &mut merged {
        if let PatternElement::Text(text) = element {
            *text = trim_line_ends(text);
        }
    }
    if let Some(PatternElement::Text(last)) = merged.last_mut() {
        let len = last.trim_end().len();
        last.truncate(len);
    }
    merged.retain(|e| !matches!(e, PatternElement::Text(t) if t.is_empty()));
    Pattern { elements: merged }
}

/// Strip trailing spaces from each line except the last, which may be
/// followed by a placeable on the same line.
fn trim_line_ends(text: &str) -> String {
    let mut lines = text.split('\n').peekable();
    let mut out = String::with_capacity(text.len());
    while let Some(line) = lines.next() {
        if lines.peek().is_some() {
            out.push_str(line.trim_end_matches([' ', '\t', '\r']));
            out.push('\n');
        } else {
            out.push_str(line);
        }
    }
    out
}
