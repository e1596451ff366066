//! Catalog resource parser.
//!
//! Parses resource text containing message definitions:
//!
//! ```text
//! # comment
//! battle-result = { $winner } won the battle!
//!     .title = Battle won!
//!     .field-damage-name = Damage
//!     .field-damage-value = { $amount }
//! ```

use winnow::ascii::{line_ending, space0, space1, till_line_ending};
use winnow::combinator::{alt, cut_err, eof, fail, opt, repeat, terminated};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;

use super::ast::{Attribute, Template};
use super::error::ParseError;
use super::pattern::{blank_line, block_pattern, finish, identifier, inline_pattern};

const END_OF_LINE: StrContext = StrContext::Expected(StrContextValue::Description("end of line"));

const MESSAGE_BODY: StrContext = StrContext::Expected(StrContextValue::Description(
    "a message value or at least one attribute",
));

/// Parse an entire resource into message templates, in declaration order.
pub fn parse_resource(input: &str) -> Result<Vec<Template>, ParseError> {
    let mut remaining = input;
    let result = resource(&mut remaining);
    finish(input, remaining, result)
}

fn resource(input: &mut &str) -> ModalResult<Vec<Template>> {
    skip_blank_and_comments(input)?;
    let templates: Vec<Template> = repeat(
        0..,
        terminated(message, (end_of_entry, skip_blank_and_comments)),
    )
    .parse_next(input)?;
    // Trailing whitespace on a final line without a newline
    space0.parse_next(input)?;
    Ok(templates)
}

/// Skip blank lines and `#` comment lines.
fn skip_blank_and_comments(input: &mut &str) -> ModalResult<()> {
    let _: usize = repeat(0.., alt((blank_line, comment_line))).parse_next(input)?;
    Ok(())
}

/// Parse a comment line: `# ...`, `## ...`, `### ...`
fn comment_line(input: &mut &str) -> ModalResult<()> {
    ('#', till_line_ending, alt((line_ending, eof)))
        .void()
        .parse_next(input)
}

fn end_of_entry<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    cut_err(alt((line_ending, eof)))
        .context(END_OF_LINE)
        .parse_next(input)
}

/// Parse a message: `id = pattern?` followed by attribute lines.
fn message(input: &mut &str) -> ModalResult<Template> {
    let id = identifier(input)?;
    cut_err((
        space0,
        '='.context(StrContext::Expected(StrContextValue::CharLiteral('='))),
        space0,
    ))
    .parse_next(input)?;

    let value = opt(alt((inline_pattern, block_pattern))).parse_next(input)?;
    let attributes: Vec<Attribute> = repeat(0.., attribute).parse_next(input)?;

    if value.is_none() && attributes.is_empty() {
        return cut_err(fail).context(MESSAGE_BODY).parse_next(input);
    }

    Ok(Template {
        id: id.to_string(),
        value,
        attributes,
    })
}

/// Parse an indented attribute line: `.key = pattern`
fn attribute(input: &mut &str) -> ModalResult<Attribute> {
    line_ending.parse_next(input)?;
    let _: usize = repeat(0.., blank_line).parse_next(input)?;
    space1.parse_next(input)?;
    '.'.parse_next(input)?;
    cut_err(attribute_body).parse_next(input)
}

fn attribute_body(input: &mut &str) -> ModalResult<Attribute> {
    let id = identifier
        .context(StrContext::Label("attribute name"))
        .parse_next(input)?;
    (
        space0,
        '='.context(StrContext::Expected(StrContextValue::CharLiteral('='))),
        space0,
    )
        .parse_next(input)?;
    let value = alt((inline_pattern, block_pattern))
        .context(StrContext::Label("attribute value"))
        .parse_next(input)?;
    Ok(Attribute {
        id: id.to_string(),
        value,
    })
}
