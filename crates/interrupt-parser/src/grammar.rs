//! Line grammars for the decoder.
//!
//! Three single-line grammars, each a small winnow parser over `&str`:
//! - the composite header, `[Type: ]qualifier#label`
//! - the foreign error header, `Type: message`
//! - the frame line, `at fn (file:line:column)`

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{eof, opt, preceded, separated_pair, terminated},
    error::{ContextError, ErrMode},
    token::take_while,
};

use interrupt_core::{
    format::{FRAME_PREFIX, QUALIFIED_SEPARATOR, TYPE_SEPARATOR, is_identifier_char},
    frame::Frame,
};

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parse an identifier: a qualifier, a label or a type name
fn identifier<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., is_identifier_char).parse_next(input)
}

/// Parse everything up to the end of input
fn remainder<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., |_: char| true).parse_next(input)
}

/// Parse `qualifier#label`
fn qualified<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    separated_pair(identifier, QUALIFIED_SEPARATOR, identifier).parse_next(input)
}

/// Parse a header line, skipping a `Type: ` tag some runtimes prepend
fn header<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    let _tag = opt(terminated(identifier, TYPE_SEPARATOR)).parse_next(input)?;
    let pair = qualified.parse_next(input)?;
    eof.parse_next(input)?;
    Ok(pair)
}

/// Parse `Type: message`, where the message may span several lines
fn type_message<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    let type_name = terminated(identifier, (':', space0)).parse_next(input)?;
    let message = remainder.parse_next(input)?;
    Ok((type_name, message))
}

/// Parse a frame line up to the text after `at `
fn frame_line<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded((space0, FRAME_PREFIX), remainder).parse_next(input)
}

/// Match a composite header line, returning the qualifier and the label.
pub(crate) fn parse_header(line: &str) -> Option<(&str, &str)> {
    let mut input = line.trim_end();
    header.parse_next(&mut input).ok()
}

/// Match a `Type: message` foreign error header.
pub(crate) fn parse_type_message(text: &str) -> Option<(&str, &str)> {
    let mut input = text;
    type_message.parse_next(&mut input).ok()
}

/// Parse a frame line into a [`Frame`].
///
/// Accepted shapes, after optional indentation:
/// - `at fn (file:line:column)`
/// - `at file:line:column` (line and column optional)
/// - `at fn`
pub(crate) fn parse_frame(line: &str) -> Option<Frame> {
    let mut input = line.trim_end();
    let body = frame_line.parse_next(&mut input).ok()?.trim();

    if let Some(inner) = body.strip_suffix(')') {
        if let Some((function, location)) = inner.rsplit_once(" (") {
            let (file, line, column) = parse_location(location);
            return Some(Frame::new(file, line, column, Some(function.to_string())));
        }
    }

    let (file, line, column) = parse_location(body);
    if line.is_none() && !looks_like_path(body) {
        return Some(Frame::new(None, None, None, Some(body.to_string())));
    }
    Some(Frame::new(file, line, column, None))
}

/// Split `file:line:column` from the right, so paths containing `:` survive.
fn parse_location(location: &str) -> (Option<String>, Option<u32>, Option<u32>) {
    let numeric = |text: &str| text.parse::<u32>().ok();

    let Some((head, last)) = location.rsplit_once(':') else {
        return (non_empty(location), None, None);
    };
    let Some(last) = numeric(last) else {
        return (non_empty(location), None, None);
    };
    match head.rsplit_once(':') {
        Some((file, line)) => match numeric(line) {
            Some(line) => (non_empty(file), Some(line), Some(last)),
            None => (non_empty(head), Some(last), None),
        },
        None => (non_empty(head), Some(last), None),
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn looks_like_path(text: &str) -> bool {
    text.contains('/') || text.contains('\\') || text.contains(':')
}
