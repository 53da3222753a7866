//! BibTeX parser implementation using nom
//!
//! The parser turns a `.bib` file into an ordered list of blocks without
//! losing anything:
//! - `@string`, `@preamble` and `@comment` blocks
//! - entries of any type, with or without a citation key
//! - `{...}` or `(...)` block delimiters
//! - braced, quoted, numeric and macro field values, `#` concatenation
//! - free text between blocks, kept as implicit comments
//!
//! Field values are stored as written. Macros are not expanded and LaTeX is
//! not decoded, so formatting the result reproduces the original values.
//!
//! A block that cannot be parsed does not abort the parse. Its text, up to
//! the next block start, is kept in a [`Block::Failed`].

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, one_of},
    error::{Error as NomError, ErrorKind},
    IResult,
};

use crate::block::{Block, Comment, Document, FailedBlock, Preamble, StringMacro};
use crate::entry::BibTeXEntry;

/// Parse BibTeX text into a document
pub fn parse(input: &str) -> Document {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut blocks = Vec::new();
    let mut remaining = input;
    let mut current_line = 1u32;

    while !remaining.is_empty() {
        // Everything before the next block start is free text
        let start = find_block_start(remaining).unwrap_or(remaining.len());
        let (text, rest) = remaining.split_at(start);
        push_implicit_comment(&mut blocks, text);
        current_line += count_newlines(text);
        remaining = rest;

        if remaining.is_empty() {
            break;
        }

        match parse_block(remaining) {
            Ok((rest, block)) => {
                let consumed = &remaining[..remaining.len() - rest.len()];
                current_line += count_newlines(consumed);
                blocks.push(block);
                remaining = rest;
            }
            Err(err) => {
                // Keep the text up to the next block start verbatim
                let end = find_block_start(&remaining[1..]).map_or(remaining.len(), |pos| pos + 1);
                let (raw, rest) = remaining.split_at(end);
                blocks.push(Block::Failed(FailedBlock {
                    line: current_line,
                    message: describe_error(&err),
                    raw: raw.trim_end().to_string(),
                }));
                current_line += count_newlines(raw);
                remaining = rest;
            }
        }
    }

    Document::new(blocks)
}

fn count_newlines(text: &str) -> u32 {
    text.matches('\n').count() as u32
}

fn push_implicit_comment(blocks: &mut Vec<Block>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        blocks.push(Block::Comment(Comment::implicit(text)));
    }
}

fn describe_error(err: &nom::Err<NomError<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) if e.input.is_empty() => {
            "unexpected end of input".to_string()
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let near: String = e.input.chars().take(24).collect();
            format!("unexpected input near {near:?}")
        }
        nom::Err::Incomplete(_) => "incomplete input".to_string(),
    }
}

fn fail(input: &str) -> nom::Err<NomError<&str>> {
    nom::Err::Error(NomError::new(input, ErrorKind::Char))
}

/// Characters allowed in entry type names, field names and macro names
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || "_-:.+/".contains(c)
}

fn is_cite_key_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ',' | '=' | '{' | '}' | '(' | ')' | '"' | '#')
}

fn closing_delimiter(open: char) -> char {
    if open == '(' {
        ')'
    } else {
        '}'
    }
}

/// Byte offset of the next `@name{` or `@name(` in `input`
fn find_block_start(input: &str) -> Option<usize> {
    input
        .match_indices('@')
        .map(|(pos, _)| pos)
        .find(|&pos| block_header(&input[pos..]).is_ok())
}

/// Parse `@name{` and return the name and the opening delimiter
///
/// The name must follow `@` directly, so a lone `@` in free text is not a block.
fn block_header(input: &str) -> IResult<&str, (&str, char)> {
    let (rest, _) = char('@')(input)?;
    let (rest, name) = take_while1(is_ident_char)(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, open) = one_of("{(")(rest)?;
    Ok((rest, (name, open)))
}

/// Parse one `@` block
fn parse_block(input: &str) -> IResult<&str, Block> {
    let (rest, (name, open)) = block_header(input)?;
    let close = closing_delimiter(open);

    match name.to_lowercase().as_str() {
        "comment" => {
            let (rest, text) = delimited_body(rest, close)?;
            Ok((rest, Block::Comment(Comment::explicit(text))))
        }
        "preamble" => {
            let (rest, _) = multispace0(rest)?;
            let (rest, value) = field_value(rest)?;
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = char(close)(rest)?;
            Ok((
                rest,
                Block::Preamble(Preamble {
                    value: value.to_string(),
                }),
            ))
        }
        "string" => {
            let (rest, _) = multispace0(rest)?;
            let (rest, (name, value)) = assignment(rest)?;
            let (rest, _) = multispace0(rest)?;
            let (rest, _) = char(close)(rest)?;
            Ok((
                rest,
                Block::StringMacro(StringMacro {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
            ))
        }
        _ => {
            let (rest, entry) = entry_body(rest, name, close)?;
            Ok((rest, Block::Entry(entry)))
        }
    }
}

/// Parse an entry body after its opening delimiter
fn entry_body<'a>(input: &'a str, entry_type: &str, close: char) -> IResult<&'a str, BibTeXEntry> {
    let (rest, _) = multispace0(input)?;
    let (rest, key) = cite_key(rest, close)?;
    let (rest, fields) = fields(rest, close)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(close)(rest)?;

    let mut entry = BibTeXEntry::new(key, entry_type);
    for (name, value) in fields {
        entry.add_field(name, value);
    }

    Ok((rest, entry))
}

/// Parse the citation key and its trailing comma.
///
/// Returns an empty key when the entry starts directly with a field.
fn cite_key(input: &str, close: char) -> IResult<&str, &str> {
    let (rest, key) = take_while(is_cite_key_char)(input)?;
    let (rest, _) = multispace0(rest)?;

    if let Some(after) = rest.strip_prefix(',') {
        return Ok((after, key));
    }
    if rest.starts_with(close) {
        return Ok((rest, key));
    }
    if rest.starts_with('=') {
        return Ok((input, ""));
    }
    Err(fail(rest))
}

/// Parse comma separated fields up to the closing delimiter
fn fields(input: &str, close: char) -> IResult<&str, Vec<(&str, &str)>> {
    let mut fields = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;

        if rest.is_empty() || rest.starts_with(close) {
            return Ok((rest, fields));
        }

        let (rest, field) = assignment(rest)?;
        fields.push(field);

        let (rest, _) = multispace0(rest)?;
        match rest.strip_prefix(',') {
            Some(after) => remaining = after,
            None => return Ok((rest, fields)),
        }
    }
}

/// Parse `name = value`
fn assignment(input: &str) -> IResult<&str, (&str, &str)> {
    let (rest, name) = take_while1(is_ident_char)(input)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = multispace0(rest)?;
    let (rest, value) = field_value(rest)?;
    Ok((rest, (name, value)))
}

/// Parse a field value and return its raw text.
///
/// A value is one or more braced, quoted or bare parts joined by `#`.
fn field_value(input: &str) -> IResult<&str, &str> {
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0(remaining)?;
        let (rest, _) = alt((braced_value, quoted_value, take_while1(is_ident_char)))(rest)?;
        remaining = rest;

        // Check for concatenation
        let (rest, _) = multispace0(remaining)?;
        match rest.strip_prefix('#') {
            Some(after) => remaining = after,
            None => break,
        }
    }

    Ok((remaining, &input[..input.len() - remaining.len()]))
}

/// Parse `{...}` including nested braces, returning the text with its braces
fn braced_value(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('{') {
        return Err(fail(input));
    }
    let (rest, inner) = delimited_body(&input[1..], '}')?;
    Ok((rest, &input[..inner.len() + 2]))
}

/// Parse `"..."`, returning the text with its quotes
fn quoted_value(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('"') {
        return Err(fail(input));
    }

    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut pos = 1; // Skip opening quote

    while pos < bytes.len() {
        match bytes[pos] {
            b'"' if depth == 0 => return Ok((&input[pos + 1..], &input[..pos + 1])),
            b'{' => depth += 1,
            b'}' if depth == 0 => return Err(fail(&input[pos..])),
            b'}' => depth -= 1,
            b'\\' => {
                // Skip escaped character
                pos += 1;
            }
            _ => {}
        }
        pos += 1;
    }

    Err(fail(&input[bytes.len()..]))
}

/// Scan to the `close` delimiter that balances an already consumed opener.
///
/// Braces always nest. When `close` is `)`, parentheses outside braces nest
/// as well. Returns the text between the delimiters and the input after
/// `close`.
fn delimited_body(input: &str, close: char) -> IResult<&str, &str> {
    let close = close as u8;
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut parens = 0usize;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b if b == close && depth == 0 && parens == 0 => {
                return Ok((&input[pos + 1..], &input[..pos]))
            }
            b'(' if close == b')' && depth == 0 => parens += 1,
            b')' if depth == 0 && parens > 0 => parens -= 1,
            b'{' => depth += 1,
            b'}' if depth == 0 => return Err(fail(&input[pos..])),
            b'}' => depth -= 1,
            b'\\' => {
                // Skip escaped character
                pos += 1;
            }
            _ => {}
        }
        pos += 1;
    }

    Err(fail(&input[bytes.len()..]))
}
