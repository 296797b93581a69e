use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{alpha1, alphanumeric1, char, multispace0, one_of, space0, space1},
    combinator::{cut, opt, recognize, value},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use super::{CompositeDef, CompositeType, Item};

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn newlines(i: &str) -> IResult<&str, ()> {
    delimited(space0, many1(one_of("\r\n")), space0)(i).map(|(rest, _)| (rest, ()))
}

fn line_comment(i: &str) -> IResult<&str, ()> {
    value((), tuple((space0, char('#'), opt(is_not("\n\r")))))(i)
}

fn open_brace(i: &str) -> IResult<&str, ()> {
    value((), delimited(space0, char('{'), space0))(i)
}

fn close_brace(i: &str) -> IResult<&str, ()> {
    value((), delimited(space0, char('}'), space0))(i)
}

fn composite_type(i: &str) -> IResult<&str, CompositeType> {
    alt((
        value(CompositeType::Sequence, tag("Sequence")),
        value(CompositeType::Selector, tag("Selector")),
    ))(i)
}

fn composite(i: &str) -> IResult<&str, Item> {
    // space1 keeps identifiers like "Sequencer" from matching as a keyword.
    let (i, ty) = delimited(space0, composite_type, space1)(i)?;
    let (i, name) = identifier(i)?;
    // Past the opening brace there is no other way to read the input, so
    // a malformed body is a hard failure rather than a backtrack.
    let (i, children) = preceded(open_brace, cut(terminated(children, close_brace)))(i)?;
    Ok((i, Item::Composite(CompositeDef { ty, name, children })))
}

fn reference(i: &str) -> IResult<&str, Item> {
    let (i, _) = delimited(space0, tag("ref"), space1)(i)?;
    let (i, name) = identifier(i)?;
    Ok((i, Item::Ref(name)))
}

fn leaf(i: &str) -> IResult<&str, Item> {
    let (i, name) = delimited(space0, identifier, space0)(i)?;
    Ok((i, Item::Leaf(name)))
}

fn item(i: &str) -> IResult<&str, Item> {
    alt((composite, reference, leaf))(i)
}

fn some_item(i: &str) -> IResult<&str, Option<Item>> {
    let (i, it) = item(i)?;
    Ok((i, Some(it)))
}

fn children(i: &str) -> IResult<&str, Vec<Item>> {
    let (i, _) = many0(alt((newlines, line_comment)))(i)?;

    let (i, v) = many0(delimited(
        space0,
        alt((value(None, line_comment), some_item)),
        many0(alt((newlines, line_comment))),
    ))(i)?;

    Ok((i, v.into_iter().flatten().collect()))
}

/// Parse one tree description of the form `tree = <item>`.
///
/// Returns the root [`Item`], borrowing from the input. Leading and
/// trailing blank lines and `#` comments are allowed anywhere a node is.
pub fn parse_tree(i: &str) -> IResult<&str, Item> {
    let (i, _) = many0(alt((newlines, line_comment)))(i)?;
    let (i, _) = delimited(multispace0, tag("tree"), space0)(i)?;
    let (i, _) = delimited(space0, tag("="), space0)(i)?;
    let (i, root) = item(i)?;
    let (i, _) = many0(alt((newlines, line_comment)))(i)?;
    Ok((i, root))
}
