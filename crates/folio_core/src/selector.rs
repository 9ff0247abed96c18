//! CSS selector subset
//!
//! Parses the selectors page markup contracts are written in:
//!
//! - Type selectors: `section`, `a`, `*`
//! - ID and class selectors: `#skills`, `.nav-link`
//! - Attribute selectors: `[data-level]`, `[data-filter="all"]`, `[href^="#"]`
//! - Compound selectors: `section[id]`, `a.btn.primary`
//! - Descendant combinator: `.hero .particle`
//! - Selector lists: `.fade-in, .scale-in`
//!
//! Parsing uses nom with verbose errors; a failed parse reports the
//! offending selector and nom's trace.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, opt, value},
    error::{convert_error, ErrorKind, ParseError as NomParseError, VerboseError},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, tuple},
    Finish, IResult,
};
use smallvec::SmallVec;

use crate::error::DomError;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Attribute comparison operator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOp {
    /// `[name="value"]`
    Equals,
    /// `[name^="value"]`
    Prefix,
}

/// An attribute test inside a compound selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrSelector {
    pub name: String,
    pub op: Option<(AttrOp, String)>,
}

impl AttrSelector {
    /// Test an attribute value (`None` if the attribute is absent)
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match (actual, &self.op) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some((AttrOp::Equals, expected))) => actual == expected,
            (Some(actual), Some((AttrOp::Prefix, prefix))) => actual.starts_with(prefix.as_str()),
        }
    }
}

/// A run of simple selectors with no combinator between them
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub attrs: SmallVec<[AttrSelector; 1]>,
}

/// Compound selectors joined by descendant combinators, outermost first
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
}

impl ComplexSelector {
    /// The compound that must match the element itself
    pub fn subject(&self) -> &CompoundSelector {
        // Parser guarantees at least one compound
        &self.compounds[self.compounds.len() - 1]
    }

    /// Ancestor compounds, innermost first
    pub fn ancestors(&self) -> impl Iterator<Item = &CompoundSelector> {
        self.compounds.iter().rev().skip(1)
    }
}

/// A comma-separated list of selectors; an element matches if any member does
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let parsed = all_consuming(delimited(multispace0, selector_list, multispace0))(input)
            .finish()
            .map(|(_, selectors)| selectors);

        match parsed {
            Ok(selectors) => Ok(SelectorList { selectors }),
            Err(err) => {
                let message = convert_error(input, err);
                tracing::debug!("selector parse failed for {:?}: {}", input, message);
                Err(DomError::InvalidSelector {
                    selector: input.to_string(),
                    message,
                })
            }
        }
    }
}

impl std::str::FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

enum Part {
    Id(String),
    Class(String),
    Attr(AttrSelector),
}

fn identifier(input: &str) -> ParseResult<&str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

fn attr_value(input: &str) -> ParseResult<&str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        take_while1(|c: char| !c.is_whitespace() && c != ']'),
    ))(input)
}

fn attr_op(input: &str) -> ParseResult<AttrOp> {
    alt((
        value(AttrOp::Prefix, tag("^=")),
        value(AttrOp::Equals, tag("=")),
    ))(input)
}

fn attribute(input: &str) -> ParseResult<Part> {
    let (input, _) = char('[')(input)?;
    let (input, name) = delimited(multispace0, identifier, multispace0)(input)?;
    let (input, op) = opt(tuple((
        attr_op,
        delimited(multispace0, attr_value, multispace0),
    )))(input)?;
    let (input, _) = char(']')(input)?;

    Ok((
        input,
        Part::Attr(AttrSelector {
            name: name.to_ascii_lowercase(),
            op: op.map(|(op, value)| (op, value.to_string())),
        }),
    ))
}

fn simple_part(input: &str) -> ParseResult<Part> {
    alt((
        map(preceded(char('#'), identifier), |id: &str| {
            Part::Id(id.to_string())
        }),
        map(preceded(char('.'), identifier), |class: &str| {
            Part::Class(class.to_string())
        }),
        attribute,
    ))(input)
}

fn compound(input: &str) -> ParseResult<CompoundSelector> {
    let (rest, type_name) = opt(alt((tag("*"), identifier)))(input)?;
    let (rest, parts) = many0(simple_part)(rest)?;

    if type_name.is_none() && parts.is_empty() {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        )));
    }

    let mut selector = CompoundSelector {
        tag: type_name
            .filter(|name| *name != "*")
            .map(|name| name.to_ascii_lowercase()),
        ..Default::default()
    };
    for part in parts {
        match part {
            Part::Id(id) => selector.id = Some(id),
            Part::Class(class) => selector.classes.push(class),
            Part::Attr(attr) => selector.attrs.push(attr),
        }
    }
    Ok((rest, selector))
}

fn complex(input: &str) -> ParseResult<ComplexSelector> {
    let (input, first) = compound(input)?;
    let (input, rest) = many0(preceded(multispace1, compound))(input)?;

    let mut compounds = Vec::with_capacity(rest.len() + 1);
    compounds.push(first);
    compounds.extend(rest);
    Ok((input, ComplexSelector { compounds }))
}

fn selector_list(input: &str) -> ParseResult<Vec<ComplexSelector>> {
    separated_list1(delimited(multispace0, char(','), multispace0), complex)(input)
}
