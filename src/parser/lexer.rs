// Shared lexing helpers for the filter expression parser

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, recognize},
    multi::many0,
    number::complete::double,
    sequence::{delimited, pair},
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace.
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse an identifier: alphabetic or underscore start, alphanumeric/underscore rest.
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse a double-quoted string literal (no escape sequences).
pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse a numeric literal as f64.
pub fn number_literal(input: &str) -> IResult<&str, f64> {
    double(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let (rest, id) = identifier("end_year: 2018").unwrap();
        assert_eq!(id, "end_year");
        assert_eq!(rest, ": 2018");
    }

    #[test]
    fn test_identifier_rejects_leading_digit() {
        assert!(identifier("2018").is_err());
    }

    #[test]
    fn test_string_literal() {
        let (rest, s) = string_literal(r#""Northern America", x"#).unwrap();
        assert_eq!(s, "Northern America");
        assert_eq!(rest, ", x");
    }

    #[test]
    fn test_string_literal_allows_empty() {
        let (_, s) = string_literal(r#""""#).unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn test_number_literal() {
        let (_, n) = number_literal("2018").unwrap();
        assert_eq!(n, 2018.0);
    }

    #[test]
    fn test_ws_strips_whitespace() {
        let (rest, id) = ws(identifier)("  sector  )").unwrap();
        assert_eq!(id, "sector");
        assert_eq!(rest, ")");
    }
}
