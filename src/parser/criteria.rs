// Filter clause parser

use super::lexer::{identifier, number_literal, string_literal, ws};
use crate::filter::FilterCriteria;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{map, map_res},
    multi::separated_list0,
    sequence::preceded,
    IResult,
};

/// One parsed constraint before folding into the criteria.
#[derive(Debug, Clone, PartialEq)]
enum Constraint {
    Topic(String),
    Sector(String),
    Region(String),
    EndYear(i64),
    Pest(String),
    Source(String),
    Swot(String),
    Country(String),
    City(String),
}

/// A categorical value: quoted string (may contain spaces) or bare identifier.
fn label_value(input: &str) -> IResult<&str, String> {
    alt((string_literal, identifier))(input)
}

/// A year value: numeric literal, or a numeric string (criteria may arrive as text).
fn year_value(input: &str) -> IResult<&str, i64> {
    alt((
        map_res(string_literal, |s| s.trim().parse::<i64>()),
        map(number_literal, |n| n as i64),
    ))(input)
}

fn parse_constraint(input: &str) -> IResult<&str, Constraint> {
    alt((
        map(
            preceded(ws(tag("topic:")), ws(label_value)),
            Constraint::Topic,
        ),
        map(
            preceded(ws(tag("sector:")), ws(label_value)),
            Constraint::Sector,
        ),
        map(
            preceded(ws(tag("region:")), ws(label_value)),
            Constraint::Region,
        ),
        map(
            preceded(
                ws(alt((tag("end_year:"), tag("endYear:")))),
                ws(year_value),
            ),
            Constraint::EndYear,
        ),
        map(
            preceded(ws(alt((tag("pestle:"), tag("pest:")))), ws(label_value)),
            Constraint::Pest,
        ),
        map(
            preceded(ws(tag("source:")), ws(label_value)),
            Constraint::Source,
        ),
        map(
            preceded(ws(tag("swot:")), ws(label_value)),
            Constraint::Swot,
        ),
        map(
            preceded(ws(tag("country:")), ws(label_value)),
            Constraint::Country,
        ),
        map(
            preceded(ws(tag("city:")), ws(label_value)),
            Constraint::City,
        ),
    ))(input)
}

/// Parse a filter clause
/// Format: where(sector: "Energy", end_year: 2018) or where() for the wildcard
pub fn parse_criteria(input: &str) -> IResult<&str, FilterCriteria> {
    let (input, _) = ws(tag("where"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, constraints) = separated_list0(ws(char(',')), parse_constraint)(input)?;
    let (input, _) = ws(char(')'))(input)?;

    let mut criteria = FilterCriteria::default();
    for constraint in constraints {
        match constraint {
            Constraint::Topic(v) => criteria.topic = Some(v),
            Constraint::Sector(v) => criteria.sector = Some(v),
            Constraint::Region(v) => criteria.region = Some(v),
            Constraint::EndYear(v) => criteria.end_year = Some(v),
            Constraint::Pest(v) => criteria.pest = Some(v),
            Constraint::Source(v) => criteria.source = Some(v),
            Constraint::Swot(v) => criteria.swot = Some(v),
            Constraint::Country(v) => criteria.country = Some(v),
            Constraint::City(v) => criteria.city = Some(v),
        }
    }

    Ok((input, criteria))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_clause_is_wildcard() {
        let (rest, criteria) = parse_criteria("where()").unwrap();
        assert_eq!(rest, "");
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn test_parse_single_constraint() {
        let (_, criteria) = parse_criteria(r#"where(sector: "Energy")"#).unwrap();
        assert_eq!(criteria.sector.as_deref(), Some("Energy"));
        assert_eq!(criteria.topic, None);
    }

    #[test]
    fn test_parse_bare_identifier_value() {
        let (_, criteria) = parse_criteria("where(topic: gas)").unwrap();
        assert_eq!(criteria.topic.as_deref(), Some("gas"));
    }

    #[test]
    fn test_parse_quoted_value_with_spaces() {
        let (_, criteria) =
            parse_criteria(r#"where(country: "United States of America")"#).unwrap();
        assert_eq!(
            criteria.country.as_deref(),
            Some("United States of America")
        );
    }

    #[test]
    fn test_parse_end_year_number() {
        let (_, criteria) = parse_criteria("where(end_year: 2018)").unwrap();
        assert_eq!(criteria.end_year, Some(2018));
    }

    #[test]
    fn test_parse_end_year_as_text() {
        let (_, criteria) = parse_criteria(r#"where(end_year: "2018")"#).unwrap();
        assert_eq!(criteria.end_year, Some(2018));
    }

    #[test]
    fn test_parse_end_year_camel_case_key() {
        let (_, criteria) = parse_criteria("where(endYear: 2025)").unwrap();
        assert_eq!(criteria.end_year, Some(2025));
    }

    #[test]
    fn test_parse_pest_and_pestle_keys() {
        let (_, a) = parse_criteria(r#"where(pest: "Economic")"#).unwrap();
        let (_, b) = parse_criteria(r#"where(pestle: "Economic")"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.pest.as_deref(), Some("Economic"));
    }

    #[test]
    fn test_parse_multiple_constraints() {
        let (_, criteria) = parse_criteria(
            r#"where(sector: "Energy", end_year: 2018, country: "India")"#,
        )
        .unwrap();
        assert_eq!(criteria.sector.as_deref(), Some("Energy"));
        assert_eq!(criteria.end_year, Some(2018));
        assert_eq!(criteria.country.as_deref(), Some("India"));
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let (_, criteria) =
            parse_criteria(r#"where(sector: "Energy", sector: "Retail")"#).unwrap();
        assert_eq!(criteria.sector.as_deref(), Some("Retail"));
    }

    #[test]
    fn test_parse_with_whitespace() {
        let (rest, criteria) =
            parse_criteria(r#"  where( sector: "Energy" , end_year: 2018 )  "#).unwrap();
        assert_eq!(rest, "");
        assert_eq!(criteria.sector.as_deref(), Some("Energy"));
        assert_eq!(criteria.end_year, Some(2018));
    }

    #[test]
    fn test_parse_space_before_colon_fails() {
        // "sector :" with a space before the colon is not part of the grammar.
        assert!(parse_criteria(r#"where(sector : "Energy")"#).is_err());
    }

    #[test]
    fn test_parse_unknown_key_fails() {
        assert!(parse_criteria("where(flavor: mild)").is_err());
    }

    #[test]
    fn test_parse_missing_paren_fails() {
        assert!(parse_criteria(r#"where(sector: "Energy""#).is_err());
    }

    #[test]
    fn test_parse_non_numeric_year_fails() {
        assert!(parse_criteria(r#"where(end_year: "soon")"#).is_err());
    }

    #[test]
    fn test_parse_leaves_trailing_input() {
        let (rest, criteria) = parse_criteria("where(topic: gas) and more").unwrap();
        assert_eq!(criteria.topic.as_deref(), Some("gas"));
        assert_eq!(rest, "and more");
    }
}
