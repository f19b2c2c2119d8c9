//! Library of parser functions for STAR files

// nom parser combinators
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{all_consuming, map_res, opt, rest};
use nom::number::complete::double;
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

// ! Boolean checks
/// Check for an empty or whitespace only line
pub fn is_blank(i: &str) -> bool {
    i.trim().is_empty()
}

/// Check for a full line comment
pub fn is_comment(i: &str) -> bool {
    i.trim_start().starts_with('#')
}

/// Check for the `loop_` keyword starting a table
pub fn is_loop(i: &str) -> bool {
    loop_keyword(i).is_ok()
}

/// Check for a column label, starting with an underscore
pub fn is_label(i: &str) -> bool {
    i.trim_start().starts_with('_')
}

// ! Parsers
/// Name of a data block, i.e. `images` from `data_images`
pub fn data_block(i: &str) -> IResult<&str, &str> {
    preceded(tuple((space0, tag("data_"))), rest)(i)
}

/// Column label and the optional `#n` index that follows it
///
/// Column indices are 1-based in STAR files and are returned as written.
pub fn label(i: &str) -> IResult<&str, (&str, Option<usize>)> {
    tuple((
        preceded(tuple((space0, char('_'))), take_till1(char::is_whitespace)),
        opt(preceded(tuple((space1, char('#'))), column_index)),
    ))(i)
}

/// Label followed by a value, as used outside of `loop_` tables
pub fn key_value(i: &str) -> IResult<&str, (&str, &str)> {
    tuple((
        preceded(tuple((space0, char('_'))), take_till1(char::is_whitespace)),
        preceded(space1, terminated(take_till1(char::is_whitespace), space0)),
    ))(i)
}

/// A single floating point number with nothing else around it
pub fn number(i: &str) -> IResult<&str, f64> {
    all_consuming(double)(i)
}

fn loop_keyword(i: &str) -> IResult<&str, &str> {
    all_consuming(preceded(space0, terminated(tag("loop_"), space0)))(i)
}

fn column_index(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks() {
        assert!(is_loop("loop_"));
        assert!(is_loop("  loop_  "));
        assert!(!is_loop("loop_x"));
        assert!(is_comment("# version 30001"));
        assert!(is_blank("   \t"));
        assert!(is_label("_rlnCoordinateX #1"));
        assert!(!is_label("12.0 13.0"));
    }

    #[test]
    fn parse_data_block() {
        assert_eq!(data_block("data_particles"), Ok(("", "particles")));
        assert_eq!(data_block("data_"), Ok(("", "")));
        assert!(data_block("loop_").is_err());
    }

    #[test]
    fn parse_label() {
        assert_eq!(
            label("_rlnCoordinateX #1"),
            Ok(("", ("rlnCoordinateX", Some(1))))
        );
        assert_eq!(label("_rlnCoordinateZ"), Ok(("", ("rlnCoordinateZ", None))));
        assert_eq!(
            label("  _rlnAngleRot   #12 "),
            Ok((" ", ("rlnAngleRot", Some(12))))
        );
        assert!(label("rlnCoordinateX").is_err());
    }

    #[test]
    fn parse_key_value() {
        assert_eq!(
            key_value("_rlnCoordinateX 12.5"),
            Ok(("", ("rlnCoordinateX", "12.5")))
        );
        assert!(key_value("_rlnCoordinateX").is_err());
    }

    #[test]
    fn parse_number() {
        assert_eq!(number("12.5"), Ok(("", 12.5)));
        assert_eq!(number("-1e3"), Ok(("", -1000.0)));
        assert_eq!(number("7"), Ok(("", 7.0)));
        assert!(number("12.5x").is_err());
        assert!(number("abc").is_err());
    }
}
