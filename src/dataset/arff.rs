//! ARFF reader
//!
//! Reads the subset of the Weka ARFF format the miner needs.
//!
//! Example ARFF file:
//! ```text
//! % weather data
//! @relation weather
//! @attribute outlook {sunny, overcast, rainy}
//! @attribute temperature numeric
//! @attribute play {yes, no}
//! @data
//! sunny,85,no
//! overcast,?,yes
//! ```
//!
//! Numeric, string and date attributes are accepted by the reader so that the
//! miner can report them as unsupported; their values are not retained.

use super::{Attribute, AttributeKind, Dataset};
use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

static ATTRIBUTE_RE: OnceLock<Regex> = OnceLock::new();

fn attribute_re() -> &'static Regex {
    ATTRIBUTE_RE.get_or_init(|| {
        Regex::new(r#"(?i)^@attribute\s+('[^']*'|"[^"]*"|\S+)\s+(.+)$"#)
            .expect("Failed to compile attribute pattern")
    })
}

/// Read and parse an ARFF file
pub fn read_arff(path: impl AsRef<Path>) -> Result<Dataset> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
    parse_arff(&content)
}

/// Parse ARFF content
pub fn parse_arff(input: &str) -> Result<Dataset> {
    let mut relation: Option<String> = None;
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut dataset: Option<Dataset> = None;

    for (line_num, raw) in input.lines().enumerate() {
        let line_num = line_num + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('%') {
            continue;
        }

        if let Some(data) = dataset.as_mut() {
            parse_row(data, line, line_num)?;
            continue;
        }

        let keyword = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match keyword.as_str() {
            "@relation" => {
                let name = line["@relation".len()..].trim();
                if name.is_empty() {
                    return Err(parse_error(line_num, "Missing relation name"));
                }
                relation = Some(unquote(name).to_string());
            }
            "@attribute" => {
                attributes.push(parse_attribute(line, line_num)?);
            }
            "@data" => {
                if attributes.is_empty() {
                    return Err(parse_error(line_num, "@data before any @attribute"));
                }
                dataset = Some(Dataset::new(
                    relation.take().unwrap_or_default(),
                    std::mem::take(&mut attributes),
                ));
            }
            _ => {
                return Err(parse_error(
                    line_num,
                    &format!("Unexpected line in header: '{}'", line),
                ));
            }
        }
    }

    dataset.ok_or_else(|| parse_error(input.lines().count().max(1), "Missing @data section"))
}

fn parse_attribute(line: &str, line_num: usize) -> Result<Attribute> {
    let caps = attribute_re()
        .captures(line)
        .ok_or_else(|| parse_error(line_num, "Malformed @attribute declaration"))?;

    let name = unquote(&caps[1]).to_string();
    let declared = caps[2].trim();

    let kind = if let Some(body) = declared.strip_prefix('{') {
        let body = body
            .strip_suffix('}')
            .ok_or_else(|| parse_error(line_num, "Unterminated nominal value list"))?;
        let values = split_values(body);
        if values.iter().any(|v| v.is_empty()) {
            return Err(parse_error(line_num, "Empty nominal value"));
        }
        AttributeKind::Nominal(values)
    } else {
        let type_name = declared
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match type_name.as_str() {
            "numeric" | "real" | "integer" => AttributeKind::Numeric,
            "string" => AttributeKind::String,
            "date" => AttributeKind::Date,
            other => {
                return Err(parse_error(
                    line_num,
                    &format!("Unknown attribute type '{}'", other),
                ));
            }
        }
    };

    Ok(Attribute { name, kind })
}

fn parse_row(data: &mut Dataset, line: &str, line_num: usize) -> Result<()> {
    if line.starts_with('{') {
        return Err(parse_error(line_num, "Sparse ARFF rows are not supported"));
    }

    let values = split_values(line);
    if values.len() != data.num_attributes() {
        return Err(parse_error(
            line_num,
            &format!(
                "Row has {} values, expected {}",
                values.len(),
                data.num_attributes()
            ),
        ));
    }

    let mut record = Vec::with_capacity(values.len());
    for (attr, value) in data.attributes().iter().zip(&values) {
        if value == "?" || !attr.is_nominal() {
            record.push(None);
            continue;
        }
        let index = attr.value_index(value).ok_or_else(|| {
            parse_error(
                line_num,
                &format!("Value '{}' not declared for attribute '{}'", value, attr.name),
            )
        })?;
        record.push(Some(index));
    }

    data.push_record(record)
        .map_err(|e| parse_error(line_num, &e.to_string()))
}

/// Split a comma-separated list, honouring single and double quotes
fn split_values(s: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in s.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, ',') => {
                values.push(current.trim().to_string());
                current.clear();
            }
            (None, c) => current.push(c),
        }
    }
    values.push(current.trim().to_string());
    values
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    for q in ['\'', '"'] {
        if let Some(inner) = s.strip_prefix(q).and_then(|r| r.strip_suffix(q)) {
            return inner;
        }
    }
    s
}

fn parse_error(line: usize, message: &str) -> Error {
    Error::Parse {
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER: &str = r#"
% The classic weather data
@relation weather

@attribute outlook {sunny, overcast, rainy}
@attribute 'is windy' {TRUE, FALSE}
@attribute play {yes, no}

@data
sunny,FALSE,no
overcast,TRUE,yes
rainy,?,yes
"#;

    #[test]
    fn test_parse_weather() {
        let data = parse_arff(WEATHER).unwrap();
        assert_eq!(data.relation(), "weather");
        assert_eq!(data.num_attributes(), 3);
        assert_eq!(data.attributes()[1].name, "is windy");
        assert_eq!(data.num_records(), 3);
        assert_eq!(data.records()[2], vec![Some(2), None, Some(0)]);
    }

    #[test]
    fn test_parse_keeps_non_nominal_declarations() {
        let data = parse_arff(
            "@relation r\n@attribute temp numeric\n@attribute c {a,b}\n@data\n12.5,a\n",
        )
        .unwrap();
        assert_eq!(data.attributes()[0].kind, AttributeKind::Numeric);
        assert_eq!(data.records()[0], vec![None, Some(0)]);
    }

    #[test]
    fn test_parse_quoted_values() {
        let data = parse_arff(
            "@relation r\n@attribute a {'x y', \"z,w\"}\n@data\n'x y'\n\"z,w\"\n",
        )
        .unwrap();
        assert_eq!(data.attributes()[0].value(1), Some("z,w"));
        assert_eq!(data.records()[1], vec![Some(1)]);
    }

    #[test]
    fn test_parse_reports_line_numbers() {
        let err = parse_arff("@relation r\n@attribute a {x,y}\n@data\nx\nq\n").unwrap_err();
        match err {
            Error::Parse { line, message } => {
                assert_eq!(line, 5);
                assert!(message.contains("'q'"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_rows_and_headers() {
        assert!(parse_arff("@relation r\n@attribute a {x}\n@data\nx,x\n").is_err());
        assert!(parse_arff("@relation r\n@attribute a {x}\n").is_err());
        assert!(parse_arff("@relation r\n@attribute a blob\n@data\n").is_err());
        assert!(parse_arff("@relation r\n@attribute a {x}\n@data\n{0 x}\n").is_err());
    }

    #[test]
    fn test_split_values() {
        assert_eq!(split_values("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_values("'a,b',c"), vec!["a,b", "c"]);
    }
}
