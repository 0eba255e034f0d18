//! Categorical dataset representation
//!
//! A [`Dataset`] is a list of attributes plus records. Each record stores one
//! value index per attribute; `None` marks a missing value, which matches no
//! item during counting. Only nominal attributes carry a value domain; values of
//! other attribute kinds are not retained because the miner rejects them.

pub mod arff;

pub use arff::{parse_arff, read_arff};

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One record: a value index per attribute, `None` when missing
pub type Record = Vec<Option<usize>>;

/// Attribute type, as declared by the data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum AttributeKind {
    /// Finite value domain, in declaration order
    Nominal(Vec<String>),
    Numeric,
    String,
    Date,
}

impl AttributeKind {
    /// Short name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Nominal(_) => "nominal",
            AttributeKind::Numeric => "numeric",
            AttributeKind::String => "string",
            AttributeKind::Date => "date",
        }
    }
}

/// A named attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    /// Create a nominal attribute from its value labels
    pub fn nominal<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Nominal(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a numeric attribute
    pub fn numeric(name: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    /// Create a free-text attribute
    pub fn string(name: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            kind: AttributeKind::String,
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal(_))
    }

    /// Size of the value domain (0 for non-nominal attributes)
    pub fn num_values(&self) -> usize {
        match &self.kind {
            AttributeKind::Nominal(values) => values.len(),
            _ => 0,
        }
    }

    /// Label of the value at `index`
    pub fn value(&self, index: usize) -> Option<&str> {
        match &self.kind {
            AttributeKind::Nominal(values) => values.get(index).map(String::as_str),
            _ => None,
        }
    }

    /// Index of the value labelled `label`
    pub fn value_index(&self, label: &str) -> Option<usize> {
        match &self.kind {
            AttributeKind::Nominal(values) => values.iter().position(|v| v == label),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AttributeKind::Nominal(values) => write!(f, "{} {{{}}}", self.name, values.join(",")),
            kind => write!(f, "{} {}", self.name, kind.name()),
        }
    }
}

/// A table of categorical records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    relation: String,
    attributes: Vec<Attribute>,
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset with the given schema
    pub fn new(relation: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Dataset {
            relation: relation.into(),
            attributes,
            records: Vec::new(),
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    /// Append a record given as value labels; `?` marks a missing value
    pub fn push_labels(&mut self, labels: &[&str]) -> Result<()> {
        if labels.len() != self.attributes.len() {
            return Err(Error::Dataset(format!(
                "record has {} values, expected {}",
                labels.len(),
                self.attributes.len()
            )));
        }

        let mut record = Vec::with_capacity(labels.len());
        for (attr, label) in self.attributes.iter().zip(labels) {
            let label = label.trim();
            if label == "?" || !attr.is_nominal() {
                record.push(None);
                continue;
            }
            let index = attr.value_index(label).ok_or_else(|| {
                Error::Dataset(format!(
                    "value '{}' is not in the domain of attribute '{}'",
                    label, attr.name
                ))
            })?;
            record.push(Some(index));
        }
        self.records.push(record);
        Ok(())
    }

    /// Append a record given as value indices
    pub fn push_record(&mut self, record: Record) -> Result<()> {
        if record.len() != self.attributes.len() {
            return Err(Error::Dataset(format!(
                "record has {} values, expected {}",
                record.len(),
                self.attributes.len()
            )));
        }
        for (attr, value) in self.attributes.iter().zip(&record) {
            if let Some(v) = value {
                if *v >= attr.num_values() {
                    return Err(Error::Dataset(format!(
                        "value index {} out of range for attribute '{}'",
                        v, attr.name
                    )));
                }
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Fail on the first attribute that is not nominal
    pub fn ensure_categorical(&self) -> Result<()> {
        match self.attributes.iter().find(|a| !a.is_nominal()) {
            Some(attr) => Err(Error::UnsupportedAttribute {
                name: attr.name.clone(),
                kind: attr.kind.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Label for `value` of attribute `attr`, or `?` when unknown
    pub fn label(&self, attr: usize, value: usize) -> &str {
        self.attributes
            .get(attr)
            .and_then(|a| a.value(value))
            .unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        Dataset::new(
            "weather",
            vec![
                Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]),
                Attribute::nominal("windy", ["TRUE", "FALSE"]),
                Attribute::nominal("play", ["yes", "no"]),
            ],
        )
    }

    #[test]
    fn test_push_labels() {
        let mut data = weather();
        data.push_labels(&["sunny", "FALSE", "no"]).unwrap();
        data.push_labels(&["overcast", "?", "yes"]).unwrap();

        assert_eq!(data.num_records(), 2);
        assert_eq!(data.records()[0], vec![Some(0), Some(1), Some(1)]);
        assert_eq!(data.records()[1], vec![Some(1), None, Some(0)]);
    }

    #[test]
    fn test_push_labels_rejects_unknown_value() {
        let mut data = weather();
        let err = data.push_labels(&["foggy", "FALSE", "no"]).unwrap_err();
        assert!(err.to_string().contains("foggy"));
        assert_eq!(data.num_records(), 0);
    }

    #[test]
    fn test_push_record_arity() {
        let mut data = weather();
        assert!(data.push_record(vec![Some(0), Some(0)]).is_err());
        assert!(data.push_record(vec![Some(3), Some(0), Some(0)]).is_err());
        assert!(data.push_record(vec![Some(2), None, Some(1)]).is_ok());
    }

    #[test]
    fn test_ensure_categorical() {
        assert!(weather().ensure_categorical().is_ok());

        let data = Dataset::new(
            "mixed",
            vec![
                Attribute::nominal("a", ["x"]),
                Attribute::numeric("temperature"),
            ],
        );
        match data.ensure_categorical() {
            Err(Error::UnsupportedAttribute { name, kind }) => {
                assert_eq!(name, "temperature");
                assert_eq!(kind, "numeric");
            }
            other => panic!("expected attribute type error, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_display() {
        let attr = Attribute::nominal("windy", ["TRUE", "FALSE"]);
        assert_eq!(attr.to_string(), "windy {TRUE,FALSE}");
        assert_eq!(Attribute::string("note").to_string(), "note string");
    }
}
