//! Command input and output streams
//!
//! Objects piped into a command arrive as a JSON (or YAML) document via
//! `--input`; results leave on stdout as a single object, one array for a
//! sequence, or a bare boolean for confirmations.

use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// What a command writes to its output stream
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Single(Value),
    Sequence(Vec<Value>),
    Confirmation(bool),
}

impl Output {
    pub fn single<T: Serialize>(item: &T) -> Result<Self> {
        Ok(Output::Single(serde_json::to_value(item)?))
    }

    pub fn sequence<T: Serialize>(items: &[T]) -> Result<Self> {
        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Output::Sequence(values))
    }

    pub fn confirmation(success: bool) -> Self {
        Output::Confirmation(success)
    }

    /// A confirmation reporting failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Output::Confirmation(false))
    }

    fn to_value(&self) -> Value {
        match self {
            Output::Single(v) => v.clone(),
            Output::Sequence(items) => Value::Array(items.clone()),
            Output::Confirmation(b) => Value::Bool(*b),
        }
    }
}

/// Write an output to `writer` in the requested format
pub fn write_output<W: Write>(output: &Output, format: OutputFormat, mut writer: W) -> Result<()> {
    let value = output.to_value();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &value)?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut writer, &value).map_err(|e| Error::Io(std::io::Error::other(e)))?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read a piped object from a file, or from stdin when `path` is `-`
pub fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    parse_input(&content, is_yaml)
}

pub fn parse_input<T: DeserializeOwned>(content: &str, is_yaml: bool) -> Result<T> {
    if is_yaml {
        serde_yaml::from_str(content).map_err(|e| Error::InvalidInput(e.to_string()))
    } else {
        serde_json::from_str(content).map_err(|e| Error::InvalidInput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequence_writes_one_array() {
        let output = Output::sequence(&[json!({"Name": "a"}), json!({"Name": "b"})]).unwrap();
        let mut buf = Vec::new();
        write_output(&output, OutputFormat::Json, &mut buf).unwrap();
        let parsed: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, json!([{"Name": "a"}, {"Name": "b"}]));
    }

    #[test]
    fn test_confirmation_and_yaml() {
        let mut buf = Vec::new();
        write_output(&Output::confirmation(true), OutputFormat::Yaml, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "true");
        assert!(Output::confirmation(false).is_failure());
    }

    #[test]
    fn test_parse_input_reports_bad_documents() {
        let result: Result<Value> = parse_input("{not json", false);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let value: Value = parse_input("Name: lb1\n", true).unwrap();
        assert_eq!(value["Name"], "lb1");
    }
}
