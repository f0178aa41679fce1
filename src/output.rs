//! Serialized response output.
//!
//! A response is written either as a sample list or as a single error
//! object, never both:
//!
//! ```text
//! [{"t":0.0,"y":0.0},{"t":0.05,"y":0.0488}, ...]
//! {"error":"Parse error at column 7: unexpected end of expression, expected a value"}
//! ```

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ResponseError, Result};
use crate::solver::ResponseSample;

/// Either the samples of a response or the message of the error that
/// stopped it.
///
/// JSON has no NaN or infinity, so non-finite `y` values (from a zero R, L
/// or C) are written as `null`. CSV output keeps them as `NaN`/`inf`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseOutput {
    Samples(Vec<ResponseSample>),
    Error { error: String },
}

impl ResponseOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ResponseError::OutputError {
            message: e.to_string(),
        })
    }
}

impl From<Result<Vec<ResponseSample>>> for ResponseOutput {
    fn from(result: Result<Vec<ResponseSample>>) -> Self {
        match result {
            Ok(samples) => Self::Samples(samples),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Text format for writing a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `t,y` rows with a header line
    #[default]
    Csv,
    /// The [`ResponseOutput`] JSON shape
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format '{}' (expected csv or json)", s)),
        }
    }
}

fn io_error(e: std::io::Error) -> ResponseError {
    ResponseError::OutputError {
        message: e.to_string(),
    }
}

/// Write samples as CSV with a `t,<label>` header.
pub fn write_csv<W: Write>(out: &mut W, label: &str, samples: &[ResponseSample]) -> Result<()> {
    writeln!(out, "t,{}", label).map_err(io_error)?;
    for sample in samples {
        writeln!(out, "{},{}", sample.t, sample.y).map_err(io_error)?;
    }
    out.flush().map_err(io_error)
}

/// Write a response (samples or error) as one line of JSON.
pub fn write_json<W: Write>(out: &mut W, output: &ResponseOutput) -> Result<()> {
    let json = output.to_json()?;
    writeln!(out, "{}", json).map_err(io_error)?;
    out.flush().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<ResponseSample> {
        vec![
            ResponseSample { t: 0.0, y: 0.0 },
            ResponseSample { t: 0.05, y: 0.5 },
        ]
    }

    #[test]
    fn test_json_shapes_are_exclusive() {
        let ok = ResponseOutput::from(Ok(samples()));
        assert_eq!(ok.to_json().unwrap(), r#"[{"t":0.0,"y":0.0},{"t":0.05,"y":0.5}]"#);

        let failed = ResponseOutput::from(Err(ResponseError::DivisionByZero));
        assert!(failed.is_error());
        assert_eq!(failed.to_json().unwrap(), r#"{"error":"Division by zero"}"#);
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&mut buf, "vC(t) (V)", &samples()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "t,vC(t) (V)\n0,0\n0.05,0.5\n");
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_non_finite_samples_become_null_in_json() {
        let output = ResponseOutput::Samples(vec![
            ResponseSample { t: 0.0, y: f64::NAN },
            ResponseSample { t: 0.05, y: f64::INFINITY },
        ]);
        assert_eq!(
            output.to_json().unwrap(),
            r#"[{"t":0.0,"y":null},{"t":0.05,"y":null}]"#
        );
    }
}
