//! The `{ "t": ..., "d": ... }` message envelope sent to the game server.

use serde::{Deserialize, Serialize};

use crate::error::EnvelopeError;

/// Message type tag, the `t` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Upload the program text for the player's robot.
    #[serde(rename = "u")]
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "t")]
    pub kind: MessageKind,
    #[serde(rename = "d")]
    pub data: String,
}

impl Envelope {
    /// Upload envelope for edited program text, with blank-line runs
    /// collapsed.
    pub fn upload(text: &str) -> Self {
        Self {
            kind: MessageKind::Upload,
            data: collapse_blank_lines(text),
        }
    }

    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string(self).map_err(EnvelopeError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(json).map_err(EnvelopeError::Decode)
    }
}

/// Replace every run of two or more blank lines with one empty line.
///
/// A blank line is a newline-terminated line holding only whitespace. A
/// single blank line is kept as written.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run: Vec<&str> = Vec::new();

    fn flush<'a>(out: &mut String, run: &mut Vec<&'a str>) {
        match run.as_slice() {
            [] => {}
            [single] => out.push_str(single),
            [first, ..] => out.push_str(if first.ends_with("\r\n") { "\r\n" } else { "\n" }),
        }
        run.clear();
    }

    for line in text.split_inclusive('\n') {
        if line.ends_with('\n') && line.trim().is_empty() {
            blank_run.push(line);
        } else {
            flush(&mut out, &mut blank_run);
            out.push_str(line);
        }
    }
    flush(&mut out, &mut blank_run);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_wire_shape() {
        let json = Envelope::upload("mov %rga 1").to_json().unwrap();
        assert_eq!(json, r#"{"t":"u","d":"mov %rga 1"}"#);
    }

    #[test]
    fn test_decode() {
        let envelope = Envelope::from_json(r#"{"t":"u","d":"fwd\nrot"}"#).unwrap();
        assert_eq!(envelope.kind, MessageKind::Upload);
        assert_eq!(envelope.data, "fwd\nrot");

        assert!(matches!(
            Envelope::from_json(r#"{"t":"x","d":""}"#),
            Err(EnvelopeError::Decode(_))
        ));
        assert!(Envelope::from_json("hello").is_err());
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n   \nb"), "a\n   \nb");
        assert_eq!(collapse_blank_lines("a\r\n\r\n\r\nb"), "a\r\n\r\nb");
        assert_eq!(collapse_blank_lines("\n\n\nstart:"), "\nstart:");
        assert_eq!(collapse_blank_lines("end\n\n\n"), "end\n\n");
        assert_eq!(collapse_blank_lines(""), "");
        assert_eq!(collapse_blank_lines("no blanks\nhere"), "no blanks\nhere");
    }

    #[test]
    fn test_upload_collapses() {
        assert_eq!(Envelope::upload("fwd\n\n\n\nrot").data, "fwd\n\nrot");
    }
}
