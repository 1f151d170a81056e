//! Line codec for the persisted directory file.
//!
//! One record per line. Every field, including the last, is followed by
//! [`SEPARATOR`], and the line ends with `\n`:
//!
//! ```text
//! name  &&  address  &&  phone  &&  email  &&  note  &&  \n
//! ```
//!
//! There is no escaping. Field values that contain the separator or a
//! newline do not survive a round trip.

use crate::error::{DirectoryError, Result};
use crate::record::{Field, Record, RecordFields};

/// Field separator token: two spaces, two ampersands, two spaces.
pub const SEPARATOR: &str = "  &&  ";

/// Number of fields per persisted line.
pub const FIELD_COUNT: usize = Field::ALL.len();

/// Render a record as one persisted line, newline included.
pub fn encode_line(record: &Record) -> String {
    let mut line = String::new();
    for value in record.fields() {
        line.push_str(value);
        line.push_str(SEPARATOR);
    }
    line.push('\n');
    line
}

/// Parse one persisted line (without its `\n`) into a record.
///
/// `line_no` is 1-based and only used for error reporting. A trailing
/// `\r` is tolerated. One trailing separator is removed when present.
///
/// A line missing its trailing separator still parses when the note is
/// non-empty. With an empty note the separator left before it is taken as
/// the terminator, so such a line has only four fields and is rejected.
pub fn decode_line(line: &str, line_no: usize) -> Result<Record> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let body = line.strip_suffix(SEPARATOR).unwrap_or(line);

    let pieces: Vec<&str> = body.split(SEPARATOR).collect();
    let [name, postal_address, phone_number, email_address, note] = pieces[..] else {
        return Err(DirectoryError::MalformedRecord {
            line: line_no,
            fields: pieces.len(),
        });
    };

    Ok(RecordFields {
        name: name.to_string(),
        postal_address: postal_address.to_string(),
        phone_number: phone_number.to_string(),
        email_address: email_address.to_string(),
        note: note.to_string(),
    }
    .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line_shape() {
        let r = Record::builder("Ann").phone_number("111").build();
        assert_eq!(encode_line(&r), "Ann  &&    &&  111  &&    &&    &&  \n");
    }

    #[test]
    fn test_decode_full_line() {
        let r = decode_line("Ann  &&  1 Main St  &&  111  &&  a@b.c  &&  friend  &&  ", 1).unwrap();
        assert_eq!(r.name(), "Ann");
        assert_eq!(r.postal_address(), "1 Main St");
        assert_eq!(r.phone_number(), "111");
        assert_eq!(r.email_address(), "a@b.c");
        assert_eq!(r.note(), "friend");
    }

    #[test]
    fn test_decode_keeps_last_note_char() {
        // The note's final character belongs to the note, not the framing.
        let r = decode_line("A  &&  B  &&  C  &&  D  &&  xyz  &&  ", 1).unwrap();
        assert_eq!(r.note(), "xyz");
    }

    #[test]
    fn test_decode_empty_fields() {
        let r = Record::builder("Bob").build();
        let line = encode_line(&r);
        let decoded = decode_line(line.trim_end_matches('\n'), 1).unwrap();
        assert_eq!(decoded, r);
    }

    #[test]
    fn test_decode_without_trailing_separator() {
        let r = decode_line("A  &&  B  &&  C  &&  D  &&  E", 1).unwrap();
        assert_eq!(r.note(), "E");
    }

    #[test]
    fn test_decode_crlf() {
        let r = decode_line("A  &&  B  &&  C  &&  D  &&  E  &&  \r", 1).unwrap();
        assert_eq!(r.note(), "E");
    }

    #[test]
    fn test_decode_empty_note_needs_trailing_separator() {
        let r = decode_line("A  &&  B  &&  C  &&  D  &&    &&  ", 1).unwrap();
        assert_eq!(r.note(), "");

        let result = decode_line("A  &&  B  &&  C  &&  D  &&  ", 1);
        assert!(matches!(
            result,
            Err(DirectoryError::MalformedRecord { line: 1, fields: 4 })
        ));
    }

    #[test]
    fn test_malformed_message_names_field_count() {
        let err = decode_line("only one", 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("malformed record on line 4: expected {FIELD_COUNT} fields, found 1")
        );
    }

    #[test]
    fn test_decode_too_few_fields() {
        let err = decode_line("A  &&  B  &&  ", 7).unwrap_err();
        match err {
            DirectoryError::MalformedRecord { line, fields } => {
                assert_eq!(line, 7);
                assert_eq!(fields, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_too_many_fields() {
        let result = decode_line("A  &&  B  &&  C  &&  D  &&  E  &&  F  &&  ", 2);
        assert!(matches!(
            result,
            Err(DirectoryError::MalformedRecord { line: 2, fields: 6 })
        ));
    }
}
