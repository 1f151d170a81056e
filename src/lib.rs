//! # contact-directory
//!
//! An in-memory contact directory with line-delimited flat-file persistence.
//!
//! ## Overview
//!
//! - **Records**: five text fields (name, postal address, phone number,
//!   email address, note), immutable once built
//! - **Directory**: an ordered list of records with add, remove and search
//! - **Persistence**: one record per line, fields terminated by `"  &&  "`
//!
//! ## Example
//!
//! ```
//! use contact_directory::{Directory, Record};
//!
//! let mut dir = Directory::new();
//! dir.add(Record::builder("Ann").phone_number("111").build());
//! dir.add(Record::builder("Bob").note("met at Ann's").build());
//!
//! assert_eq!(dir.search_by_name("Ann").len(), 1);
//! assert_eq!(dir.search_by_global_keyword("Ann").len(), 2);
//!
//! assert_eq!(dir.remove_by_name("Ann"), 1);
//! assert_eq!(dir.size(), 1);
//! ```

pub mod directory;
pub mod error;
pub mod format;
pub mod record;

pub use directory::{Directory, LoadReport};
pub use error::{DirectoryError, Result};
pub use format::{FIELD_COUNT, SEPARATOR, decode_line, encode_line};
pub use record::{Field, Record, RecordFields};
