//! Contact records.
//!
//! A [`Record`] holds five text fields and never changes once built.
//! Construction goes through [`RecordFields`], a plain struct of named
//! fields that defaults every optional field to the empty string.

use std::fmt;

/// Selects one of the five fields of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    PostalAddress,
    PhoneNumber,
    EmailAddress,
    Note,
}

impl Field {
    /// All fields in persisted order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::PostalAddress,
        Field::PhoneNumber,
        Field::EmailAddress,
        Field::Note,
    ];

    /// Position of this field in the persisted line (0..=4).
    pub fn ordinal(self) -> usize {
        match self {
            Field::Name => 0,
            Field::PostalAddress => 1,
            Field::PhoneNumber => 2,
            Field::EmailAddress => 3,
            Field::Note => 4,
        }
    }

    /// Map a numeric ordinal to a field.
    ///
    /// 0 through 3 select name, postal address, phone number and email
    /// address. Every other value selects the note.
    pub fn from_ordinal(ordinal: usize) -> Field {
        match ordinal {
            0 => Field::Name,
            1 => Field::PostalAddress,
            2 => Field::PhoneNumber,
            3 => Field::EmailAddress,
            _ => Field::Note,
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::PostalAddress => "postal address",
            Field::PhoneNumber => "phone number",
            Field::EmailAddress => "email address",
            Field::Note => "note",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named fields used to build a [`Record`].
///
/// Fields left unset stay empty:
///
/// ```
/// use contact_directory::RecordFields;
///
/// let record = RecordFields::new("Ann").phone_number("111").build();
/// assert_eq!(record.name(), "Ann");
/// assert_eq!(record.phone_number(), "111");
/// assert_eq!(record.note(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub name: String,
    pub postal_address: String,
    pub phone_number: String,
    pub email_address: String,
    pub note: String,
}

impl RecordFields {
    /// Start from the required name; everything else is empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn postal_address(mut self, value: impl Into<String>) -> Self {
        self.postal_address = value.into();
        self
    }

    pub fn phone_number(mut self, value: impl Into<String>) -> Self {
        self.phone_number = value.into();
        self
    }

    pub fn email_address(mut self, value: impl Into<String>) -> Self {
        self.email_address = value.into();
        self
    }

    pub fn note(mut self, value: impl Into<String>) -> Self {
        self.note = value.into();
        self
    }

    /// Snapshot the current fields into an immutable record.
    pub fn build(self) -> Record {
        Record::from(self)
    }
}

/// One contact entry.
///
/// Equality and hashing cover all five fields, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    name: String,
    postal_address: String,
    phone_number: String,
    email_address: String,
    note: String,
}

impl Record {
    /// Shorthand for [`RecordFields::new`].
    pub fn builder(name: impl Into<String>) -> RecordFields {
        RecordFields::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn postal_address(&self) -> &str {
        &self.postal_address
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Typed field access.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::PostalAddress => &self.postal_address,
            Field::PhoneNumber => &self.phone_number,
            Field::EmailAddress => &self.email_address,
            Field::Note => &self.note,
        }
    }

    /// Field access by ordinal; see [`Field::from_ordinal`] for the mapping.
    pub fn get_field(&self, ordinal: usize) -> &str {
        self.field(Field::from_ordinal(ordinal))
    }

    /// Iterate the five fields in persisted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        Field::ALL.into_iter().map(move |f| self.field(f))
    }

    /// All five fields joined with no separator.
    pub fn concatenated(&self) -> String {
        self.fields().collect()
    }

    /// Unpack back into named fields.
    pub fn into_fields(self) -> RecordFields {
        RecordFields {
            name: self.name,
            postal_address: self.postal_address,
            phone_number: self.phone_number,
            email_address: self.email_address,
            note: self.note,
        }
    }
}

impl From<RecordFields> for Record {
    fn from(fields: RecordFields) -> Self {
        Record {
            name: fields.name,
            postal_address: fields.postal_address,
            phone_number: fields.phone_number,
            email_address: fields.email_address,
            note: fields.note,
        }
    }
}

impl fmt::Display for Record {
    /// Space-joined fields: name, address, phone, email, note.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name, self.postal_address, self.phone_number, self.email_address, self.note
        )
    }
}
