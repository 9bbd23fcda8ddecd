use crate::data::student::{NewStudent, StudentRecord};
use bitflags::bitflags;
use regex::Regex;
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};

static DATE_OF_BIRTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex is valid"));
static LEADING_INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("integer regex is valid"));
static LEADING_DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]+)?|\.[0-9]+)([eE][+-]?[0-9]+)?")
        .expect("decimal regex is valid")
});

///the whole number at the start of `input`, so `"170.5"` reads as 170 and `"0.5"` as 0
fn leading_integer(input: &str) -> Option<i64> {
    LEADING_INTEGER_RE.find(input.trim())?.as_str().parse().ok()
}

///the decimal at the start of `input`, so `"55.5kg"` reads as 55.5
fn leading_decimal(input: &str) -> Option<f64> {
    LEADING_DECIMAL_RE.find(input.trim())?.as_str().parse().ok()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StudentField {
    FirstName,
    MiddleName,
    LastName,
    Address,
    Gender,
    HeightCm,
    WeightKg,
    DateOfBirth,
}

impl StudentField {
    ///the name used both on the wire and as the form input name
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::MiddleName => "middle_name",
            Self::LastName => "last_name",
            Self::Address => "address",
            Self::Gender => "gender",
            Self::HeightCm => "height_cm",
            Self::WeightKg => "weight_kg",
            Self::DateOfBirth => "date_of_birth",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::MiddleName => "Middle Name (optional)",
            Self::LastName => "Last Name",
            Self::Address => "Address",
            Self::Gender => "Gender",
            Self::HeightCm => "Height (cm)",
            Self::WeightKg => "Weight (kg)",
            Self::DateOfBirth => "Date of Birth",
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub struct StudentValidationError: u8 {
        const EMPTY_FIRST_NAME =   0b0000_0001;
        const EMPTY_LAST_NAME =    0b0000_0010;
        const EMPTY_ADDRESS =      0b0000_0100;
        const MISSING_GENDER =     0b0000_1000;
        const BAD_HEIGHT =         0b0001_0000;
        const BAD_WEIGHT =         0b0010_0000;
        const BAD_DATE_OF_BIRTH =  0b0100_0000;
    }
}

impl StudentValidationError {
    pub fn as_field_messages(&self) -> impl Iterator<Item = (StudentField, &'static str)> {
        self.iter().filter_map(|e| match e {
            Self::EMPTY_FIRST_NAME => Some((StudentField::FirstName, "First name is required.")),
            Self::EMPTY_LAST_NAME => Some((StudentField::LastName, "Last name is required.")),
            Self::EMPTY_ADDRESS => Some((StudentField::Address, "Address is required.")),
            Self::MISSING_GENDER => Some((StudentField::Gender, "Please select gender.")),
            Self::BAD_HEIGHT => Some((StudentField::HeightCm, "Height must be positive.")),
            Self::BAD_WEIGHT => Some((StudentField::WeightKg, "Weight must be positive.")),
            Self::BAD_DATE_OF_BIRTH => Some((StudentField::DateOfBirth, "Use YYYY-MM-DD format.")),
            _ => None,
        })
    }
}

/// One message per field, keyed by the field's wire name. Server-side errors
/// can name fields we don't have inputs for, so the key stays a string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: StudentField) -> Option<&str> {
        self.0.get(field.name()).map(String::as_str)
    }

    ///keeps only the first message for each field, fields with no messages are skipped
    pub fn from_server(payload: HashMap<String, Vec<String>>) -> Self {
        Self(
            payload
                .into_iter()
                .filter_map(|(field, messages)| {
                    messages.into_iter().next().map(|first| (field, first))
                })
                .collect(),
        )
    }
}

impl From<StudentValidationError> for FieldErrors {
    fn from(value: StudentValidationError) -> Self {
        let mut errors = Self::default();
        for (field, message) in value.as_field_messages() {
            errors.insert(field.name(), message);
        }
        errors
    }
}

/// Raw form inputs, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub date_of_birth: String,
}

impl StudentForm {
    pub fn value(&self, field: StudentField) -> &str {
        match field {
            StudentField::FirstName => &self.first_name,
            StudentField::MiddleName => &self.middle_name,
            StudentField::LastName => &self.last_name,
            StudentField::Address => &self.address,
            StudentField::Gender => &self.gender,
            StudentField::HeightCm => &self.height_cm,
            StudentField::WeightKg => &self.weight_kg,
            StudentField::DateOfBirth => &self.date_of_birth,
        }
    }

    ///trims and types every input, then checks every rule so all failing fields are reported together
    pub fn validate(&self) -> Result<NewStudent, StudentValidationError> {
        let mut errors = StudentValidationError::empty();

        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let address = self.address.trim();
        let date_of_birth = self.date_of_birth.trim();

        if first_name.is_empty() {
            errors |= StudentValidationError::EMPTY_FIRST_NAME;
        }
        if last_name.is_empty() {
            errors |= StudentValidationError::EMPTY_LAST_NAME;
        }
        if address.is_empty() {
            errors |= StudentValidationError::EMPTY_ADDRESS;
        }
        if self.gender.is_empty() {
            errors |= StudentValidationError::MISSING_GENDER;
        }

        let height_cm = leading_integer(&self.height_cm)
            .filter(|h| *h > 0)
            .and_then(|h| u32::try_from(h).ok());
        if height_cm.is_none() {
            errors |= StudentValidationError::BAD_HEIGHT;
        }

        let weight_kg = leading_decimal(&self.weight_kg).filter(|w| w.is_finite() && *w > 0.0);
        if weight_kg.is_none() {
            errors |= StudentValidationError::BAD_WEIGHT;
        }

        if !DATE_OF_BIRTH_RE.is_match(date_of_birth) {
            errors |= StudentValidationError::BAD_DATE_OF_BIRTH;
        }

        match (height_cm, weight_kg) {
            (Some(height_cm), Some(weight_kg)) if errors.is_empty() => Ok(NewStudent {
                first_name: first_name.to_string(),
                middle_name: self.middle_name.trim().to_string(),
                last_name: last_name.to_string(),
                address: address.to_string(),
                gender: self.gender.clone(),
                height_cm,
                weight_kg,
                date_of_birth: date_of_birth.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

impl From<&StudentRecord> for StudentForm {
    fn from(record: &StudentRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            middle_name: record.middle_name_or_empty().to_string(),
            last_name: record.last_name.clone(),
            address: record.address.clone(),
            gender: record.gender.clone(),
            height_cm: record.height_cm.to_string(),
            weight_kg: record.weight_kg.to_string(),
            date_of_birth: record.date_of_birth.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn ana_cruz_form() -> StudentForm {
    StudentForm {
        first_name: "Ana".into(),
        middle_name: String::new(),
        last_name: "Cruz".into(),
        address: "1 Main St".into(),
        gender: "F".into(),
        height_cm: "160".into(),
        weight_kg: "55.5".into(),
        date_of_birth: "2001-05-09".into(),
    }
}
