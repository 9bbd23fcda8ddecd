use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
use std::fmt::{Display, Formatter};

///server-assigned, never generated here
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const GENDER_OPTIONS: [(&str, &str); 3] = [("M", "Male"), ("F", "Female"), ("O", "Other")];

/// A student as persisted by the remote API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub height_cm: u32,
    pub weight_kg: WeightKg,
    pub date_of_birth: String,
}

impl StudentRecord {
    pub fn middle_name_or_empty(&self) -> &str {
        self.middle_name.as_deref().unwrap_or("")
    }

    ///first, middle and last joined by single spaces, where a missing middle name still leaves its gap
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_name,
            self.middle_name_or_empty(),
            self.last_name
        )
    }

    pub fn matches(&self, lowercase_query: &str) -> bool {
        self.full_name().to_lowercase().contains(lowercase_query)
            || self.address.to_lowercase().contains(lowercase_query)
    }
}

/// A student that has been validated locally but has no id yet. Used as the
/// body for both creation and partial updates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewStudent {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub height_cm: u32,
    pub weight_kg: f64,
    pub date_of_birth: String,
}

/// A weight as the API sent it. Decimal fields can come back as `"55.50"`
/// rather than `55.5`, and are shown the way they arrived.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightKg {
    kg: f64,
    shown: String,
}

impl WeightKg {
    pub const fn kg(&self) -> f64 {
        self.kg
    }
}

impl From<f64> for WeightKg {
    fn from(kg: f64) -> Self {
        Self {
            kg,
            shown: kg.to_string(),
        }
    }
}

impl Display for WeightKg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.shown)
    }
}

impl Serialize for WeightKg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.kg)
    }
}

impl<'de> Deserialize<'de> for WeightKg {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(f64),
            String(String),
        }

        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n.into()),
            NumberOrString::String(s) => {
                let shown = s.trim().to_string();
                let kg = shown
                    .parse()
                    .map_err(|_| D::Error::custom(format!("invalid decimal {s:?}")))?;
                Ok(Self { kg, shown })
            }
        }
    }
}
