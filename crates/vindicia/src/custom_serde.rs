//! Custom serialization/deserialization implementations.
//!
//! Payload fields go through the field-level helpers below: a value of the
//! wrong shape decodes as absent instead of failing the enclosing reply.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::logger;

/// A scalar the SOAP bridge may render either as a JSON number or as a string.
///
/// The raw text is kept as received; numeric views are computed on demand so a
/// malformed value never fails decoding of the surrounding payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NumericText(String);

impl NumericText {
    /// Raw textual form of the value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer view, truncating a fractional value toward zero and saturating
    /// at the bounds of `i64`.
    #[allow(clippy::as_conversions)]
    pub fn as_i64(&self) -> Option<i64> {
        self.0
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| self.as_f64().map(|value| value.trunc() as i64))
    }

    /// Floating point view.
    pub fn as_f64(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

impl From<&str> for NumericText {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for NumericText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NumericText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumericTextVisitor;

        impl de::Visitor<'_> for NumericTextVisitor {
            type Value = NumericText;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(NumericText(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(NumericText(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(NumericText(value.to_string()))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(NumericText(value.to_owned()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(NumericText(value))
            }
        }

        deserializer.deserialize_any(NumericTextVisitor)
    }
}

/// Decode any field type, turning a value of the wrong shape into `None`.
pub mod tolerant {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(T::deserialize(value)
            .map_err(|error| {
                logger::warn!(
                    expected = std::any::type_name::<T>(),
                    %error,
                    "ignoring malformed payload field"
                )
            })
            .ok())
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => {
            logger::warn!("ignoring non-scalar value in a text field");
            None
        }
    }
}

/// Text fields: any JSON scalar is accepted and kept as its textual form.
pub mod scalar_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(scalar_to_string)
    }
}

/// Flags: booleans, `"true"`/`"false"` (any case) and `1`/`0`.
pub mod lenient_bool {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(flag) => Some(flag),
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Number(number) => match number.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            _ => None,
        })
    }
}

/// Personal or secret text fields, decoded like [`scalar_string`].
pub mod secret_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        scalar_string::deserialize(deserializer).map(|text| text.map(SecretString::new))
    }
}

/// Opaque tokens that may arrive as a string or as a JSON document; documents
/// are kept in their serialized form.
pub mod secret_json {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(text) => Some(SecretString::new(text)),
            document => Some(SecretString::new(document.to_string())),
        })
    }
}

/// Write a secret token into an outbound request body, as a JSON document when
/// it holds one and as a string otherwise.
pub fn expose_json<S>(value: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let exposed = value.expose_secret();
    match serde_json::from_str::<Value>(exposed) {
        Ok(document) if document.is_object() || document.is_array() => document.serialize(serializer),
        _ => serializer.serialize_str(exposed),
    }
}

/// Use the well-known RFC 3339 format for parsing gateway timestamps.
pub mod rfc3339 {
    use time::{format_description::well_known::Rfc3339, OffsetDateTime};

    /// Parse a timestamp, returning `None` for anything that is not RFC 3339.
    pub fn parse_optional(value: Option<&str>) -> Option<OffsetDateTime> {
        value.and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok())
    }
}
