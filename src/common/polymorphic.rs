//! Decoding for closed families of response shapes that share a discriminator.
//!
//! A family is a Rust enum implementing [`Polymorphic`]. The discriminator is
//! read from the raw JSON first, then the whole object is decoded into the
//! matching variant. Unknown or missing discriminator values are errors; no
//! family falls back to a default variant.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// Why a response body could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{type_name}: missing discriminator `{field}`")]
    MissingDiscriminator {
        type_name: &'static str,
        field: &'static str,
    },
    #[error("{type_name}: unrecognized `{field}` value `{value}`")]
    UnknownVariant {
        type_name: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("invalid pagination link `{0}`")]
    InvalidPageLink(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A closed set of concrete shapes selected by a discriminator.
pub trait Polymorphic: Sized {
    /// Family name used in error messages.
    const TYPE_NAME: &'static str;
    /// Discriminator field; dotted for nested fields (`next_hop.type`).
    const DISCRIMINATOR: &'static str;

    /// Extract the discriminator value. Families selected by field presence override this.
    fn discriminant(value: &Value) -> Option<&str> {
        lookup(value, Self::DISCRIMINATOR).and_then(Value::as_str)
    }

    /// Decode `value` as the variant named by `discriminant`.
    fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError>;
}

/// Decode a polymorphic value from raw JSON.
pub fn decode<T: Polymorphic>(value: Value) -> Result<T, DecodeError> {
    let discriminant = T::discriminant(&value)
        .map(str::to_owned)
        .ok_or(DecodeError::MissingDiscriminator {
            type_name: T::TYPE_NAME,
            field: T::DISCRIMINATOR,
        })?;
    T::from_variant(&discriminant, value)
}

/// Decode one concrete variant; used inside `from_variant` implementations.
pub fn variant<V: DeserializeOwned>(value: Value) -> Result<V, DecodeError> {
    Ok(serde_json::from_value(value)?)
}

/// The error for a discriminator value outside the family.
pub fn unknown_variant<T: Polymorphic>(discriminant: &str) -> DecodeError {
    DecodeError::UnknownVariant {
        type_name: T::TYPE_NAME,
        field: T::DISCRIMINATOR,
        value: discriminant.to_string(),
    }
}

/// Serde adapter so polymorphic families nest inside derived models.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Polymorphic,
{
    let value = Value::deserialize(deserializer)?;
    decode(value).map_err(D::Error::custom)
}

fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Ip {
        address: String,
    }

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Connection {
        id: String,
    }

    #[derive(Debug, PartialEq)]
    enum NextHop {
        Ip(Ip),
        Connection(Connection),
    }

    impl Polymorphic for NextHop {
        const TYPE_NAME: &'static str = "NextHop";
        const DISCRIMINATOR: &'static str = "target.type";

        fn from_variant(discriminant: &str, value: Value) -> Result<Self, DecodeError> {
            let inner = value.get("target").cloned().unwrap_or(Value::Null);
            match discriminant {
                "ip" => variant(inner).map(NextHop::Ip),
                "connection" => variant(inner).map(NextHop::Connection),
                other => Err(unknown_variant::<Self>(other)),
            }
        }
    }

    #[test]
    fn nested_discriminator_selects_variant() {
        let hop: NextHop =
            decode(json!({"target": {"type": "ip", "address": "10.0.0.1"}})).unwrap();
        assert_eq!(
            hop,
            NextHop::Ip(Ip {
                address: "10.0.0.1".to_string()
            })
        );
    }

    #[test]
    fn unknown_discriminator_fails_closed() {
        let error = decode::<NextHop>(json!({"target": {"type": "tunnel"}})).unwrap_err();
        match error {
            DecodeError::UnknownVariant { value, field, .. } => {
                assert_eq!(value, "tunnel");
                assert_eq!(field, "target.type");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_discriminator_is_reported() {
        let error = decode::<NextHop>(json!({"target": {}})).unwrap_err();
        assert!(matches!(error, DecodeError::MissingDiscriminator { .. }));
    }

    #[test]
    fn variant_shape_mismatch_is_json_error() {
        let error =
            decode::<NextHop>(json!({"target": {"type": "connection", "id": 7}})).unwrap_err();
        assert!(matches!(error, DecodeError::Json(_)));
    }
}
