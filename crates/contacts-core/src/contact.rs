//! The contact record and the request body it is built from.
//!
//! A [`ContactBody`] is what arrives over the wire: every field optional and
//! loosely typed. [`ContactBody::validate`] turns it into [`ContactFields`],
//! the five populated attributes every stored [`Contact`] carries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{ContactId, Error, Result};

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

// ─── Stored record ───────────────────────────────────────────────────────────

/// The five required attributes of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
  #[schema(example = "Ana")]
  pub first_name:     String,
  #[schema(example = "Pérez")]
  pub last_name:      String,
  #[schema(example = "ana@example.com")]
  pub email:          String,
  #[schema(example = "Blue")]
  pub favorite_color: String,
  /// Calendar date, always `YYYY-MM-DD`.
  #[schema(format = Date, example = "1998-04-12")]
  pub birthday:       String,
}

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
  #[serde(rename = "_id")]
  #[schema(value_type = String, example = "507f1f77bcf86cd799439011")]
  pub id:     ContactId,
  #[serde(flatten)]
  pub fields: ContactFields,
}

// ─── Request body ────────────────────────────────────────────────────────────

/// JSON body accepted by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
  #[serde(default)]
  pub first_name:     Option<Value>,
  #[serde(default)]
  pub last_name:      Option<Value>,
  #[serde(default)]
  pub email:          Option<Value>,
  #[serde(default)]
  pub favorite_color: Option<Value>,
  #[serde(default)]
  pub birthday:       Option<Value>,
}

impl ContactBody {
  /// Check that all five fields are present and truthy, then normalise them.
  ///
  /// Missing, `null`, `""`, `false` and `0` all count as absent. The
  /// missing-field check runs before any type check, so a body with one
  /// absent field always yields [`Error::MissingFields`].
  pub fn validate(self) -> Result<ContactFields> {
    let entries = [
      ("firstName", self.first_name),
      ("lastName", self.last_name),
      ("email", self.email),
      ("favoriteColor", self.favorite_color),
      ("birthday", self.birthday),
    ];

    let missing: Vec<&'static str> = entries
      .iter()
      .filter(|(_, v)| !v.as_ref().is_some_and(is_truthy))
      .map(|(name, _)| *name)
      .collect();
    if !missing.is_empty() {
      return Err(Error::MissingFields(missing));
    }

    let [first_name, last_name, email, favorite_color, birthday] =
      entries.map(|(name, v)| scalar_text(name, v.unwrap_or(Value::Null)));

    Ok(ContactFields {
      first_name:     first_name?,
      last_name:      last_name?,
      email:          email?,
      favorite_color: favorite_color?,
      birthday:       normalize_birthday(&birthday?)?,
    })
  }
}

fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

fn scalar_text(field: &'static str, value: Value) -> Result<String> {
  match value {
    Value::String(s) => Ok(s),
    Value::Number(n) => Ok(n.to_string()),
    Value::Bool(b) => Ok(b.to_string()),
    Value::Null | Value::Array(_) | Value::Object(_) => {
      Err(Error::UnsupportedValue(field))
    }
  }
}

/// Accept `YYYY-MM-DD` or an RFC 3339 timestamp; return the `YYYY-MM-DD`
/// form of the (UTC) date.
pub fn normalize_birthday(raw: &str) -> Result<String> {
  let date = NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
    .ok()
    .or_else(|| {
      DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
    .ok_or_else(|| Error::InvalidBirthday(raw.to_owned()))?;
  Ok(date.format(BIRTHDAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn body(v: Value) -> ContactBody { serde_json::from_value(v).unwrap() }

  fn ana() -> Value {
    json!({
      "firstName": "Ana",
      "lastName": "Pérez",
      "email": "ana@example.com",
      "favoriteColor": "Blue",
      "birthday": "1998-04-12",
    })
  }

  #[test]
  fn complete_body_validates() {
    let fields = body(ana()).validate().unwrap();
    assert_eq!(fields.first_name, "Ana");
    assert_eq!(fields.last_name, "Pérez");
    assert_eq!(fields.birthday, "1998-04-12");
  }

  #[test]
  fn each_missing_field_is_reported() {
    for name in ["firstName", "lastName", "email", "favoriteColor", "birthday"] {
      let mut v = ana();
      v.as_object_mut().unwrap().remove(name);
      match body(v).validate() {
        Err(Error::MissingFields(m)) => assert_eq!(m, vec![name]),
        other => panic!("expected MissingFields for {name}, got {other:?}"),
      }
    }
  }

  #[test]
  fn falsy_values_count_as_missing() {
    for falsy in [json!(null), json!(""), json!(false), json!(0), json!(0.0)] {
      let mut v = ana();
      v["email"] = falsy.clone();
      assert!(
        matches!(body(v).validate(), Err(Error::MissingFields(_))),
        "{falsy} should be rejected"
      );
    }
  }

  #[test]
  fn missing_check_precedes_type_check() {
    let mut v = ana();
    v["firstName"] = json!(["Ana"]);
    v.as_object_mut().unwrap().remove("email");
    assert!(matches!(body(v).validate(), Err(Error::MissingFields(_))));
  }

  #[test]
  fn structured_values_are_rejected() {
    let mut v = ana();
    v["favoriteColor"] = json!({ "r": 0 });
    assert!(matches!(
      body(v).validate(),
      Err(Error::UnsupportedValue("favoriteColor"))
    ));
  }

  #[test]
  fn truthy_scalars_become_text() {
    let mut v = ana();
    v["favoriteColor"] = json!(7);
    assert_eq!(body(v).validate().unwrap().favorite_color, "7");
  }

  #[test]
  fn birthday_accepts_timestamps_and_rejects_garbage() {
    assert_eq!(
      normalize_birthday("1998-04-12T00:00:00Z").unwrap(),
      "1998-04-12"
    );
    assert_eq!(
      normalize_birthday("1998-04-12T23:30:00-02:00").unwrap(),
      "1998-04-13"
    );
    assert!(matches!(
      normalize_birthday("next tuesday"),
      Err(Error::InvalidBirthday(_))
    ));
    assert!(normalize_birthday("1998-02-30").is_err());
  }

  #[test]
  fn contact_serialises_with_underscore_id() {
    let contact = Contact {
      id:     "507f1f77bcf86cd799439011".parse().unwrap(),
      fields: body(ana()).validate().unwrap(),
    };
    let v = serde_json::to_value(&contact).unwrap();
    assert_eq!(v["_id"], "507f1f77bcf86cd799439011");
    assert_eq!(v["favoriteColor"], "Blue");
    assert_eq!(v.as_object().unwrap().len(), 6);
  }
}
