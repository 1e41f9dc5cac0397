use super::{Type, Value};
use crate::{Error, Result};

impl Value {
    pub(crate) fn coerce_chrono(&self, ty: Type) -> Result<Option<Value>> {
        Ok(Some(match (self, ty) {
            // String -> chrono
            (Value::String(value), Type::Timestamp) => {
                Value::Timestamp(value.parse().map_err(|err| parse_error(err, ty))?)
            }
            (Value::String(value), Type::Date) => {
                Value::Date(value.parse().map_err(|err| parse_error(err, ty))?)
            }

            // chrono -> String
            (Value::Timestamp(value), Type::String) => Value::String(value.to_rfc3339()),
            (Value::Date(value), Type::String) => Value::String(value.to_string()),

            // A timestamp stored in a date column keeps its calendar day.
            (Value::Timestamp(value), Type::Date) => Value::Date(value.date_naive()),

            _ => return Ok(None),
        }))
    }
}

fn parse_error(err: chrono::ParseError, ty: Type) -> Error {
    Error::from(err).context(Error::type_conversion("String", ty.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn string_to_date() {
        assert_eq!(
            Value::from("2020-05-17").coerce(Type::Date).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2020, 5, 17).unwrap())
        );
    }

    #[test]
    fn timestamp_to_date_keeps_day() {
        let ts: chrono::DateTime<chrono::Utc> = "2020-05-17T10:30:00Z".parse().unwrap();
        assert_eq!(
            Value::Timestamp(ts).coerce(Type::Date).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2020, 5, 17).unwrap())
        );
    }

    #[test]
    fn bad_date_string_is_a_conversion_error() {
        let err = Value::from("not-a-date").coerce(Type::Date).unwrap_err();
        assert!(err.is_materialization());
        assert!(err.to_string().starts_with("cannot convert String to Date"));
    }

    #[test]
    fn bad_timestamp_string_is_a_conversion_error() {
        let err = Value::from("yesterday").coerce(Type::Timestamp).unwrap_err();
        assert!(err.is_materialization());
    }
}
