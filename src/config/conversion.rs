// Author: Dustin Pilgrim
// License: MIT

use crate::ast::ScalarValue;
use crate::error::MpathError;

fn type_error(expected: &str, value: &ScalarValue, hint: &str, code: u32) -> MpathError {
    MpathError::TypeError {
        message: format!("Expected {}, got {:?}", expected, value),
        line: 0,
        hint: Some(hint.into()),
        code: Some(code),
    }
}

/// Any scalar converts to its config-file spelling, so identifiers that
/// happen to look numeric (aliases, WWIDs) can still be read as strings.
impl TryFrom<ScalarValue> for String {
    type Error = MpathError;

    fn try_from(value: ScalarValue) -> Result<Self, Self::Error> {
        match value {
            ScalarValue::Text(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }
}

impl TryFrom<ScalarValue> for bool {
    type Error = MpathError;

    fn try_from(value: ScalarValue) -> Result<Self, Self::Error> {
        match value {
            ScalarValue::Bool(b) => Ok(b),
            _ => Err(type_error("yes/no", &value, "Use yes, no, true or false", 401)),
        }
    }
}

impl TryFrom<ScalarValue> for f64 {
    type Error = MpathError;

    fn try_from(value: ScalarValue) -> Result<Self, Self::Error> {
        value
            .as_float()
            .ok_or_else(|| type_error("number", &value, "Use a number value in your config", 402))
    }
}

impl TryFrom<ScalarValue> for i64 {
    type Error = MpathError;

    fn try_from(value: ScalarValue) -> Result<Self, Self::Error> {
        value
            .as_int()
            .ok_or_else(|| type_error("integer", &value, "Use a whole number in your config", 403))
    }
}

macro_rules! impl_try_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<ScalarValue> for $t {
                type Error = MpathError;

                fn try_from(value: ScalarValue) -> Result<Self, Self::Error> {
                    let n = i64::try_from(value)?;
                    <$t>::try_from(n).map_err(|_| MpathError::TypeError {
                        message: format!("{} is out of range for {}", n, stringify!($t)),
                        line: 0,
                        hint: Some(format!(
                            "Value must be between {} and {}",
                            <$t>::MIN,
                            <$t>::MAX
                        )),
                        code: Some(404),
                    })
                }
            }
        )*
    };
}

impl_try_from_int!(i32, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_any_scalar() {
        assert_eq!(String::try_from(ScalarValue::Text("alua".into())).unwrap(), "alua");
        assert_eq!(String::try_from(ScalarValue::Int(8192)).unwrap(), "8192");
        assert_eq!(String::try_from(ScalarValue::Bool(true)).unwrap(), "yes");
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(u16::try_from(ScalarValue::Int(10)).unwrap(), 10);
        assert_eq!(f64::try_from(ScalarValue::Int(5)).unwrap(), 5.0);
        assert!(matches!(
            u8::try_from(ScalarValue::Int(300)),
            Err(MpathError::TypeError { code: Some(404), .. })
        ));
        assert!(matches!(
            u32::try_from(ScalarValue::Int(-1)),
            Err(MpathError::TypeError { code: Some(404), .. })
        ));
        assert!(matches!(
            i64::try_from(ScalarValue::Float(1.5)),
            Err(MpathError::TypeError { code: Some(403), .. })
        ));
    }

    #[test]
    fn test_bool_requires_boolean() {
        assert!(bool::try_from(ScalarValue::Bool(false)).is_ok());
        assert!(bool::try_from(ScalarValue::Text("maybe".into())).is_err());
    }
}
