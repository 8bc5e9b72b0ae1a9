//! Numeric view of sequence elements for `sum` / `average` / `min` / `max`.

use ordered_float::OrderedFloat;
use serde_json::Value;

/// An element that may be read as a number.
///
/// `to_number` returns `None` for values that are not numeric; the numeric
/// operators report those as [`QueryError::TypeMismatch`](crate::QueryError)
/// carrying [`kind`](AsNumber::kind).
pub trait AsNumber {
    fn to_number(&self) -> Option<f64>;

    /// Short description of the value's kind for error messages.
    fn kind(&self) -> String {
        std::any::type_name::<Self>().to_owned()
    }
}

macro_rules! primitive_to_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl AsNumber for $t {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_number(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

primitive_to_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl AsNumber for OrderedFloat<f64> {
    fn to_number(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl AsNumber for OrderedFloat<f32> {
    fn to_number(&self) -> Option<f64> {
        Some(f64::from(self.0))
    }
}

impl<N: AsNumber> AsNumber for Option<N> {
    fn to_number(&self) -> Option<f64> {
        self.as_ref()?.to_number()
    }

    fn kind(&self) -> String {
        match self {
            Some(n) => n.kind(),
            None => "None".to_owned(),
        }
    }
}

impl<N: AsNumber + ?Sized> AsNumber for &N {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }

    fn kind(&self) -> String {
        (**self).kind()
    }
}

impl AsNumber for Value {
    fn to_number(&self) -> Option<f64> {
        self.as_f64()
    }

    fn kind(&self) -> String {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_only_numeric_when_numbers() {
        assert_eq!(json!(2.5).to_number(), Some(2.5));
        assert_eq!(json!("a").to_number(), None);
        assert_eq!(json!("a").kind(), "string");
    }

    #[test]
    fn option_none_is_not_numeric() {
        assert_eq!(Some(3u8).to_number(), Some(3.0));
        assert_eq!(None::<i32>.to_number(), None);
        assert_eq!(None::<i32>.kind(), "None");
    }
}
