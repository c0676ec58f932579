//! Attribute values and broadcast parameters

use std::fmt;

use mandala_paint::{fmt_number, Color, Vec2};
use serde::{Deserialize, Serialize, Serializer};

/// A single attribute value
///
/// `Null` stands for an explicitly absent value; transform components that
/// contain one are skipped during normalization.
///
/// In JSON a two-number array always decodes as a `Vector`, and non-finite
/// numbers are written as their attribute strings (`"NaN"`, `"Infinity"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    Text(String),
    Vector(Vec2),
    Color(Color),
    List(Vec<Value>),
}

fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.is_finite() {
        serializer.serialize_f64(*n)
    } else {
        serializer.serialize_str(&fmt_number(*n))
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value; numeric text is parsed
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Point view of the value; two-element numeric lists count as points
    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Value::Vector(v) => Some(*v),
            Value::List(items) => match items.as_slice() {
                [x, y] => Some(Vec2::new(x.as_number()?, y.as_number()?)),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Flattened components, as used for `name(v1,v2,...)` transform syntax
    pub fn components(&self) -> Vec<Value> {
        match self {
            Value::List(items) => items.clone(),
            Value::Vector(v) => vec![Value::Number(v.x), Value::Number(v.y)],
            other => vec![other.clone()],
        }
    }
}

/// Attribute-string form of the value
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(n) => f.write_str(&fmt_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Vector(v) => write!(f, "{v}"),
            Value::Color(c) => f.write_str(&c.to_paint_string()),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! number_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(n: $ty) -> Self {
                Value::Number(n as f64)
            }
        })*
    };
}

number_from!(f64, f32, i32, i64, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::Vector(v)
    }
}

impl From<[f64; 2]> for Value {
    fn from(v: [f64; 2]) -> Self {
        Value::Vector(v.into())
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// A scalar broadcast to every child, or a sequence zipped against them
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    One(Value),
    Many(Vec<Value>),
}

macro_rules! scalar_param_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Param {
            fn from(v: $ty) -> Self {
                Param::One(v.into())
            }
        })*
    };
}

scalar_param_from!(Value, f64, f32, i32, i64, u32, u64, usize, &str, String, Vec2, [f64; 2], Color);

impl<T: Into<Value>> From<Vec<T>> for Param {
    fn from(items: Vec<T>) -> Self {
        Param::Many(items.into_iter().map(Into::into).collect())
    }
}

type Generator = Box<dyn Fn(usize) -> Vec<Value>>;

/// Values for `parametrize_in` / `sample`: fixed values, or a generator
/// called with the number of children
pub enum Sampler {
    Values(Param),
    Generator(Generator),
}

impl Sampler {
    pub fn generator<F, T>(f: F) -> Self
    where
        F: Fn(usize) -> Vec<T> + 'static,
        T: Into<Value>,
    {
        Sampler::Generator(Box::new(move |n| {
            f(n).into_iter().map(Into::into).collect()
        }))
    }
}

impl fmt::Debug for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sampler::Values(p) => f.debug_tuple("Values").field(p).finish(),
            Sampler::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<Param> for Sampler {
    fn from(p: Param) -> Self {
        Sampler::Values(p)
    }
}

macro_rules! sampler_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Sampler {
            fn from(v: $ty) -> Self {
                Sampler::Values(v.into())
            }
        })*
    };
}

sampler_from!(Value, f64, f32, i32, i64, u32, u64, usize, &str, String, Vec2, [f64; 2], Color);

impl<T: Into<Value>> From<Vec<T>> for Sampler {
    fn from(items: Vec<T>) -> Self {
        Sampler::Values(items.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandala_paint::rgba;

    #[test]
    fn displays_as_attribute_strings() {
        assert_eq!(Value::from(10).to_string(), "10");
        assert_eq!(Value::from([1.5, -2.0]).to_string(), "1.5,-2");
        assert_eq!(Value::from(vec![45.0, 0.0, 10.0]).to_string(), "45,0,10");
        assert_eq!(
            Value::from(rgba(255.0, 0.0, 0.0, 1.0)).to_string(),
            "rgba(255,0,0,1)"
        );
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn numeric_and_point_views() {
        assert_eq!(Value::from("12.5").as_number(), Some(12.5));
        assert_eq!(Value::from(vec![1.0, 2.0]).as_vec2(), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(Value::from(vec![1.0, 2.0, 3.0]).as_vec2(), None);
        assert_eq!(Value::from(rgba(1.0, 2.0, 3.0, 1.0)).as_number(), None);
    }

    #[test]
    fn components_flatten_vectors_and_lists() {
        assert_eq!(
            Value::from(Vec2::new(1.0, 2.0)).components(),
            vec![Value::Number(1.0), Value::Number(2.0)]
        );
        assert_eq!(Value::from(30).components(), vec![Value::Number(30.0)]);
    }

    #[test]
    fn params_from_scalars_and_sequences() {
        assert_eq!(Param::from(3.0), Param::One(Value::Number(3.0)));
        assert_eq!(
            Param::from(vec![1.0, 2.0]),
            Param::Many(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn untagged_json_decoding() {
        let value: Value = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(value, Value::Vector(Vec2::new(1.0, 2.0)));
        let value: Value = serde_json::from_str(r#"{"space":"rgb","r":1,"g":2,"b":3,"a":0.5}"#)
            .unwrap();
        assert_eq!(value, Value::Color(rgba(1.0, 2.0, 3.0, 0.5)));
        let value: Value = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(value.to_string(), "1,2,3");
        let value: Value = serde_json::from_str(r#"{"space":"rgb","r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(value, Value::Color(rgba(1.0, 2.0, 3.0, 1.0)));
    }

    #[test]
    fn objects_other_than_rgb_colors_are_rejected() {
        for json in [
            r#"{"foo": 1}"#,
            "{}",
            r#"{"space":"hsl","r":1,"g":2,"b":3}"#,
            r#"{"space":"rgb","r":1,"g":2}"#,
            r#"{"space":"rgb","r":1,"g":2,"b":3,"gradient":"x"}"#,
        ] {
            assert!(serde_json::from_str::<Value>(json).is_err(), "{json} decoded");
        }
    }

    #[test]
    fn non_finite_numbers_encode_as_attribute_strings() {
        assert_eq!(serde_json::to_string(&Value::Number(f64::NAN)).unwrap(), r#""NaN""#);
        assert_eq!(
            serde_json::to_string(&Value::Number(f64::NEG_INFINITY)).unwrap(),
            r#""-Infinity""#
        );
        assert_eq!(serde_json::to_string(&Value::Number(2.5)).unwrap(), "2.5");
    }
}
