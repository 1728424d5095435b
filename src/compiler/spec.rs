//! Declarative level specifications and directory-name values.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Description of the names expected at one directory level.
///
/// In YAML a level is either a plain string (a literal directory name) or a
/// mapping from parameter name to sub-pattern; mapping order is preserved.
///
/// ```rust
/// use experiment_manager::compiler::LevelSpec;
///
/// let levels: Vec<LevelSpec> = serde_yaml::from_str(r#"
/// - K: '\d+'
///   multiplier: '[-+]?(?:\d*\.\d+|\d+)'
/// - results
/// "#)?;
/// assert_eq!(levels[1], LevelSpec::literal("results"));
/// # Ok::<(), serde_yaml::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSpec {
    /// Directory name must equal this string.
    Literal(String),

    /// Ordered `(parameter name, sub-pattern)` pairs.
    Parametrized(Vec<(String, String)>),
}

impl LevelSpec {
    pub fn literal(name: impl Into<String>) -> Self {
        LevelSpec::Literal(name.into())
    }

    /// Build a parametrized level from `(name, sub-pattern)` pairs.
    pub fn params<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        LevelSpec::Parametrized(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Parameter names declared by this level, in declaration order.
    pub fn parameter_names(&self) -> Vec<&str> {
        match self {
            LevelSpec::Literal(_) => Vec::new(),
            LevelSpec::Parametrized(pairs) => pairs.iter().map(|(k, _)| k.as_str()).collect(),
        }
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        LevelSpec::literal(name)
    }
}

impl Serialize for LevelSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LevelSpec::Literal(name) => serializer.serialize_str(name),
            LevelSpec::Parametrized(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (name, pattern) in pairs {
                    map.serialize_entry(name, pattern)?;
                }
                map.end()
            }
        }
    }
}

struct LevelSpecVisitor;

impl<'de> Visitor<'de> for LevelSpecVisitor {
    type Value = LevelSpec;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a directory name or a mapping of parameter names to patterns")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<LevelSpec, E> {
        Ok(LevelSpec::literal(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<LevelSpec, E> {
        Ok(LevelSpec::Literal(value))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<LevelSpec, A::Error> {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, pattern)) = access.next_entry::<String, String>()? {
            pairs.push((name, pattern));
        }
        Ok(LevelSpec::Parametrized(pairs))
    }
}

impl<'de> Deserialize<'de> for LevelSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LevelSpecVisitor)
    }
}

/// Values used to build a directory name, the inverse of [`LevelSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelValues {
    /// A plain directory name.
    Literal(String),

    /// Ordered `(parameter name, rendered value)` pairs.
    Values(Vec<(String, String)>),
}

impl LevelValues {
    pub fn literal(name: impl Into<String>) -> Self {
        LevelValues::Literal(name.into())
    }

    /// Start an empty set of parameter values, to be filled with [`with`](Self::with).
    ///
    /// ```rust
    /// use experiment_manager::compiler::{render_name, LevelValues};
    ///
    /// let values = LevelValues::params().with("seed", 7).with("adam", true);
    /// assert_eq!(render_name(&values, false), "seed=7_adam=True");
    /// ```
    pub fn params() -> Self {
        LevelValues::Values(Vec::new())
    }

    /// Append a parameter value. Has no effect on a literal.
    pub fn with(mut self, name: impl Into<String>, value: impl DirValue) -> Self {
        if let LevelValues::Values(pairs) = &mut self {
            pairs.push((name.into(), value.render()));
        }
        self
    }
}

impl From<&str> for LevelValues {
    fn from(name: &str) -> Self {
        LevelValues::literal(name)
    }
}

/// Rendering of a value inside a directory name.
///
/// Booleans render as `True`/`False`, whole floats keep one decimal (`1.0`),
/// very small or large floats use exponent notation (`1e-05`, `1e+16`) and
/// sequences render as `[a, b, c]`, matching the names produced by the
/// experiment scripts these trees usually come from.
pub trait DirValue {
    fn render(&self) -> String;
}

impl DirValue for bool {
    fn render(&self) -> String {
        let name = if *self { "True" } else { "False" };
        name.to_string()
    }
}

impl DirValue for str {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl DirValue for String {
    fn render(&self) -> String {
        self.clone()
    }
}

macro_rules! display_dir_value {
    ($($ty:ty),*) => {
        $(impl DirValue for $ty {
            fn render(&self) -> String {
                self.to_string()
            }
        })*
    };
}

display_dir_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, char);

/// Shortest round-trip digits, switching to `1e-05` / `1e+16` notation
/// outside `1e-4 <= |value| < 1e16`.
fn render_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let name = if value > 0.0 { "inf" } else { "-inf" };
        return name.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

impl DirValue for f64 {
    fn render(&self) -> String {
        render_float(*self)
    }
}

impl DirValue for f32 {
    fn render(&self) -> String {
        render_float(f64::from(*self))
    }
}

impl<T: DirValue> DirValue for [T] {
    fn render(&self) -> String {
        let items: Vec<String> = self.iter().map(DirValue::render).collect();
        format!("[{}]", items.join(", "))
    }
}

impl<T: DirValue> DirValue for Vec<T> {
    fn render(&self) -> String {
        self.as_slice().render()
    }
}

impl<T: DirValue + ?Sized> DirValue for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: DirValue> DirValue for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.render(),
            None => "None".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_levels_preserves_order() {
        let levels: Vec<LevelSpec> = serde_yaml::from_str(
            r#"
- multiplier: '[-+]?(?:\d*\.\d+|\d+)'
  K: '\d+'
- results
- sample: 'True|False'
"#,
        )
        .unwrap();

        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0].parameter_names(), vec!["multiplier", "K"]);
        assert_eq!(levels[1], LevelSpec::literal("results"));
        assert_eq!(
            levels[2],
            LevelSpec::params([("sample", "True|False")])
        );
    }

    #[test]
    fn test_serialize_roundtrip_through_yaml() {
        let levels = vec![
            LevelSpec::params([("seed", r"\d+")]),
            LevelSpec::literal("results"),
        ];
        let yaml = serde_yaml::to_string(&levels).unwrap();
        let parsed: Vec<LevelSpec> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, levels);
    }

    #[test]
    fn test_deserialize_rejects_sequences() {
        let result = serde_yaml::from_str::<LevelSpec>("- a\n- b\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_float_rendering_switches_to_exponent_notation() {
        assert_eq!(0.0001_f64.render(), "0.0001");
        assert_eq!(1e-5_f64.render(), "1e-05");
        assert_eq!(1.5e-7_f64.render(), "1.5e-07");
        assert_eq!((-2.5e-5_f64).render(), "-2.5e-05");
        assert_eq!(1e15_f64.render(), "1000000000000000.0");
        assert_eq!(1e16_f64.render(), "1e+16");
        assert_eq!(2.5e100_f64.render(), "2.5e+100");
        assert_eq!((-3.0_f64).render(), "-3.0");
        assert_eq!(0.0_f64.render(), "0.0");
    }

    #[test]
    fn test_dir_value_rendering() {
        assert_eq!(true.render(), "True");
        assert_eq!(false.render(), "False");
        assert_eq!(3_i32.render(), "3");
        assert_eq!(0.5_f64.render(), "0.5");
        assert_eq!(1.0_f64.render(), "1.0");
        assert_eq!(f64::NAN.render(), "nan");
        assert_eq!(f64::NEG_INFINITY.render(), "-inf");
        assert_eq!("abcd".render(), "abcd");
        assert_eq!(vec![1, 2, 3].render(), "[1, 2, 3]");
        assert_eq!(None::<i32>.render(), "None");
    }

    #[test]
    fn test_level_values_builder() {
        let values = LevelValues::params()
            .with("arg2", 1)
            .with("arg1", false)
            .with("abc", "abcd");
        assert_eq!(
            values,
            LevelValues::Values(vec![
                ("arg2".to_string(), "1".to_string()),
                ("arg1".to_string(), "False".to_string()),
                ("abc".to_string(), "abcd".to_string()),
            ])
        );

        let literal = LevelValues::literal("subfolder").with("ignored", 1);
        assert_eq!(literal, LevelValues::literal("subfolder"));
    }
}
