//! Parameter types and the type-conversion registry.
//!
//! Textual parameter tokens are converted to typed [`ParamValue`]s through a
//! [`TypeConverters`] resource: a table of parse functions keyed by
//! [`ParamType`], seeded with built-ins and extensible by external
//! registration. Entries are additive only; a type identifier can never be
//! rebound once registered.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

/// Semantic type of a command parameter.
///
/// A closed set of supported kinds plus two open extension points: named
/// enumerations (variant tables registered via [`TypeConverters::register_enum`])
/// and custom types (parse functions registered via [`TypeConverters::register`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Boolean. Accepts `true`/`false` forms and the numeric literals `0`/`1`.
    Bool,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Free-form string (commonly the greedy final parameter).
    String,
    /// A named enumeration; the identifier refers to a registered [`EnumSpec`].
    Enum(&'static str),
    /// A custom type served by a registered converter.
    Custom(&'static str),
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Bool => write!(f, "bool"),
            ParamType::Int => write!(f, "int"),
            ParamType::Float => write!(f, "float"),
            ParamType::String => write!(f, "string"),
            ParamType::Enum(name) | ParamType::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A converted parameter value, as passed to command actions.
#[derive(Clone)]
pub enum ParamValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// Enumeration value: the enum's type identifier and the variant value.
    Enum {
        /// The enum type identifier.
        ty: &'static str,
        /// The variant value (named variant or raw ordinal).
        value: i64,
    },
    /// A custom value produced by a registered converter.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl ParamValue {
    /// Get as a boolean, if this is a [`ParamValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as an integer, if this is a [`ParamValue::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as a float, if this is a [`ParamValue::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Get as a string slice, if this is a [`ParamValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the enum variant value, if this is a [`ParamValue::Enum`].
    pub fn as_enum(&self) -> Option<i64> {
        match self {
            ParamValue::Enum { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Downcast a custom value to a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            ParamValue::Custom(any) => any.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "Bool({})", b),
            ParamValue::Int(i) => write!(f, "Int({})", i),
            ParamValue::Float(x) => write!(f, "Float({})", x),
            ParamValue::String(s) => write!(f, "String({:?})", s),
            ParamValue::Enum { ty, value } => write!(f, "Enum({}, {})", ty, value),
            ParamValue::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Error produced when a token cannot be converted to its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    /// The offending token.
    pub token: Box<str>,
    /// The expected type.
    pub expected: ParamType,
}

impl ConvertError {
    fn new(token: &str, expected: ParamType) -> Self {
        Self {
            token: token.into(),
            expected,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert \"{}\" to {}", self.token, self.expected)
    }
}

impl std::error::Error for ConvertError {}

/// Type alias for parameter parse functions.
///
/// A converter receives the raw token and returns the converted value, or
/// `None` if the token is not valid for the type.
pub type ConvertFn = Box<dyn Fn(&str) -> Option<ParamValue> + Send + Sync>;

/// A named enumeration usable as a parameter type.
///
/// # Examples
///
/// ```
/// use bevy_devconsole::core::EnumSpec;
///
/// let spec = EnumSpec::new("verbosity")
///     .variant("quiet", 0)
///     .variant("normal", 1)
///     .variant("loud", 2);
///
/// assert_eq!(spec.value_of("Normal"), Some(1));
/// assert_eq!(spec.value_of("silent"), None);
/// ```
#[derive(Debug, Clone)]
pub struct EnumSpec {
    name: &'static str,
    variants: Vec<(&'static str, i64)>,
}

impl EnumSpec {
    /// Create a new enum spec with the given type identifier.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            variants: Vec::new(),
        }
    }

    /// Add a named variant.
    pub fn variant(mut self, name: &'static str, value: i64) -> Self {
        self.variants.push((name, value));
        self
    }

    /// Get the type identifier.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up a variant value by name, case-insensitively.
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.variants
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    /// Look up a variant name by value.
    pub fn name_of(&self, value: i64) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| *n)
    }

    /// Iterate over the variants.
    pub fn variants(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.variants.iter().copied()
    }
}

/// Registry mapping parameter types to parse functions.
///
/// Seeded with converters for [`ParamType::Bool`], [`ParamType::Int`],
/// [`ParamType::Float`] and [`ParamType::String`]. Conversion order for a
/// token: a registered converter for the type, then enumeration matching
/// (case-insensitive variant name, else integer ordinal), then a generic
/// scalar fallback.
#[derive(Resource)]
pub struct TypeConverters {
    converters: HashMap<ParamType, ConvertFn>,
    enums: HashMap<&'static str, EnumSpec>,
}

impl Default for TypeConverters {
    fn default() -> Self {
        let mut converters: HashMap<ParamType, ConvertFn> = HashMap::new();
        converters.insert(ParamType::Bool, Box::new(|s| parse_bool(s).map(ParamValue::Bool)));
        converters.insert(
            ParamType::Int,
            Box::new(|s| s.parse().ok().map(ParamValue::Int)),
        );
        converters.insert(
            ParamType::Float,
            Box::new(|s| s.parse().ok().map(ParamValue::Float)),
        );
        converters.insert(
            ParamType::String,
            Box::new(|s| Some(ParamValue::String(s.to_string()))),
        );

        Self {
            converters,
            enums: HashMap::new(),
        }
    }
}

/// Parse a boolean token. Accepts the forms `true`/`false`, `yes`/`no`,
/// `on`/`off` and `1`/`0`, case-insensitively.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl TypeConverters {
    /// Create a registry seeded with the built-in converters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter for a parameter type.
    ///
    /// Returns `false` if the type already has a converter; entries are
    /// additive only and never overwritten.
    pub fn register<F>(&mut self, ty: ParamType, f: F) -> bool
    where
        F: Fn(&str) -> Option<ParamValue> + Send + Sync + 'static,
    {
        if self.converters.contains_key(&ty) {
            return false;
        }
        self.converters.insert(ty, Box::new(f));
        true
    }

    /// Register an enumeration.
    ///
    /// Returns `false` if an enum with the same identifier already exists.
    pub fn register_enum(&mut self, spec: EnumSpec) -> bool {
        if self.enums.contains_key(spec.name()) {
            return false;
        }
        self.enums.insert(spec.name(), spec);
        true
    }

    /// Check whether a converter is registered for a type.
    pub fn contains(&self, ty: &ParamType) -> bool {
        self.converters.contains_key(ty)
    }

    /// Get a registered enum spec.
    pub fn enum_spec(&self, name: &str) -> Option<&EnumSpec> {
        self.enums.get(name)
    }

    /// Convert a raw token to the given parameter type.
    pub fn convert(&self, token: &str, ty: &ParamType) -> Result<ParamValue, ConvertError> {
        // A registered converter always wins.
        if let Some(f) = self.converters.get(ty) {
            return f(token).ok_or_else(|| ConvertError::new(token, ty.clone()));
        }

        // Enumerations: case-insensitive name match, else integer ordinal.
        if let ParamType::Enum(name) = ty {
            if let Some(spec) = self.enums.get(name) {
                if let Some(value) = spec.value_of(token) {
                    return Ok(ParamValue::Enum { ty: name, value });
                }
                if let Ok(value) = token.parse::<i64>() {
                    return Ok(ParamValue::Enum { ty: name, value });
                }
            }
            return Err(ConvertError::new(token, ty.clone()));
        }

        // Generic scalar fallback for kinds without a converter.
        let value = match ty {
            ParamType::Bool => parse_bool(token).map(ParamValue::Bool),
            ParamType::Int => token.parse().ok().map(ParamValue::Int),
            ParamType::Float => token.parse().ok().map(ParamValue::Float),
            ParamType::String => Some(ParamValue::String(token.to_string())),
            ParamType::Enum(_) | ParamType::Custom(_) => None,
        };

        value.ok_or_else(|| ConvertError::new(token, ty.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bool() {
        let conv = TypeConverters::new();
        assert_eq!(
            conv.convert("true", &ParamType::Bool).unwrap().as_bool(),
            Some(true)
        );
        assert_eq!(
            conv.convert("FALSE", &ParamType::Bool).unwrap().as_bool(),
            Some(false)
        );
        assert_eq!(
            conv.convert("1", &ParamType::Bool).unwrap().as_bool(),
            Some(true)
        );
        assert!(conv.convert("maybe", &ParamType::Bool).is_err());
    }

    #[test]
    fn test_builtin_int_float_string() {
        let conv = TypeConverters::new();
        assert_eq!(
            conv.convert("-42", &ParamType::Int).unwrap().as_int(),
            Some(-42)
        );
        assert_eq!(
            conv.convert("2.5", &ParamType::Float).unwrap().as_float(),
            Some(2.5)
        );
        assert_eq!(
            conv.convert("hi there", &ParamType::String).unwrap().as_str(),
            Some("hi there")
        );
        assert!(conv.convert("2.5", &ParamType::Int).is_err());
    }

    #[test]
    fn test_enum_name_match_case_insensitive() {
        let mut conv = TypeConverters::new();
        assert!(conv.register_enum(
            EnumSpec::new("verbosity")
                .variant("quiet", 0)
                .variant("loud", 2)
        ));

        let ty = ParamType::Enum("verbosity");
        assert_eq!(conv.convert("QUIET", &ty).unwrap().as_enum(), Some(0));
        assert_eq!(conv.convert("Loud", &ty).unwrap().as_enum(), Some(2));
    }

    #[test]
    fn test_enum_ordinal_fallback() {
        let mut conv = TypeConverters::new();
        conv.register_enum(EnumSpec::new("verbosity").variant("quiet", 0));

        let ty = ParamType::Enum("verbosity");
        assert_eq!(conv.convert("7", &ty).unwrap().as_enum(), Some(7));
        assert!(conv.convert("bogus", &ty).is_err());
    }

    #[test]
    fn test_unregistered_enum_fails() {
        let conv = TypeConverters::new();
        assert!(conv.convert("quiet", &ParamType::Enum("missing")).is_err());
    }

    #[test]
    fn test_custom_converter() {
        let mut conv = TypeConverters::new();
        let ty = ParamType::Custom("vec2");
        assert!(conv.register(ty.clone(), |s| {
            let (x, y) = s.split_once(',')?;
            let pair: (f32, f32) = (x.parse().ok()?, y.parse().ok()?);
            Some(ParamValue::Custom(Arc::new(pair)))
        }));

        let value = conv.convert("1.5,2", &ty).unwrap();
        assert_eq!(value.downcast_ref::<(f32, f32)>(), Some(&(1.5, 2.0)));
        assert!(conv.convert("not-a-pair", &ty).is_err());
    }

    #[test]
    fn test_custom_type_without_converter_fails() {
        let conv = TypeConverters::new();
        assert!(conv.convert("x", &ParamType::Custom("vec2")).is_err());
    }

    #[test]
    fn test_registration_additive_only() {
        let mut conv = TypeConverters::new();

        // Built-ins are seeded and cannot be rebound.
        assert!(!conv.register(ParamType::Bool, |_| Some(ParamValue::Bool(true))));

        let ty = ParamType::Custom("color");
        assert!(conv.register(ty.clone(), |_| None));
        assert!(!conv.register(ty, |_| None));

        assert!(conv.register_enum(EnumSpec::new("mode")));
        assert!(!conv.register_enum(EnumSpec::new("mode")));
    }

    #[test]
    fn test_custom_converter_overrides_enum_path() {
        let mut conv = TypeConverters::new();
        conv.register_enum(EnumSpec::new("mode").variant("fast", 1));
        // A converter registered for the enum type takes precedence.
        conv.register(ParamType::Enum("mode"), |s| {
            (s == "special").then_some(ParamValue::Enum { ty: "mode", value: 99 })
        });

        let ty = ParamType::Enum("mode");
        assert_eq!(conv.convert("special", &ty).unwrap().as_enum(), Some(99));
        assert!(conv.convert("fast", &ty).is_err());
    }
}
