//! Directive option validation.
//!
//! Validators follow the docutils option vocabulary so that option specs
//! written for the host parser behave the same here.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use sc_doctree::AttrValue;

use crate::error::DirectiveError;

/// Length units accepted by length options.
const LENGTH_UNITS: &[&str] = &["em", "ex", "px", "in", "cm", "mm", "pt", "pc"];

/// Values of the image `align` option.
pub const ALIGN_VALUES: &[&str] = &["top", "middle", "bottom", "left", "center", "right"];

static MEASURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9.]+) *([a-z%]*)$").unwrap());

static NON_ID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Validator of one option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    /// No value allowed.
    Flag,
    /// Any value, including none.
    Unchanged,
    /// Any non-missing value.
    UnchangedRequired,
    /// URI with all whitespace removed.
    Uri,
    /// Space-separated class names, normalized to identifiers.
    ClassOption,
    /// Any integer.
    Int,
    /// Integer `>= 0`.
    NonnegativeInt,
    /// Integer `>= 1`.
    PositiveInt,
    /// Non-negative integer with an optional trailing `%`.
    Percentage,
    /// Number with an optional length unit.
    LengthOrUnitless,
    /// Number with an optional length unit or `%`.
    LengthOrPercentageOrUnitless,
    /// One of the listed values, case-insensitive.
    Choice(&'static [&'static str]),
    /// `true` or `false`.
    TrueFalse,
    /// `static` or `dynamic`.
    StaticDynamic,
}

/// Option names and validators of a directive, in declaration order.
pub type OptionSpec = &'static [(&'static str, OptionKind)];

/// Validated option value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// Value of a flag option.
    Flag,
    /// Text value.
    Text(String),
    /// Integer value.
    Int(i64),
    /// List value.
    List(Vec<String>),
}

impl OptionValue {
    /// Convert into a node attribute value.
    #[must_use]
    pub fn to_attr(&self) -> AttrValue {
        match self {
            Self::Flag => AttrValue::Bool(true),
            Self::Text(text) => AttrValue::Str(text.clone()),
            Self::Int(n) => AttrValue::Int(*n),
            Self::List(items) => AttrValue::List(items.clone()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Int(n) => write!(f, "{n}"),
            Self::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl OptionKind {
    /// Validate and normalize a raw option value.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when the value is rejected.
    pub fn validate(self, value: Option<&str>) -> Result<OptionValue, String> {
        match self {
            Self::Flag => match value.map(str::trim) {
                Some(v) if !v.is_empty() => Err(format!("no argument is allowed; \"{v}\" supplied")),
                _ => Ok(OptionValue::Flag),
            },
            Self::Unchanged => Ok(OptionValue::Text(value.unwrap_or_default().to_owned())),
            Self::UnchangedRequired => Ok(OptionValue::Text(required(value)?.to_owned())),
            Self::Uri => Ok(OptionValue::Text(uri(required(value)?))),
            Self::ClassOption => class_option(required(value)?).map(OptionValue::List),
            Self::Int => parse_int(required(value)?).map(OptionValue::Int),
            Self::NonnegativeInt => nonnegative_int(required(value)?).map(OptionValue::Int),
            Self::PositiveInt => {
                let n = parse_int(required(value)?)?;
                if n < 1 {
                    return Err("negative or zero value; must be positive".to_owned());
                }
                Ok(OptionValue::Int(n))
            }
            Self::Percentage => {
                let raw = required(value)?.trim_end();
                nonnegative_int(raw.strip_suffix('%').unwrap_or(raw)).map(OptionValue::Int)
            }
            Self::LengthOrUnitless => {
                let mut units = LENGTH_UNITS.to_vec();
                units.push("");
                measure(required(value)?, &units).map(OptionValue::Text)
            }
            Self::LengthOrPercentageOrUnitless => {
                let mut units = LENGTH_UNITS.to_vec();
                units.extend(["%", ""]);
                measure(required(value)?, &units).map(OptionValue::Text)
            }
            Self::Choice(values) => choice(required(value)?, values).map(OptionValue::Text),
            Self::TrueFalse => choice(required(value)?, &["true", "false"]).map(OptionValue::Text),
            Self::StaticDynamic => {
                choice(required(value)?, &["static", "dynamic"]).map(OptionValue::Text)
            }
        }
    }
}

fn required(value: Option<&str>) -> Result<&str, String> {
    value.ok_or_else(|| "argument required but none supplied".to_owned())
}

/// Remove all whitespace from a URI.
#[must_use]
pub fn uri(value: &str) -> String {
    value.split_whitespace().collect()
}

fn parse_int(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid literal for integer: \"{value}\""))
}

fn nonnegative_int(value: &str) -> Result<i64, String> {
    let n = parse_int(value)?;
    if n < 0 {
        return Err("negative value; must be positive or zero".to_owned());
    }
    Ok(n)
}

fn choice(value: &str, values: &[&str]) -> Result<String, String> {
    let normalized = value.trim().to_lowercase();
    if values.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        let quoted: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
        Err(format!(
            "\"{value}\" unknown; choose from {}",
            quoted.join(", ")
        ))
    }
}

fn measure(value: &str, units: &[&str]) -> Result<String, String> {
    let invalid = || {
        let listed: Vec<String> = units.iter().map(|u| format!("\"{u}\"")).collect();
        format!(
            "\"{value}\" is not a valid measure; valid units: {}",
            listed.join(" ")
        )
    };
    let captures = MEASURE_RE.captures(value.trim()).ok_or_else(invalid)?;
    let number = &captures[1];
    let unit = &captures[2];
    if number.parse::<f64>().is_err() || !units.contains(&unit) {
        return Err(invalid());
    }
    Ok(format!("{number}{unit}"))
}

/// Normalize text into an identifier usable as a class name.
///
/// Lowercases, replaces runs of other characters with `-` and strips
/// leading non-letters and trailing hyphens.
#[must_use]
pub fn make_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = NON_ID_CHARS_RE.replace_all(&lowered, "-");
    replaced
        .trim_start_matches(|c: char| !c.is_ascii_lowercase())
        .trim_end_matches('-')
        .to_owned()
}

fn class_option(value: &str) -> Result<Vec<String>, String> {
    value
        .split_whitespace()
        .map(|name| {
            let id = make_id(name);
            if id.is_empty() {
                Err(format!("cannot make \"{name}\" into a class name"))
            } else {
                Ok(id)
            }
        })
        .collect()
}

/// Options of one directive call, validated and in option-spec order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    values: Vec<(&'static str, OptionValue)>,
}

impl Options {
    /// Validate raw `(name, value)` pairs against `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError`] for unknown or duplicate options and for
    /// values rejected by their validator.
    pub fn parse(
        directive: &str,
        spec: OptionSpec,
        raw: &[(String, Option<String>)],
    ) -> Result<Self, DirectiveError> {
        let mut given: Vec<(usize, &'static str, OptionValue)> = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let Some(position) = spec.iter().position(|(spec_name, _)| spec_name == name) else {
                return Err(DirectiveError::UnknownOption {
                    directive: directive.to_owned(),
                    option: name.clone(),
                });
            };
            if given.iter().any(|(p, _, _)| *p == position) {
                return Err(DirectiveError::DuplicateOption {
                    directive: directive.to_owned(),
                    option: name.clone(),
                });
            }
            let (spec_name, kind) = spec[position];
            let value = kind
                .validate(value.as_deref())
                .map_err(|message| DirectiveError::InvalidOption {
                    directive: directive.to_owned(),
                    option: name.clone(),
                    message,
                })?;
            given.push((position, spec_name, value));
        }
        given.sort_by_key(|(position, _, _)| *position);
        Ok(Self {
            values: given.into_iter().map(|(_, name, value)| (name, value)).collect(),
        })
    }

    /// Value of option `name`, if given.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values
            .iter()
            .find_map(|(n, value)| (*n == name).then_some(value))
    }

    /// Whether option `name` was given.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Given options in option-spec order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OptionValue)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Number of given options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no option was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
