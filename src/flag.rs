use std::fmt;

/// Handle to a flag registered in a [`CommandTree`](crate::CommandTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlagId(pub(crate) usize);

/// How many values a flag takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `--verbose`
    NoArg,
    /// `--file a.txt` or `--file=a.txt`
    Single,
    /// `--files a.txt b.txt`
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlagValue {
    #[default]
    Absent,
    Provided,
    Single(String),
    Multiple(Vec<String>),
}

impl FlagValue {
    pub fn is_present(&self) -> bool {
        !matches!(self, FlagValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Single(it) => Some(it.as_str()),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            FlagValue::Multiple(it) => it.as_slice(),
            _ => &[],
        }
    }
}

/// A named option declaration together with the value bound by the last parse.
///
/// A flag is registered once and may be added to any number of commands; every
/// command holding the same [`FlagId`] sees the same value.
#[derive(Clone)]
pub struct Flag {
    name: String,
    short: Option<char>,
    usage: String,
    arity: Arity,
    default: Option<String>,
    value: FlagValue,
}

impl Flag {
    /// Declares a single-argument flag. A `default` becomes the flag's value until a
    /// parse binds something else.
    pub fn new(
        name: impl Into<String>,
        short: Option<char>,
        usage: impl Into<String>,
        default: Option<&str>,
    ) -> Flag {
        let default = default.map(str::to_string);
        Flag {
            name: name.into(),
            short,
            usage: usage.into(),
            arity: Arity::Single,
            value: default.clone().map_or(FlagValue::Absent, FlagValue::Single),
            default,
        }
    }

    pub fn with_arity(mut self, arity: Arity) -> Flag {
        self.set_arity(arity);
        self
    }

    /// Changes the arity. A value bound under the old arity is dropped, default included.
    pub fn set_arity(&mut self, arity: Arity) {
        if self.arity == arity {
            return;
        }
        if self.value.is_present() || self.default.is_some() {
            tracing::warn!(
                flag = %self.name,
                from = ?self.arity,
                to = ?arity,
                "flag retyped while holding a value, value cleared"
            );
            self.value = FlagValue::Absent;
            self.default = None;
        }
        self.arity = arity;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn value(&self) -> &FlagValue {
        &self.value
    }

    pub(crate) fn bind(&mut self, value: FlagValue) {
        tracing::trace!(flag = %self.name, ?value, "bound");
        self.value = value;
    }

    pub(crate) fn reset(&mut self) {
        self.value = self.default.clone().map_or(FlagValue::Absent, FlagValue::Single);
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("arity", &self.arity)
            .field("value", &self.value)
            .finish()
    }
}
