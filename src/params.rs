//! Request parameters and the validation rules shared by every endpoint.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{TwitterError, TwitterResult};

/// A caller-supplied numeric argument such as an id, a count or a cursor.
///
/// The value is kept as text until an endpoint validates it, so that input like
/// `"abc"` is rejected with [`TwitterError::InvalidArgument`] before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Numeric(String);

impl Numeric {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the argument, naming it in the error when it is not an integer.
    pub fn integer(&self, name: &str) -> TwitterResult<i64> {
        self.0
            .trim()
            .parse::<i64>()
            .map_err(|_| TwitterError::invalid(format!("'{name}' must be an integer")))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! numeric_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Numeric {
            fn from(n: $t) -> Self {
                Numeric(n.to_string())
            }
        })*
    };
}

numeric_from_int!(u64, i64, u32, i32, usize);

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric(s.to_owned())
    }
}

impl From<String> for Numeric {
    fn from(s: String) -> Self {
        Numeric(s)
    }
}

impl From<&Numeric> for Numeric {
    fn from(n: &Numeric) -> Self {
        n.clone()
    }
}

/// A flat, string-keyed parameter map. `None` values are kept so that callers can
/// pass optional arguments straight through; they are dropped when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, Option<String>>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.to_owned(), Some(value.into()));
        self
    }

    pub fn set_opt<V: Into<String>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        self.0.insert(key.to_owned(), value.map(Into::into));
        self
    }

    pub fn boolean(&mut self, key: &str, value: bool) -> &mut Self {
        self.set(key, if value { "true" } else { "false" })
    }

    /// Sends `key=true`/`key=false` when the caller chose a value; Twitter's default applies otherwise.
    pub fn opt_boolean(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.boolean(key, value);
        }
        self
    }

    /// Validates and stores an optional integer argument.
    pub fn integer(&mut self, key: &str, value: Option<&Numeric>) -> TwitterResult<()> {
        if let Some(value) = value {
            let n = value.integer(key)?;
            self.set(key, n.to_string());
        }
        Ok(())
    }

    /// Like [`Params::integer`] but also enforces the endpoint's upper bound.
    pub fn count(&mut self, key: &str, value: Option<&Numeric>, max: i64) -> TwitterResult<()> {
        if let Some(value) = value {
            let n = value.integer(key)?;
            if n > max {
                return Err(TwitterError::invalid(format!(
                    "'{key}' may not be greater than {max}"
                )));
            }
            self.set(key, n.to_string());
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The non-null pairs, in key order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    /// Returns `self` layered over `defaults`; explicit values win.
    pub fn with_defaults(&self, defaults: &Params) -> Params {
        let mut merged = defaults.clone();
        for (k, v) in &self.0 {
            merged.0.insert(k.clone(), v.clone());
        }
        merged
    }
}

/// Identifies a user either by numeric id or by screen name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(Numeric),
    ScreenName(String),
}

impl UserRef {
    pub fn id(id: impl Into<Numeric>) -> Self {
        UserRef::Id(id.into())
    }

    pub fn screen_name(name: impl Into<String>) -> Self {
        UserRef::ScreenName(name.into())
    }

    /// Writes `user_id`/`screen_name` (or `<prefix>id`/`<prefix>screen_name`).
    pub(crate) fn apply(&self, params: &mut Params, prefix: &str) -> TwitterResult<()> {
        match self {
            UserRef::Id(id) => {
                let key = format!("{prefix}{}", if prefix.is_empty() { "user_id" } else { "id" });
                let n = id.integer(&key)?;
                params.set(&key, n.to_string());
            }
            UserRef::ScreenName(name) => {
                let key = format!("{prefix}screen_name");
                if name.trim().is_empty() {
                    return Err(TwitterError::invalid(format!("'{key}' may not be empty")));
                }
                params.set(&key, name.as_str());
            }
        }
        Ok(())
    }
}

/// Identifies a list by id, or by slug plus the owning user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRef {
    Id(Numeric),
    Slug { slug: String, owner: UserRef },
}

impl ListRef {
    pub fn id(id: impl Into<Numeric>) -> Self {
        ListRef::Id(id.into())
    }

    pub fn slug(slug: impl Into<String>, owner: UserRef) -> Self {
        ListRef::Slug {
            slug: slug.into(),
            owner,
        }
    }

    pub(crate) fn apply(&self, params: &mut Params) -> TwitterResult<()> {
        match self {
            ListRef::Id(id) => {
                params.integer("list_id", Some(id))?;
            }
            ListRef::Slug { slug, owner } => {
                if slug.trim().is_empty() {
                    return Err(TwitterError::invalid(
                        "identify list by list_id or owner_screen_name/owner_id and slug",
                    ));
                }
                params.set("slug", slug.as_str());
                owner.apply(params, "owner_")?;
            }
        }
        Ok(())
    }
}
