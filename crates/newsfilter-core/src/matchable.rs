//! The attribute capability filters are evaluated against.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// A record that exposes named, textual attributes to filters.
///
/// The filter engine only ever asks these two questions; it never looks at
/// the concrete record type. Implementations may compute values lazily but
/// must answer consistently for the duration of one evaluation.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use newsfilter_core::Matchable;
///
/// struct Headline(&'static str);
///
/// impl Matchable for Headline {
///     fn has_attribute(&self, name: &str) -> bool {
///         name == "title"
///     }
///
///     fn get_attribute(&self, name: &str) -> Cow<'_, str> {
///         match name {
///             "title" => Cow::Borrowed(self.0),
///             _ => Cow::Borrowed(""),
///         }
///     }
/// }
///
/// assert_eq!(Headline("Hello").attribute("title").as_deref(), Some("Hello"));
/// assert!(Headline("Hello").attribute("author").is_none());
/// ```
pub trait Matchable {
    /// Returns whether the record has an attribute called `name`.
    fn has_attribute(&self, name: &str) -> bool;

    /// Returns the textual value of `name`.
    ///
    /// Only meaningful when [`has_attribute`](Matchable::has_attribute)
    /// returned true; the value for an unknown attribute is unspecified.
    fn get_attribute(&self, name: &str) -> Cow<'_, str>;

    /// Returns the attribute value if it exists.
    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        if self.has_attribute(name) {
            Some(self.get_attribute(name))
        } else {
            None
        }
    }
}

impl<T: Matchable + ?Sized> Matchable for &T {
    fn has_attribute(&self, name: &str) -> bool {
        (**self).has_attribute(name)
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        (**self).get_attribute(name)
    }
}

impl Matchable for HashMap<String, String> {
    fn has_attribute(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        self.get(name)
            .map_or(Cow::Borrowed(""), |value| Cow::Borrowed(value.as_str()))
    }
}

impl Matchable for BTreeMap<String, String> {
    fn has_attribute(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn get_attribute(&self, name: &str) -> Cow<'_, str> {
        self.get(name)
            .map_or(Cow::Borrowed(""), |value| Cow::Borrowed(value.as_str()))
    }
}
