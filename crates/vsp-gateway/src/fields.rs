//! Outgoing form fields.
//!
//! Values may be unset while a request is being assembled. The gateway does
//! not accept absent fields, so unset values become empty strings only at
//! the transport boundary, in [`FormFields::into_wire`].

/// Ordered mapping of protocol field name to an optional value.
///
/// Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    entries: Vec<(String, Option<String>)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<Option<String>>,
    {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a field. `Some(None)` means present but unset.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    /// Name/value pairs with every unset value replaced by `""`.
    pub fn into_wire(self) -> Vec<(String, String)> {
        self.entries
            .into_iter()
            .map(|(n, v)| (n, v.unwrap_or_default()))
            .collect()
    }
}

impl<K, V> Extend<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = FormFields::new();
        fields.extend(iter);
        fields
    }
}
