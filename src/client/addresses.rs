use std::fmt;

/// Address batch sent to the parse endpoint, already joined with `,`.
///
/// Built from either a pre-joined string or any sequence of addresses, so
/// `"a@x.com,b@y.com"` and `["a@x.com", "b@y.com"]` produce the same query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList(String);

impl AddressList {
    pub fn from_iter_joined<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (idx, address) in addresses.into_iter().enumerate() {
            if idx > 0 {
                joined.push(',');
            }
            joined.push_str(address.as_ref());
        }
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AddressList {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AddressList {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for AddressList {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl<S: AsRef<str>> From<Vec<S>> for AddressList {
    fn from(value: Vec<S>) -> Self {
        Self::from_iter_joined(value)
    }
}

impl<S: AsRef<str>> From<&[S]> for AddressList {
    fn from(value: &[S]) -> Self {
        Self::from_iter_joined(value)
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for AddressList {
    fn from(value: [S; N]) -> Self {
        Self::from_iter_joined(value)
    }
}
