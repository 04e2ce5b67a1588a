//! NAMESPACE responses (RFC 2342).

/// A single namespace entry: a prefix under which mailboxes of that kind
/// live, the hierarchy delimiter used there, and any namespace extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDescriptor {
    /// Mailbox name prefix, e.g. `"INBOX."` or `"#shared/"`.
    pub prefix: String,
    /// Hierarchy delimiter for this namespace, if the server reports one.
    pub delimiter: Option<char>,
    /// Namespace extension name/value pairs (rare; most servers send none).
    pub extensions: Vec<(String, Vec<String>)>,
}

impl NamespaceDescriptor {
    /// Creates a descriptor with no extensions.
    #[must_use]
    pub fn new(prefix: impl Into<String>, delimiter: Option<char>) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter,
            extensions: Vec::new(),
        }
    }
}

/// The three namespace categories a server reports in response to NAMESPACE:
/// the user's own mailboxes, other users' mailboxes the user can access, and
/// shared mailboxes. Any of the three may be absent (`NIL` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Namespaces {
    /// Personal namespaces belonging to the authenticated user.
    pub personal: Vec<NamespaceDescriptor>,
    /// Namespaces belonging to other users, made accessible to this one.
    pub other_users: Vec<NamespaceDescriptor>,
    /// Namespaces shared between multiple users.
    pub shared: Vec<NamespaceDescriptor>,
}

impl Namespaces {
    /// Returns the hierarchy delimiter learned from the first personal
    /// namespace, if any. Used to decide how to join mailbox path segments
    /// when the client hasn't yet listed a mailbox to discover it directly.
    #[must_use]
    pub fn personal_delimiter(&self) -> Option<char> {
        self.personal.first().and_then(|ns| ns.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_new_has_no_extensions() {
        let ns = NamespaceDescriptor::new("INBOX.", Some('.'));
        assert_eq!(ns.prefix, "INBOX.");
        assert_eq!(ns.delimiter, Some('.'));
        assert!(ns.extensions.is_empty());
    }

    #[test]
    fn personal_delimiter_from_first_entry() {
        let mut namespaces = Namespaces::default();
        namespaces.personal.push(NamespaceDescriptor::new("", Some('/')));
        assert_eq!(namespaces.personal_delimiter(), Some('/'));
    }

    #[test]
    fn personal_delimiter_none_when_empty() {
        let namespaces = Namespaces::default();
        assert_eq!(namespaces.personal_delimiter(), None);
    }
}
