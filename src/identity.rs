/// Author recorded when no identity is available.
pub const UNKNOWN_AUTHOR: &str = "Unknown User";

/// Supplies the display name of whoever is editing.
pub trait IdentityProvider {
    fn display_name(&self) -> Option<String>;
}

/// A fixed identity, e.g. the user of a command line session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity(pub Option<String>);

impl StaticIdentity {
    pub fn named(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn display_name(&self) -> Option<String> {
        self.0.clone()
    }
}

/// The name to stamp on an edit: the provider's name, or [`UNKNOWN_AUTHOR`] when it is
/// missing or blank.
pub fn author_name(identity: &dyn IdentityProvider) -> String {
    identity
        .display_name()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}
