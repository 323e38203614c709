/// Name/identity resolution collaborator for reference-collection settings.
///
/// The framework never owns the referenced domain objects; it only stores
/// their stable identifiers and asks the resolver for the live instances
/// when a tree is loaded.
pub trait NameResolver<T> {
    /// Look up the live domain object for a stable identifier.
    fn resolve(&self, id: &str) -> Option<T>;

    /// The stable identifier of a domain object, independent of any
    /// display-locale text.
    fn identify(&self, value: &T) -> String;
}
