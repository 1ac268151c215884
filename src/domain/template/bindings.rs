// Ordered (placeholder, value) pairs supplied to the resolver

use super::ast::Placeholder;
use super::pipeline::BindingValue;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<(Placeholder, String)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, placeholder: Placeholder, value: impl BindingValue) -> Self {
        self.insert(placeholder, value);
        self
    }

    pub fn insert(&mut self, placeholder: Placeholder, value: impl BindingValue) {
        self.entries.push((placeholder, value.to_binding()));
    }

    /// The first value bound to `placeholder`; later duplicates never reach the URL
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == placeholder)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.get(placeholder).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Placeholder, &str)> {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: BindingValue> FromIterator<(Placeholder, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (Placeholder, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (placeholder, value) in iter {
            bindings.insert(placeholder, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_preserves_order() {
        let bindings = Bindings::new()
            .bind(Placeholder::SiteId, "site-1")
            .bind(Placeholder::PageSize, 100u32);

        let collected: Vec<_> = bindings.iter().collect();
        assert_eq!(
            collected,
            vec![(Placeholder::SiteId, "site-1"), (Placeholder::PageSize, "100")]
        );
    }

    #[test]
    fn test_first_binding_wins() {
        let bindings = Bindings::new()
            .bind(Placeholder::UserId, "first")
            .bind(Placeholder::UserId, "second");
        assert_eq!(bindings.get(Placeholder::UserId), Some("first"));
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_from_iter() {
        let bindings: Bindings = vec![(Placeholder::ViewId, "v"), (Placeholder::SiteId, "s")]
            .into_iter()
            .collect();
        assert!(bindings.contains(Placeholder::ViewId));
        assert!(!bindings.contains(Placeholder::GroupId));
    }
}
