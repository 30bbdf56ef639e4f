use crate::models::classifier_trait::ClassifierModel;

/// Ordered mapping from model name to classifier.
///
/// Names are unique. Inserting an existing name replaces that model but keeps
/// its position, so iteration order is the order names were first added.
#[derive(Default)]
pub struct ModelRegistry {
    entries: Vec<(String, Box<dyn ClassifierModel>)>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `model` under `name`, returning the model it replaced, if any.
    pub fn insert<M>(&mut self, name: impl Into<String>, model: M) -> Option<Box<dyn ClassifierModel>>
    where
        M: ClassifierModel + 'static,
    {
        self.insert_boxed(name, Box::new(model))
    }

    pub fn insert_boxed(
        &mut self,
        name: impl Into<String>,
        model: Box<dyn ClassifierModel>,
    ) -> Option<Box<dyn ClassifierModel>> {
        let name = name.into();
        if let Some(idx) = self.entries.iter().position(|(n, _)| *n == name) {
            return Some(std::mem::replace(&mut self.entries[idx].1, model));
        }
        self.entries.push((name, model));
        None
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<M>(mut self, name: impl Into<String>, model: M) -> Self
    where
        M: ClassifierModel + 'static,
    {
        self.insert(name, model);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn ClassifierModel>> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&dyn ClassifierModel> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m.as_ref())
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

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn ClassifierModel)> {
        self.entries.iter().map(|(n, m)| (n.as_str(), m.as_ref()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut (dyn ClassifierModel + 'static))> {
        self.entries.iter_mut().map(|(n, m)| (n.as_str(), m.as_mut()))
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(n, m)| (n, m.name())))
            .finish()
    }
}
