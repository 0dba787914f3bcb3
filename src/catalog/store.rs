use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::error::CatalogError;

/// Catalog handle shared between the web server and the scheduler.
///
/// Queries hold the read guard for their whole duration, so toggling an
/// active flag (write guard) never overlaps a running query.
pub type SharedCatalog<E> = Arc<RwLock<Catalog<E>>>;

/// An orbital object known to the station.
#[derive(Debug, Clone)]
pub struct TrackedObject<E> {
    pub name: String,
    pub elements: E,
    pub active: bool,
}

impl<E> TrackedObject<E> {
    pub fn new(name: impl Into<String>, elements: E) -> Self {
        Self {
            name: name.into(),
            elements,
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogEntry {
    pub name: String,
    pub active: bool,
}

/// Ordered collection of tracked objects, unique by name.
#[derive(Debug, Clone)]
pub struct Catalog<E> {
    objects: Vec<TrackedObject<E>>,
}

impl<E> Default for Catalog<E> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
        }
    }
}

impl<E> Catalog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: TrackedObject<E>) -> Result<(), CatalogError> {
        if self.get(&object.name).is_some() {
            return Err(CatalogError::Duplicate(object.name));
        }
        self.objects.push(object);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TrackedObject<E>> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn set_active(&mut self, name: &str, active: bool) -> Result<(), CatalogError> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        object.active = active;
        Ok(())
    }

    /// Marks exactly the named objects active. Names with no matching
    /// object are returned to the caller.
    pub fn activate_only<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        for object in &mut self.objects {
            object.active = names.iter().any(|n| n.as_ref() == object.name);
        }
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|n| self.get(n).is_none())
            .map(String::from)
            .collect()
    }

    pub fn active(&self) -> impl Iterator<Item = &TrackedObject<E>> {
        self.objects.iter().filter(|o| o.active)
    }

    pub fn has_active(&self) -> bool {
        self.objects.iter().any(|o| o.active)
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.objects
            .iter()
            .map(|o| CatalogEntry {
                name: o.name.clone(),
                active: o.active,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn into_shared(self) -> SharedCatalog<E> {
        Arc::new(RwLock::new(self))
    }
}

impl<E> FromIterator<TrackedObject<E>> for Catalog<E> {
    /// Later objects with an already used name are dropped.
    fn from_iter<I: IntoIterator<Item = TrackedObject<E>>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for object in iter {
            let _ = catalog.insert(object);
        }
        catalog
    }
}
