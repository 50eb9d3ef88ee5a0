//! Per-session map from client-visible element handles to driver elements.

use dashmap::DashMap;
use uuid::Uuid;

use crate::driver::ElementRef;

/// Issues opaque handles for driver elements.
///
/// Handles are never reused and never removed while the session lives.
/// Adding the same element twice yields two distinct handles.
#[derive(Default)]
pub struct ElementRepository {
    elements: DashMap<String, ElementRef>,
}

impl ElementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `element` and return its new handle.
    pub fn add(&self, element: ElementRef) -> String {
        let handle = Uuid::new_v4().to_string();
        self.elements.insert(handle.clone(), element);
        handle
    }

    /// Resolve a handle. Unknown handles yield `None`.
    pub fn get(&self, handle: &str) -> Option<ElementRef> {
        self.elements.get(handle).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.elements.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
