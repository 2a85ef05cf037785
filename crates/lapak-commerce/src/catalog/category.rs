//! Category types for product organization.

use crate::catalog::slugify;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category. Recommendations bias toward the categories a viewer
/// has browsed, and reason messages refer to them by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    /// Parent category (None for root categories).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    /// Depth in the hierarchy (0 = root).
    #[serde(default)]
    pub level: i32,
}

impl Category {
    /// Create a new root category.
    pub fn new_root(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: CategoryId::generate(),
            parent_id: None,
            slug: slugify(&name),
            name,
            level: 0,
        }
    }

    /// Create a new child category.
    pub fn new_child(parent: &Category, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: CategoryId::generate(),
            parent_id: Some(parent.id.clone()),
            slug: slugify(&name),
            name,
            level: parent.level + 1,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Look up a category's display name, falling back to its id.
    pub fn name_of(categories: &[Category], id: &CategoryId) -> String {
        categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_child() {
        let root = Category::new_root("Fashion Pria");
        let child = Category::new_child(&root, "Kaos");

        assert!(root.is_root());
        assert_eq!(root.slug, "fashion-pria");
        assert!(!child.is_root());
        assert_eq!(child.level, 1);
        assert_eq!(child.parent_id.as_ref(), Some(&root.id));
    }

    #[test]
    fn test_name_of() {
        let cats = vec![Category::new_root("Elektronik")];
        assert_eq!(Category::name_of(&cats, &cats[0].id), "Elektronik");
        assert_eq!(
            Category::name_of(&cats, &CategoryId::new("cat_missing")),
            "cat_missing"
        );
    }
}
