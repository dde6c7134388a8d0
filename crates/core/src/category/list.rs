//! Ordered category list with case-insensitive lookup.

use std::collections::HashMap;

use tracing::debug;

use super::error::CategoryError;

/// Sentinel meaning "aggregate across all other categories".
pub const TOTAL_SENTINEL: &str = "Total";

/// Sentinel that routes to the category-management view.
pub const INDIRECT_SENTINEL: &str = "Indirect Exp";

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns true if `name` is one of the sentinel categories (ignoring case).
#[must_use]
pub fn is_sentinel(name: &str) -> bool {
    let folded = fold(name);
    folded == fold(TOTAL_SENTINEL) || folded == fold(INDIRECT_SENTINEL)
}

/// The known categories, in display order.
///
/// Lookup goes through a precomputed case-folded index. When two names differ
/// only by case the first one in list order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryList {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryList {
    /// Builds a list from names in display order.
    ///
    /// Blank names are skipped. Names are trimmed.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|name| name.into().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let mut list = Self {
            names,
            index: HashMap::new(),
        };
        list.rebuild_index();
        list
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, name) in self.names.iter().enumerate() {
            let folded = fold(name);
            if self.index.contains_key(&folded) {
                debug!(category = %name, "category differs from an earlier one only by case");
                continue;
            }
            self.index.insert(folded, position);
        }
    }

    /// All names, sentinels included, in display order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the list has no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Finds the canonical spelling of `raw`, matching case-insensitively.
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.index
            .get(&fold(raw))
            .map(|&position| self.names[position].as_str())
    }

    /// Names that accumulate amounts.
    ///
    /// Sentinels are left out, and so are names that differ from an earlier
    /// one only by case, since no record can ever match them.
    pub fn accumulating(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .enumerate()
            .filter(|(position, name)| self.index.get(&fold(name)) == Some(position))
            .map(|(_, name)| name.as_str())
            .filter(|name| !is_sentinel(name))
    }

    /// Appends a category.
    pub fn add(&mut self, name: &str) -> Result<(), CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if let Some(existing) = self.lookup(name) {
            return Err(CategoryError::Duplicate(existing.to_string()));
        }
        self.names.push(name.to_string());
        self.rebuild_index();
        Ok(())
    }

    /// Renames a category in place, keeping its display position.
    ///
    /// Changing only the case of a name is allowed.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), CategoryError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let position = self.position(old)?;
        if is_sentinel(&self.names[position]) {
            return Err(CategoryError::Reserved(self.names[position].clone()));
        }
        if let Some(existing) = self.lookup(new)
            && fold(existing) != fold(old)
        {
            return Err(CategoryError::Duplicate(existing.to_string()));
        }
        self.names[position] = new.to_string();
        self.rebuild_index();
        Ok(())
    }

    /// Removes a category, returning its canonical name.
    pub fn remove(&mut self, name: &str) -> Result<String, CategoryError> {
        let position = self.position(name)?;
        if is_sentinel(&self.names[position]) {
            return Err(CategoryError::Reserved(self.names[position].clone()));
        }
        let removed = self.names.remove(position);
        self.rebuild_index();
        Ok(removed)
    }

    fn position(&self, name: &str) -> Result<usize, CategoryError> {
        self.index
            .get(&fold(name))
            .copied()
            .ok_or_else(|| CategoryError::NotFound(name.trim().to_string()))
    }
}
