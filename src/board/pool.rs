//! Available player pool: free-text nicknames offered to the board

use tracing::debug;

/// Ordered list of nicknames. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPool {
    names: Vec<String>,
}

impl PlayerPool {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .filter_map(|name| normalize(name.as_ref()))
                .collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add a nickname (trimmed, upper-cased). Blank input is ignored.
    pub fn add(&mut self, raw: &str) -> Option<&str> {
        let name = normalize(raw)?;
        debug!(name = %name, "Added player to pool");
        self.names.push(name);
        self.names.last().map(String::as_str)
    }

    /// Remove the entry at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.names.len() {
            return None;
        }
        let removed = self.names.remove(index);
        debug!(name = %removed, index, "Removed player from pool");
        Some(removed)
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_normalizes() {
        let mut pool = PlayerPool::default();
        assert_eq!(pool.add("  juca "), Some("JUCA"));
        assert_eq!(pool.names(), &["JUCA".to_string()]);
    }

    #[test]
    fn test_add_blank_ignored() {
        let mut pool = PlayerPool::default();
        assert_eq!(pool.add("   "), None);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut pool = PlayerPool::new(["BLACK"]);
        pool.add("black");
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_remove_by_index() {
        let mut pool = PlayerPool::new(["BLACK", "FNX", "GUIME"]);
        assert_eq!(pool.remove(1).as_deref(), Some("FNX"));
        assert_eq!(pool.names(), &["BLACK".to_string(), "GUIME".to_string()]);
        assert_eq!(pool.remove(5), None);
    }
}
