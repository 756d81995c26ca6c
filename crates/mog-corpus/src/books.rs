/// Book names of a corpus with forgiving lookup.
///
/// Tokens are compared after normalization (underscores, spaces, and dots
/// removed; case-folded), so `gen`, `Gen.`, and `GENESIS` all find
/// `Genesis`. An exact normalized match wins; otherwise the token must be a
/// prefix of exactly one book.
#[derive(Clone, Debug, Default)]
pub struct BookTable {
    names: Vec<String>,
    normalized: Vec<String>,
}

impl BookTable {
    /// Build the table from names indexed by book ordinal.
    pub fn new(names: Vec<String>) -> Self {
        let normalized = names.iter().map(|n| normalize(n)).collect();
        Self { names, normalized }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of a book by ordinal.
    pub fn name(&self, ordinal: u16) -> Option<&str> {
        self.names.get(usize::from(ordinal)).map(String::as_str)
    }

    /// Resolve a user-supplied token to a book ordinal.
    pub fn resolve(&self, token: &str) -> Option<u16> {
        let key = normalize(token);
        if key.is_empty() {
            return None;
        }

        if let Some(exact) = self.normalized.iter().position(|n| *n == key) {
            return u16::try_from(exact).ok();
        }

        let mut matches = self
            .normalized
            .iter()
            .enumerate()
            .filter(|(_, n)| n.starts_with(&key))
            .map(|(i, _)| i);
        match (matches.next(), matches.next()) {
            (Some(only), None) => u16::try_from(only).ok(),
            _ => None,
        }
    }
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}
