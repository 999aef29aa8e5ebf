use crc32fast::Hasher;

/// Derive the id seed for a document from its id using CRC32
pub fn document_seed(document_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"canvas://");
    hasher.update(document_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for nodes within a document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(document_id: &str) -> Self {
        Self {
            seed: document_seed(document_id),
            count: 0,
        }
    }

    /// Generate next sequential ID.
    ///
    /// The counter wraps back to 1 once exhausted; callers skip ids that are
    /// already taken.
    pub fn new_id(&mut self) -> String {
        self.count = self.count.checked_add(1).unwrap_or(1);
        format!("{}-{}", self.seed, self.count)
    }

    /// Advance the counter past an existing id so it is never reissued.
    ///
    /// Ids minted under a different seed are ignored.
    pub fn observe(&mut self, id: &str) {
        let Some(suffix) = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
        else {
            return;
        };

        if let Ok(n) = suffix.parse::<u64>() {
            self.count = self.count.max(n);
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_seed_is_stable() {
        let a = document_seed("home");
        let b = document_seed("home");
        assert_eq!(a, b);
        assert_ne!(a, document_seed("about"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("home");

        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(gen.seed()));
    }

    #[test]
    fn test_observe_skips_existing_ids() {
        let mut gen = IdGenerator::new("home");
        let stored = format!("{}-41", gen.seed());

        gen.observe(&stored);
        gen.observe("someone-else-900");
        gen.observe(&format!("{}-3", gen.seed()));

        assert_eq!(gen.new_id(), format!("{}-42", gen.seed()));
    }

    #[test]
    fn test_large_stored_suffix() {
        let mut gen = IdGenerator::new("home");
        gen.observe(&format!("{}-4294967295", gen.seed()));

        assert_eq!(gen.new_id(), format!("{}-4294967296", gen.seed()));
    }

    #[test]
    fn test_exhausted_counter_wraps() {
        let mut gen = IdGenerator::new("home");
        gen.observe(&format!("{}-{}", gen.seed(), u64::MAX));
        gen.observe(&format!("{}-99999999999999999999999", gen.seed()));

        assert_eq!(gen.new_id(), format!("{}-1", gen.seed()));
        assert_eq!(gen.new_id(), format!("{}-2", gen.seed()));
    }
}
