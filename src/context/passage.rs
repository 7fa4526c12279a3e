//! Context passages: ranked, immutable text blocks handed to the generator.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextPassage {
    rank: u32,
    text: String,
}

impl ContextPassage {
    pub fn new(rank: u32, text: impl Into<String>) -> Self {
        Self {
            rank,
            text: text.into(),
        }
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Hex blake3 digest of the passage text.
    pub fn digest(&self) -> String {
        hex::encode(blake3::hash(self.text.as_bytes()).as_bytes())
    }
}

/// Ordered passages for one request. Ranks are assigned 0.. in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContextSet {
    passages: Vec<ContextPassage>,
}

impl ContextSet {
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let passages = texts
            .into_iter()
            .enumerate()
            .map(|(rank, text)| ContextPassage::new(rank as u32, text))
            .collect();
        Self { passages }
    }

    pub fn passages(&self) -> &[ContextPassage] {
        &self.passages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContextPassage> {
        self.passages.iter()
    }

    pub fn get(&self, rank: u32) -> Option<&ContextPassage> {
        self.passages.iter().find(|p| p.rank == rank)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Digest over every passage in rank order; identifies a context in logs.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for passage in &self.passages {
            hasher.update(&passage.rank.to_le_bytes());
            hasher.update(&(passage.text.len() as u64).to_le_bytes());
            hasher.update(passage.text.as_bytes());
        }
        hex::encode(hasher.finalize().as_bytes())
    }
}

impl<'a> IntoIterator for &'a ContextSet {
    type Item = &'a ContextPassage;
    type IntoIter = std::slice::Iter<'a, ContextPassage>;

    fn into_iter(self) -> Self::IntoIter {
        self.passages.iter()
    }
}
