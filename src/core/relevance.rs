use std::collections::{HashMap, HashSet};

/// Default cap on the number of vocabulary terms kept by the index
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// English stop words dropped during tokenization
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be",
    "been", "being", "but", "by", "can", "could", "do", "does", "for", "from", "had",
    "has", "have", "he", "her", "his", "if", "in", "into", "is", "it", "its", "may",
    "more", "most", "no", "not", "of", "on", "or", "other", "our", "she", "should", "so",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "those", "to", "up", "was", "we", "were", "what", "when", "which", "who",
    "will", "with", "would", "you", "your",
];

/// Split text into lowercase word tokens of at least two characters
///
/// Hangul syllables count as word characters, so Korean text splits on
/// whitespace and punctuation like any other script.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(|token| token.to_lowercase())
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

/// Sparse weighted term vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
}

impl TermVector {
    /// Build an L2-normalized vector from raw term weights
    fn from_weights(weights: HashMap<usize, f64>) -> Self {
        let mut entries: Vec<(usize, f64)> = weights
            .into_iter()
            .filter(|(_, weight)| *weight > 0.0)
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let mut vector = Self { entries };
        let norm = vector.norm();
        if norm > 0.0 {
            for (_, weight) in vector.entries.iter_mut() {
                *weight /= norm;
            }
        }
        vector
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_index, a_weight) = self.entries[i];
            let (b_index, b_weight) = other.entries[j];
            match a_index.cmp(&b_index) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity clamped to [0, 1]; zero when either vector is zero
#[inline]
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let denominator = a.norm() * b.norm();
    if denominator <= 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(0.0, 1.0)
}

/// TF-IDF index over the descriptive text of every program
///
/// Built once from the corpus and read-only afterwards, so a single index
/// can be shared by every session.
#[derive(Debug, Clone, Default)]
pub struct RelevanceIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<TermVector>,
}

impl RelevanceIndex {
    /// Build the index, keeping the `max_features` most frequent terms
    ///
    /// Term weights are raw counts scaled by the smoothed inverse document
    /// frequency `ln((1 + n) / (1 + df)) + 1`, then L2-normalized.
    pub fn build<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                *corpus_freq.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        // Most frequent terms first, alphabetical among equals
        let mut ranked: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n = documents.len() as f64;
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();
        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            documents: Vec::with_capacity(tokenized.len()),
        };
        index.documents = tokenized
            .iter()
            .map(|tokens| index.vectorize_tokens(tokens))
            .collect();

        tracing::debug!(
            "Relevance index built: {} documents, {} terms",
            index.documents.len(),
            index.vocabulary.len()
        );

        index
    }

    fn vectorize_tokens(&self, tokens: &[String]) -> TermVector {
        let mut weights: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            // Out-of-vocabulary terms are dropped
            if let Some(&index) = self.vocabulary.get(token) {
                *weights.entry(index).or_insert(0.0) += self.idf[index];
            }
        }
        TermVector::from_weights(weights)
    }

    /// Project free text into the index's vector space
    pub fn vectorize(&self, text: &str) -> TermVector {
        self.vectorize_tokens(&tokenize(text))
    }

    /// Similarity of `query` to every indexed document, in corpus order
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query_vector = self.vectorize(query);
        self.documents
            .iter()
            .map(|doc| cosine_similarity(&query_vector, doc))
            .collect()
    }

    pub fn document(&self, index: usize) -> Option<&TermVector> {
        self.documents.get(index)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
