//! TF-IDF question index.
//!
//! Weights follow the smoothed scheme
//!
//! ```text
//! w(t, d) = tf(t, d) · idf(t)        idf(t) = ln((1 + N) / (1 + df(t))) + 1
//! ```
//!
//! where `tf` is the raw count of `t` in question `d`, `N` the number of
//! questions and `df(t)` the number of questions containing `t`. Vectors are
//! stored sparsely, sorted by term id, together with their L2 norm.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tokenizer::tokenize;

/// A stored question with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
}

impl QaPair {
    /// Create a pair
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        QaPair {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl<Q: Into<String>, A: Into<String>> From<(Q, A)> for QaPair {
    fn from((question, answer): (Q, A)) -> Self {
        QaPair::new(question, answer)
    }
}

/// One ranked answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMatch {
    /// Stored question
    pub question: String,
    /// Stored answer
    pub answer: String,
    /// Cosine similarity in [0, 1]
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct SparseVector {
    /// (term id, weight), ascending by term id
    entries: Vec<(usize, f64)>,
    norm: f64,
}

impl SparseVector {
    fn from_weights(weights: BTreeMap<usize, f64>) -> Self {
        let entries: Vec<(usize, f64)> = weights.into_iter().collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        SparseVector { entries, norm }
    }

    fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ti, wi) = self.entries[i];
            let (tj, wj) = other.entries[j];
            if ti == tj {
                sum += wi * wj;
                i += 1;
                j += 1;
            } else if ti < tj {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    fn cosine(&self, other: &SparseVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        self.dot(other) / (self.norm * other.norm)
    }
}

/// Immutable TF-IDF index over a question/answer corpus.
///
/// Built once; queries never mutate it, so a built index can be shared
/// freely between threads. Rebuilding means constructing a new index.
///
/// ## Example
///
/// ```rust
/// use shield_core::retrieval::QaIndex;
///
/// let index = QaIndex::build(vec![
///     ("What is ALARA?", "As low as reasonably achievable."),
///     ("What is half-life?", "Time for half a sample to decay."),
/// ]);
///
/// let best = index.query("What does ALARA mean?", 1);
/// assert_eq!(best[0].answer, "As low as reasonably achievable.");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QaIndex {
    pairs: Vec<QaPair>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl QaIndex {
    /// Build an index over `pairs`, keeping their order.
    ///
    /// An empty corpus gives an index that answers every query with no
    /// results.
    pub fn build<I, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<QaPair>,
    {
        let pairs: Vec<QaPair> = pairs.into_iter().map(Into::into).collect();
        let tokenized: Vec<Vec<String>> = pairs.iter().map(|p| tokenize(&p.question)).collect();

        // Vocabulary in first-seen order, with document frequencies
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let unique: HashSet<&String> = tokens.iter().collect();
            for token in tokens {
                if !vocabulary.contains_key(token) {
                    vocabulary.insert(token.clone(), doc_freq.len());
                    doc_freq.push(0);
                }
            }
            for token in unique {
                doc_freq[vocabulary[token]] += 1;
            }
        }

        let n_docs = pairs.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut index = QaIndex {
            pairs,
            vocabulary,
            idf,
            vectors: Vec::new(),
        };
        let vectors: Vec<SparseVector> = tokenized
            .iter()
            .map(|tokens| index.vectorize_tokens(tokens))
            .collect();
        index.vectors = vectors;

        debug!(
            documents = index.pairs.len(),
            vocabulary = index.vocabulary.len(),
            "question index built"
        );
        index
    }

    /// An index with no documents
    pub fn empty() -> Self {
        QaIndex::build(Vec::<QaPair>::new())
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of distinct terms seen at build time
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Stored pairs in corpus order
    pub fn pairs(&self) -> &[QaPair] {
        &self.pairs
    }

    fn vectorize_tokens(&self, tokens: &[String]) -> SparseVector {
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            // Out-of-vocabulary terms carry no weight
            if let Some(&term) = self.vocabulary.get(token) {
                *weights.entry(term).or_insert(0.0) += self.idf[term];
            }
        }
        SparseVector::from_weights(weights)
    }

    /// Cosine similarity of `text` against every stored question, in corpus
    /// order
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        let query = self.vectorize_tokens(&tokenize(text));
        self.vectors.iter().map(|doc| query.cosine(doc)).collect()
    }

    /// The `top_k` best matches for `text`, best first.
    ///
    /// Ties keep corpus order. A query with no known words still returns
    /// matches, all with similarity 0.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<QueryMatch> {
        if self.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(usize, f64)> =
            self.similarities(text).into_iter().enumerate().collect();
        // Stable sort keeps earlier entries first on ties
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_k);

        ranked
            .into_iter()
            .map(|(i, similarity)| QueryMatch {
                question: self.pairs[i].question.clone(),
                answer: self.pairs[i].answer.clone(),
                similarity,
            })
            .collect()
    }

    /// Best single match, if the corpus is not empty
    pub fn best_match(&self, text: &str) -> Option<QueryMatch> {
        self.query(text, 1).into_iter().next()
    }
}

impl Default for QaIndex {
    fn default() -> Self {
        QaIndex::empty()
    }
}
