//! TF-IDF vector space over song tag text.
//!
//! Term frequency is the raw count, idf is smoothed as
//! `ln((1 + n) / (1 + df)) + 1` and every document vector is L2-normalized,
//! so the cosine of two vectors is their dot product.

use super::stop_words::is_stop_word;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

pub const DEFAULT_MAX_FEATURES: usize = 1000;

fn token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\b\w\w+\b").expect("Invalid Regex, this should be fixed at compile time.")
    })
}

/// Lowercased tokens of two or more word characters, stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    token_regex()
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Sparse vector as (term index, weight) pairs sorted by term index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
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

    /// Cosine similarity, zero when either vector is empty.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let norms = self.norm() * other.norm();
        if norms == 0.0 {
            return 0.0;
        }
        self.dot(other) / norms
    }
}

/// One vector per indexed document.
///
/// Documents with identical text share a single stored vector.
#[derive(Debug, Clone)]
pub struct TextIndex {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    unique_vectors: Vec<SparseVector>,
    document_vectors: Vec<usize>,
}

impl TextIndex {
    pub fn build<'a, I>(documents: I, max_features: usize) -> TextIndex
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut unique_ids: HashMap<&'a str, usize> = HashMap::new();
        let mut unique_texts: Vec<&'a str> = Vec::new();
        let mut document_vectors = Vec::new();
        for doc in documents {
            let id = *unique_ids.entry(doc).or_insert_with(|| {
                unique_texts.push(doc);
                unique_texts.len() - 1
            });
            document_vectors.push(id);
        }
        let n_documents = document_vectors.len();

        // Every unique text stands for `multiplicity` documents.
        let mut multiplicity = vec![0usize; unique_texts.len()];
        for id in document_vectors.iter() {
            multiplicity[*id] += 1;
        }

        let tokenized: Vec<Vec<String>> = unique_texts.iter().map(|t| tokenize(t)).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for (tokens, times) in tokenized.iter().zip(multiplicity.iter()) {
            let mut seen: Vec<&str> = Vec::new();
            for token in tokens {
                *corpus_counts.entry(token.as_str()).or_insert(0) += times;
                if !seen.contains(&token.as_str()) {
                    seen.push(token.as_str());
                }
            }
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += times;
            }
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();
        let term_ids: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency.get(term.as_str()).copied().unwrap_or(0);
                ((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0
            })
            .collect();

        let unique_vectors: Vec<SparseVector> = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<usize, usize> = HashMap::new();
                for token in tokens {
                    if let Some(id) = term_ids.get(token.as_str()) {
                        *counts.entry(*id).or_insert(0) += 1;
                    }
                }
                let mut entries: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(id, count)| (id, count as f64 * idf[id]))
                    .collect();
                entries.sort_by_key(|(id, _)| *id);
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for entry in entries.iter_mut() {
                        entry.1 /= norm;
                    }
                }
                SparseVector { entries }
            })
            .collect();

        debug!(
            "Indexed {} documents ({} distinct) over {} terms",
            n_documents,
            unique_vectors.len(),
            vocabulary.len()
        );

        TextIndex {
            vocabulary,
            idf,
            unique_vectors,
            document_vectors,
        }
    }

    pub fn len(&self) -> usize {
        self.document_vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_vectors.is_empty()
    }

    /// Terms of the vocabulary in index order (alphabetical).
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
            .map(|i| self.idf[i])
    }

    pub fn vector(&self, document: usize) -> Option<&SparseVector> {
        self.document_vectors
            .get(document)
            .map(|id| &self.unique_vectors[*id])
    }

    pub fn cosine(&self, a: usize, b: usize) -> Option<f64> {
        Some(self.vector(a)?.cosine(self.vector(b)?))
    }

    /// Cosine similarity of `document` against every indexed document, in
    /// document order.
    pub fn similarities_to(&self, document: usize) -> Option<Vec<f64>> {
        let anchor = self.vector(document)?;
        let per_unique: Vec<f64> = self
            .unique_vectors
            .iter()
            .map(|v| anchor.cosine(v))
            .collect();
        Some(
            self.document_vectors
                .iter()
                .map(|id| per_unique[*id])
                .collect(),
        )
    }
}
