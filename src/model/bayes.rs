//! Bag-of-words multinomial Naive Bayes.
//!
//! A minimal count-vectorizer plus multinomial NB classifier pair. With one
//! training example per distinct source phrase and the co-occurring target
//! phrase as its label, this is instance memorization dressed as
//! classification: an unseen phrase is mapped to the nearest label by token
//! frequency, not translated. That approximation is intrinsic to the demo
//! translation mode, not a defect.

use std::collections::HashMap;

/// Sparse token-count vector: (vocabulary index, count) pairs.
pub type CountVector = Vec<(usize, usize)>;

/// Learns a token vocabulary from training text and maps text to sparse
/// token-count vectors. Tokens are lowercased runs of alphanumeric
/// characters; tokens outside the fitted vocabulary are dropped.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary = HashMap::new();
        for doc in documents {
            for token in tokenize(doc.as_ref()) {
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }
        Self { vocabulary }
    }

    pub fn transform(&self, text: &str) -> CountVector {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }
        let mut vector: CountVector = counts.into_iter().collect();
        vector.sort_unstable();
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Multinomial Naive Bayes over sparse token counts, with Laplace smoothing.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    classes: Vec<String>,
    log_prior: Vec<f64>,
    /// Per class, per vocabulary index: log P(token | class).
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    const ALPHA: f64 = 1.0;

    /// Fit the classifier on vectorized examples and their labels.
    ///
    /// `examples` and `labels` must be the same length; vectors must only
    /// contain indices below `vocabulary_size`.
    pub fn fit(examples: &[CountVector], labels: &[String], vocabulary_size: usize) -> Self {
        let mut class_index: HashMap<&str, usize> = HashMap::new();
        let mut classes = Vec::new();
        for label in labels {
            if !class_index.contains_key(label.as_str()) {
                class_index.insert(label.as_str(), classes.len());
                classes.push(label.clone());
            }
        }

        let mut class_counts = vec![0usize; classes.len()];
        let mut token_counts = vec![vec![0usize; vocabulary_size]; classes.len()];
        for (vector, label) in examples.iter().zip(labels) {
            let class = class_index[label.as_str()];
            class_counts[class] += 1;
            for &(index, count) in vector {
                token_counts[class][index] += count;
            }
        }

        let total = labels.len() as f64;
        let log_prior = class_counts
            .iter()
            .map(|&n| (n as f64 / total).ln())
            .collect();

        let feature_log_prob = token_counts
            .iter()
            .map(|counts| {
                let class_total: usize = counts.iter().sum();
                let denominator = class_total as f64 + Self::ALPHA * vocabulary_size as f64;
                counts
                    .iter()
                    .map(|&c| ((c as f64 + Self::ALPHA) / denominator).ln())
                    .collect()
            })
            .collect();

        Self {
            classes,
            log_prior,
            feature_log_prob,
        }
    }

    /// Predict the most likely label, or `None` if no class was fitted.
    ///
    /// A vector with no known tokens degenerates to the prior, so the most
    /// frequent training label wins.
    pub fn predict(&self, vector: &CountVector) -> Option<&str> {
        let mut best: Option<(usize, f64)> = None;
        for (class, &prior) in self.log_prior.iter().enumerate() {
            let likelihood: f64 = vector
                .iter()
                .map(|&(index, count)| count as f64 * self.feature_log_prob[class][index])
                .sum();
            let score = prior + likelihood;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((class, score));
            }
        }
        best.map(|(class, _)| self.classes[class].as_str())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
