//! # Offline Assistant Retrieval
//!
//! Lexical nearest-neighbour search over a fixed list of questions. Each
//! question becomes a TF-IDF vector; a free-text query is vectorized with
//! the same vocabulary and weights, and the stored questions are ranked by
//! cosine similarity.
//!
//! No embeddings, no stemming, no stop words: plain bag of words.

pub mod index;
pub mod tokenizer;

pub use index::{QaIndex, QaPair, QueryMatch};
pub use tokenizer::tokenize;
