mod stop_words;
mod tfidf;

pub use stop_words::is_stop_word;
pub use tfidf::{tokenize, SparseVector, TextIndex, DEFAULT_MAX_FEATURES};
