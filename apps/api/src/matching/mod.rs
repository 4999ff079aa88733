// Resume / job description matching.
// Pipeline: extracted text → normalizer → character-level sequence ratio → percentage.

pub mod form;
pub mod handlers;
pub mod normalizer;
pub mod scorer;
pub mod sequence_matcher;
pub mod stopwords;
