// Resume-to-job analysis: upload handling, text extraction, the analysis
// pipeline and the result store. NLP lives in `nlp`, video lookup in `courses`.

pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod upload;
