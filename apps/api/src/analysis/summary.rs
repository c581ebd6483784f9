const SUMMARY_SENTENCES: usize = 3;
const EMPTY_SUMMARY: &str = "No content extracted.";

/// Naive summary: the first three ". "-separated sentences joined by "... ".
pub fn summarize(text: &str) -> String {
    if text.trim().is_empty() {
        return EMPTY_SUMMARY.to_string();
    }
    let sentences: Vec<&str> = text.split(". ").take(SUMMARY_SENTENCES).collect();
    format!("{}...", sentences.join("... "))
}
