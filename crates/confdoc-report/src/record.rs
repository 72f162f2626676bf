//! Narrated per-paper calculations.
//!
//! Every step prints its formula, the numbers substituted into it (4
//! decimals) and the final value (2 decimals). Output depends only on the
//! record and its `MetricsResult`, so it is byte-for-byte reproducible.

use confdoc_common::DocumentRecord;
use confdoc_metrics::{count_chars_no_spaces, ratio, MetricsResult};

use crate::indent;

fn render_input_data(record: &DocumentRecord) -> String {
    let mut out = format!("### Paper: {}\n\n", record.title);
    out.push_str("#### Input Data:\n");
    out.push_str(&format!("- **Paper Title:** {}\n", record.title));
    out.push_str(&format!("- **Authors:** {}\n", record.authors.join(", ")));
    out.push_str("- **Abstract:**  \n");
    out.push_str(&format!("{}\n", indent(&record.abstract_text, "  ")));
    out.push_str("- **Content:**  \n");
    out.push_str(&format!("{}\n", indent(&record.content, "  ")));
    out.push_str("- **Author Biography:**  \n");
    out.push_str(&format!("{}\n\n", indent(&record.biography, "  ")));
    out
}

fn word_count_step(m: &MetricsResult) -> String {
    let mut out = String::from("1. **Word Count Calculation:**\n");
    out.push_str(" - **Formula:** $ \\text{Word Count} = \\text{words in abstract} + \\text{words in content} $\n");
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!("   - Count the number of words in the abstract: {}\n", m.abstract_words));
    out.push_str(&format!("   - Count the number of words in the content: {}\n", m.content_words));
    out.push_str(&format!(
        "   - Add both counts together: {} + {} = {}\n",
        m.abstract_words, m.content_words, m.total_words
    ));
    out.push_str(&format!(" - **Final Word Count:** **{:.2}**\n\n", m.total_words as f64));
    out
}

fn ratio_step(m: &MetricsResult) -> String {
    let quotient = ratio(m.abstract_words as f64, m.content_words as f64);
    let mut out = String::from("2. **Abstract to Content Ratio Calculation:**\n");
    out.push_str(" - **Formula:** $ \\text{Abstract to Content Ratio} = \\left(\\frac{\\text{words in abstract}}{\\text{words in content}}\\right) \\times 100 $\n");
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!(
        "   - Divide the abstract word count by the content word count: {} ÷ {} = {:.4}\n",
        m.abstract_words, m.content_words, quotient
    ));
    out.push_str(&format!(
        "   - Multiply the result by 100: {:.4} × 100 = {:.2}%\n",
        quotient, m.abstract_content_ratio
    ));
    out.push_str(&format!(" - **Final Ratio:** **{:.2}%**\n\n", m.abstract_content_ratio));
    out
}

fn word_length_step(record: &DocumentRecord, m: &MetricsResult) -> String {
    let total_chars = count_chars_no_spaces(&record.abstract_text) + count_chars_no_spaces(&record.content);
    let mut out = String::from("3. **Average Word Length Calculation:**\n");
    out.push_str(" - **Formula:** $ \\text{Average Word Length} = \\frac{\\text{Total Characters (excluding spaces)}}{\\text{Total Word Count}} $\n");
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!(
        "   - Count all characters in the abstract and content, excluding spaces: {}\n",
        total_chars
    ));
    out.push_str(&format!(
        "   - Divide the total number of characters by the total word count: {} ÷ {} = {:.4}\n",
        total_chars, m.total_words, m.avg_word_length
    ));
    out.push_str(&format!(
        " - **Final Average Word Length:** **{:.2} characters**\n\n",
        m.avg_word_length
    ));
    out
}

fn sentence_count_step(m: &MetricsResult) -> String {
    let mut out = String::from("4. **Sentence Count Calculation:**\n");
    out.push_str(" - **Formula:** $ \\text{Total Sentences} = \\text{Sentences in abstract} + \\text{Sentences in content} $\n");
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!(
        "   - Identify and count the number of sentences in the abstract: {}\n",
        m.abstract_sentences
    ));
    out.push_str(&format!(
        "   - Identify and count the number of sentences in the content: {}\n",
        m.content_sentences
    ));
    out.push_str(&format!(
        "   - Add both counts together: {} + {} = {}\n",
        m.abstract_sentences, m.content_sentences, m.total_sentences
    ));
    out.push_str(&format!(" - **Final Sentence Count:** **{}**\n\n", m.total_sentences));
    out
}

fn sentence_length_step(m: &MetricsResult) -> String {
    let mut out = String::from("5. **Average Sentence Length Calculation:**\n");
    out.push_str(" - **Formula:** $ \\text{Average Sentence Length} = \\frac{\\text{Word Count}}{\\text{Total Sentences}} $\n");
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!(
        "   - Use the total word count from the Word Count Calculation: {}\n",
        m.total_words
    ));
    out.push_str(&format!(
        "   - Divide the total word count by the total number of sentences: {} ÷ {} = {:.4}\n",
        m.total_words, m.total_sentences, m.avg_sentence_length
    ));
    out.push_str(&format!(
        " - **Final Average Sentence Length:** **{:.2} words per sentence**\n\n",
        m.avg_sentence_length
    ));
    out
}

fn reading_time_step(m: &MetricsResult) -> String {
    let wpm = m.words_per_minute;
    let mut out = String::from("6. **Reading Time Estimation:**\n");
    out.push_str(&format!(
        " - **Formula:** $ \\text{{Estimated Reading Time (minutes)}} = \\frac{{\\text{{Word Count}}}}{{{}}} $\n",
        wpm
    ));
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!("   - Assume an average reading speed of {} words per minute.\n", wpm));
    out.push_str(&format!(
        "   - Divide the total word count by {}: {} ÷ {} = {:.4}\n",
        wpm, m.total_words, wpm, m.reading_time
    ));
    out.push_str(&format!(
        " - **Final Estimated Reading Time:** **{:.2} minutes**\n\n",
        m.reading_time
    ));
    out
}

fn keyword_step(m: &MetricsResult) -> String {
    let share = ratio(m.keyword_count as f64, m.total_words as f64);
    let mut out = String::from("7. **Keyword Density Calculation:**\n");
    out.push_str(" - **Formula:** $ \\text{Keyword Density (\\%)} = \\left(\\frac{\\text{Keyword Occurrences}}{\\text{Word Count}}\\right) \\times 100 $\n");
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!("   - Most frequent keyword identified: '{}'\n", m.keyword));
    out.push_str(&format!(
        "   - Count the number of times the keyword appears in the content: {}\n",
        m.keyword_count
    ));
    out.push_str(&format!(
        "   - Divide the keyword occurrence count by the total word count: {} ÷ {} = {:.4}\n",
        m.keyword_count, m.total_words, share
    ));
    out.push_str(&format!(
        "   - Multiply the result by 100: {:.4} × 100 = {:.2}%\n",
        share, m.keyword_density
    ));
    out.push_str(&format!(
        "   - Density of the keyword within the content alone: {:.2}%\n",
        m.content_keyword_density
    ));
    out.push_str(&format!(" - **Final Keyword Density:** **{:.2}%**\n\n", m.keyword_density));
    out
}

fn complexity_step(m: &MetricsResult) -> String {
    let c = &m.complexity;
    let w = c.weights;
    let [nw, ns, nr] = c.normalized();
    let [tw, ts, tr] = c.weighted_terms();

    let mut out = String::from("8. **Complexity Score Calculation:**\n");
    out.push_str(" - **Formula:**  \n");
    out.push_str(&format!(
        " $$ \\text{{Complexity Score}} = \\left(\\frac{{\\text{{Word Count}}}}{{{}}} \\times {}\\right) + \\left(\\frac{{\\text{{Average Sentence Length}}}}{{{}}} \\times {}\\right) + \\left(\\frac{{\\text{{Abstract to Content Ratio}}}}{{{}}} \\times {}\\right) $$\n",
        c.word_count_scale, w.word_count,
        c.sentence_length_scale, w.sentence_length,
        c.abstract_ratio_scale, w.abstract_ratio,
    ));
    out.push_str(" - **Steps:**\n");
    out.push_str(&format!(
        "   - Normalize the Word Count by dividing it by {}: {} ÷ {} = {:.4}\n",
        c.word_count_scale, m.total_words, c.word_count_scale, nw
    ));
    out.push_str(&format!(
        "   - Normalize the Average Sentence Length by dividing it by {}: {:.2} ÷ {} = {:.4}\n",
        c.sentence_length_scale, m.avg_sentence_length, c.sentence_length_scale, ns
    ));
    out.push_str(&format!(
        "   - Normalize the Abstract to Content Ratio by dividing it by {}: {:.2} ÷ {} = {:.4}\n",
        c.abstract_ratio_scale, m.abstract_content_ratio, c.abstract_ratio_scale, nr
    ));
    out.push_str(&format!(
        "   - Multiply the normalized Word Count by {}: {:.4} × {} = {:.4}\n",
        w.word_count, nw, w.word_count, tw
    ));
    out.push_str(&format!(
        "   - Multiply the normalized Average Sentence Length by {}: {:.4} × {} = {:.4}\n",
        w.sentence_length, ns, w.sentence_length, ts
    ));
    out.push_str(&format!(
        "   - Multiply the normalized Abstract to Content Ratio by {}: {:.4} × {} = {:.4}\n",
        w.abstract_ratio, nr, w.abstract_ratio, tr
    ));
    out.push_str(&format!(
        "   - Sum all three products: {:.4} + {:.4} + {:.4} = {:.4}\n",
        tw, ts, tr, c.score
    ));
    out.push_str(&format!(" - **Final Complexity Score:** **{:.2}**\n\n", c.score));
    out
}

/// Render the input echo and the eight narrated calculation steps for one paper.
pub fn render_record(record: &DocumentRecord, metrics: &MetricsResult) -> String {
    let mut report = render_input_data(record);
    report.push_str("---\n\n");
    report.push_str("#### Detailed Calculations:\n\n");
    report.push_str(&word_count_step(metrics));
    report.push_str(&ratio_step(metrics));
    report.push_str(&word_length_step(record, metrics));
    report.push_str(&sentence_count_step(metrics));
    report.push_str(&sentence_length_step(metrics));
    report.push_str(&reading_time_step(metrics));
    report.push_str(&keyword_step(metrics));
    report.push_str(&complexity_step(metrics));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdoc_metrics::compute_metrics;
    use confdoc_test_utils::pretty_assertions::assert_eq;
    use confdoc_test_utils::record;

    fn short_report() -> String {
        let r = record("AI helps.", "AI improves efficiency. AI reduces cost.");
        render_record(&r, &compute_metrics(&r))
    }

    #[test]
    fn test_input_block() {
        let report = short_report();
        assert!(report.starts_with(
            "### Paper: Efficient Inference\n\n\
             #### Input Data:\n\
             - **Paper Title:** Efficient Inference\n\
             - **Authors:** Ada Lovelace, Alan Turing\n\
             - **Abstract:**  \n  AI helps.\n"
        ));
    }

    #[test]
    fn test_word_count_and_ratio_narration() {
        let report = short_report();
        assert!(report.contains("   - Add both counts together: 2 + 6 = 8\n"));
        assert!(report.contains(" - **Final Word Count:** **8.00**\n"));
        assert!(report.contains(
            "   - Divide the abstract word count by the content word count: 2 ÷ 6 = 0.3333\n"
        ));
        assert!(report.contains("   - Multiply the result by 100: 0.3333 × 100 = 33.33%\n"));
        assert!(report.contains(" - **Final Ratio:** **33.33%**\n"));
    }

    #[test]
    fn test_sentence_and_reading_narration() {
        let report = short_report();
        assert!(report.contains("   - Add both counts together: 1 + 2 = 3\n"));
        assert!(report.contains("   - Divide the total word count by the total number of sentences: 8 ÷ 3 = 2.6667\n"));
        assert!(report.contains(" - **Final Average Sentence Length:** **2.67 words per sentence**\n"));
        assert!(report.contains("\\frac{\\text{Word Count}}{200} $\n"));
        assert!(report.contains("   - Divide the total word count by 200: 8 ÷ 200 = 0.0400\n"));
        assert!(report.contains("   - Count all characters in the abstract and content, excluding spaces: 43\n"));
    }

    #[test]
    fn test_keyword_and_complexity_narration() {
        let report = short_report();
        assert!(report.contains("   - Most frequent keyword identified: 'improves'\n"));
        assert!(report.contains("   - Divide the keyword occurrence count by the total word count: 1 ÷ 8 = 0.1250\n"));
        assert!(report.contains(" - **Final Keyword Density:** **12.50%**\n"));
        assert!(report.contains(
            " $$ \\text{Complexity Score} = \\left(\\frac{\\text{Word Count}}{1000} \\times 0.3\\right)"
        ));
        assert!(report.contains("   - Normalize the Word Count by dividing it by 1000: 8 ÷ 1000 = 0.0080\n"));
        assert!(report.contains("   - Multiply the normalized Average Sentence Length by 0.4: 0.1333 × 0.4 = 0.0533\n"));
        assert!(report.contains(" - **Final Complexity Score:** **0.56**\n"));
    }

    #[test]
    fn test_zero_denominators_render_as_zero() {
        let r = record(".", "!");
        let report = render_record(&r, &compute_metrics(&r));
        assert!(report.contains(": 0 ÷ 0 = 0.0000\n"));
        assert!(report.contains("   - Most frequent keyword identified: ''\n"));
        assert!(report.contains(" - **Final Complexity Score:** **0.00**\n"));
    }

    #[test]
    fn test_render_is_reproducible() {
        assert_eq!(short_report(), short_report());
    }
}
