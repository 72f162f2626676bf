use confdoc_common::RequiredField;
use confdoc_ingestion::ValidationResult;

pub const VALIDATION_SUCCESS: &str =
    "Data validation is successful! Would you like to proceed with LaTeX document generation?";

/// Render the validation report: counts, per-field validity, then either the
/// success line or every error in order.
pub fn render_validation(result: &ValidationResult) -> String {
    let checked = RequiredField::ALL
        .iter()
        .map(|f| f.tag())
        .collect::<Vec<_>>()
        .join(", ");

    let mut report = String::from("# Data Validation Report:\n");
    report.push_str(&format!("- Total Papers Evaluated: {}\n", result.total_records()));
    report.push_str(&format!("- Fields Checked: {}\n\n", checked));

    report.push_str("## Fields Validity\n");
    for (field, valid) in result.field_validity().iter() {
        report.push_str(&format!(
            "- {}: {}\n",
            field.tag(),
            if valid { "valid" } else { "invalid" }
        ));
    }

    report.push_str("\n## Validation Summary:\n");
    if result.is_valid() {
        report.push_str(VALIDATION_SUCCESS);
        report.push('\n');
    } else {
        for error in result.errors() {
            report.push_str(&format!("- ERROR: {}\n", error));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use confdoc_ingestion::validate_input;
    use confdoc_test_utils::pretty_assertions::assert_eq;
    use confdoc_test_utils::{paper_xml, PaperXml};

    #[test]
    fn test_render_success() {
        let result = validate_input(&paper_xml(&[PaperXml::default()]), false).result;
        let expected = "\
# Data Validation Report:
- Total Papers Evaluated: 1
- Fields Checked: paper_title, authors, abstract, content, author_biography

## Fields Validity
- paper_title: valid
- authors: valid
- abstract: valid
- content: valid
- author_biography: valid

## Validation Summary:
Data validation is successful! Would you like to proceed with LaTeX document generation?
";
        assert_eq!(render_validation(&result), expected);
    }

    #[test]
    fn test_render_errors_in_order() {
        let xml = paper_xml(&[
            PaperXml::default().without("abstract"),
            PaperXml::default().with("author_biography", " "),
        ]);
        let report = render_validation(&validate_input(&xml, false).result);
        assert!(report.contains("- abstract: invalid\n"));
        assert!(report.contains("- author_biography: invalid\n"));
        assert!(report.contains("- content: valid\n"));
        assert!(report.ends_with(
            "## Validation Summary:\n\
             - ERROR: Missing required tag(s): abstract in Paper 1.\n\
             - ERROR: Empty content in required tag(s): author_biography in Paper 2.\n"
        ));
        assert!(!report.contains(VALIDATION_SUCCESS));
    }

    #[test]
    fn test_render_structural_failure() {
        let report = render_validation(&ValidationResult::structural_failure());
        assert!(report.contains("- Total Papers Evaluated: 0\n"));
        assert_eq!(report.matches(": invalid\n").count(), 5);
        assert!(report.contains("- ERROR: Invalid data format."));
    }
}
