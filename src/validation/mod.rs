//! Validation of the QA keyword text format.
//!
//! A well-formed document is a sequence of blocks
//! `Context (Question Answer)+`, one sentence per line, where:
//! - every line starts with a keyword
//! - keywords never appear inside the text that follows them
//! - every answer is a substring of the current context
//!
//! Capitalization of contexts and questions is an optional warning.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::formats::io_qa_text::{ANSWER_KEYWORD, CONTEXT_KEYWORD, KEYWORDS, QUESTION_KEYWORD};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// Warn when a context or question does not start with an uppercase letter.
    pub check_capitalization: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Keyword {
    Context,
    Question,
    Answer,
}

/// Validates a document in the QA keyword text format.
///
/// Blank lines are ignored. Line numbers in the report are 1-based.
pub fn validate_qa_text(text: &str, opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    // A document may open with a context, as if an answer preceded it.
    let mut previous = Keyword::Answer;
    let mut context = "";

    for (idx, line) in text.lines().enumerate() {
        let at = IssueContext::Line { number: idx + 1 };
        if line.trim().is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(CONTEXT_KEYWORD) {
            let body = rest.trim();
            check_keyword_in_text("context", body, &at, &mut report);
            if previous != Keyword::Answer {
                report.add(ValidationIssue::error(
                    IssueCode::ContextOutOfOrder,
                    format!("an answer must precede a context: {line}"),
                    at.clone(),
                ));
            }
            if opts.check_capitalization {
                check_capitalized("context", body, &at, &mut report);
            }
            context = body;
            previous = Keyword::Context;
        } else if let Some(rest) = line.strip_prefix(QUESTION_KEYWORD) {
            let body = rest.trim();
            check_keyword_in_text("question", body, &at, &mut report);
            if previous == Keyword::Question {
                report.add(ValidationIssue::error(
                    IssueCode::ConsecutiveQuestions,
                    format!("two questions in a row: {line}"),
                    at.clone(),
                ));
            }
            if opts.check_capitalization {
                check_capitalized("question", body, &at, &mut report);
            }
            previous = Keyword::Question;
        } else if let Some(rest) = line.strip_prefix(ANSWER_KEYWORD) {
            let body = rest.trim();
            if !context.contains(body) {
                report.add(ValidationIssue::error(
                    IssueCode::AnswerNotInContext,
                    format!("answer '{body}' is not in context '{context}'"),
                    at.clone(),
                ));
            }
            check_keyword_in_text("answer", body, &at, &mut report);
            if previous != Keyword::Question {
                report.add(ValidationIssue::error(
                    IssueCode::AnswerWithoutQuestion,
                    format!("a question must precede an answer: {line}"),
                    at.clone(),
                ));
            }
            previous = Keyword::Answer;
        } else {
            report.add(ValidationIssue::error(
                IssueCode::MissingKeyword,
                format!("line does not begin with a keyword: {line}"),
                at,
            ));
        }
    }

    if previous == Keyword::Question {
        report.add(ValidationIssue::error(
            IssueCode::UnansweredQuestion,
            "document ends with a question that has no answer",
            IssueContext::Document,
        ));
    }

    report
}

fn check_keyword_in_text(
    what: &str,
    body: &str,
    at: &IssueContext,
    report: &mut ValidationReport,
) {
    if KEYWORDS.iter().any(|kw| body.contains(kw)) {
        report.add(ValidationIssue::error(
            IssueCode::KeywordInText,
            format!("keyword inside {what}: {body}"),
            at.clone(),
        ));
    }
}

fn check_capitalized(what: &str, body: &str, at: &IssueContext, report: &mut ValidationReport) {
    if body.chars().next().is_some_and(|c| !c.is_uppercase()) {
        report.add(ValidationIssue::warning(
            IssueCode::LowercaseStart,
            format!("{what} does not start with an uppercase letter: {body}"),
            at.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(report: &ValidationReport) -> Vec<IssueCode> {
        report.issues.iter().map(|i| i.code).collect()
    }

    const VALID: &str = "Контекст: Київ є столицею України.\n\
                         Питання: Що є столицею?\n\
                         Відповідь: Київ\n\
                         Питання: Столицею чого є Київ?\n\
                         Відповідь: України\n\
                         \n\
                         Контекст: Дніпро тече через Київ.\n\
                         Питання: Що тече?\n\
                         Відповідь: Дніпро\n";

    #[test]
    fn valid_document_is_clean() {
        let report = validate_qa_text(
            VALID,
            &ValidateOptions {
                check_capitalization: true,
            },
        );
        assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn line_without_keyword() {
        let report = validate_qa_text(
            "Контекст: A\nпросто текст\nПитання: Q\nВідповідь: A\n",
            &ValidateOptions::default(),
        );
        assert_eq!(codes(&report), vec![IssueCode::MissingKeyword]);
        assert_eq!(report.issues[0].context, IssueContext::Line { number: 2 });
    }

    #[test]
    fn keyword_inside_text() {
        let report = validate_qa_text(
            "Контекст: A Питання: B\nПитання: Q\nВідповідь: A\n",
            &ValidateOptions::default(),
        );
        assert_eq!(codes(&report), vec![IssueCode::KeywordInText]);
    }

    #[test]
    fn ordering_errors() {
        let report = validate_qa_text(
            "Контекст: A B\nКонтекст: A B\nПитання: Q\nПитання: Q2\nВідповідь: A\nВідповідь: B\n",
            &ValidateOptions::default(),
        );
        assert_eq!(
            codes(&report),
            vec![
                IssueCode::ContextOutOfOrder,
                IssueCode::ConsecutiveQuestions,
                IssueCode::AnswerWithoutQuestion,
            ]
        );
        assert_eq!(report.error_count(), 3);
    }

    #[test]
    fn answer_not_in_context() {
        let report = validate_qa_text(
            "Контекст: Київ\nПитання: Q\nВідповідь: Львів\n",
            &ValidateOptions::default(),
        );
        assert_eq!(codes(&report), vec![IssueCode::AnswerNotInContext]);
        assert!(report.issues[0].message.contains("Львів"));
    }

    #[test]
    fn capitalization_only_when_enabled() {
        let text = "Контекст: київ\nПитання: що?\nВідповідь: київ\n";
        assert!(validate_qa_text(text, &ValidateOptions::default()).is_clean());

        let report = validate_qa_text(
            text,
            &ValidateOptions {
                check_capitalization: true,
            },
        );
        assert_eq!(report.warning_count(), 2);
        assert!(report.is_ok());
    }

    #[test]
    fn trailing_question_is_reported() {
        let report = validate_qa_text("Контекст: A\nПитання: Q\n", &ValidateOptions::default());
        assert_eq!(codes(&report), vec![IssueCode::UnansweredQuestion]);
        assert_eq!(report.issues[0].context, IssueContext::Document);
    }

    #[test]
    fn report_display_lists_issues() {
        let report = validate_qa_text("сміття\n", &ValidateOptions::default());
        let rendered = report.to_string();
        assert!(rendered.contains("1 error(s) and 0 warning(s)"));
        assert!(rendered.contains("[ERROR] MissingKeyword at line 1"));
    }
}
