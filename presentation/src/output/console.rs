//! Console output formatter for pipeline replies

use colored::Colorize;
use lingua_application::{PipelineError, PipelineReply, QueryNormalization};
use lingua_domain::core::string::preview;
use lingua_domain::{AnswerOrigin, LanguageCode, OutputFormat, Role, SUPPORTED_LANGUAGES, Turn};

/// `Spanish (es)` for catalogue languages, the bare code otherwise
pub fn language_label(code: &LanguageCode) -> String {
    match code.display_name() {
        Some(name) => format!("{} ({})", name, code),
        None => code.to_string(),
    }
}

/// Formats replies, errors and listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a reply in the requested format
    pub fn format(reply: &PipelineReply, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::format_answer_only(reply),
            OutputFormat::Detailed => Self::format_detailed(reply),
            OutputFormat::Json => Self::format_json(reply),
        }
    }

    /// Only the final text
    pub fn format_answer_only(reply: &PipelineReply) -> String {
        reply.display_text().to_string()
    }

    /// Format as JSON
    pub fn format_json(reply: &PipelineReply) -> String {
        serde_json::to_string_pretty(reply).unwrap_or_else(|_| "{}".to_string())
    }

    /// Answer plus how it was produced
    pub fn format_detailed(reply: &PipelineReply) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            reply.question.text()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Detected:".cyan().bold(),
            language_label(reply.question.source_language())
        ));

        let normalization = match reply.normalization {
            QueryNormalization::Identity => "as asked".normal(),
            QueryNormalization::Translated => "translated".normal(),
            QueryNormalization::Degraded => "translation failed, original text".yellow(),
        };
        output.push_str(&format!(
            "{} {} ({})\n",
            "Query:".cyan().bold(),
            reply.english_query,
            normalization
        ));

        let context = if reply.context_used() {
            format!(
                "{} ({} chars): {}",
                "used".green(),
                reply.context.text.trim().chars().count(),
                preview(&reply.context.text, 120)
            )
        } else {
            "none, general knowledge only".dimmed().to_string()
        };
        output.push_str(&format!("{} {}\n", "Context:".cyan().bold(), context));

        let origin = match reply.answer.origin {
            AnswerOrigin::Generated => "generated".green(),
            AnswerOrigin::Fallback(_) => "placeholder".yellow(),
        };
        output.push_str(&format!(
            "{} {} [{}, {}]\n",
            "Raw answer:".cyan().bold(),
            reply.answer.raw_text,
            reply.answer.source_language,
            origin
        ));

        output.push_str(&format!(
            "\n{}\n{}\n",
            format!("── Answer in {} ──", language_label(&reply.translated.language))
                .yellow()
                .bold(),
            reply.display_text()
        ));

        output
    }

    /// Error message for a failed request
    pub fn format_error(error: &PipelineError, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
                "error": error.to_string(),
                "stage": error.stage().as_str(),
            }))
            .unwrap_or_else(|_| "{}".to_string()),
            _ => format!("{} {}", "Error:".red().bold(), error),
        }
    }

    /// Table of supported output languages
    pub fn format_languages(current: Option<&LanguageCode>) -> String {
        let mut output = format!("{}\n", "Supported output languages:".cyan().bold());
        for language in SUPPORTED_LANGUAGES {
            let marker = if current.is_some_and(|c| c.as_str() == language.code) {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            output.push_str(&format!("  {} {:<4} {}\n", marker, language.code, language.name));
        }
        output
    }

    /// Conversation transcript
    pub fn format_history(turns: &[Turn]) -> String {
        if turns.is_empty() {
            return "(no conversation yet)".dimmed().to_string();
        }
        turns
            .iter()
            .map(|turn| {
                let label = match turn.role {
                    Role::User => "you".cyan().bold(),
                    Role::Bot => "bot".green().bold(),
                };
                format!("{:>5}: {}", label, Self::indent_continuation(&turn.content))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn indent_continuation(text: &str) -> String {
        text.lines().collect::<Vec<_>>().join("\n       ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lingua_domain::{
        Answer, ContextSnippet, PromptVariant, Question, TranslatedAnswer,
    };

    fn reply() -> PipelineReply {
        let es = LanguageCode::new("es").unwrap();
        PipelineReply {
            question: Question::new("¿Cuál es la capital de Francia?", es.clone(), LanguageCode::english())
                .unwrap(),
            english_query: "What is the capital of France?".to_string(),
            normalization: QueryNormalization::Translated,
            context: ContextSnippet::found(
                "Paris is the capital and largest city of France, on the Seine river.",
            ),
            prompt_variant: PromptVariant::WithContextHint,
            answer: Answer::generated("París es la capital de Francia.", es),
            translated: TranslatedAnswer {
                text: "Paris is the capital of France.".to_string(),
                language: LanguageCode::english(),
            },
            history: vec![
                Turn::user("¿Cuál es la capital de Francia?"),
                Turn::bot("Paris is the capital of France."),
            ],
            answered_at: Utc::now(),
        }
    }

    #[test]
    fn test_answer_only() {
        assert_eq!(
            ConsoleFormatter::format(&reply(), OutputFormat::Answer),
            "Paris is the capital of France."
        );
    }

    #[test]
    fn test_detailed_mentions_every_stage() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_detailed(&reply());
        assert!(output.contains("Spanish (es)"));
        assert!(output.contains("What is the capital of France? (translated)"));
        assert!(output.contains("used ("));
        assert!(output.contains("París es la capital de Francia. [es, generated]"));
        assert!(output.contains("Answer in English (en)"));
    }

    #[test]
    fn test_json_is_parseable() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&reply())).unwrap();
        assert_eq!(json["translated"]["text"], "Paris is the capital of France.");
        assert_eq!(json["question"]["source_language"], "es");
        assert_eq!(json["history"][1]["role"], "bot");
        assert_eq!(json["answer"]["origin"]["kind"], "generated");
    }

    #[test]
    fn test_languages_marks_current() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_languages(Some(&LanguageCode::new("ta").unwrap()));
        assert!(output.contains("* ta   Tamil"));
        assert!(output.contains("  en   English"));
        assert_eq!(output.lines().count(), 1 + SUPPORTED_LANGUAGES.len());
    }

    #[test]
    fn test_history() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_history(&reply().history);
        assert_eq!(
            output,
            "  you: ¿Cuál es la capital de Francia?\n  bot: Paris is the capital of France."
        );
    }

    #[test]
    fn test_language_label_for_unlisted_code() {
        assert_eq!(language_label(&LanguageCode::new("pt-br").unwrap()), "pt-br");
    }
}
