//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::{ConsoleFormatter, language_label};
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use lingua_application::{NoProgress, QaSession};
use lingua_domain::LanguageCode;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use tokio_util::sync::CancellationToken;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Quit,
    Help,
    Reset,
    History,
    Languages,
    /// `/lang` with no argument shows the current language
    Lang(Option<String>),
    Unknown(String),
}

impl ChatCommand {
    /// Parse a line starting with `/`; other lines are questions.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        Some(match name.to_lowercase().as_str() {
            "quit" | "exit" | "q" => ChatCommand::Quit,
            "help" | "h" | "?" => ChatCommand::Help,
            "reset" | "clear" => ChatCommand::Reset,
            "history" => ChatCommand::History,
            "languages" | "langs" => ChatCommand::Languages,
            "lang" | "language" => ChatCommand::Lang(arg),
            _ => ChatCommand::Unknown(line.to_string()),
        })
    }
}

/// Interactive chat REPL over one [`QaSession`]
pub struct ChatRepl {
    session: QaSession,
    output: OutputConfig,
    repl: ReplConfig,
}

impl ChatRepl {
    pub fn new(session: QaSession) -> Self {
        Self {
            session,
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.repl.show_progress = show;
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.repl.resolved_history_file() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Line history disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) {
        let mut editor = self.line_editor();
        self.print_welcome();

        loop {
            let prompt = DefaultPrompt::new(
                DefaultPromptSegment::Basic(format!("lingua[{}]", self.session.output_language())),
                DefaultPromptSegment::Empty,
            );

            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ChatCommand::parse(line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    break;
                }
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            lingua-qa - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Ask in any language. Answers in: {}",
            language_label(self.session.output_language()).bold()
        );
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /lang <code|name>  - Change the answer language (e.g. /lang hi, /lang Japanese)");
        println!("  /languages         - List supported languages");
        println!("  /history           - Show this conversation");
        println!("  /reset             - Clear the conversation");
        println!("  /help, /h, /?      - Show this help");
        println!("  /quit, /exit, /q   - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ChatCommand) -> bool {
        match command {
            ChatCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ChatCommand::Help => {
                println!();
                Self::print_help();
            }
            ChatCommand::Reset => {
                self.session.reset_history();
                println!("Conversation cleared.");
            }
            ChatCommand::History => {
                println!();
                println!("{}", ConsoleFormatter::format_history(self.session.history()));
                println!();
            }
            ChatCommand::Languages => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_languages(Some(self.session.output_language()))
                );
                println!();
            }
            ChatCommand::Lang(None) => {
                println!(
                    "Answer language: {}",
                    language_label(self.session.output_language())
                );
            }
            ChatCommand::Lang(Some(input)) => match LanguageCode::resolve(&input) {
                Ok(code) => {
                    println!("Answer language set to {}", language_label(&code).bold());
                    self.session.set_output_language(code);
                }
                Err(e) => {
                    println!("{} {}", "Error:".red().bold(), e);
                    println!("Type /languages for the supported list");
                }
            },
            ChatCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        // Ctrl-C while a question is running cancels that question only
        let token = CancellationToken::new();
        let trigger = token.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                trigger.cancel();
            }
        });

        let result = if self.repl.show_progress {
            let progress = ProgressReporter::new();
            self.session.ask_with(question, &progress, Some(token)).await
        } else {
            self.session.ask_with(question, &NoProgress, Some(token)).await
        };
        watcher.abort();

        match result {
            Ok(reply) => println!("{}", ConsoleFormatter::format(&reply, self.output.format)),
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e, self.output.format)),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ChatCommand::parse("/quit"), Some(ChatCommand::Quit));
        assert_eq!(ChatCommand::parse("  /Q "), Some(ChatCommand::Quit));
        assert_eq!(ChatCommand::parse("/reset"), Some(ChatCommand::Reset));
        assert_eq!(ChatCommand::parse("/history"), Some(ChatCommand::History));
        assert_eq!(ChatCommand::parse("/languages"), Some(ChatCommand::Languages));
        assert_eq!(ChatCommand::parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_lang_argument() {
        assert_eq!(
            ChatCommand::parse("/lang  Hindi "),
            Some(ChatCommand::Lang(Some("Hindi".to_string())))
        );
        assert_eq!(ChatCommand::parse("/lang"), Some(ChatCommand::Lang(None)));
    }

    #[test]
    fn test_questions_are_not_commands() {
        assert_eq!(ChatCommand::parse("What is 2/3?"), None);
        assert_eq!(
            ChatCommand::parse("/frobnicate"),
            Some(ChatCommand::Unknown("/frobnicate".to_string()))
        );
    }
}
