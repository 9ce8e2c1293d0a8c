//! Interactive flow REPL
//!
//! Walks the user through the questionnaire: renders the current
//! question, reads an answer, appends it to the caller-held history, and
//! re-invokes the engine for the next node. The engine stays stateless -
//! the full history is re-submitted each turn, which is what makes
//! `/back` and `/restart` trivial.

use crate::ConsoleFormatter;
use compass_application::{AdvanceFlowInput, AdvanceFlowUseCase, Catalog};
use compass_domain::{Answer, AnswerValue, FlowNode, Question, QuestionKind};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// What a slash command asks the loop to do
enum ReplCommand {
    Continue,
    Quit,
    Back,
    Restart,
}

/// Interactive questionnaire REPL
pub struct FlowRepl<C: Catalog + 'static> {
    use_case: AdvanceFlowUseCase<C>,
}

impl<C: Catalog + 'static> FlowRepl<C> {
    pub fn new(use_case: AdvanceFlowUseCase<C>) -> Self {
        Self { use_case }
    }

    /// Run the interactive flow
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("service-compass").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        let mut answers: Vec<Answer> = Vec::new();
        let mut current: Option<Question> = None;

        self.refresh(&mut answers, &mut current).await;

        while let Some(question) = current.clone() {
            print!("{}", ConsoleFormatter::format_question(&question));

            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_command(line) {
                            ReplCommand::Quit => break,
                            ReplCommand::Back => {
                                if answers.pop().is_none() {
                                    println!("Already at the first question.");
                                }
                                self.refresh(&mut answers, &mut current).await;
                            }
                            ReplCommand::Restart => {
                                answers.clear();
                                self.refresh(&mut answers, &mut current).await;
                            }
                            ReplCommand::Continue => {}
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    match parse_answer(&question, line) {
                        Ok(value) => {
                            answers.push(Answer::new(question.id.clone(), value));
                            self.refresh(&mut answers, &mut current).await;
                        }
                        Err(message) => {
                            println!("{}", message);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Execute one turn and update the current question.
    ///
    /// Terminal nodes are rendered here; a failed turn drops the answer
    /// that caused it so the user can retry or answer differently.
    async fn refresh(&self, answers: &mut Vec<Answer>, current: &mut Option<Question>) {
        let input = AdvanceFlowInput::new(answers.clone());

        match self.use_case.execute(input).await {
            Ok(step) => match step.node {
                Some(FlowNode::Question { question }) => {
                    *current = Some(question);
                }
                Some(node) => {
                    println!("{}", ConsoleFormatter::format_node(&node));
                    *current = None;
                }
                None => {
                    println!();
                    println!("No further step is configured for these answers.");
                    println!("Use /restart to try a different path.");
                    *current = None;
                }
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                if e.is_retryable() {
                    eprintln!("The catalog may be temporarily unavailable; answer again to retry.");
                }
                if answers.pop().is_none() {
                    // The flow could not even start
                    *current = None;
                }
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("+---------------------------------------------+");
        println!("|        Service Compass - Guided Flow        |");
        println!("+---------------------------------------------+");
        println!();
        println!("Commands:");
        println!("  /back     - Revisit the previous question");
        println!("  /restart  - Start over");
        println!("  /help     - Show this help");
        println!("  /quit     - Exit");
        println!();
    }

    /// Handle slash commands
    fn handle_command(&self, cmd: &str) -> ReplCommand {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                ReplCommand::Quit
            }
            "/back" | "/b" => ReplCommand::Back,
            "/restart" => ReplCommand::Restart,
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /back, /b        - Revisit the previous question");
                println!("  /restart         - Start over");
                println!("  /help, /h, /?    - Show this help");
                println!("  /quit, /exit, /q - Exit");
                println!();
                ReplCommand::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                ReplCommand::Continue
            }
        }
    }
}

/// Turn raw input into an answer value for the given question.
///
/// Choice questions accept a 1-based option number or a literal option
/// value; multi-choice input is comma-separated. Free-text questions
/// take the input as-is.
fn parse_answer(question: &Question, input: &str) -> Result<AnswerValue, String> {
    match question.kind {
        QuestionKind::Text => Ok(input.into()),
        QuestionKind::SingleChoice => resolve_token(question, input).map(AnswerValue::Single),
        QuestionKind::MultiChoice => {
            let tokens = input
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| resolve_token(question, t))
                .collect::<Result<Vec<String>, String>>()?;

            if tokens.is_empty() {
                return Err("Pick at least one option.".to_string());
            }
            Ok(AnswerValue::Multi(tokens))
        }
    }
}

/// Resolve one input token to an option value
fn resolve_token(question: &Question, token: &str) -> Result<String, String> {
    // Questions without options take raw input
    if question.options.is_empty() {
        return Ok(token.to_string());
    }

    if let Ok(number) = token.parse::<usize>()
        && number >= 1
        && let Some(option) = question.option_at(number - 1)
    {
        return Ok(option.value.clone());
    }

    if question.options.iter().any(|o| o.value == token) {
        return Ok(token.to_string());
    }

    Err(format!(
        "Pick 1-{} or one of: {}",
        question.options.len(),
        question
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ))
}
