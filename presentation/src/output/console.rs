//! Console output formatter for flow nodes and goal listings

use colored::Colorize;
use compass_application::FlowStep;
use compass_domain::{FlowNode, Goal, Question, QuestionKind, Service};

/// Formats flow nodes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a question with its numbered options and an input hint
    pub fn format_question(question: &Question) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(&format!("{}\n", question.text.cyan().bold()));

        for (i, option) in question.options.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, option.label));
        }

        let hint = match question.kind {
            QuestionKind::SingleChoice => "Pick one (number or value)",
            QuestionKind::MultiChoice => "Pick any (comma-separated numbers or values)",
            QuestionKind::Text => "Free text",
        };
        output.push_str(&format!("{}\n", hint.dimmed()));

        output
    }

    /// Format any flow node
    pub fn format_node(node: &FlowNode) -> String {
        match node {
            FlowNode::Question { question } => Self::format_question(question),
            FlowNode::Result {
                summary,
                services,
                goals,
            } => Self::format_result(summary, services, goals),
        }
    }

    /// Format a terminal recommendation result
    pub fn format_result(summary: &str, services: &[Service], goals: &[Goal]) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(&format!("{}\n", "=== Recommendations ===".green().bold()));
        output.push_str(&format!("{}\n", summary));

        if !goals.is_empty() {
            output.push('\n');
            for goal in goals {
                output.push_str(&format!("{} {}\n", "Goal:".cyan().bold(), goal.title));
                if let Some(description) = &goal.description {
                    output.push_str(&format!("  {}\n", description));
                }
            }
        }

        if services.is_empty() {
            output.push_str(&format!("\n{}\n", "No services to recommend.".dimmed()));
        } else {
            for service in services {
                output.push('\n');
                output.push_str(&format!("{}\n", format!("* {}", service.name).yellow().bold()));
                if let Some(description) = &service.description {
                    output.push_str(&format!("  {}\n", description));
                }
                if let Some(url) = &service.docs_url {
                    output.push_str(&format!("  {}\n", url.underline()));
                }
                if !service.tags.is_empty() {
                    output.push_str(&format!("  [{}]\n", service.tags.join(", ")));
                }
            }
        }

        output
    }

    /// Format the goal listing
    pub fn format_goals(goals: &[Goal]) -> String {
        if goals.is_empty() {
            return "No goals in the catalog.".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Goals:".cyan().bold()));
        for goal in goals {
            output.push_str(&format!("  {} - {}\n", goal.id.bold(), goal.title));
            if let Some(description) = &goal.description {
                output.push_str(&format!("      {}\n", description.dimmed()));
            }
        }
        output
    }

    /// JSON wire shape for one computed step: `{"node": <node>|null}`
    pub fn format_step_json(step: &FlowStep) -> String {
        let body = serde_json::json!({ "node": step.node });
        serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
    }

    /// JSON wire shape for the goal listing
    pub fn format_goals_json(goals: &[Goal]) -> String {
        let body = serde_json::json!({ "goals": goals, "count": goals.len() });
        serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
    }
}
