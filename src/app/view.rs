use std::process::ExitCode;

use newsroom::error::ValidationError;
use newsroom::newsletter::render_plain;
use newsroom::ui::style;
use newsroom::workflow::{Outcome, WorkflowState};

/// Localised outcome for a request that was refused before reaching the network.
pub fn rejection(err: &ValidationError) -> Outcome {
    let message = match err {
        ValidationError::EmptyKeywords => t!("outcome.keywords_required"),
        ValidationError::EmptyComment => t!("outcome.comment_required"),
        ValidationError::MaxLinesOutOfRange(value) => {
            t!("outcome.max_lines_out_of_range", value = value)
        }
        ValidationError::Busy(region) => t!("outcome.busy", region = region),
    };
    Outcome::rejected(message)
}

pub fn settle(result: Result<Outcome, ValidationError>) -> Outcome {
    result.unwrap_or_else(|err| rejection(&err))
}

pub fn exit_code(outcome: &Outcome) -> ExitCode {
    if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Idle => {}
        Outcome::Success(message) => println!("  {} {message}", style::success("✓")),
        Outcome::Failure { message, retryable } => {
            println!("  {} {message}", style::failure("✗"));
            if *retryable {
                println!("    {}", style::dim(t!("outcome.retry_hint")));
            }
        }
    }
}

fn on_off(flag: bool) -> String {
    if flag {
        t!("cli.enabled").into_owned()
    } else {
        t!("cli.disabled").into_owned()
    }
}

fn print_field(label: &str, value: &str) {
    println!("  {:<12} {}", style::label(label), style::value(value));
}

pub fn print_content(content: &str) {
    let rendered = render_plain(content);
    if rendered.is_empty() {
        println!("    {}", style::dim(t!("cli.no_content")));
        return;
    }
    for line in rendered.lines() {
        println!("    {line}");
    }
}

pub fn print_state(state: &WorkflowState) {
    let vars = state.variables();

    println!();
    println!("  {}", style::header(t!("cli.title")));
    println!("  {}", style::dim("─".repeat(40)));

    let tone = state
        .store
        .selected_tone()
        .map_or_else(|| t!("cli.no_tone").into_owned(), tone_label);
    print_field(&t!("cli.tone"), &tone);
    for option in state.tone_options() {
        if option.id == vars.selected_tone_id {
            println!("    {} {}", style::marker("●"), tone_label(option));
        } else {
            println!("    {} {}", style::dim("○"), tone_label(option));
        }
    }

    print_field(&t!("cli.max_lines"), &vars.max_lines.to_string());
    print_field(&t!("cli.include_image"), &on_off(vars.include_image));
    print_field(&t!("cli.keywords"), &vars.keywords);
    if !state.comment.is_empty() {
        print_field(&t!("cli.comment"), &state.comment);
    }

    println!();
    println!("  {}", style::label(t!("cli.verification")));
    print_content(&vars.verification);
    println!();
}

pub fn tone_label(option: &newsroom::newsletter::ToneOption) -> String {
    if option.description.is_empty() {
        format!("#{}", option.id)
    } else {
        format!("#{} {}", option.id, option.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom::newsletter::ToneOption;
    use newsroom::workflow::Region;

    #[test]
    fn rejections_never_offer_retry() {
        for err in [
            ValidationError::EmptyKeywords,
            ValidationError::EmptyComment,
            ValidationError::MaxLinesOutOfRange(0),
            ValidationError::Busy(Region::Saving),
        ] {
            let outcome = rejection(&err);
            assert!(outcome.is_failure());
            assert!(!outcome.offers_retry());
        }
    }

    #[test]
    fn failure_exits_non_zero() {
        assert_eq!(exit_code(&Outcome::rejected("x")), ExitCode::FAILURE);
        assert_eq!(exit_code(&Outcome::success("ok")), ExitCode::SUCCESS);
        assert_eq!(exit_code(&Outcome::Idle), ExitCode::SUCCESS);
    }

    #[test]
    fn tone_label_falls_back_to_id() {
        let bare = ToneOption {
            id: 4,
            description: String::new(),
        };
        assert_eq!(tone_label(&bare), "#4");
        let named = ToneOption {
            id: 1,
            description: "Formel".into(),
        };
        assert_eq!(tone_label(&named), "#1 Formel");
    }
}
