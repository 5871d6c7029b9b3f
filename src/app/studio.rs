use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use std::process::ExitCode;

use newsroom::newsletter::NO_TONE;
use newsroom::workflow::Outcome;

use super::dispatch::Controller;
use super::view::{exit_code, print_outcome, print_state, rejection, settle, tone_label};

#[derive(Clone, Copy)]
enum Action {
    SelectTone,
    MaxLines,
    ToggleImage,
    Keywords,
    Test,
    Comment,
    Save,
    Reload,
    Quit,
}

const ACTIONS: [Action; 9] = [
    Action::SelectTone,
    Action::MaxLines,
    Action::ToggleImage,
    Action::Keywords,
    Action::Test,
    Action::Comment,
    Action::Save,
    Action::Reload,
    Action::Quit,
];

impl Action {
    fn label(self) -> String {
        let text = match self {
            Self::SelectTone => t!("studio.select_tone"),
            Self::MaxLines => t!("studio.edit_max_lines"),
            Self::ToggleImage => t!("studio.toggle_image"),
            Self::Keywords => t!("studio.edit_keywords"),
            Self::Test => t!("studio.run_test"),
            Self::Comment => t!("studio.write_comment"),
            Self::Save => t!("studio.save"),
            Self::Reload => t!("studio.reload"),
            Self::Quit => t!("studio.quit"),
        };
        format!("› {text}")
    }
}

/// Load, offering a retry for as long as the user accepts one.
async fn load_with_retry(controller: &Controller) -> Result<Outcome> {
    let mut outcome = settle(controller.load().await);
    while outcome.offers_retry() {
        print_outcome(&outcome);
        let retry = Confirm::new()
            .with_prompt(format!("  {}", t!("studio.retry_prompt")))
            .default(true)
            .interact()?;
        if !retry {
            break;
        }
        outcome = settle(controller.retry().await);
    }
    Ok(outcome)
}

fn choose_tone(controller: &Controller) -> Result<()> {
    let state = controller.snapshot();
    let mut ids = vec![NO_TONE];
    let mut labels = vec![t!("cli.no_tone").into_owned()];
    for option in state.tone_options() {
        ids.push(option.id);
        labels.push(tone_label(option));
    }
    let current = ids
        .iter()
        .position(|id| *id == state.variables().selected_tone_id)
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt(format!("  {}", t!("studio.select_tone")))
        .items(&labels)
        .default(current)
        .interact()?;
    controller.select_tone(ids[idx]);
    Ok(())
}

fn edit_max_lines(controller: &Controller) -> Result<()> {
    let value: i64 = Input::new()
        .with_prompt(format!("  {}", t!("studio.max_lines_prompt")))
        .default(i64::from(controller.variables().max_lines))
        .interact_text()?;
    if let Err(err) = controller.set_max_lines(value) {
        print_outcome(&rejection(&err));
    }
    Ok(())
}

fn edit_keywords(controller: &Controller) -> Result<()> {
    let keywords: String = Input::new()
        .with_prompt(format!("  {}", t!("studio.keywords_prompt")))
        .with_initial_text(controller.variables().keywords)
        .allow_empty(true)
        .interact_text()?;
    controller.set_keywords(keywords);
    Ok(())
}

fn edit_comment(controller: &Controller) -> Result<()> {
    let comment: String = Input::new()
        .with_prompt(format!("  {}", t!("studio.comment_prompt")))
        .with_initial_text(controller.comment())
        .allow_empty(true)
        .interact_text()?;
    controller.set_comment(comment);
    Ok(())
}

/// Interactive loop over one controller. Returns the exit code of the last
/// remote outcome.
pub async fn run(controller: &Controller) -> Result<ExitCode> {
    let mut last = load_with_retry(controller).await?;
    let labels: Vec<String> = ACTIONS.iter().map(|action| action.label()).collect();
    let mut dirty = false;

    loop {
        print_state(&controller.snapshot());
        print_outcome(&controller.outcome());

        let idx = Select::new()
            .with_prompt(format!("  {}", t!("studio.menu")))
            .items(&labels)
            .default(0)
            .interact()?;

        match ACTIONS[idx] {
            Action::SelectTone => {
                choose_tone(controller)?;
                dirty = true;
            }
            Action::MaxLines => {
                edit_max_lines(controller)?;
                dirty = true;
            }
            Action::ToggleImage => {
                controller.set_include_image(!controller.variables().include_image);
                dirty = true;
            }
            Action::Keywords => {
                edit_keywords(controller)?;
                dirty = true;
            }
            Action::Test => {
                last = settle(controller.test().await);
                dirty |= last.is_success();
            }
            Action::Comment => {
                edit_comment(controller)?;
                last = settle(controller.send_comment().await);
                dirty |= last.is_success();
            }
            Action::Save => {
                last = settle(controller.save().await);
                if last.is_success() {
                    dirty = false;
                }
            }
            Action::Reload => {
                last = load_with_retry(controller).await?;
                if !last.is_failure() {
                    dirty = false;
                }
            }
            Action::Quit => {
                if dirty {
                    let discard = Confirm::new()
                        .with_prompt(format!("  {}", t!("studio.discard_confirm")))
                        .default(false)
                        .interact()?;
                    if !discard {
                        continue;
                    }
                }
                break;
            }
        }
    }

    Ok(exit_code(&last))
}
