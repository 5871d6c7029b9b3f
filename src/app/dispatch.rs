use anyhow::Result;
use std::process::ExitCode;
use tracing::{info, warn};

use newsroom::newsletter::NO_TONE;
use newsroom::{Config, NewsletterController, WebhookClient};

use super::view::{exit_code, print_content, print_outcome, print_state, rejection, settle};
use super::{render, studio};
use crate::cli::commands::{Cli, Commands};

pub type Controller = NewsletterController<WebhookClient>;

pub fn connect(config: &Config) -> Result<Controller> {
    let client = WebhookClient::from_config(&config.webhooks)?;
    info!(
        fetch = %client.endpoints().fetch,
        timeout_secs = config.webhooks.timeout_secs,
        "webhook.configured"
    );
    Ok(NewsletterController::new(client))
}

/// Every remote command starts from the stored variables. Returns the exit
/// code to stop with when the load failed.
async fn load(controller: &Controller) -> Option<ExitCode> {
    println!("  {}", newsroom::ui::style::dim(t!("cli.loading")));
    let outcome = settle(controller.load().await);
    if outcome.is_failure() {
        print_outcome(&outcome);
        return Some(exit_code(&outcome));
    }
    None
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<ExitCode> {
    match cli.command {
        Commands::Render { file, save_images } => render::run(file, save_images).await,

        Commands::Studio => studio::run(&connect(&config)?).await,

        Commands::Show => {
            let controller = connect(&config)?;
            if let Some(code) = load(&controller).await {
                return Ok(code);
            }
            print_state(&controller.snapshot());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Save {
            tone,
            max_lines,
            image,
            keywords,
        } => {
            let controller = connect(&config)?;
            if let Some(code) = load(&controller).await {
                return Ok(code);
            }

            if let Some(tone) = tone {
                controller.select_tone(tone);
                if tone != NO_TONE && controller.snapshot().store.selected_tone().is_none() {
                    warn!(tone, "newsletter.unknown_tone");
                    println!("  {}", t!("cli.unknown_tone", id = tone));
                }
            }
            if let Some(max_lines) = max_lines
                && let Err(err) = controller.set_max_lines(max_lines)
            {
                let outcome = rejection(&err);
                print_outcome(&outcome);
                return Ok(exit_code(&outcome));
            }
            if let Some(image) = image {
                controller.set_include_image(image);
            }
            if let Some(keywords) = keywords {
                controller.set_keywords(keywords);
            }

            let outcome = settle(controller.save().await);
            print_outcome(&outcome);
            Ok(exit_code(&outcome))
        }

        Commands::Test { keywords } => {
            let controller = connect(&config)?;
            if let Some(code) = load(&controller).await {
                return Ok(code);
            }
            if let Some(keywords) = keywords {
                controller.set_keywords(keywords);
            }

            let outcome = settle(controller.test().await);
            if outcome.is_success() {
                print_content(&controller.variables().verification);
            }
            print_outcome(&outcome);
            Ok(exit_code(&outcome))
        }

        Commands::Comment { text } => {
            let controller = connect(&config)?;
            if let Some(code) = load(&controller).await {
                return Ok(code);
            }
            controller.set_comment(text);

            let outcome = settle(controller.send_comment().await);
            if outcome.is_success() {
                print_content(&controller.variables().verification);
            }
            print_outcome(&outcome);
            Ok(exit_code(&outcome))
        }
    }
}
