//! Story command handler: walks the wizard from the first step to the result.

use anyhow::Result;
use dinostory_core::{DINOSAURS, StoryResult, StorySource, WizardStep, style_option};

use crate::bootstrap::CliContext;
use crate::commands::StoryArgs;
use crate::error::CliError;

/// Generate a story and print it, one paragraph per sentence.
pub async fn execute(ctx: &mut CliContext, args: &StoryArgs) -> Result<StoryResult> {
    let story = run_wizard(ctx, args).await?;
    print_story(ctx, &story);
    Ok(story)
}

/// Feed the three choices through the wizard and wait for the story.
pub async fn run_wizard(ctx: &mut CliContext, args: &StoryArgs) -> Result<StoryResult> {
    let wizard = &mut ctx.controller;

    if !DINOSAURS.contains(&args.dinosaur.as_str()) {
        tracing::warn!(target: "dinostory.story", dinosaur = %args.dinosaur, "Dinosaur is not in the catalog");
    }
    announce(wizard.progress().map(|p| p.label));
    wizard.select_dinosaur(&args.dinosaur);
    advance(wizard, WizardStep::Style, "dinosaur")?;

    announce(wizard.progress().map(|p| p.label));
    wizard.select_style(&args.style);
    if style_option(&args.style).is_none() {
        tracing::info!(target: "dinostory.story", style = %args.style, "Using a free-form style");
    }
    advance(wizard, WizardStep::Lesson, "style")?;

    announce(wizard.progress().map(|p| p.label));
    wizard.set_lesson(&args.lesson);
    let story = wizard.create_story().await.map_err(CliError::from)?;
    Ok(story)
}

fn advance(
    wizard: &mut dinostory_core::WizardController,
    expected: WizardStep,
    field: &str,
) -> Result<(), CliError> {
    wizard.go_next();
    if wizard.state().step() == expected {
        Ok(())
    } else {
        Err(CliError::Arguments(format!("{field} is required")))
    }
}

fn announce(label: Option<String>) {
    if let Some(label) = label {
        eprintln!("{label}");
    }
}

fn print_story(ctx: &CliContext, story: &StoryResult) {
    if story.source() == StorySource::Fallback {
        eprintln!("(the story endpoint was unavailable; showing a fallback story)");
    }
    println!();
    for paragraph in ctx.controller.state().paragraphs() {
        println!("{paragraph}");
        println!();
    }
}
