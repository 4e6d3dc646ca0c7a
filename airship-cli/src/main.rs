mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use colored::{ColoredString, Colorize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use airship_game::{
    DecisionKind, DecisionView, EngineError, GameEngine, GameState, Story, best_airship,
    check_achievements, reachable_locations, skills, total_wealth,
};
use storage::{BundledLoader, FileStorage};

#[derive(Debug, Parser)]
#[command(name = "airship", version)]
#[command(about = "Airship Freedom - a branching crypto-nomad adventure in your terminal")]
struct Args {
    /// Save slot name
    #[arg(long, default_value = "autosave")]
    slot: String,

    /// Directory holding save files
    #[arg(long, default_value = ".airship-saves")]
    save_dir: PathBuf,

    /// Discard any existing save in the slot and start over
    #[arg(long)]
    new_game: bool,

    /// Print the slot's current state and exit
    #[arg(long)]
    status: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let engine = GameEngine::new(BundledLoader, FileStorage::new(&args.save_dir));
    let mut state = if args.new_game {
        engine
            .delete_save(&args.slot)
            .context("failed to clear the save slot")?;
        engine.create_game()?
    } else if let Some(saved) = engine.load_game(&args.slot)? {
        log::debug!("resuming slot '{}' at '{}'", args.slot, saved.current_story);
        println!("{}", format!("Resuming slot '{}'", args.slot).dimmed());
        saved
    } else {
        engine.create_game()?
    };

    if args.status {
        print_status(&state);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let story_id = state.current_story.clone();
        let Some(story) = current_story(&state) else {
            println!();
            println!(
                "{}",
                format!("✈️  '{story_id}' is still being written. Your journey ends here for now.")
                    .bright_cyan()
                    .bold()
            );
            break;
        };

        let views = state.available_decisions(&story_id)?;
        render_story(&story, &views);
        print!("{}", "Choose a number, s for status, q to quit: ".bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let input = line.trim();
        match input {
            "" => continue,
            "q" | "quit" => break,
            "s" | "status" => {
                print_status(&state);
                continue;
            }
            _ => {}
        }

        let Ok(pick) = input.parse::<usize>() else {
            println!("{}", format!("'{input}' is not a choice here.").red());
            continue;
        };
        let Some(view) = pick.checked_sub(1).and_then(|index| views.get(index)) else {
            println!("{}", format!("There is no option {pick}.").red());
            continue;
        };

        match state.apply_decision(&story_id, &view.decision.id) {
            Ok(outcome) => {
                report_outcome(&mut state, &outcome.unlocked_skills, outcome.loss.as_ref());
                engine
                    .save_game(&args.slot, &state)
                    .context("autosave failed")?;
                log::debug!("autosaved slot '{}' at '{}'", args.slot, state.current_story);
            }
            Err(EngineError::RequirementNotMet { .. }) => {
                println!("{}", "You can't afford that option right now.".yellow());
            }
            Err(err) => return Err(err.into()),
        }
    }

    engine
        .save_game(&args.slot, &state)
        .context("failed to save on exit")?;
    println!("{}", format!("Saved to slot '{}'.", args.slot).dimmed());
    Ok(())
}

fn current_story(state: &GameState) -> Option<Story> {
    state
        .data
        .as_ref()
        .and_then(|data| data.get(&state.current_story))
        .cloned()
}

fn kind_marker(kind: DecisionKind) -> ColoredString {
    let label = kind.as_str();
    match kind {
        DecisionKind::Safe => label.green(),
        DecisionKind::Risky => label.yellow(),
        DecisionKind::Neutral => label.normal(),
        DecisionKind::Negative => label.red(),
    }
}

fn render_story(story: &Story, views: &[DecisionView]) {
    println!();
    println!("{}", story.title.bright_cyan().bold());
    println!("{}", "=".repeat(40).cyan());
    println!("{}", story.text);
    println!();
    for (index, view) in views.iter().enumerate() {
        let label = format!("[{}]", index + 1);
        let marker = kind_marker(view.decision.kind);
        if view.selectable {
            println!("  {} {} ({marker})", label.bold(), view.decision.title);
            println!("      {}", view.decision.description.dimmed());
        } else {
            println!(
                "  {} {} {}",
                label.dimmed(),
                view.decision.title.dimmed(),
                "(requirements not met)".red()
            );
        }
    }
    println!();
}

/// Print notifications for a just-applied decision and sweep achievements.
fn report_outcome(state: &mut GameState, unlocked_skills: &[String], loss: Option<&airship_game::LossEvent>) {
    for skill_id in unlocked_skills {
        match skills::describe(skill_id) {
            Some(skill) => {
                println!("{} {}", "Skill unlocked:".green().bold(), skill.title);
                println!("      {}", skill.blurb.dimmed());
            }
            None => println!("{} {skill_id}", "Skill unlocked:".green().bold()),
        }
    }

    if let Some(loss) = loss {
        println!(
            "{}",
            format!("⚠️  Lost {:.4} BTC in this chapter.", loss.amount).red()
        );
    }

    let fresh = check_achievements(&state.ledger, &state.achievements);
    for achievement in fresh {
        state.achievements.insert(achievement.id.to_string());
        println!(
            "{} {} - {}",
            "Achievement:".bright_yellow().bold(),
            achievement.title,
            achievement.description
        );
    }
}

fn print_status(state: &GameState) {
    println!();
    println!("{}", "📊 Expedition Status".bright_cyan().bold());
    println!("{}", "====================".cyan());
    for (key, value) in state.ledger.iter() {
        println!("  {key}: {value}");
    }

    let wealth = total_wealth(&state.ledger);
    let airship = best_airship(wealth);
    println!("  total wealth: ${wealth:.2}");
    println!("  airship: {} {}", airship.icon, airship.name);

    let reachable: Vec<_> = reachable_locations(&state.ledger)
        .iter()
        .map(|location| location.name)
        .collect();
    println!("  reachable bases: {}", reachable.join(", "));

    if !state.unlocked_skills.is_empty() {
        let titles: Vec<_> = state
            .unlocked_skills
            .iter()
            .map(|id| skills::describe(id).map_or(id.as_str(), |skill| skill.title))
            .collect();
        println!("  skills: {}", titles.join(", "));
    }
    if !state.achievements.is_empty() {
        println!(
            "  achievements: {}",
            state
                .achievements
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !state.loss_events.is_empty() {
        println!(
            "  {}",
            format!("losses on record: {}", state.loss_events.len()).red()
        );
    }
    println!();
}
