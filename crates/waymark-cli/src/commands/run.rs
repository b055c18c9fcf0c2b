//! Interactive section capture.
//!
//! Walks the user through each section's questions, then runs the
//! save-then-advance protocol and continues with the next section until the
//! flow is complete or the user quits.

use std::io::{self, BufRead, Write};

use waymark_core::{
    Catalog, Config, Database, Event, InspirationSource, Question, QuestionKind,
    RandomInspiration, Router, SectionId, SectionRunner, WizardTiming,
};

/// Records where the engine advanced to.
#[derive(Default)]
struct CliRouter {
    next: Option<Option<SectionId>>,
}

impl Router for CliRouter {
    fn advance_to(&mut self, next: Option<SectionId>) {
        self.next = Some(next);
    }
}

pub fn run(section: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    let user_id = config.ensure_user_id()?;
    let catalog = Catalog::builtin();

    let start = match &section {
        Some(id) => catalog
            .by_id(id)
            .ok_or_else(|| format!("unknown section: {id}"))?
            .id
            .clone(),
        None => catalog
            .first()
            .expect("builtin catalog is not empty")
            .id
            .clone(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive(&catalog, start, config.wizard, user_id))
}

async fn drive(
    catalog: &Catalog,
    start: SectionId,
    timing: WizardTiming,
    user_id: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut inspiration = RandomInspiration;
    let mut current = Some(start);

    while let Some(section_id) = current {
        let section = catalog
            .by_id(&section_id)
            .ok_or_else(|| format!("unknown section: {section_id}"))?
            .clone();
        let next = catalog.next_after(&section_id);
        let store = Database::open()?;

        let (mut runner, entered) = SectionRunner::enter(
            section.clone(),
            next,
            timing,
            store,
            CliRouter::default(),
            Some(user_id.clone()),
        );

        println!();
        println!(
            "=== {} ({}/{}) ===",
            section.title,
            section.index + 1,
            catalog.len()
        );
        println!("{}", section.intro);
        if let Event::LoadDegraded { reason, .. } = &entered {
            println!("(could not load saved answers: {reason}; starting fresh)");
        }

        for question in &section.questions {
            prompt_question(&mut runner, question, &mut lines, &mut inspiration)?;
        }

        loop {
            let events = runner.submit().await?;
            if let Some(Event::SaveFailed { reason, .. }) = events.last() {
                println!("save failed: {reason}");
                if !ask_yes_no("retry?", &mut lines)? {
                    return Ok(());
                }
                continue;
            }
            for event in &events {
                match event {
                    Event::SaveAcknowledged { .. } => println!("saved."),
                    Event::Advanced { next: Some(next), .. } => {
                        println!("moving on to '{next}'...")
                    }
                    Event::Advanced { next: None, .. } => {
                        println!("all sections complete. nice work!")
                    }
                    _ => {}
                }
            }
            break;
        }

        current = runner.router().next.clone().flatten();
    }

    Ok(())
}

fn prompt_question<S, R>(
    runner: &mut SectionRunner<S, R>,
    question: &Question,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    inspiration: &mut dyn InspirationSource,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: waymark_core::SectionStore,
    R: Router,
{
    println!();
    println!("-- {}", question.label);
    if let Some(hint) = &question.hint {
        println!("   {hint}");
    }

    match question.kind {
        QuestionKind::FreeText { .. } => prompt_free_text(runner, question, lines, inspiration),
        QuestionKind::SingleSelect => prompt_single_select(runner, question, lines),
        QuestionKind::MultiSelect { .. } => prompt_multi_select(runner, question, lines),
        QuestionKind::Scale { min, max, default } => {
            prompt_scale(runner, question, lines, min, max, default)
        }
    }
}

fn prompt_free_text<S, R>(
    runner: &mut SectionRunner<S, R>,
    question: &Question,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    inspiration: &mut dyn InspirationSource,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: waymark_core::SectionStore,
    R: Router,
{
    if !question.inspiration.is_empty() {
        println!("   (enter '?' for an example)");
    }
    loop {
        let line = read_line("> ", lines)?;
        if line.trim() == "?" && !question.inspiration.is_empty() {
            if let Some(Event::InspirationShown { text, .. }) =
                runner.engine_mut().inspire(&question.id, inspiration)
            {
                println!("   e.g. {text}");
            }
            continue;
        }
        runner.engine_mut().set_text(&question.id, &line);
        let verdict = runner
            .engine()
            .completion_of(&question.id)
            .expect("question is in section");
        println!("   {}", verdict.detail);
        if verdict.complete {
            return Ok(());
        }
    }
}

fn prompt_single_select<S, R>(
    runner: &mut SectionRunner<S, R>,
    question: &Question,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: waymark_core::SectionStore,
    R: Router,
{
    for (i, option) in question.options.iter().enumerate() {
        println!("   {}) {option}", i + 1);
    }
    if question.allow_custom {
        println!("   0) other...");
    }
    loop {
        let line = read_line("pick one > ", lines)?;
        match line.trim().parse::<usize>() {
            Ok(0) if question.allow_custom => {
                runner.engine_mut().open_custom(&question.id);
                let text = read_line("your answer > ", lines)?;
                if runner
                    .engine_mut()
                    .confirm_custom(&question.id, &text)
                    .is_none()
                {
                    runner.engine_mut().close_custom(&question.id);
                    println!("   nothing entered");
                    continue;
                }
            }
            Ok(n) if (1..=question.options.len()).contains(&n) => {
                runner
                    .engine_mut()
                    .toggle(&question.id, &question.options[n - 1]);
            }
            _ => {
                println!("   enter a number between 1 and {}", question.options.len());
                continue;
            }
        }
        if runner
            .engine()
            .completion_of(&question.id)
            .is_some_and(|v| v.complete)
        {
            return Ok(());
        }
    }
}

fn prompt_multi_select<S, R>(
    runner: &mut SectionRunner<S, R>,
    question: &Question,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: waymark_core::SectionStore,
    R: Router,
{
    for (i, option) in question.options.iter().enumerate() {
        println!("   {}) {option}", i + 1);
    }
    if question.allow_custom {
        println!("   o <text>  add your own");
    }
    println!("   (numbers toggle; empty line finishes)");
    loop {
        let slots = runner
            .engine()
            .slots_remaining(&question.id)
            .unwrap_or_default();
        let line = read_line(&format!("toggle ({slots} slots left) > "), lines)?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            let verdict = runner
                .engine()
                .completion_of(&question.id)
                .expect("question is in section");
            if verdict.complete {
                println!("   {}", verdict.detail);
                return Ok(());
            }
            println!("   {}", verdict.detail);
            continue;
        }

        if let Some(text) = trimmed.strip_prefix("o ") {
            if question.allow_custom {
                runner.engine_mut().open_custom(&question.id);
                if runner
                    .engine_mut()
                    .confirm_custom(&question.id, text)
                    .is_none()
                {
                    runner.engine_mut().close_custom(&question.id);
                    println!("   not added (duplicate, empty, or no slots left)");
                }
            }
            continue;
        }

        match trimmed.parse::<usize>() {
            Ok(n) if (1..=question.options.len()).contains(&n) => {
                if runner
                    .engine_mut()
                    .toggle(&question.id, &question.options[n - 1])
                    .is_none()
                {
                    println!("   no slots left");
                }
            }
            _ => println!("   enter a number between 1 and {}", question.options.len()),
        }
    }
}

fn prompt_scale<S, R>(
    runner: &mut SectionRunner<S, R>,
    question: &Question,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    min: i64,
    max: i64,
    default: i64,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: waymark_core::SectionStore,
    R: Router,
{
    loop {
        let line = read_line(&format!("{min}..{max} [default {default}] > "), lines)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            runner.engine_mut().set_scale(&question.id, default);
            return Ok(());
        }
        match trimmed.parse::<i64>() {
            Ok(value) => {
                runner.engine_mut().set_scale(&question.id, value);
                return Ok(());
            }
            Err(_) => println!("   enter a whole number"),
        }
    }
}

fn ask_yes_no(
    prompt: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let line = read_line(&format!("{prompt} [y/N] "), lines)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn read_line(
    prompt: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<String, Box<dyn std::error::Error>> {
    print!("{prompt}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err("input closed".into()),
    }
}
