use crate::api::server as api_server;
use crate::cli::opts::*;
use crate::config::AppConfig;
use crate::timer;

use anyhow::{bail, Context, Result};
use autodidact_core::{
    due_on, filter_by_text, format_remaining, validate_project, FixedIntervalScheduler, Flashcard,
    Planner, ProjectStore, Transcript,
};
use autodidact_json::JsonStore;
use chrono::{Local, NaiveDate, Utc};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// What every subcommand needs: the resolved config, project and planner.
pub struct Ctx {
    pub config: AppConfig,
    pub project: String,
    pub planner: Planner,
}

pub async fn run_cli(args: Cli) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let project = args
        .project
        .clone()
        .unwrap_or_else(|| config.default_project.clone());
    validate_project(&project).with_context(|| format!("project {project:?}"))?;

    let data_dir = args.data_dir.clone().or_else(|| config.data_dir.clone());
    let store = open_store(data_dir, config.max_backups).await?;
    let scheduler = Arc::new(FixedIntervalScheduler::new(config.schedule.offsets.clone()));
    let ctx = Ctx {
        planner: Planner::new(store, scheduler),
        config,
        project,
    };

    match args.cmd {
        Command::Cards(cmd) => cards_cmd(&ctx, cmd).await,
        Command::Queue(cmd) => queue_cmd(&ctx, cmd).await,
        Command::Review(cmd) => review_cmd(&ctx, cmd).await,
        Command::Stats(cmd) => stats_cmd(&ctx, cmd).await,
        Command::Focus(cmd) => focus_cmd(&ctx, cmd).await,
        Command::Serve(cmd) => {
            let addr: std::net::SocketAddr = cmd
                .addr
                .as_deref()
                .unwrap_or(&ctx.config.server.addr)
                .parse()
                .context("bind address")?;
            api_server::run(ctx.planner, ctx.config, addr).await
        }
    }
}

pub async fn open_store(data_dir: Option<PathBuf>, max_backups: usize) -> Result<Arc<dyn ProjectStore>> {
    let s = match data_dir {
        Some(dir) => JsonStore::open_with(dir, max_backups).await?,
        None => JsonStore::open_default().await?,
    };
    tracing::debug!(root = %s.root().display(), "using data dir");
    Ok(Arc::new(s))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn cards_cmd(ctx: &Ctx, cmd: CardsCmd) -> Result<()> {
    let (p, project) = (&ctx.planner, ctx.project.as_str());
    match cmd {
        CardsCmd::Generate { input, transcript } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let cards = if transcript {
                let t: Transcript = serde_json::from_str(&text)
                    .with_context(|| format!("parsing transcript {}", input.display()))?;
                p.generate_from_transcript(project, &t).await?
            } else {
                p.generate_flashcards(project, &text).await?
            };
            println!("wrote {} flashcards to project {}", cards.len(), project);
        }
        CardsCmd::Import { path, csv } => {
            let cards = if csv {
                let mut rdr = csv::Reader::from_path(&path)?;
                rdr.deserialize::<Flashcard>().collect::<Result<Vec<_>, _>>()?
            } else {
                let data = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<Vec<Flashcard>>(&data)?
            };
            p.import_flashcards(project, &cards).await?;
            println!("imported {} flashcards", cards.len());
        }
        CardsCmd::List => {
            let cards = p.flashcards(project).await?;
            if cards.is_empty() {
                println!("no flashcards");
            }
            for (i, c) in cards.iter().enumerate() {
                println!("{}.\t{}\t{}", i + 1, c.question, c.answer);
            }
        }
        CardsCmd::Export { path } => {
            let cards = p.flashcards(project).await?;
            let mut wtr = csv::Writer::from_path(&path)?;
            for c in &cards {
                wtr.serialize(c)?;
            }
            wtr.flush()?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

async fn queue_cmd(ctx: &Ctx, cmd: QueueCmd) -> Result<()> {
    let (p, project) = (&ctx.planner, ctx.project.as_str());
    match cmd {
        QueueCmd::Build { start, rebuild } => {
            let start = start.unwrap_or_else(today);
            let queue = if rebuild {
                p.rebuild_queue(project, start).await?
            } else if p.store().has_queue(project).await? {
                println!("queue already exists for project {project} (use --rebuild to replace it)");
                return Ok(());
            } else {
                p.ensure_queue(project, start).await?
            };
            println!("queue has {} entries starting {}", queue.len(), start);
        }
        QueueCmd::Due { date, grep } => {
            let day = date.unwrap_or_else(today);
            let mut due = p.due(project, day).await?;
            if let Some(q) = grep {
                due = filter_by_text(&due, &q);
            }
            if due.is_empty() {
                println!("No cards due on {day}.");
            } else {
                println!("Cards due on {day}:");
                for (i, e) in due.iter().enumerate() {
                    println!("{}. {}", i + 1, e.question);
                }
            }
        }
        QueueCmd::Upcoming { days } => {
            let up = p.upcoming(project, today(), days).await?;
            if up.is_empty() {
                println!("nothing due in the next {days} day(s)");
            }
            for e in up {
                println!("{}\t{}", e.due_date, e.question);
            }
        }
        QueueCmd::Show => {
            for e in p.queue(project).await? {
                println!("{}\t{}\t{}", e.due_date, e.question, e.answer);
            }
        }
    }
    Ok(())
}

async fn review_cmd(ctx: &Ctx, cmd: ReviewCmd) -> Result<()> {
    let (p, project) = (&ctx.planner, ctx.project.as_str());
    let day = cmd.date.unwrap_or_else(today);

    // First review of a project builds its queue from the flashcards.
    let queue = p.ensure_queue(project, today()).await?;
    let due = due_on(&queue, day);
    if due.is_empty() {
        println!("No cards due on {day}.");
        return Ok(());
    }

    let total = due.len().min(cmd.max);
    let mut count = 0usize;
    for (i, entry) in due.into_iter().take(cmd.max).enumerate() {
        println!("\n[{}/{}]", i + 1, total);
        println!("Q: {}", entry.question);
        if read_line("[enter=show]")?.is_none() {
            break;
        }
        println!("A: {}", entry.answer);
        let correct = loop {
            let Some(line) = read_line("correct? [y/n, s=skip, q=quit] ")? else {
                return finish(count);
            };
            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => break Some(true),
                "n" | "no" => break Some(false),
                "s" | "skip" => break None,
                "q" | "quit" => return finish(count),
                _ => println!("enter y, n, s, or q"),
            }
        };
        if let Some(correct) = correct {
            p.record_review(project, &entry.question, correct, Utc::now()).await?;
            count += 1;
        }
    }
    finish(count)
}

fn finish(count: usize) -> Result<()> {
    println!("\nreviewed {count}");
    Ok(())
}

async fn stats_cmd(ctx: &Ctx, cmd: StatsCmd) -> Result<()> {
    let st = ctx
        .planner
        .stats(&ctx.project, cmd.today.unwrap_or_else(today))
        .await?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&st)?);
        return Ok(());
    }
    println!("project:  {}", st.project);
    println!(
        "reviews:  {} ({} correct, {} incorrect)",
        st.totals.total, st.totals.correct, st.totals.incorrect
    );
    println!("accuracy: {:.0}%", st.accuracy * 100.0);
    println!("streak:   {} day(s)", st.streak);
    for (day, t) in &st.per_day {
        println!("  {day}\t{}/{}", t.correct, t.total);
    }
    Ok(())
}

async fn focus_cmd(ctx: &Ctx, cmd: FocusCmd) -> Result<()> {
    match cmd {
        FocusCmd::Start { minutes, session_type } => {
            let lengths = &ctx.config.focus.lengths;
            if lengths.check(minutes).is_err() {
                bail!(
                    "invalid input: focus session length {minutes} (choose from {:?})",
                    lengths.allowed()
                );
            }
            let kind = session_type.unwrap_or_else(|| ctx.config.focus.session_type.clone());
            let cancel = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            let out = timer::run_focus_session(
                &**ctx.planner.store(),
                minutes,
                &kind,
                &ctx.project,
                |secs| {
                    print!("{}\r", format_remaining(secs));
                    stdout().flush().ok();
                },
                cancel,
            )
            .await?;
            match out {
                Some(_) => println!("Time's up! Session logged."),
                None => bail!("timer cancelled"),
            }
        }
        FocusCmd::Log => {
            let sessions = ctx.planner.store().list_focus_sessions().await?;
            if sessions.is_empty() {
                println!("no focus sessions");
            }
            for s in sessions {
                println!(
                    "{}\t{} min\t{}\t{}",
                    s.start.format("%Y-%m-%d %H:%M"),
                    s.session_length,
                    s.session_type,
                    s.project_id
                );
            }
        }
    }
    Ok(())
}

// ===== Helpers =====
/// `None` on end of input.
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    if stdin().read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s))
}
