//! Line-oriented front end: topic list, question, feedback and score screens.

use std::error::Error;
use std::io::Write;

use quiz_core::QuizSession;
use quiz_core::model::{ScoreBand, TopicList};
use services::{CatalogOrigin, CatalogService, Intent, SessionStarter, SessionView, apply_intent};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// `None` once stdin is closed.
    async fn prompt(&mut self, label: &str) -> std::io::Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;
        self.lines.next_line().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuCommand {
    Pick(usize),
    Reload,
    SetSource(String),
    Quit,
    Unknown,
}

fn parse_menu(line: &str) -> MenuCommand {
    let line = line.trim();
    match line {
        "q" | "quit" => return MenuCommand::Quit,
        "r" | "reload" => return MenuCommand::Reload,
        _ => {}
    }
    if let Some(url) = line.strip_prefix("s ") {
        return MenuCommand::SetSource(url.trim().to_string());
    }
    line.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .map_or(MenuCommand::Unknown, MenuCommand::Pick)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerInput {
    Choice(Option<usize>),
    Leave,
    Invalid,
}

fn parse_answer(line: &str, answer_count: usize) -> AnswerInput {
    let line = line.trim();
    if line.is_empty() {
        return AnswerInput::Choice(None);
    }
    if line == "q" {
        return AnswerInput::Leave;
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=answer_count).contains(&n) => AnswerInput::Choice(Some(n - 1)),
        _ => AnswerInput::Invalid,
    }
}

fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Perfect => "Perfect!",
        ScoreBand::Excellent => "Almost!",
        ScoreBand::Good => "Good job.",
        ScoreBand::Fair => "Not bad.",
        ScoreBand::NeedsWork => "Keep practicing.",
    }
}

async fn reload(catalog: &CatalogService, topics: &mut TopicList) {
    match catalog.refresh(topics).await {
        Ok(CatalogOrigin::Network) => {}
        Ok(CatalogOrigin::Cache { saved_at }) => {
            println!("Offline: showing the quiz saved at {saved_at}.");
        }
        Err(err) => {
            warn!(error = %err, "catalog refresh failed");
            println!("Could not load quiz ({err}).");
            if !topics.is_empty() {
                println!("Keeping the previous list.");
            }
        }
    }
}

fn print_topics(topics: &TopicList) {
    println!();
    if topics.is_empty() {
        println!("No quizzes loaded.");
        return;
    }
    for (i, topic) in topics.topics().iter().enumerate() {
        println!("{:>2}. {} ({} questions)", i + 1, topic.title(), topic.question_count());
        if !topic.description().is_empty() {
            println!("    {}", topic.description());
        }
    }
}

/// Run the topic menu until the user quits or stdin closes.
pub async fn run(catalog: &CatalogService, starter: SessionStarter) -> Result<(), Box<dyn Error>> {
    let mut input = Input::new();
    let mut topics = TopicList::default();
    println!("iQuiz: loading from {}", catalog.source_url().await?);
    reload(catalog, &mut topics).await;

    loop {
        print_topics(&topics);
        let Some(line) = input
            .prompt("\nTopic number, r = reload, s <url> = change source, q = quit> ")
            .await?
        else {
            return Ok(());
        };

        match parse_menu(&line) {
            MenuCommand::Quit => return Ok(()),
            MenuCommand::Reload => reload(catalog, &mut topics).await,
            MenuCommand::SetSource(raw) => match catalog.set_source_url(&raw).await {
                Ok(url) => {
                    println!("Source set to {url}.");
                    reload(catalog, &mut topics).await;
                }
                Err(err) => println!("{err}"),
            },
            MenuCommand::Pick(index) => match topics.topics().get(index) {
                Some(topic) => {
                    let mut session = starter.start(topic);
                    play(&mut session, &mut input).await?;
                }
                None => println!("No quiz number {}.", index + 1),
            },
            MenuCommand::Unknown => println!("Unrecognised choice."),
        }
    }
}

async fn play(session: &mut QuizSession, input: &mut Input) -> Result<(), Box<dyn Error>> {
    println!("\n== {} ==", session.topic().title());
    let mut view = SessionView::from_session(session)?;

    loop {
        let intent = match &view {
            SessionView::Question {
                prompt,
                answers,
                progress,
            } => {
                println!("\nQuestion {} of {}: {prompt}", progress.position, progress.total);
                for (i, answer) in answers.iter().enumerate() {
                    println!("  {}) {answer}", i + 1);
                }
                let Some(line) = input.prompt("Answer number, q = leave> ").await? else {
                    return Ok(());
                };
                match parse_answer(&line, answers.len()) {
                    AnswerInput::Leave => return Ok(()),
                    AnswerInput::Invalid => {
                        println!("No such answer.");
                        continue;
                    }
                    AnswerInput::Choice(None) => {
                        println!("Pick an answer first.");
                        Intent::Submit(None)
                    }
                    AnswerInput::Choice(selected) => Intent::Submit(selected),
                }
            }
            SessionView::Feedback {
                answers,
                correct_index,
                correct,
                progress,
                ..
            } => {
                if *correct {
                    println!("Correct!");
                } else {
                    let right = answers.get(*correct_index).map_or("", String::as_str);
                    println!("Wrong. The answer was: {right}");
                }
                println!("Score so far: {} of {}", progress.score, progress.answered);
                let Some(line) = input.prompt("Enter = next, q = leave> ").await? else {
                    return Ok(());
                };
                if line.trim() == "q" {
                    return Ok(());
                }
                Intent::Next
            }
            SessionView::Finished { summary } => {
                println!(
                    "\nYou scored {} of {}. {}",
                    summary.score,
                    summary.total,
                    band_label(summary.band)
                );
                return Ok(());
            }
        };

        view = apply_intent(session, intent)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_commands() {
        assert_eq!(parse_menu("2"), MenuCommand::Pick(1));
        assert_eq!(parse_menu(" q "), MenuCommand::Quit);
        assert_eq!(parse_menu("r"), MenuCommand::Reload);
        assert_eq!(
            parse_menu("s https://x.example/q.json"),
            MenuCommand::SetSource("https://x.example/q.json".into())
        );
        assert_eq!(parse_menu("0"), MenuCommand::Unknown);
        assert_eq!(parse_menu("maths"), MenuCommand::Unknown);
    }

    #[test]
    fn answer_input() {
        assert_eq!(parse_answer("", 3), AnswerInput::Choice(None));
        assert_eq!(parse_answer("1", 3), AnswerInput::Choice(Some(0)));
        assert_eq!(parse_answer("3", 3), AnswerInput::Choice(Some(2)));
        assert_eq!(parse_answer("4", 3), AnswerInput::Invalid);
        assert_eq!(parse_answer("0", 3), AnswerInput::Invalid);
        assert_eq!(parse_answer("q", 3), AnswerInput::Leave);
    }

    #[test]
    fn every_band_has_a_label() {
        for band in [
            ScoreBand::Perfect,
            ScoreBand::Excellent,
            ScoreBand::Good,
            ScoreBand::Fair,
            ScoreBand::NeedsWork,
        ] {
            assert!(!band_label(band).is_empty());
        }
    }
}
