use std::io::{self, BufRead, Write};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use tq_game::{Entry, EntryKind, Game, Phase, Transcript};
use tq_oracle::Oracle;

use crate::settings::Settings;

const HELP: &str = "\
Twenty Questions Commands:
  <question or guess>           Ask a yes/no question or guess the item
  new                           Start a new game
  give up                       Forfeit and reveal the answer
  reset                         Discard the current game
  history                       Show every turn so far
  status [json]                 Show the session state
  export [markdown|text]        Export the transcript
  help                          Show this help
  quit                          Exit

Clarifications are free; every other turn spends one question.";

const NO_GAME: &str = "No game in progress. Type 'new' to start one.";

/// One parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    New,
    GiveUp,
    Reset,
    History,
    Status { json: bool },
    Export(&'a str),
    Help,
    Quit,
    Submit(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match (cmd.as_str(), rest.to_lowercase().as_str()) {
        ("new", "") => Command::New,
        ("give", "up") | ("giveup", "") | ("forfeit", "") => Command::GiveUp,
        ("reset", "") => Command::Reset,
        ("history", "") => Command::History,
        ("status", "") => Command::Status { json: false },
        ("status", "json") => Command::Status { json: true },
        ("export", "" | "markdown" | "md" | "text" | "txt") => Command::Export(rest),
        ("help", "") => Command::Help,
        ("quit" | "q" | "exit", "") => Command::Quit,
        _ => Command::Submit(trimmed),
    }
}

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue(String),
    Quit,
}

/// Interactive front end over a [`Game`].
struct Repl<O> {
    game: Game<O>,
}

impl<O: Oracle> Repl<O> {
    fn new(game: Game<O>) -> Self {
        Self { game }
    }

    async fn handle(&mut self, input: &str) -> Result<Flow, String> {
        let output = match parse_command(input) {
            Command::New => self.start().await?,
            Command::GiveUp => self.give_up(),
            Command::Reset => {
                self.game.reset();
                "Game reset. Type 'new' to start a new game.".to_string()
            }
            Command::History => render_history(self.game.session().transcript()),
            Command::Status { json } => self.status(json)?,
            Command::Export(format) => export(self.game.session().transcript(), format),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Flow::Quit),
            Command::Submit(text) => self.submit(text).await?,
        };
        Ok(Flow::Continue(output))
    }

    async fn start(&mut self) -> Result<String, String> {
        match self.game.start_new_game().await {
            Ok(true) => Ok(format!(
                "I'm thinking of something. You have {} questions. Ask away!",
                self.game.session().max_questions()
            )),
            Ok(false) => Ok("A game is already in progress. Type 'give up' to end it.".to_string()),
            Err(e) => Err(format!("could not start a game: {e}")),
        }
    }

    async fn submit(&mut self, text: &str) -> Result<String, String> {
        match self.game.submit(text).await {
            Ok(Some(entry)) => Ok(self.render_turn(&entry)),
            Ok(None) => Ok(NO_GAME.to_string()),
            Err(e) => Err(format!("{e} (no question used, try again)")),
        }
    }

    fn give_up(&mut self) -> String {
        match self.game.give_up() {
            Some(entry) => format!(
                "{}\nType 'new' to play again.",
                entry.response_text.red()
            ),
            None => NO_GAME.to_string(),
        }
    }

    fn status(&self, json: bool) -> Result<String, String> {
        let session = self.game.session();
        if json {
            return serde_json::to_string_pretty(&session.public_view()).map_err(|e| e.to_string());
        }
        Ok(format!(
            "Phase: {}\nQuestions: {}/{}\nTranscript: {} entries",
            session.phase(),
            session.questions_used(),
            session.max_questions(),
            session.transcript().len()
        ))
    }

    fn render_turn(&self, entry: &Entry) -> String {
        let session = self.game.session();
        let mut out = match entry.question_number {
            None => format!("{} (free, no question used)", entry.response_text.cyan()),
            Some(n) => {
                let line = format!("Q{n}/{}: {}", session.max_questions(), entry.response_text);
                match entry.is_correct {
                    Some(true) => line.green().bold().to_string(),
                    Some(false) => line.yellow().to_string(),
                    None => line,
                }
            }
        };

        match session.phase() {
            Phase::Won => out.push_str(&format!(
                "\nYou got it in {} question{}! Type 'new' to play again.",
                session.questions_used(),
                if session.questions_used() == 1 { "" } else { "s" }
            )),
            Phase::Lost => out.push_str(&format!(
                "\n{} The answer was \"{}\". Type 'new' to play again.",
                "Out of questions!".red(),
                session.secret_item().unwrap_or_default()
            )),
            _ => {}
        }
        out
    }
}

fn render_history(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return "No turns yet.".to_string();
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Kind", "You", "Answer"]);
    for entry in transcript.entries() {
        let number = entry
            .question_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let kind = match (entry.kind, entry.is_correct) {
            (EntryKind::Guess, Some(true)) => "guess (correct)",
            (EntryKind::Guess, _) => "guess",
            (EntryKind::Question, _) if entry.is_clarification() => "clarification",
            (EntryKind::Question, _) => "question",
        };
        table.add_row(vec![
            number,
            kind.to_string(),
            entry.user_text.clone(),
            entry.response_text.clone(),
        ]);
    }
    table.to_string()
}

fn export(transcript: &Transcript, format: &str) -> String {
    match format.to_lowercase().as_str() {
        "text" | "txt" => transcript.export_text(),
        _ => transcript.export_markdown(),
    }
}

pub async fn run(settings: &Settings) -> Result<(), String> {
    let oracle = settings.oracle()?;
    let mut repl = Repl::new(Game::new(oracle, settings.game_config()));

    println!("  {} Twenty Questions", "Starting".bold());
    println!(
        "  Questions: {} | Timeout: {}s",
        settings.max_questions,
        settings.timeout.as_secs_f64()
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    match repl.handle("new").await {
        Ok(Flow::Continue(output)) => println!("{output}\n"),
        Ok(Flow::Quit) => return Ok(()),
        Err(e) => println!("{}\n", e.yellow()),
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match repl.handle(input).await {
            Ok(Flow::Continue(output)) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Ok(Flow::Quit) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    Ok(())
}
