//! Integration tests for the `tq` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A temp dir holding an empty config file, so a user's real config never leaks in.
fn empty_config() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "").unwrap();
    dir
}

fn tq(config: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tq").unwrap();
    cmd.env_remove("TQ_ENDPOINT")
        .env_remove("TQ_TOKEN")
        .env_remove("TQ_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config.path().join("config.toml"));
    cmd
}

async fn oracle_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/game-llm"))
        .and(body_partial_json(json!({"action": "select_secret_item"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "Apple"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/game-llm"))
        .and(body_partial_json(
            json!({"action": "evaluate_input", "userInput": "Is it a fruit?"}),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"type": "answer", "content": "Yes"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/game-llm"))
        .and(body_partial_json(
            json!({"action": "evaluate_input", "userInput": "Is it nice?"}),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"type": "clarification", "content": ""})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/game-llm"))
        .and(body_partial_json(
            json!({"action": "evaluate_input", "userInput": "apple"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"type": "guess_evaluation", "content": "Correct! You got it!", "isCorrect": true}),
        ))
        .mount(&server)
        .await;
    server
}

fn endpoint(server: &MockServer) -> String {
    format!("{}/game-llm", server.uri())
}

// -- help --

#[test]
fn help_lists_commands() {
    let config = empty_config();
    tq(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("pick"));
}

// -- pick --

#[tokio::test(flavor = "multi_thread")]
async fn pick_prints_item() {
    let server = oracle_server().await;
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", &endpoint(&server), "pick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apple"));
}

#[tokio::test(flavor = "multi_thread")]
async fn pick_reads_endpoint_from_config() {
    let server = oracle_server().await;
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("endpoint = \"{}\"\n", endpoint(&server)),
    )
    .unwrap();
    tq(&dir)
        .arg("pick")
        .assert()
        .success()
        .stdout(predicate::str::contains("apple"));
}

#[tokio::test(flavor = "multi_thread")]
async fn pick_reads_endpoint_from_env() {
    let server = oracle_server().await;
    let config = empty_config();
    tq(&config)
        .env("TQ_ENDPOINT", endpoint(&server))
        .arg("pick")
        .assert()
        .success()
        .stdout(predicate::str::contains("apple"));
}

#[tokio::test(flavor = "multi_thread")]
async fn pick_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "API key not configured"})),
        )
        .mount(&server)
        .await;
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", &endpoint(&server), "pick"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("oracle unavailable"))
        .stderr(predicate::str::contains("500"));
}

#[test]
fn pick_without_endpoint_fails() {
    let config = empty_config();
    tq(&config)
        .arg("pick")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no oracle endpoint configured"));
}

#[test]
fn invalid_endpoint_scheme_fails() {
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", "ftp://example.com/game-llm", "pick"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid oracle endpoint"));
}

#[test]
fn bad_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "max_questions = \"lots\"\n").unwrap();
    tq(&dir)
        .arg("pick")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// -- play --

#[tokio::test(flavor = "multi_thread")]
async fn play_to_a_win() {
    let server = oracle_server().await;
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", &endpoint(&server), "play"])
        .write_stdin("Is it a fruit?\nIs it nice?\napple\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have 20 questions"))
        .stdout(predicate::str::contains("Q1/20: Yes"))
        .stdout(predicate::str::contains("Could you be more specific?"))
        .stdout(predicate::str::contains("Q2/20: Correct! You got it!"))
        .stdout(predicate::str::contains("You got it in 2 questions!"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn play_respects_question_budget() {
    let server = oracle_server().await;
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", &endpoint(&server), "play", "-n", "1"])
        .write_stdin("Is it a fruit?\nIs it a fruit?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q1/1: Yes"))
        .stdout(predicate::str::contains("Out of questions!"))
        .stdout(predicate::str::contains("The answer was \"apple\""))
        .stdout(predicate::str::contains("No game in progress"));
}

#[tokio::test(flavor = "multi_thread")]
async fn play_give_up_and_export() {
    let server = oracle_server().await;
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", &endpoint(&server), "play"])
        .write_stdin("Is it a fruit?\ngive up\nexport text\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Better luck next time!"))
        .stdout(predicate::str::contains("Q1: Is it a fruit?"))
        .stdout(predicate::str::contains("I give up. What was the answer?"));
}

#[tokio::test(flavor = "multi_thread")]
async fn play_status_json() {
    let server = oracle_server().await;
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", &endpoint(&server), "play"])
        .write_stdin("Is it a fruit?\nstatus json\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"questionsUsed\": 1"))
        .stdout(predicate::str::contains("\"phase\": \"playing\""))
        .stdout(predicate::str::contains("\"secretItem\": null"))
        .stdout(predicate::str::contains("apple").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn play_export_word_in_a_guess_is_submitted() {
    let server = oracle_server().await;
    Mock::given(method("POST"))
        .and(path("/game-llm"))
        .and(body_partial_json(
            json!({"action": "evaluate_input", "userInput": "export crate?"}),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"type": "answer", "content": "No"})),
        )
        .mount(&server)
        .await;
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", &endpoint(&server), "play"])
        .write_stdin("export crate?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q1/20: No"));
}

#[test]
fn play_survives_unreachable_oracle() {
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", "http://127.0.0.1:1/game-llm", "--timeout", "1", "play"])
        .write_stdin("Is it red?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("could not start a game"))
        .stdout(predicate::str::contains("No game in progress"));
}

#[test]
fn play_rejects_zero_questions() {
    let config = empty_config();
    tq(&config)
        .args(["--endpoint", "http://127.0.0.1:1/game-llm", "play", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}
