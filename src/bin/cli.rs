// Interview Server CLI Validation Tool
// Exercises the interview rooms and REST API of a running server

use clap::{Parser, Subcommand};
use colored::*;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::time::{sleep, timeout, Duration, Instant};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Parser)]
#[command(name = "interview-cli")]
#[command(about = "Interview Server CLI Validation Tool", long_about = None)]
struct Cli {
    /// Server address (default: 127.0.0.1:5000)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    server: String,

    /// Token presented on socket connect and as the REST bearer token
    #[arg(short, long, default_value = "cli-validator")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health endpoint
    Health,

    /// Show active interview statistics
    Stats,

    /// Test WebSocket connection
    Connect,

    /// Join an interview room and print its events
    Join {
        /// Interview ID to join
        #[arg(short, long)]
        interview_id: String,

        /// Display name (optional)
        #[arg(short, long)]
        username: Option<String>,

        /// Keep connection alive (press Ctrl+C to exit)
        #[arg(short, long)]
        keep_alive: bool,
    },

    /// Send one chat message to an interview room
    Chat {
        #[arg(short, long)]
        interview_id: String,

        #[arg(short, long)]
        message: String,

        #[arg(short, long, default_value = "cli")]
        username: String,
    },

    /// Run a source file through the code runner
    Run {
        /// cpp, python or javascript
        #[arg(short, long)]
        language: String,

        /// Source file to submit
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Generate a question (needs a valid JWT as --token)
    Generate {
        #[arg(short, long)]
        topic: String,

        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Run automated validation scenarios
    Validate {
        /// Run all validation tests
        #[arg(short, long)]
        all: bool,

        /// Test specific scenario
        #[arg(short, long)]
        scenario: Option<String>,
    },

    /// Interactive mode - send custom frames
    Interactive,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Health => {
            check_health(&cli.server).await;
        }
        Commands::Stats => {
            show_stats(&cli.server).await;
        }
        Commands::Connect => {
            test_connection(&cli.server, &cli.token).await;
        }
        Commands::Join {
            interview_id,
            username,
            keep_alive,
        } => {
            join_interview(&cli.server, &cli.token, interview_id, username.as_deref(), *keep_alive).await;
        }
        Commands::Chat {
            interview_id,
            message,
            username,
        } => {
            send_chat(&cli.server, &cli.token, interview_id, username, message).await;
        }
        Commands::Run { language, file } => {
            run_file(&cli.server, language, file).await;
        }
        Commands::Generate { topic, difficulty } => {
            generate_question(&cli.server, &cli.token, topic, difficulty.as_deref()).await;
        }
        Commands::Validate { all, scenario } => {
            if *all {
                run_all_validations(&cli.server, &cli.token).await;
            } else if let Some(s) = scenario {
                run_scenario(&cli.server, &cli.token, s).await;
            } else {
                println!("{}", "Use --all or --scenario <name>".yellow());
                list_scenarios();
            }
        }
        Commands::Interactive => {
            interactive_mode(&cli.server, &cli.token).await;
        }
    }
}

fn socket_url(server: &str, token: Option<&str>) -> String {
    match token {
        Some(token) => format!("ws://{}/socket?token={}", server, token),
        None => format!("ws://{}/socket", server),
    }
}

async fn connect(server: &str, token: Option<&str>) -> Option<WsStream> {
    match connect_async(socket_url(server, token)).await {
        Ok((ws_stream, _)) => Some(ws_stream),
        Err(e) => {
            println!("{} WebSocket connection failed: {}", "✗".red(), e);
            None
        }
    }
}

async fn send_event(ws: &mut WsStream, event: &str, data: Value) -> bool {
    let frame = json!({ "event": event, "data": data });
    if ws.send(Message::Text(frame.to_string())).await.is_err() {
        println!("{} Failed to send {}", "✗".red(), event);
        return false;
    }
    true
}

/// Reads frames until one named `event` arrives or the time runs out
async fn wait_for_event(ws: &mut WsStream, event: &str, secs: u64) -> Option<Value> {
    let deadline = Instant::now() + Duration::from_secs(secs);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match timeout(remaining, ws.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => {
                if let Ok(frame) = serde_json::from_str::<Value>(&text) {
                    if frame["event"] == event {
                        return Some(frame);
                    }
                }
            }
            Ok(Some(Ok(Message::Close(_)))) | Ok(None) => {
                println!("{} Connection closed by server", "✗".red());
                return None;
            }
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(e))) => {
                println!("{} Error receiving message: {}", "✗".red(), e);
                return None;
            }
            Err(_) => {
                println!("{} Timeout waiting for {}", "✗".red(), event);
                return None;
            }
        }
    }
}

/// True when no text frame arrives within the window
async fn stays_silent(ws: &mut WsStream, millis: u64) -> bool {
    let deadline = Instant::now() + Duration::from_millis(millis);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match timeout(remaining, ws.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => {
                println!("  {} Unexpected frame: {}", "✗".yellow(), text);
                return false;
            }
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(_))) | Ok(None) | Err(_) => return true,
        }
    }
}

async fn join(ws: &mut WsStream, interview_id: &str, username: &str) -> Option<Value> {
    let data = json!({ "interviewId": interview_id, "username": username });
    if !send_event(ws, "join-interview", data).await {
        return None;
    }
    wait_for_event(ws, "interview-joined", 3).await
}

async fn check_health(server: &str) {
    println!("{}", "Checking server health...".cyan());

    let url = format!("http://{}/health", server);
    let client = reqwest::Client::new();

    match client.get(&url).send().await {
        Ok(resp) => {
            let status = resp.status();
            if status.is_success() {
                println!("{} Health check passed", "✓".green());

                if let Ok(body) = resp.json::<Value>().await {
                    println!("  Status: {}", body["status"].as_str().unwrap_or("unknown"));
                    println!("  Timestamp: {}", body["timestamp"].as_str().unwrap_or("unknown"));
                }
            } else {
                println!("{} Health check failed: {}", "✗".red(), status);
            }
        }
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
            println!("  Make sure the server is running on {}", server);
        }
    }
}

async fn show_stats(server: &str) {
    println!("{}", "Fetching interview statistics...".cyan());

    let url = format!("http://{}/api/interviews/stats", server);
    let client = reqwest::Client::new();

    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => {
            if let Ok(body) = resp.json::<Value>().await {
                println!("  Active interviews: {}", body["activeInterviews"].to_string().green());
                println!("  Participants: {}", body["participants"].to_string().green());
            }
        }
        Ok(resp) => {
            println!("{} Stats fetch failed: {}", "✗".red(), resp.status());
        }
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
        }
    }
}

async fn test_connection(server: &str, token: &str) {
    println!("{}", "Testing WebSocket connection...".cyan());

    if let Some(ws_stream) = connect(server, Some(token)).await {
        println!("{} WebSocket connection established", "✓".green());
        println!("  URL: {}", socket_url(server, None));
        drop(ws_stream);
        println!("{} Connection closed cleanly", "✓".green());
    }
}

async fn join_interview(
    server: &str,
    token: &str,
    interview_id: &str,
    username: Option<&str>,
    keep_alive: bool,
) {
    println!("{}", "Joining interview...".cyan());
    println!("  Interview ID: {}", interview_id);

    let mut ws = match connect(server, Some(token)).await {
        Some(ws) => ws,
        None => return,
    };

    let username = username.unwrap_or("Anonymous");
    match join(&mut ws, interview_id, username).await {
        Some(ack) => {
            println!("{} {}", "✓".green(), ack["data"]["message"].as_str().unwrap_or("joined"));
            println!("\n{}", "═".repeat(50).green());
            println!(
                "{} {}",
                "Participants:".bold(),
                ack["data"]["participantCount"].to_string().green().bold()
            );
            println!("{}", "═".repeat(50).green());
        }
        None => {
            println!("{} Failed to join interview", "✗".red());
            return;
        }
    }

    if !keep_alive {
        return;
    }

    println!("\n{}", "Listening for room events (Ctrl+C to exit)...".yellow());
    loop {
        tokio::select! {
            frame = ws.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    println!("{} {}", "◀".green(), text.bright_white());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    println!("{} Connection error: {}", "✗".red(), e);
                    break;
                }
                None => {
                    println!("{} Connection closed by server", "✗".red());
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!("\nLeaving interview...");
                break;
            }
        }
    }
}

async fn send_chat(server: &str, token: &str, interview_id: &str, username: &str, message: &str) {
    let mut ws = match connect(server, Some(token)).await {
        Some(ws) => ws,
        None => return,
    };

    if join(&mut ws, interview_id, username).await.is_none() {
        println!("{} Failed to join interview", "✗".red());
        return;
    }

    let data = json!({ "interviewId": interview_id, "user": username, "message": message });
    if send_event(&mut ws, "interview-message", data).await {
        println!("{} Message sent to {}", "✓".green(), interview_id);
    }

    // Give the server a moment to relay before the socket drops
    sleep(Duration::from_millis(200)).await;
}

async fn run_file(server: &str, language: &str, file: &Path) {
    let code = match tokio::fs::read_to_string(file).await {
        Ok(code) => code,
        Err(e) => {
            println!("{} Cannot read {}: {}", "✗".red(), file.display(), e);
            return;
        }
    };

    println!("{} {} ({})", "Running".cyan(), file.display(), language);

    let url = format!("http://{}/api/code/run", server);
    let client = reqwest::Client::new();

    match client
        .post(&url)
        .json(&json!({ "language": language, "code": code }))
        .send()
        .await
    {
        Ok(resp) => {
            let status = resp.status();
            let body = resp.json::<Value>().await.unwrap_or_default();
            if status.is_success() {
                println!("{}", "─".repeat(60));
                println!("{}", body["output"].as_str().unwrap_or(""));
                println!("{}", "─".repeat(60));
            } else {
                println!("{} Run rejected ({}): {}", "✗".red(), status, body["message"]);
            }
        }
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
        }
    }
}

async fn generate_question(server: &str, token: &str, topic: &str, difficulty: Option<&str>) {
    println!("{}", "Generating question...".cyan());

    let url = format!("http://{}/api/questions/generate", server);
    let client = reqwest::Client::new();

    match client
        .post(&url)
        .bearer_auth(token)
        .json(&json!({ "topic": topic, "difficulty": difficulty }))
        .send()
        .await
    {
        Ok(resp) => {
            let status = resp.status();
            let body = resp.json::<Value>().await.unwrap_or_default();
            if status.is_success() {
                println!("{} {}", "✓".green(), body["title"].as_str().unwrap_or("untitled").bold());
                println!("  Id: {}", body["id"]);
                println!("  Difficulty: {}", body["difficulty"]);
                println!("\n{}", body["description"].as_str().unwrap_or(""));
            } else {
                println!("{} Generation failed ({}): {}", "✗".red(), status, body);
            }
        }
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
        }
    }
}

const SCENARIOS: &[(&str, &str)] = &[
    ("health", "Health endpoint responds OK"),
    ("connection", "Basic WebSocket connection test"),
    ("no-token", "Connection without token is rejected"),
    ("join", "Single participant join flow"),
    ("two-party", "Second participant joins and leaves"),
    ("message-relay", "Chat message reaches the other participant only"),
    ("code-relay", "Code change reaches the other participant"),
    ("isolation", "Rooms do not see each other's traffic"),
    ("code-run", "Python snippet through the code runner"),
];

fn list_scenarios() {
    println!("\n{}", "Available Validation Scenarios:".bold());
    for (name, description) in SCENARIOS {
        println!("  {} - {}", name.cyan(), description);
    }
    println!("\nExample: interview-cli validate --scenario two-party");
}

async fn dispatch_scenario(server: &str, token: &str, scenario: &str) -> Option<bool> {
    let result = match scenario {
        "health" => validate_health(server).await,
        "connection" => validate_connection(server, token).await,
        "no-token" => validate_no_token(server).await,
        "join" => validate_join(server, token).await,
        "two-party" => validate_two_party(server, token).await,
        "message-relay" => validate_message_relay(server, token).await,
        "code-relay" => validate_code_relay(server, token).await,
        "isolation" => validate_isolation(server, token).await,
        "code-run" => validate_code_run(server).await,
        _ => return None,
    };
    Some(result)
}

async fn run_scenario(server: &str, token: &str, scenario: &str) {
    println!("\n{} {}", "Running scenario:".bold(), scenario.cyan());
    println!("{}", "─".repeat(60));

    match dispatch_scenario(server, token, scenario).await {
        Some(true) => println!("\n{} Scenario passed", "✓".green().bold()),
        Some(false) => println!("\n{} Scenario failed", "✗".red().bold()),
        None => {
            println!("{} Unknown scenario: {}", "✗".red(), scenario);
            list_scenarios();
        }
    }
}

async fn run_all_validations(server: &str, token: &str) {
    println!("\n{}", "Running All Validation Tests".bold().green());
    println!("{}\n", "═".repeat(60).green());

    let mut passed = 0;
    let mut failed = 0;

    for (scenario, _) in SCENARIOS {
        println!("\n{} Testing: {}", "▶".cyan(), scenario.bold());
        println!("{}", "─".repeat(60));

        if dispatch_scenario(server, token, scenario).await == Some(true) {
            passed += 1;
        } else {
            failed += 1;
        }

        sleep(Duration::from_millis(300)).await;
    }

    println!("\n{}", "═".repeat(60).green());
    println!("{}", "Validation Summary".bold());
    println!("{}", "═".repeat(60).green());
    println!("  {} Passed: {}", "✓".green(), passed.to_string().green());
    println!("  {} Failed: {}", "✗".red(), failed.to_string().red());
    println!("  Total: {}", passed + failed);

    if failed == 0 {
        println!("\n{}", "All validations passed! 🎉".green().bold());
    } else {
        println!("\n{}", "Some validations failed. Check output above.".yellow());
    }
}

/// Room id unique to this validation run
fn scratch_room(prefix: &str) -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}-{}", prefix, millis)
}

async fn validate_health(server: &str) -> bool {
    let url = format!("http://{}/health", server);
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => {
            let body = resp.json::<Value>().await.unwrap_or_default();
            if body["status"] == "OK" {
                println!("{} Health endpoint OK", "✓".green());
                true
            } else {
                println!("{} Unexpected body: {}", "✗".yellow(), body);
                false
            }
        }
        Ok(resp) => {
            println!("{} Health returned {}", "✗".red(), resp.status());
            false
        }
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
            false
        }
    }
}

async fn validate_connection(server: &str, token: &str) -> bool {
    match connect(server, Some(token)).await {
        Some(ws_stream) => {
            println!("{} WebSocket connection successful", "✓".green());
            drop(ws_stream);
            true
        }
        None => false,
    }
}

async fn validate_no_token(server: &str) -> bool {
    let mut ws = match connect(server, None).await {
        Some(ws) => ws,
        None => return false,
    };

    match wait_for_event(&mut ws, "connect-error", 3).await {
        Some(frame) => {
            println!(
                "{} Rejected: {}",
                "✓".green(),
                frame["data"]["message"].as_str().unwrap_or("unknown")
            );
            true
        }
        None => {
            println!("{} Server accepted a connection without token", "✗".red());
            false
        }
    }
}

async fn validate_join(server: &str, token: &str) -> bool {
    let room = scratch_room("validate-join");
    let mut ws = match connect(server, Some(token)).await {
        Some(ws) => ws,
        None => return false,
    };

    match join(&mut ws, &room, "Validator").await {
        Some(ack) if ack["data"]["participantCount"] == 1 => {
            println!("{} Joined {} alone", "✓".green(), room);
            true
        }
        Some(ack) => {
            println!("{} Unexpected ack: {}", "✗".yellow(), ack);
            false
        }
        None => false,
    }
}

async fn validate_two_party(server: &str, token: &str) -> bool {
    let room = scratch_room("validate-pair");

    println!("  Step 1: Alice joins...");
    let mut alice = match connect(server, Some(token)).await {
        Some(ws) => ws,
        None => return false,
    };
    if join(&mut alice, &room, "Alice").await.is_none() {
        return false;
    }

    println!("  Step 2: Bob joins...");
    let mut bob = match connect(server, Some(token)).await {
        Some(ws) => ws,
        None => return false,
    };
    match join(&mut bob, &room, "Bob").await {
        Some(ack) if ack["data"]["participantCount"] == 2 => {}
        _ => {
            println!("{} Bob did not see two participants", "✗".red());
            return false;
        }
    }

    match wait_for_event(&mut alice, "user-joined", 3).await {
        Some(frame) if frame["data"]["username"] == "Bob" => {
            println!("  {} Alice notified about Bob", "✓".green());
        }
        _ => return false,
    }
    match wait_for_event(&mut alice, "participants-update", 3).await {
        Some(frame) if frame["data"]["count"] == 2 => {}
        _ => return false,
    }

    println!("  Step 3: Bob leaves...");
    drop(bob);
    match wait_for_event(&mut alice, "user-left", 3).await {
        Some(frame) if frame["data"]["username"] == "Bob" => {
            println!("{} Alice notified about Bob leaving", "✓".green());
            true
        }
        _ => false,
    }
}

async fn validate_message_relay(server: &str, token: &str) -> bool {
    let room = scratch_room("validate-chat");
    let (mut alice, mut bob) = match pair(server, token, &room).await {
        Some(pair) => pair,
        None => return false,
    };

    let data = json!({ "interviewId": room, "user": "Alice", "message": "hello from validator" });
    if !send_event(&mut alice, "interview-message", data).await {
        return false;
    }

    let relayed = match wait_for_event(&mut bob, "interview-message", 3).await {
        Some(frame) if frame["data"]["message"] == "hello from validator" => {
            println!("  {} Bob received message", "✓".green());
            true
        }
        _ => false,
    };

    let echoed = !stays_silent(&mut alice, 500).await;
    if echoed {
        println!("{} Sender received its own message", "✗".red());
    }
    relayed && !echoed
}

async fn validate_code_relay(server: &str, token: &str) -> bool {
    let room = scratch_room("validate-code");
    let (mut alice, mut bob) = match pair(server, token, &room).await {
        Some(pair) => pair,
        None => return false,
    };

    let data = json!({ "interviewId": room, "code": "print(1)" });
    if !send_event(&mut bob, "code-change", data).await {
        return false;
    }

    match wait_for_event(&mut alice, "code-change", 3).await {
        Some(frame) if frame["data"]["code"] == "print(1)" => {
            println!("{} Code change relayed", "✓".green());
            true
        }
        _ => false,
    }
}

async fn validate_isolation(server: &str, token: &str) -> bool {
    let room_a = scratch_room("validate-iso-a");
    let room_b = scratch_room("validate-iso-b");

    let (mut alice, _bob) = match pair(server, token, &room_a).await {
        Some(pair) => pair,
        None => return false,
    };
    let mut carol = match connect(server, Some(token)).await {
        Some(ws) => ws,
        None => return false,
    };
    if join(&mut carol, &room_b, "Carol").await.is_none() {
        return false;
    }

    let data = json!({ "interviewId": room_a, "user": "Alice", "message": "private" });
    if !send_event(&mut alice, "interview-message", data).await {
        return false;
    }

    if stays_silent(&mut carol, 700).await {
        println!("{} Other room saw nothing", "✓".green());
        true
    } else {
        false
    }
}

async fn validate_code_run(server: &str) -> bool {
    let url = format!("http://{}/api/code/run", server);
    let client = reqwest::Client::new();

    match client
        .post(&url)
        .json(&json!({ "language": "python", "code": "print(6 * 7)" }))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            let body = resp.json::<Value>().await.unwrap_or_default();
            let output = body["output"].as_str().unwrap_or("");
            if output.trim() == "42" {
                println!("{} Runner returned 42", "✓".green());
                true
            } else {
                println!("{} Unexpected output: {}", "✗".yellow(), output);
                false
            }
        }
        Ok(resp) => {
            println!("{} Run returned {}", "✗".red(), resp.status());
            false
        }
        Err(e) => {
            println!("{} Cannot connect to server: {}", "✗".red(), e);
            false
        }
    }
}

/// Alice and Bob in `room`, with join chatter drained
async fn pair(server: &str, token: &str, room: &str) -> Option<(WsStream, WsStream)> {
    let mut alice = connect(server, Some(token)).await?;
    join(&mut alice, room, "Alice").await?;
    let mut bob = connect(server, Some(token)).await?;
    join(&mut bob, room, "Bob").await?;
    wait_for_event(&mut alice, "participants-update", 3).await?;
    Some((alice, bob))
}

async fn interactive_mode(server: &str, token: &str) {
    println!("\n{}", "Interactive Mode".bold().green());
    println!("{}", "═".repeat(60).green());
    println!("Type {} for help, {} to quit\n", "help".cyan(), "quit".cyan());

    let ws_stream = match connect(server, Some(token)).await {
        Some(ws) => ws,
        None => return,
    };
    println!("{} Connected to server", "✓".green());

    let (mut write, mut read) = ws_stream.split();

    // Spawn task to receive messages
    let receive_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = read.next().await {
            if let Message::Text(text) = msg {
                println!("\n{} {}", "◀".green(), text.bright_white());
            }
        }
    });

    // Main input loop
    loop {
        print!("{} ", "►".cyan());
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "exit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_interactive_help();
            continue;
        }

        // Try to parse as JSON and send
        if let Ok(parsed) = serde_json::from_str::<Value>(input) {
            if write.send(Message::Text(parsed.to_string())).await.is_ok() {
                println!("{} Frame sent", "✓".green());
            } else {
                println!("{} Failed to send frame", "✗".red());
                break;
            }
        } else {
            println!("{} Invalid JSON. Type 'help' for examples.", "✗".yellow());
        }
    }

    receive_task.abort();
}

fn print_interactive_help() {
    println!("\n{}", "Interactive Mode Commands".bold());
    println!("{}", "─".repeat(60));
    println!("Send JSON frames directly to the server.\n");

    println!("{}", "Example Frames:".bold());
    println!("\n{}:", "Join Interview".cyan());
    println!(r#"  {{"event":"join-interview","data":{{"interviewId":"room1","username":"Alice"}}}}"#);

    println!("\n{}:", "Chat Message".cyan());
    println!(r#"  {{"event":"interview-message","data":{{"interviewId":"room1","user":"Alice","message":"hi"}}}}"#);

    println!("\n{}:", "Code Change".cyan());
    println!(r#"  {{"event":"code-change","data":{{"interviewId":"room1","code":"print(1)"}}}}"#);

    println!("\n{}: quit, exit", "Commands".bold());
    println!();
}
