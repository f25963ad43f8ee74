use anyhow::Result;
use relay_shared::events::TurnEvent;
use relay_shared::tools;
use std::io::{self, BufRead, Write};

use crate::client::ApiClient;
use crate::orchestrator::Orchestrator;

/// Prompts exercised by `envoy test`: some should trigger the tool, some should not.
pub const SAMPLE_PROMPTS: &[&str] = &[
    "What's my favorite number? My user id is alice.",
    "I'm bob. Can you look up my favorite number?",
    "What's my favorite number?",
    "What is the capital of France?",
    "Tell me a short joke about computers.",
];

pub async fn single_message(orchestrator: &Orchestrator, message: &str) -> Result<()> {
    if let Err(e) = orchestrator.run_turn(message, |event| handle_event(&event)).await {
        eprintln!("❌ Error: {}", e);
    }
    Ok(())
}

pub async fn interactive_chat(orchestrator: &Orchestrator) -> Result<()> {
    println!("Envoy chat started. Type 'quit' to exit.\n");

    let stdin = io::stdin();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        if input.is_empty() {
            continue;
        }

        println!(); // Blank line before response

        match orchestrator.run_turn(input, |event| handle_event(&event)).await {
            Ok(_) => println!(),
            Err(e) => eprintln!("❌ Error: {}\n", e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

pub async fn run_samples(orchestrator: &Orchestrator) -> Result<()> {
    println!("Running {} sample prompts\n", SAMPLE_PROMPTS.len());

    let results = orchestrator
        .run_batch(SAMPLE_PROMPTS, |prompt, event| {
            if let TurnEvent::Response { .. } = event {
                println!("\n▶ {}", prompt);
            }
            handle_event(&event);
        })
        .await;

    println!("\nSummary:");
    for (prompt, result) in SAMPLE_PROMPTS.iter().zip(&results) {
        match result {
            Ok(turn) => {
                let answer = match (&turn.follow_up, &turn.follow_up_error) {
                    (Some(follow_up), _) => follow_up.clone(),
                    (None, Some(e)) => format!("follow-up failed: {}", e),
                    (None, None) => turn.response.clone(),
                };
                match (&turn.tool_call, &turn.tool_result) {
                    (Some(call), Some(output)) => {
                        println!("  ✓ {} → {} ({}) → {}", turn.prompt, call.name, output, answer)
                    }
                    _ => println!("  ✓ {} → {}", turn.prompt, answer),
                }
            }
            Err(e) => println!("  ✗ {} → {}", prompt, e),
        }
    }

    let failed = results.iter().filter(|r| r.is_err()).count();
    let with_tool = results
        .iter()
        .filter(|r| matches!(r, Ok(turn) if turn.tool_call.is_some()))
        .count();

    println!(
        "\n{} prompts, {} succeeded ({} used a tool), {} failed",
        results.len(),
        results.len() - failed,
        with_tool,
        failed
    );
    Ok(())
}

pub async fn check_health(client: &ApiClient) -> Result<()> {
    match client.health().await {
        Ok(health) => println!("✓ {} is {}", client.base_url(), health.status),
        Err(e) => {
            eprintln!("Failed to reach Relay at {}: {}", client.base_url(), e);
            eprintln!("Is the Relay server running?");
            return Err(e);
        }
    }
    Ok(())
}

pub fn list_tools(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&tools::get_tools())?);
        return Ok(());
    }

    println!("Available tools:");
    for belt in tools::get_toolbelts() {
        println!("  {} ({})", belt.name, belt.description);
        for schema in tools::get_tool_schemas().iter().filter(|s| s.toolbelt == belt.name) {
            println!("    {} - {}", schema.name, schema.description);
            for param in &schema.parameters {
                println!("        {} ({}): {}", param.name, param.type_name, param.description);
            }
        }
    }
    Ok(())
}

fn handle_event(event: &TurnEvent) {
    match event {
        TurnEvent::Response { content } => {
            println!("Assistant: {}", content);
        }
        TurnEvent::ToolCall { name, parameters } => {
            println!("🔧 Calling: {} {}", name, parameters);
        }
        TurnEvent::ToolResult { result, .. } => {
            println!("   ✓ {}", result);
        }
        TurnEvent::FollowUp { content } => {
            println!("Assistant: {}", content);
        }
        TurnEvent::Error { message } => {
            eprintln!("❌ Error: {}", message);
        }
    }
}
