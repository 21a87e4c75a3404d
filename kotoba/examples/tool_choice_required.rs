//! Tool choice modes without a network, using the mock provider.
//!
//! Demonstrates the `Required` and `Auto` tool choice modes and how to wire
//! up `tracing-subscriber` so the provider spans are printed to stderr.
//!
//! ```bash
//! cargo run --example tool_choice_required
//! ```

#![allow(clippy::print_stdout)]

use kotoba::prelude::*;
use schemars::JsonSchema;

#[derive(JsonSchema)]
#[allow(dead_code)]
struct SearchArgs {
    query: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize a tracing subscriber that prints spans + events to stderr.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter("info")
        .init();

    let provider = MockProvider::new()
        .with_response(
            ChatResponse::new(Message::assistant_tool_calls(vec![ToolCall::function(
                "call_1",
                "search",
                r#"{"query":"rust llm clients"}"#,
            )]))
            .with_stop_reason(StopReason::ToolCalls),
        )
        .with_response(ChatResponse::from_text("No tool needed for that one."));

    let search = ToolDefinition::new(
        "search",
        "Search the web for a query.",
        args_schema::<SearchArgs>(),
    );

    // `Required` forces the model to call at least one tool.
    let request = ChatRequest::new("mock-model")
        .user("Find me articles about Rust LLM clients.")
        .tool(search.clone())
        .tool_choice(ToolChoice::Required);

    let response = provider.chat(&request).await?;
    println!("required:\n{}\n", serde_json::to_string_pretty(&response)?);

    // `Auto` lets the model decide; here the mock answers in plain text.
    let request = ChatRequest::new("mock-model")
        .user("What is two plus two?")
        .tool(search)
        .tool_choice(ToolChoice::Auto);

    let response = provider.chat(&request).await?;
    println!("auto:\n{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
