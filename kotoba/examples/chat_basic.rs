//! Basic chat example using OpenAI.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example chat_basic
//! ```

#![allow(clippy::print_stdout)]

use kotoba::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let client = OpenAI::from_env()?;

    let request = ChatRequest::new("gpt-4o-mini")
        .system("You are a helpful assistant.")
        .user("What is the capital of France?");

    let response = client.chat(&request).await?;
    println!("{}", response.text().unwrap_or_default());

    if let Some(usage) = response.usage {
        println!("\n{usage}");
    }

    Ok(())
}
