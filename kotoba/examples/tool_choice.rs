//! Forced tool choice example using OpenAI.
//!
//! Demonstrates forcing the model to call a specific named tool with
//! `ToolChoice::Function`, then printing the full structured result as JSON.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example tool_choice
//! ```

#![allow(clippy::print_stdout)]

use async_trait::async_trait;
use kotoba::prelude::*;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

/// A simple weather tool that returns mock data.
struct GetWeather;

#[derive(Deserialize, JsonSchema)]
struct WeatherArgs {
    city: String,
}

#[async_trait]
impl Tool for GetWeather {
    const NAME: &'static str = "get_weather";
    type Args = WeatherArgs;
    type Output = Value;
    type Error = ToolError;

    fn description(&self) -> String {
        "Get the current weather for a city.".into()
    }

    fn parameters_schema(&self) -> Value {
        args_schema::<WeatherArgs>()
    }

    async fn call(&self, args: WeatherArgs) -> std::result::Result<Value, ToolError> {
        // In a real application, this would call a weather API.
        Ok(json!({
            "city": args.city,
            "temperature": "22°C",
            "condition": "Sunny"
        }))
    }
}

/// Arguments for the schema-only attractions tool.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct AttractionsArgs {
    city: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let client = OpenAI::from_env()?;

    let request = ChatRequest::new("gpt-4o-mini")
        .user("What is the weather in San Francisco and what attractions should I visit?")
        .max_tokens(512)
        .tool(Tool::definition(&GetWeather))
        // A schema-only tool: just a name and an input shape.
        .tool(ToolDefinition::new(
            "city_attractions",
            "",
            args_schema::<AttractionsArgs>(),
        ))
        .tool_choice(ToolChoice::Function("get_weather".into()));

    let response = client.chat(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
