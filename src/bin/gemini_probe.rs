// ABOUTME: Gemini connectivity diagnostic that sends a test prompt to each requested model
// ABOUTME: Reports per-model success or the classified failure for the first configured key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs)]

use anyhow::{anyhow, Result};
use clap::Parser;
use fitcoach_server::config::ServerConfig;
use fitcoach_server::llm::{classify, key_suffix, GeminiProvider};

#[derive(Parser)]
#[command(name = "gemini-probe")]
#[command(about = "Check which Gemini models the configured key can use")]
struct Args {
    /// Model to probe; repeat for several
    #[arg(long = "model", default_values = ["gemini-2.5-flash", "gemini-pro"])]
    models: Vec<String>,

    /// Prompt to send
    #[arg(long, default_value = "Hello?")]
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServerConfig::from_env()?;

    println!("Gemini Model Probe");
    println!("==================");

    let Some(key) = config.gemini.api_keys.first() else {
        println!("Error No GEMINI_API_KEY configured");
        return Err(anyhow!("No Gemini API key configured"));
    };
    println!(
        "Key ...{} ({} configured)",
        key_suffix(key),
        config.gemini.api_keys.len()
    );

    let provider = GeminiProvider::new(&config.gemini.base_url, &config.gemini.model);
    let mut working = 0_usize;
    for model in &args.models {
        println!("\nTesting model: {model}");
        match provider.generate_with_model(key, model, &args.prompt).await {
            Ok(text) => {
                working += 1;
                println!("Success {model} responded: {}", text.trim());
            }
            Err(failure) => {
                println!(
                    "Failed {model} ({}): {}",
                    classify(&failure).as_str(),
                    failure.detail
                );
            }
        }
    }

    println!("\n{working}/{} models available", args.models.len());
    Ok(())
}
