//! Terminal chat widget: talks to a running Lead Assist server.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use lead_assist::chatbot::{
    Conversation, ConversationState, HttpAiClient, HttpEnquiryClient, Message, ProjectType, Sender,
};

fn print_message(message: &Message) {
    match message.sender {
        Sender::Bot => println!("bot: {}", message.text),
        Sender::User => println!("you: {}", message.text),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let base_url =
        std::env::var("LEAD_ASSIST_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

    let mut conversation = Conversation::new(
        Arc::new(HttpAiClient::new(&base_url)),
        Arc::new(HttpEnquiryClient::new(&base_url)),
    )
    .await;
    let transcript = conversation.transcript();

    eprintln!("Lead Assist chat ({base_url}). /quit to exit.\n");
    for message in transcript.snapshot().await {
        print_message(&message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprint!("> ");
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim() == "/quit" {
            break;
        }

        let seen = transcript.len().await;
        let state = conversation.handle_input(&line).await.settle().await;

        // Skip the echo of what was just typed.
        for message in transcript.since(seen).await {
            if message.sender == Sender::Bot {
                print_message(&message);
            }
        }
        if state == ConversationState::CollectingProject {
            for (i, label) in ProjectType::labels().iter().enumerate() {
                println!("  {}. {label}", i + 1);
            }
        }
        eprint!("> ");
    }

    Ok(())
}
