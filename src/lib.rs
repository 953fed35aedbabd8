//! Lead Assist: website lead capture with an AI chat assistant.

pub mod chatbot;
pub mod config;
pub mod enquiry;
pub mod error;
pub mod llm;
pub mod logging;
pub mod proxy;
pub mod server;
