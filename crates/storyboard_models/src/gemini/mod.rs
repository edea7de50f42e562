//! Gemini `generateContent` REST integration.

mod client;
mod conversion;
mod dto;

pub use client::GeminiClient;
