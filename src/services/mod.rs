pub mod chatbot;
pub mod knowledge;
pub mod message_client;
pub mod metrics_manager;
pub mod transcript;
