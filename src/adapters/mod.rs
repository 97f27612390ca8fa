// Adapters layer: concrete implementations for external systems. The
// language-model provider lives here; artifact storage sits with the CLI
// config in src/config/cli.rs.

pub mod openai;
