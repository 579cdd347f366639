pub mod core;

// Hook traits and the registry
pub mod hooks;

// Shell command execution
pub mod executor;

// Command lifecycle orchestration
pub mod pipeline;

// Hook discovery from providers and manifest directories
pub mod loader;

// Optional components
pub mod logging;
pub mod session;
