//! Process lifecycle helpers used by the binary and the library runner.

pub mod shutdown;

// Re-export public API
pub use shutdown::shutdown_on_ctrl_c;
