//! DUT port access errors.

/// Errors raised by DUT port reads and writes.
#[derive(Debug, thiserror::Error)]
pub enum DutError {
    /// The port ID does not exist in the DUT's port list.
    #[error("unknown port id {0}")]
    UnknownPort(u32),

    /// An attempt was made to drive an output port.
    #[error("port '{name}' is not an input")]
    NotAnInput {
        /// The offending port name.
        name: String,
    },

    /// The written value's width does not match the port declaration.
    #[error("width mismatch on port '{name}': expected {expected}, got {actual}")]
    WidthMismatch {
        /// The port name.
        name: String,
        /// The declared port width.
        expected: u32,
        /// The width of the rejected value.
        actual: u32,
    },
}
