/// Per-session WebSocket settings
#[derive(Debug, Clone, Copy)]
pub struct ConnectionConfig {
    /// Bounded outbound queue per session
    pub send_buffer_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
        }
    }
}
