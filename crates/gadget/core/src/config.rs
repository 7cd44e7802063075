/// Server-wide settings: tick period, channel sizes and the tag namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServerConfig {
    /// Length of one server tick in milliseconds.
    pub tick_millis: u64,
    /// Namespace of the data key that stores item ids on stacks.
    pub namespace: String,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl ServerConfig {
    pub const DEFAULT_TICK_MILLIS: u64 = 50;
    pub const DEFAULT_NAMESPACE: &'static str = "gadgets";
    pub const DEFAULT_COMMAND_BUFFER_SIZE: usize = 32;
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 256;

    pub fn new() -> Self {
        Self {
            tick_millis: Self::DEFAULT_TICK_MILLIS,
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            command_buffer_size: Self::DEFAULT_COMMAND_BUFFER_SIZE,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
