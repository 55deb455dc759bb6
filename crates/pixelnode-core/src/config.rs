/// Compile-time node configuration.
///
/// The node has no runtime configuration surface; identity strings and port
/// capacity are fixed when the firmware image is built. Names longer than
/// the reply record's fields (17/63 usable bytes) are truncated on encode.
#[derive(Debug, Clone, Copy)]
pub struct NodeConfig {
    /// Short identity string, at most 17 bytes on the wire.
    pub short_name: &'static str,
    /// Long identity string, at most 63 bytes on the wire.
    pub long_name: &'static str,
    /// Declared DMX output ports, 1 to 4.
    pub output_ports: u8,
    /// Output buffer capacity in DMX channels.
    pub max_channels: usize,
}

impl NodeConfig {
    // 170 RGB pixels on the strip, three channels each.
    pub const DEFAULT: NodeConfig = NodeConfig {
        short_name: "pixelnode",
        long_name: "pixelnode Art-Net pixel controller",
        output_ports: 2,
        max_channels: 510,
    };
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
