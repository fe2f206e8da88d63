pub const DEFAULT_STUN_HOST: &str = "stun.l.google.com";
pub const DEFAULT_STUN_PORT: u16 = 19302;

pub const DEFAULT_SIGNALING_HOST: &str = "localhost";
pub const DEFAULT_SIGNALING_PORT: u16 = 8000;

pub const DEFAULT_TOKEN_LENGTH: usize = 4;
pub const DEFAULT_CHANNEL_LABEL: &str = "test";
