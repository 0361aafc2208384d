// Compile-time ports and LED pins
//
// Pulled into table.rs and build.rs with `include!`, so the build-time
// device.toml check always sees the values the firmware is built with.
// Edit here and reflash.

// Server listeners
pub const HTTP_PORT: u16 = 80;
pub const WEBSOCKET_PORT: u16 = 81;

// LED output pins
pub const LED_WHITE_PIN: u8 = 25; // A
pub const LED_YELLOW_PIN: u8 = 26; // B
pub const LED_GREEN_PIN: u8 = 27; // C
pub const LED_RED_PIN: u8 = 32; // D
pub const LED_BLUE_PIN: u8 = 33; // E
