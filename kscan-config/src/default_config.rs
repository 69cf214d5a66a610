/// Defaults layered under every `keypad.toml`: the 4x4 membrane keypad wired to the OLIMEX
/// STM32-E407, rows on PD1..PD7 and columns on PD9..PD15 (odd pins), columns pulled down.
pub const DEFAULT_KEYPAD_TOML: &str = r##"
[matrix]
rows = ["PD1", "PD3", "PD5", "PD7"]
cols = ["PD9", "PD11", "PD13", "PD15"]
low_active = false

[symbols]
short = [
    "1", "2", "3", "A",
    "4", "5", "6", "B",
    "7", "8", "9", "C",
    "*", "0", "#", "D",
]
long = [
    "m", "n", "o", "a",
    "p", "q", "r", "b",
    "s", "t", "u", "c",
    "v", "w", "x", "d",
]

[scan]
long_keypress_count = 20
channel_capacity = 0
tick_hz = 100
cycle_budget_ms = 40
"##;
