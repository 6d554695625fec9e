// Board dimensions (cells, including the wall perimeter)
pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLS: usize = 50;
pub const MIN_BOARD_SIDE: usize = 3;

// Snake at new-game start
pub const DEFAULT_START_LENGTH: usize = 2;

// Timing: the front-end calls tick() once per interval
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30;
/// Ticks between snake movement steps.
pub const DEFAULT_MOVEMENT_CADENCE: u64 = 3;
/// Ticks between unconditional spam drops.
pub const DEFAULT_REFILL_CADENCE: u64 = 25;

// Files under ~/.spampede/
pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "spampede.log";
pub const LOG_FILTER_ENV: &str = "SPAMPEDE_LOG";
