// Grid
pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 4;
pub const LOCKED_ROW_INDEX: usize = 3;
pub const LOCKED_ROW_UNLOCK_LEVELS: [u32; 4] = [3, 6, 10, 15];

// Spawning and queue
pub const SPAWN_EVERY_SECONDS: u32 = 10;
pub const SPAWN_QUEUE_MAX: usize = 3;

// 2x bonus window
pub const BONUS_MULTIPLIER: f64 = 2.0;
pub const BONUS_DURATION_SECONDS: u32 = 90;
pub const BONUS_COOLDOWN_SECONDS: u32 = 5 * 60;

// Sell value: each +1/s of income is worth VALUE_PER_RATE coins, selling returns 1/SELL_DIVISOR
pub const VALUE_PER_RATE: f64 = 60.0;
pub const SELL_DIVISOR: u64 = 3;

// Store
pub const STORE_PRICE_PER_LEVEL: f64 = 0.15;

// Gifts
pub const GIFT_PAID_BASE_COST: u64 = 600;
pub const GIFT_PAID_COST_SECONDS: f64 = 60.0;
pub const GIFT_FREE_EVERY_SECONDS: u32 = 24 * 60 * 60;
pub const GIFT_PITY_RARE: u32 = 7;
pub const GIFT_PITY_LEGEND: u32 = 20;
pub const GIFT_CHANCE_RARE: f64 = 0.22;
pub const GIFT_CHANCE_LEGEND: f64 = 0.03;
/// Coin prizes as multiples of one second of income: small, medium, large, huge
pub const GIFT_COIN_MULTIPLIERS: [f64; 4] = [20.0, 40.0, 80.0, 180.0];
pub const GIFT_SPAWN_BOOST_SECONDS: u32 = 120;

// XP and leveling
pub const XP_PER_MERGE_BASE: u64 = 10;
pub const XP_NEED_BASE: f64 = 80.0;
pub const XP_NEED_POW: f64 = 1.35;
pub const XP_NEED_FLOOR: u64 = 20;

/// Reward granted for levels past the end of the progression ladder
pub const DEFAULT_LEVEL_COINS: u64 = 10;

// Host driver
pub const AUTOSAVE_INTERVAL_MS: u64 = 5000;
pub const FRAME_POLL_MS: u64 = 50;

// Persistence
pub const SNAPSHOT_VERSION: u32 = 1;
pub const SAVE_FILE_NAME: &str = "session.json";
pub const BALANCE_FILE_NAME: &str = "balance.json";
pub const LOG_FILE_NAME: &str = "merge_clinic.log";
