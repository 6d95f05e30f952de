// src/config/consts.rs

// Site
pub const SCHEDULE_URL: &str = "https://acme.wisc.edu/tools/schedule/schedule.php";
pub const STAFF_URL: &str = "https://acme.wisc.edu/tools/staff/index.php";
pub const LOGIN_SECRET: &str = "src/secrets/login.secret";

// Schedule page layout
pub const SCHEDULE_TABLE_ID: &str = "sch_table_verticle";
pub const FOOTER_ROWS: usize = 2;
pub const TIME_COLUMN: &str = "time";
pub const TOTAL_COLUMN: &str = "total";
pub const AGENT_CODE_WIDTH: usize = 4;

// Hours + pay
pub const SCHEDULE_BLOCK_HOURS: f64 = 0.5;
pub const DEFAULT_PAY: f64 = 10.25;
pub const SLP_MARKER: &str = "SLP"; // student-lead titles get no training raises

// Net
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("acme_scrape/", env!("CARGO_PKG_VERSION"));

// Batch
pub const RECENT_DAYS: usize = 7;
