//! Semantic action IDs for CHANCE click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Navigation bar ──────────────────────────────────────────────
pub const NAV_HOME: u16 = 1;
pub const NAV_MARKETPLACE: u16 = 2;
pub const NAV_PORTFOLIO: u16 = 3;
pub const NAV_MESSAGES: u16 = 4;
pub const NAV_DASHBOARD: u16 = 5;
pub const TOGGLE_CURRENCY: u16 = 6;
pub const OPEN_SIGN_IN: u16 = 7;
pub const LOG_OUT: u16 = 8;

// ── Hero (registration entry points) ────────────────────────────
pub const REGISTER_FRANCHISE: u16 = 20;
pub const REGISTER_FUND: u16 = 21;
pub const REGISTER_INVESTOR: u16 = 22;

// ── Marketplace ─────────────────────────────────────────────────
pub const FILTER_BASE: u16 = 30; // +filter index 0..4
pub const CARD_ACTION_BASE: u16 = 100; // +catalog index

// ── Detail ──────────────────────────────────────────────────────
pub const DETAIL_BACK: u16 = 200;
pub const DETAIL_TOGGLE_AGREE: u16 = 201;
pub const DETAIL_REQUEST_MEETING: u16 = 202;

// ── Messages ────────────────────────────────────────────────────
pub const SELECT_CHAT_BASE: u16 = 300; // +chat index

// ── Sign-in modal ───────────────────────────────────────────────
pub const AUTH_CLOSE: u16 = 400;
pub const AUTH_PICK_INVESTOR: u16 = 401;
pub const AUTH_PICK_BUSINESS: u16 = 402;
pub const AUTH_CYCLE_COUNTRY: u16 = 403;
pub const AUTH_SUBMIT: u16 = 404;
pub const AUTH_BACK: u16 = 405;

// ── Registration modal ──────────────────────────────────────────
pub const REG_CLOSE: u16 = 500;
pub const REG_BACK: u16 = 501;
pub const REG_NEXT: u16 = 502;
pub const REG_SUBMIT: u16 = 503;
pub const REG_TOGGLE_AGREE: u16 = 504;
pub const REG_PLAN_BASE: u16 = 510; // +plan index 0..3
pub const REG_FOCUS_BASE: u16 = 520; // +field index 0..5
