//! Shared UI icons and emojis.
//!
//! Common emoji constants used across the console reports. Each falls back
//! to a plain-text marker on terminals without emoji support. Per-stage
//! icons live on [`crate::stage::Stage::icon`].

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN]");

// Report indicators
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static PEOPLE: Emoji<'_, '_> = Emoji("👥 ", "");
pub static CLOCK: Emoji<'_, '_> = Emoji("⏰ ", "[DUE]");
pub static FILE_NEW: Emoji<'_, '_> = Emoji("📄 ", "+");
