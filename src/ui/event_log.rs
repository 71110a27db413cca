use luck_roller::achievements::get_achievement_def;
use luck_roller::core::GameEvent;
use luck_roller::utils::{format_number, RollTier};
use ratatui::style::Color;
use std::collections::VecDeque;

const MAX_ENTRIES: usize = 50;

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub message: String,
    pub color: Color,
}

/// Most recent events, newest first.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    pub last_roll: Option<(u64, bool, bool)>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, message: impl Into<String>, color: Color) {
        self.entries.push_front(LogEntry {
            message: message.into(),
            color,
        });
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn record(&mut self, event: &GameEvent) {
        if let GameEvent::RollCompleted {
            result,
            is_rare,
            was_super,
        } = event
        {
            self.last_roll = Some((*result, *is_rare, *was_super));
        }
        if let Some((message, color)) = describe(event) {
            self.push(message, color);
        }
    }
}

/// Text for the log, or `None` for events too frequent to list.
pub fn describe(event: &GameEvent) -> Option<(String, Color)> {
    let line = match event {
        GameEvent::RollCompleted {
            result, was_super, ..
        } => {
            let tier = RollTier::from_value(*result);
            if !*was_super && tier == RollTier::Common {
                return None;
            }
            let prefix = if *was_super { "Super roll" } else { "Roll" };
            (
                format!("{prefix}: {} ({})", format_number(*result), tier.name()),
                tier_color(tier),
            )
        }
        GameEvent::NewHighScore { value, .. } => (
            format!("New high score: {}", format_number(*value)),
            Color::Yellow,
        ),
        GameEvent::AchievementUnlocked { id } => {
            let def = get_achievement_def(*id);
            (
                format!("{} {} unlocked (+{} luck)", def.icon, def.name, def.luck_reward),
                Color::Magenta,
            )
        }
        GameEvent::SuperRollArmed => ("Super roll ready!".to_string(), Color::LightRed),
        GameEvent::RollFailed { message } => (format!("Roll failed: {message}"), Color::Red),
        GameEvent::PurchaseCompleted {
            target,
            new_level,
            cost,
        } => (
            format!(
                "Bought {} (Lv {}) for {}",
                target.name(),
                new_level,
                format_number(*cost)
            ),
            Color::Green,
        ),
        GameEvent::PurchaseRejected { reason } => (reason.message().to_string(), Color::Red),
        GameEvent::PrestigeCompleted {
            prestige_count,
            void_points,
        } => (
            format!("Prestige {prestige_count}! Void points: {void_points}"),
            Color::LightMagenta,
        ),
        GameEvent::PotionActivated { stacks, seconds } => (
            format!("Potion active: {stacks} stack(s), {seconds}s"),
            Color::Cyan,
        ),
        GameEvent::PotionsExpired { stacks } => {
            (format!("{stacks} potion stack(s) wore off"), Color::DarkGray)
        }
    };
    Some(line)
}

pub fn tier_color(tier: RollTier) -> Color {
    match tier {
        RollTier::Common => Color::White,
        RollTier::Uncommon => Color::Green,
        RollTier::Rare => Color::Blue,
        RollTier::Legendary => Color::Yellow,
    }
}
