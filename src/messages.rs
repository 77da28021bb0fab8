//! Reminder wording, per language.

use chrono::{NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    TraditionalChinese,
}

impl Language {
    /// Pick the catalog matching a speech locale such as `en-US` or `zh-TW`.
    pub fn from_locale(locale: &str) -> Self {
        if locale.trim().to_ascii_lowercase().starts_with("zh") {
            Self::TraditionalChinese
        } else {
            Self::English
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Messages {
    lang: Language,
}

impl Messages {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn session_start(&self) -> String {
        match self.lang {
            Language::English => "Morning countdown engaged!".into(),
            Language::TraditionalChinese => "上學戰鬥模式，啟動！".into(),
        }
    }

    pub fn far(&self, clock: NaiveTime, minutes: i64) -> String {
        let (h, m) = (clock.hour(), clock.minute());
        match self.lang {
            Language::English => format!("It's {h}:{m:02}. {minutes} minutes left."),
            Language::TraditionalChinese => {
                format!("現在時間 {h}點{m}分，還剩 {minutes} 分鐘。")
            }
        }
    }

    pub fn mid_fast(&self, minutes: i64) -> String {
        match self.lang {
            Language::English => format!("Attention, {minutes} minutes left. Move fast!"),
            Language::TraditionalChinese => format!("注意！只剩 {minutes} 分鐘！快動作！"),
        }
    }

    pub fn mid_now(&self, minutes: i64) -> String {
        match self.lang {
            Language::English => format!("Attention, {minutes} minutes left. Move now!"),
            Language::TraditionalChinese => format!("注意！只剩 {minutes} 分鐘！快點動作！"),
        }
    }

    pub fn near_seconds(&self, seconds: i64) -> String {
        match self.lang {
            Language::English => format!("Last {seconds} seconds. Run!"),
            Language::TraditionalChinese => format!("剩最後 {seconds} 秒！快跑！"),
        }
    }

    pub fn near_minutes(&self, minutes: i64) -> String {
        match self.lang {
            Language::English => format!("Almost late. {minutes} minutes left!"),
            Language::TraditionalChinese => format!("快遲到了！剩 {minutes} 分鐘！"),
        }
    }

    /// Spoken at the exact deadline second.
    pub fn deadline(&self) -> String {
        match self.lang {
            Language::English => "Time's up. Out the door!".into(),
            Language::TraditionalChinese => "時間到！快出門！".into(),
        }
    }

    pub fn late_banner(&self) -> String {
        match self.lang {
            Language::English => "You're late! You're late! Get out the door!".into(),
            Language::TraditionalChinese => "遲到了！遲到了！快滾出門！".into(),
        }
    }

    pub fn late_repeat(&self) -> String {
        match self.lang {
            Language::English => "You're late! Leave now!".into(),
            Language::TraditionalChinese => "遲到了！快點出門！".into(),
        }
    }
}
