//! Roster defaults and display locale.

use serde::{Deserialize, Serialize};

/// Largest group a private battle can hold.
pub const MAX_MEMBERS: u32 = 8;

/// Defaults applied when the store has no roster yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Member count used when none is stored.
    pub default_member_count: u32,
    /// Upper bound on the member count.
    pub max_members: u32,
    /// Locale for display names and member placeholders.
    pub locale: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            default_member_count: 4,
            max_members: MAX_MEMBERS,
            locale: "ja_JP".to_string(),
        }
    }
}

impl RosterConfig {
    /// Set the default member count (clamped to `1..=max_members`).
    pub fn with_default_member_count(mut self, count: u32) -> Self {
        self.default_member_count = count.clamp(1, self.max_members.max(1));
        self
    }

    /// Set the maximum member count (at least 1).
    pub fn with_max_members(mut self, max: u32) -> Self {
        self.max_members = max.max(1);
        self.default_member_count = self.default_member_count.clamp(1, self.max_members);
        self
    }

    /// Re-apply the builder clamps to values that bypassed them, such as a
    /// deserialized config file.
    pub fn normalized(self) -> Self {
        let (max, default) = (self.max_members, self.default_member_count);
        self.with_max_members(max).with_default_member_count(default)
    }

    /// Set the display locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Placeholder name for member `index` in the configured locale.
    pub fn member_placeholder(&self, index: u32) -> String {
        if self.locale.starts_with("ja") {
            format!("メンバー{index}")
        } else {
            format!("Member {index}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = RosterConfig::default();
        assert_eq!(cfg.default_member_count, 4);
        assert_eq!(cfg.max_members, 8);
        assert_eq!(cfg.locale, "ja_JP");
    }

    #[test]
    fn builder_clamps() {
        let cfg = RosterConfig::default().with_default_member_count(0);
        assert_eq!(cfg.default_member_count, 1);
        let cfg = RosterConfig::default().with_default_member_count(99);
        assert_eq!(cfg.default_member_count, 8);
        let cfg = RosterConfig::default().with_max_members(2);
        assert_eq!(cfg.max_members, 2);
        assert_eq!(cfg.default_member_count, 2);
    }

    #[test]
    fn placeholders_follow_locale() {
        let ja = RosterConfig::default();
        assert_eq!(ja.member_placeholder(2), "メンバー2");
        let en = RosterConfig::default().with_locale("en_US");
        assert_eq!(en.member_placeholder(3), "Member 3");
    }

    #[test]
    fn normalized_clamps_deserialized_values() {
        let cfg: RosterConfig = serde_json::from_str(r#"{"default_member_count":0}"#).unwrap();
        assert_eq!(cfg.normalized().default_member_count, 1);

        let cfg: RosterConfig = serde_json::from_str(r#"{"default_member_count":20}"#).unwrap();
        let cfg = cfg.normalized();
        assert_eq!(cfg.default_member_count, 8);
        assert_eq!(cfg.max_members, 8);

        let cfg: RosterConfig =
            serde_json::from_str(r#"{"max_members":0,"default_member_count":3}"#).unwrap();
        let cfg = cfg.normalized();
        assert_eq!(cfg.max_members, 1);
        assert_eq!(cfg.default_member_count, 1);

        assert_eq!(RosterConfig::default().normalized(), RosterConfig::default());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: RosterConfig = serde_json::from_str(r#"{"locale":"en_US"}"#).unwrap();
        assert_eq!(cfg.locale, "en_US");
        assert_eq!(cfg.default_member_count, 4);
    }
}
