//! User intents and their one-line text form.
//!
//! ```text
//! draw [rule|stage|weapon|all]
//! filter <kind> <key> on|off
//! filter <kind> all|none
//! apply [kind|all]
//! cancel [kind|all]
//! members <n>
//! name <index> [name...]
//! teams on|off
//! confirm | revert | divide
//! refresh
//! section <name> open|close
//! ```

use std::str::FromStr;

use spla_core::CatalogKind;

use crate::error::{SessionError, SessionResult};

/// Words that start an intent.
pub const COMMANDS: [&str; 12] = [
    "draw", "filter", "apply", "cancel", "members", "name", "teams", "confirm", "revert", "divide",
    "refresh", "section",
];

/// Everything a user can ask the session to do.
///
/// Filter and roster intents that take an `Option<CatalogKind>` treat
/// `None` as every kind at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Draw one kind.
    Draw(CatalogKind),
    /// Draw every kind together.
    DrawAll,
    /// Include or exclude one item in the pending filter.
    ToggleFilterItem {
        /// Catalog the item belongs to.
        kind: CatalogKind,
        /// Item key.
        key: String,
        /// Whether the item should be drawable.
        included: bool,
    },
    /// Include or exclude every item in the pending filter.
    SelectAll {
        /// Catalog to edit.
        kind: CatalogKind,
        /// Whether everything should be drawable.
        included: bool,
    },
    /// Commit and persist pending filters.
    ApplyFilter(Option<CatalogKind>),
    /// Throw away pending filter edits.
    DiscardFilter(Option<CatalogKind>),
    /// Change the pending member count.
    SetMemberCount(u32),
    /// Rename a pending member; blank restores the placeholder.
    SetMemberName {
        /// 1-based member index.
        index: u32,
        /// New display name.
        name: String,
    },
    /// Turn pending team division on or off.
    ToggleTeamDivision(bool),
    /// Commit and persist the pending roster.
    ConfirmRoster,
    /// Throw away pending roster edits.
    DiscardRoster,
    /// Re-run the team split over the confirmed roster.
    DivideTeams,
    /// Drop cached catalogs and fetch them again.
    RefreshCatalog,
    /// Expand or collapse a result section or the filter panel.
    ToggleSection {
        /// Section name; `filter` is the filter panel.
        name: String,
        /// Whether it should be expanded.
        open: bool,
    },
}

impl FromStr for Intent {
    type Err = SessionError;

    fn from_str(input: &str) -> SessionResult<Self> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "draw" => match parse_target(rest, "draw [rule|stage|weapon|all]")? {
                Some(kind) => Ok(Intent::Draw(kind)),
                None => Ok(Intent::DrawAll),
            },
            "filter" => parse_filter(rest),
            "apply" => Ok(Intent::ApplyFilter(parse_target(rest, "apply [kind|all]")?)),
            "cancel" => Ok(Intent::DiscardFilter(parse_target(rest, "cancel [kind|all]")?)),
            "members" => rest
                .parse()
                .map(Intent::SetMemberCount)
                .map_err(|_| usage("members <n>")),
            "name" => parse_name(rest),
            "teams" => Ok(Intent::ToggleTeamDivision(parse_switch(rest, "teams on|off")?)),
            "confirm" => Ok(Intent::ConfirmRoster),
            "revert" => Ok(Intent::DiscardRoster),
            "divide" => Ok(Intent::DivideTeams),
            "refresh" => Ok(Intent::RefreshCatalog),
            "section" => parse_section(rest),
            "" => Err(usage("empty command")),
            _ => Err(SessionError::UnknownCommand(cmd)),
        }
    }
}

fn usage(text: &str) -> SessionError {
    SessionError::InvalidCommand(format!("usage: {text}"))
}

/// `None` for blank or `all`.
fn parse_target(rest: &str, help: &str) -> SessionResult<Option<CatalogKind>> {
    match rest.to_lowercase().as_str() {
        "" | "all" => Ok(None),
        word => word.parse().map(Some).map_err(|_| usage(help)),
    }
}

fn parse_switch(word: &str, help: &str) -> SessionResult<bool> {
    match word.to_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        _ => Err(usage(help)),
    }
}

fn parse_filter(rest: &str) -> SessionResult<Intent> {
    const HELP: &str = "filter <kind> <key> on|off | filter <kind> all|none";
    let words: Vec<&str> = rest.split_whitespace().collect();
    let kind: CatalogKind = words
        .first()
        .ok_or_else(|| usage(HELP))?
        .parse()
        .map_err(|_| usage(HELP))?;

    match words[1..] {
        ["all"] => Ok(Intent::SelectAll {
            kind,
            included: true,
        }),
        ["none"] => Ok(Intent::SelectAll {
            kind,
            included: false,
        }),
        [key, switch] => Ok(Intent::ToggleFilterItem {
            kind,
            key: key.to_string(),
            included: parse_switch(switch, HELP)?,
        }),
        _ => Err(usage(HELP)),
    }
}

fn parse_name(rest: &str) -> SessionResult<Intent> {
    let parts: Vec<&str> = rest.splitn(2, ' ').collect();
    let index = parts[0].parse().map_err(|_| usage("name <index> [name]"))?;
    Ok(Intent::SetMemberName {
        index,
        name: parts.get(1).map(|s| s.trim()).unwrap_or("").to_string(),
    })
}

fn parse_section(rest: &str) -> SessionResult<Intent> {
    const HELP: &str = "section <name> open|close";
    match rest.split_whitespace().collect::<Vec<_>>()[..] {
        [name, state] => {
            let open = match state.to_lowercase().as_str() {
                "open" => true,
                "close" | "closed" => false,
                _ => return Err(usage(HELP)),
            };
            Ok(Intent::ToggleSection {
                name: name.to_string(),
                open,
            })
        }
        _ => Err(usage(HELP)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Intent {
        input.parse().unwrap()
    }

    #[test]
    fn draw_targets() {
        assert_eq!(parse("draw rule"), Intent::Draw(CatalogKind::Rule));
        assert_eq!(parse("DRAW Weapons"), Intent::Draw(CatalogKind::Weapon));
        assert_eq!(parse("draw"), Intent::DrawAll);
        assert_eq!(parse("draw all"), Intent::DrawAll);
        assert!(matches!(
            "draw salmon".parse::<Intent>(),
            Err(SessionError::InvalidCommand(_))
        ));
    }

    #[test]
    fn filter_forms() {
        assert_eq!(
            parse("filter stage yunohana off"),
            Intent::ToggleFilterItem {
                kind: CatalogKind::Stage,
                key: "yunohana".to_string(),
                included: false,
            }
        );
        assert_eq!(
            parse("filter weapon none"),
            Intent::SelectAll {
                kind: CatalogKind::Weapon,
                included: false,
            }
        );
        assert!("filter".parse::<Intent>().is_err());
        assert!("filter rule area maybe".parse::<Intent>().is_err());
        assert!("filter rule area".parse::<Intent>().is_err());
    }

    #[test]
    fn apply_and_cancel() {
        assert_eq!(parse("apply"), Intent::ApplyFilter(None));
        assert_eq!(parse("apply stage"), Intent::ApplyFilter(Some(CatalogKind::Stage)));
        assert_eq!(parse("cancel all"), Intent::DiscardFilter(None));
    }

    #[test]
    fn roster_forms() {
        assert_eq!(parse("members 6"), Intent::SetMemberCount(6));
        assert!("members six".parse::<Intent>().is_err());
        assert_eq!(
            parse("name 2 Ika Musume"),
            Intent::SetMemberName {
                index: 2,
                name: "Ika Musume".to_string(),
            }
        );
        assert_eq!(
            parse("name 3"),
            Intent::SetMemberName {
                index: 3,
                name: String::new(),
            }
        );
        assert_eq!(parse("teams on"), Intent::ToggleTeamDivision(true));
        assert_eq!(parse("confirm"), Intent::ConfirmRoster);
        assert_eq!(parse("revert"), Intent::DiscardRoster);
        assert_eq!(parse("divide"), Intent::DivideTeams);
    }

    #[test]
    fn section_and_refresh() {
        assert_eq!(parse("refresh"), Intent::RefreshCatalog);
        assert_eq!(
            parse("section filter close"),
            Intent::ToggleSection {
                name: "filter".to_string(),
                open: false,
            }
        );
        assert!("section weapon".parse::<Intent>().is_err());
    }

    #[test]
    fn unknown_command() {
        let err = "splat".parse::<Intent>().unwrap_err();
        assert!(matches!(err, SessionError::UnknownCommand(ref c) if c == "splat"));
        assert!(matches!("".parse::<Intent>(), Err(SessionError::InvalidCommand(_))));
    }
}
