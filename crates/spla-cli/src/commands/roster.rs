use colored::Colorize;

use crate::GlobalOpts;

pub async fn run(
    opts: &GlobalOpts,
    count: Option<u32>,
    names: &[String],
    teams: Option<&str>,
) -> Result<(), String> {
    let mut session = super::open_session(opts).await?;
    let renames = names
        .iter()
        .map(|raw| parse_rename(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let teams = teams.map(parse_switch).transpose()?;

    if let Some(count) = count {
        session.set_member_count(count).map_err(|e| e.to_string())?;
    }
    for (index, name) in &renames {
        session
            .set_member_name(*index, name)
            .map_err(|e| e.to_string())?;
    }
    if let Some(enabled) = teams {
        session.set_team_division(enabled);
    }
    if session.is_roster_dirty() {
        session.confirm_roster();
        println!("  {} roster", "Saved".green().bold());
    }

    print!("{}", super::render_roster(&session));
    Ok(())
}

/// Parse `INDEX=NAME`.
fn parse_rename(raw: &str) -> Result<(u32, String), String> {
    let (index, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=NAME, got '{raw}'"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid member index '{index}'"))?;
    Ok((index, name.to_string()))
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("expected on or off, got '{raw}'")),
    }
}
