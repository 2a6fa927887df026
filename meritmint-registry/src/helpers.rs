use crate::error::RegistryError;
use crate::state::AchievementDraft;

/// Names of required draft fields that are empty, in declaration order.
pub fn missing_draft_fields(draft: &AchievementDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if draft.title.trim().is_empty() {
        missing.push("title");
    }
    if draft.role.trim().is_empty() {
        missing.push("role");
    }
    missing
}

/// All missing required fields are reported in one error.
pub fn assert_required_fields(draft: &AchievementDraft) -> Result<(), RegistryError> {
    let missing = missing_draft_fields(draft);
    if missing.is_empty() {
        return Ok(());
    }
    Err(RegistryError::validation(
        missing.join(", "),
        "required field is empty",
    ))
}

/// Owner addresses are format-checked only: `0x` followed by at least one
/// hex digit.
pub fn assert_valid_address(address: &str) -> Result<(), RegistryError> {
    match address.strip_prefix("0x") {
        Some(rest) if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit()) => Ok(()),
        _ => Err(RegistryError::validation("owner", "invalid wallet address")),
    }
}

pub fn assert_distinct_technologies(technologies: &[String]) -> Result<(), RegistryError> {
    for (i, tag) in technologies.iter().enumerate() {
        if technologies[..i].contains(tag) {
            return Err(RegistryError::validation(
                "technologies",
                format!("duplicate tag: {tag}"),
            ));
        }
    }
    Ok(())
}

/// A participant name is optional, but when supplied it must not be blank.
pub fn assert_participant(participant: Option<&str>) -> Result<(), RegistryError> {
    if let Some(name) = participant {
        if name.trim().is_empty() {
            return Err(RegistryError::validation(
                "participant",
                "missing participant name",
            ));
        }
    }
    Ok(())
}
