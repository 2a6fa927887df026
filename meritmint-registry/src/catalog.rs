use crate::error::RegistryError;
use crate::helpers::assert_required_fields;
use crate::state::{AchievementDraft, AchievementType, DescriptionStyle};

/// Substituted when a draft carries no technology tags at all.
const NO_TECH_PHRASE: &str = "modern development tools";

/// Hackathon-vs-otherwise variants of a flavor phrase.
#[derive(Debug, Clone)]
pub struct Conditional {
    pub hackathon: String,
    pub other: String,
}

impl Conditional {
    fn new(hackathon: &str, other: &str) -> Self {
        Self {
            hackathon: hackathon.to_string(),
            other: other.to_string(),
        }
    }

    fn pick(&self, is_hackathon: bool) -> &str {
        if is_hackathon {
            &self.hackathon
        } else {
            &self.other
        }
    }
}

/// One style's sentence skeleton plus its conditional flavor phrases.
///
/// The body may reference `{title}`, `{title_lower}`, `{type_lower}`,
/// `{role}`, `{role_phrase}`, `{tech_pair}`, `{tech_trio}`,
/// `{arena_phrase}`, `{skill_phrase}` and `{outcome_phrase}`. Phrase slots
/// may themselves embed the basic slots (e.g. `{role}` inside
/// `role_phrase`); those resolve in a second pass.
#[derive(Debug, Clone)]
pub struct StyleTemplate {
    pub body: String,
    /// Selected on a case-insensitive "team lead" role / any other role.
    pub role_phrase: (String, String),
    pub skill_phrase: Conditional,
    pub arena_phrase: Conditional,
    pub outcome_phrase: Conditional,
}

/// Immutable style-to-template table. Passed into [`generate`] by value so
/// tests can substitute their own templates.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    pub professional: StyleTemplate,
    pub technical: StyleTemplate,
    pub junior: StyleTemplate,
    pub creative: StyleTemplate,
}

impl StyleCatalog {
    pub fn template(&self, style: DescriptionStyle) -> &StyleTemplate {
        match style {
            DescriptionStyle::Professional => &self.professional,
            DescriptionStyle::Technical => &self.technical,
            DescriptionStyle::Junior => &self.junior,
            DescriptionStyle::Creative => &self.creative,
        }
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self {
            professional: StyleTemplate {
                body: "Successfully {role_phrase} in {title_lower}, demonstrating \
                       exceptional {skill_phrase} skills. Developed and deployed \
                       comprehensive solutions using {tech_pair}, showcasing \
                       proficiency in modern {arena_phrase}."
                    .to_string(),
                role_phrase: (
                    "led a cross-functional team".to_string(),
                    "contributed as {role}".to_string(),
                ),
                skill_phrase: Conditional::new(
                    "project management and technical leadership",
                    "technical and collaborative",
                ),
                arena_phrase: Conditional::new(
                    "blockchain technologies and frontend development frameworks",
                    "development technologies and best practices",
                ),
                outcome_phrase: Conditional::new("", ""),
            },
            technical: StyleTemplate {
                body: "Architected and implemented {title_lower} utilizing {tech_trio} \
                       for comprehensive development. Employed advanced {skill_phrase}, \
                       resulting in {outcome_phrase} compared to baseline \
                       implementations."
                    .to_string(),
                role_phrase: (String::new(), String::new()),
                skill_phrase: Conditional::new(
                    "smart contract patterns and gas optimization techniques",
                    "development patterns and optimization strategies",
                ),
                arena_phrase: Conditional::new("", ""),
                outcome_phrase: Conditional::new(
                    "40% reduction in transaction costs",
                    "improved performance and maintainability",
                ),
            },
            junior: StyleTemplate {
                body: "Participated in {title_lower} and successfully contributed as \
                       {role}, gaining hands-on experience with {tech_pair}. Learned \
                       to work with modern development technologies while developing \
                       valuable teamwork and problem-solving skills in a \
                       {arena_phrase} environment."
                    .to_string(),
                role_phrase: (String::new(), String::new()),
                skill_phrase: Conditional::new("", ""),
                arena_phrase: Conditional::new(
                    "fast-paced competitive",
                    "collaborative learning",
                ),
                outcome_phrase: Conditional::new("", ""),
            },
            creative: StyleTemplate {
                body: "Embarked on an {arena_phrase} with {title}, transforming \
                       innovative ideas into {outcome_phrase}. Collaborated with \
                       talented individuals to weave together {tech_pair}, creating \
                       {skill_phrase} and demonstrated the power of creative \
                       problem-solving."
                    .to_string(),
                role_phrase: (String::new(), String::new()),
                skill_phrase: Conditional::new(
                    "a solution that impressed judges",
                    "valuable learning experiences",
                ),
                arena_phrase: Conditional::new(
                    "exhilarating coding adventure",
                    "inspiring learning journey",
                ),
                outcome_phrase: Conditional::new(
                    "a prize-winning solution",
                    "practical knowledge and skills",
                ),
            },
        }
    }
}

/// Renders the description for a draft in the given style.
///
/// Pure and deterministic: no I/O, no randomness, no mutation of the draft.
/// Requires a non-empty title and role; every missing field is named in a
/// single validation error.
pub fn generate(
    draft: &AchievementDraft,
    style: DescriptionStyle,
    catalog: &StyleCatalog,
) -> Result<String, RegistryError> {
    assert_required_fields(draft)?;

    let template = catalog.template(style);
    let is_hackathon = draft.achievement_type == AchievementType::Hackathon;
    let leads = draft.role.eq_ignore_ascii_case("team lead");

    let role_phrase = if leads {
        &template.role_phrase.0
    } else {
        &template.role_phrase.1
    };

    // Phrase slots first, then basic slots, so phrases can embed {role} etc.
    let rendered = template
        .body
        .replace("{role_phrase}", role_phrase)
        .replace("{skill_phrase}", template.skill_phrase.pick(is_hackathon))
        .replace("{arena_phrase}", template.arena_phrase.pick(is_hackathon))
        .replace("{outcome_phrase}", template.outcome_phrase.pick(is_hackathon))
        .replace("{title}", &draft.title)
        .replace("{title_lower}", &draft.title.to_lowercase())
        .replace(
            "{type_lower}",
            &draft.achievement_type.as_str().to_lowercase(),
        )
        .replace("{role}", &draft.role)
        .replace("{tech_pair}", &join_technologies(&draft.technologies, 2, " and "))
        .replace("{tech_trio}", &join_technologies(&draft.technologies, 3, ", "));

    Ok(rendered)
}

fn join_technologies(technologies: &[String], limit: usize, separator: &str) -> String {
    if technologies.is_empty() {
        return NO_TECH_PHRASE.to_string();
    }
    technologies[..technologies.len().min(limit)].join(separator)
}
