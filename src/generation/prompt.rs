//! Prompt templates for task drafting.
//!
//! Both builders are pure: identical inputs always render identical text.

use crate::models::ProjectType;

use super::tone::Tone;

/// The project fields the prompt is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub title: String,
    pub project_type: ProjectType,
    pub description: Option<String>,
}

struct Persona {
    role: &'static str,
    instruction: &'static str,
}

fn persona_for(tone: Tone) -> Persona {
    match tone {
        Tone::Creative => Persona {
            role: "creative coach",
            instruction: "Generate a creative task that will help the user get unstuck and make progress on their project. Be specific and quirky. The task should be unexpected but relevant.",
        },
        Tone::Regimen => Persona {
            role: "productivity coach",
            instruction: "Generate a focused, actionable task that will create a regular practice or regimen for the user to follow for this project. It should help build consistency and momentum.",
        },
        Tone::General => Persona {
            role: "project assistant",
            instruction: "Generate an insightful task that will help the user make meaningful progress. Be specific and practical.",
        },
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Render the task-body prompt for a project in the requested tone.
pub fn build_prompt(project: &ProjectContext, tone: Tone, hint: Option<&str>) -> String {
    let persona = persona_for(tone);

    let mut lines = vec![format!(
        "You are a {} helping with a {} project called \"{}\".",
        persona.role,
        project.project_type.as_str(),
        project.title
    )];

    if let Some(description) = non_blank(project.description.as_deref()) {
        lines.push(format!("The project is about: {}", description));
    }

    if let Some(hint) = non_blank(hint) {
        lines.push(format!("The user wants to: {}", hint));
    }

    format!("{}\n\n{}", lines.join("\n"), persona.instruction)
}

/// Render the title prompt from an already cleaned task body.
pub fn build_title_prompt(clean_body: &str) -> String {
    format!(
        "Create a short, catchy title (max 10 words) for this task: {}",
        clean_body
    )
}
