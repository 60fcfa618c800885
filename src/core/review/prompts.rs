//! Prompt template bookkeeping for section generation.
//!
//! The actual prompt text lives in the remote template store; this module
//! only knows which templates each section needs, which provider writes it,
//! and how to substitute the run's values into the fetched template.

use super::models::Section;

/// Name of the shared outer prompt template in the template store.
pub const PROMPT_TEMPLATE_NAME: &str = "PromptTemplate";

/// Which generation backend writes a given section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionProvider {
    Claude,
    Grok,
}

/// Template names and provider choice for one section.
#[derive(Debug, Clone, Copy)]
pub struct SectionPlan {
    pub guidelines: &'static str,
    pub structure: &'static str,
    pub provider: SectionProvider,
}

/// Returns the fixed generation plan for a section.
pub fn plan_for(section: Section) -> SectionPlan {
    match section {
        Section::General => SectionPlan {
            guidelines: "BaseGuidelinesClaude",
            structure: "StructureTemplateGeneral",
            provider: SectionProvider::Claude,
        },
        Section::Payments => SectionPlan {
            guidelines: "BaseGuidelinesClaude",
            structure: "StructureTemplatePayments",
            provider: SectionProvider::Claude,
        },
        Section::Games => SectionPlan {
            guidelines: "BaseGuidelinesClaude",
            structure: "StructureTemplateGames",
            provider: SectionProvider::Claude,
        },
        Section::ResponsibleGambling => SectionPlan {
            guidelines: "BaseGuidelinesGrok",
            structure: "StructureTemplateResponsible",
            provider: SectionProvider::Grok,
        },
        Section::Bonuses => SectionPlan {
            guidelines: "BaseGuidelinesClaude",
            structure: "StructureTemplateBonuses",
            provider: SectionProvider::Claude,
        },
    }
}

/// Values substituted into the outer prompt template.
#[derive(Debug, Clone)]
pub struct PromptVars<'a> {
    pub casino: &'a str,
    pub section: &'a str,
    pub guidelines: &'a str,
    pub structure: &'a str,
    pub main: &'a str,
    pub top: &'a str,
    pub sim: &'a str,
    pub btc_value: &'a str,
}

/// Substitutes `{placeholder}` markers in the fetched template.
///
/// Unknown placeholders are left untouched so a template typo shows up in
/// the generated text instead of silently disappearing.
pub fn render_prompt(template: &str, vars: &PromptVars<'_>) -> String {
    template
        .replace("{casino}", vars.casino)
        .replace("{section}", vars.section)
        .replace("{guidelines}", vars.guidelines)
        .replace("{structure}", vars.structure)
        .replace("{main}", vars.main)
        .replace("{top}", vars.top)
        .replace("{sim}", vars.sim)
        .replace("{btc_value}", vars.btc_value)
}
