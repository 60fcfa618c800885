//! Section generation orchestration.
//!
//! One generation call is made per section, fanned out as concurrent tasks.
//! Results land in a map keyed by section and the final document is
//! re-assembled by walking the canonical section list, so output order never
//! depends on network timing. Every per-section failure degrades to a
//! visible placeholder; only a missing outer prompt template aborts the run.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinSet;

use crate::core::ai::{user_prompt, ChatProvider, ModelConfig};
use crate::core::review::models::{CasinoSheet, ReviewError, Section, SectionInputs};
use crate::core::review::prompts::{
    plan_for, render_prompt, PromptVars, SectionProvider, PROMPT_TEMPLATE_NAME,
};

/// Errors raised by a template store implementation.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{0}' not found")]
    NotFound(String),
    #[error("template fetch failed: {0}")]
    Fetch(String),
}

/// A remote store of named prompt/guideline/structure templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<String, TemplateError>;
}

/// A provider plus the model settings used when calling it.
#[derive(Clone)]
pub struct GenerationBackend {
    pub provider: Arc<dyn ChatProvider>,
    pub config: ModelConfig,
}

pub struct ReviewService {
    templates: Arc<dyn TemplateStore>,
    claude: GenerationBackend,
    grok: GenerationBackend,
}

impl ReviewService {
    pub fn new(
        templates: Arc<dyn TemplateStore>,
        claude: GenerationBackend,
        grok: GenerationBackend,
    ) -> Self {
        Self {
            templates,
            claude,
            grok,
        }
    }

    fn backend_for(&self, section: Section) -> GenerationBackend {
        match plan_for(section).provider {
            SectionProvider::Claude => self.claude.clone(),
            SectionProvider::Grok => self.grok.clone(),
        }
    }

    /// Generates the full review in markdown-subset form.
    ///
    /// The returned text starts with the `{casino} review` title line and
    /// contains one `**Section**` block per canonical section.
    pub async fn generate(
        &self,
        sheet: &CasinoSheet,
        btc_value: &str,
    ) -> Result<String, ReviewError> {
        let prompt_template = self
            .templates
            .fetch(PROMPT_TEMPLATE_NAME)
            .await
            .map_err(|e| ReviewError::PromptTemplate(e.to_string()))?;

        let mut tasks = JoinSet::new();
        for section in Section::ALL {
            let inputs = sheet.inputs.get(&section).cloned().unwrap_or_else(|| {
                SectionInputs {
                    main: "[No data provided]".to_string(),
                    top: String::new(),
                    similar: String::new(),
                }
            });
            let templates = Arc::clone(&self.templates);
            let backend = self.backend_for(section);
            let template = prompt_template.clone();
            let casino = sheet.casino.clone();
            let btc = btc_value.to_string();

            tasks.spawn(async move {
                let text =
                    generate_section(templates, backend, &template, &casino, section, inputs, &btc)
                        .await;
                (section, text)
            });
        }

        let mut results: HashMap<Section, String> = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((section, text)) => {
                    results.insert(section, text);
                }
                Err(e) => tracing::error!("Section generation task failed: {}", e),
            }
        }

        Ok(assemble_review(&sheet.casino, &results))
    }
}

/// Generates one section, degrading to placeholder text on any failure.
async fn generate_section(
    templates: Arc<dyn TemplateStore>,
    backend: GenerationBackend,
    prompt_template: &str,
    casino: &str,
    section: Section,
    inputs: SectionInputs,
    btc_value: &str,
) -> String {
    let plan = plan_for(section);

    let guidelines = match templates.fetch(plan.guidelines).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Missing guidelines for section {}: {}", section, e);
            return format!("[Could not fetch required files for section {}]", section);
        }
    };
    let structure = match templates.fetch(plan.structure).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Missing structure template for section {}: {}", section, e);
            return format!("[Could not fetch required files for section {}]", section);
        }
    };

    let prompt = render_prompt(
        prompt_template,
        &PromptVars {
            casino,
            section: section.title(),
            guidelines: &guidelines,
            structure: &structure,
            main: &inputs.main,
            top: &inputs.top,
            sim: &inputs.similar,
            btc_value,
        },
    );

    match backend
        .provider
        .complete(&user_prompt(&prompt), &backend.config)
        .await
    {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::error!("Generation call failed for section {}: {}", section, e);
            format!("[{} generation failed: {}]", section.title(), e)
        }
    }
}

/// Re-emits collected section texts in canonical order.
///
/// A section missing from `sections` (crashed task) still gets a block with
/// a placeholder body so the failure leaves a trace in the document.
pub fn assemble_review(casino: &str, sections: &HashMap<Section, String>) -> String {
    let mut out = vec![format!("{} review\n", casino)];
    for section in Section::ALL {
        let body = sections
            .get(&section)
            .map(String::as_str)
            .unwrap_or("[Section generation failed]");
        out.push(format!("**{}**\n{}\n", section.title(), body));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    struct StaticTemplates(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl TemplateStore for StaticTemplates {
        async fn fetch(&self, name: &str) -> Result<String, TemplateError> {
            self.0
                .get(name)
                .map(|t| t.to_string())
                .ok_or_else(|| TemplateError::NotFound(name.to_string()))
        }
    }

    struct CannedProvider {
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl ChatProvider for CannedProvider {
        async fn complete(
            &self,
            _messages: &[crate::core::ai::ChatMessage],
            _config: &ModelConfig,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err("provider unavailable".into()),
            }
        }
    }

    fn backend(reply: Option<&'static str>) -> GenerationBackend {
        GenerationBackend {
            provider: Arc::new(CannedProvider { reply }),
            config: ModelConfig::generation("test-model".to_string()),
        }
    }

    fn full_templates() -> StaticTemplates {
        let mut map = HashMap::new();
        map.insert("PromptTemplate", "Write {section} for {casino}.");
        map.insert("BaseGuidelinesClaude", "claude rules");
        map.insert("BaseGuidelinesGrok", "grok rules");
        map.insert("StructureTemplateGeneral", "s");
        map.insert("StructureTemplatePayments", "s");
        map.insert("StructureTemplateGames", "s");
        map.insert("StructureTemplateResponsible", "s");
        map.insert("StructureTemplateBonuses", "s");
        StaticTemplates(map)
    }

    #[test]
    fn assembly_follows_canonical_order() {
        let mut sections = HashMap::new();
        // Insert out of order on purpose.
        sections.insert(Section::Bonuses, "bonus text".to_string());
        sections.insert(Section::General, "general text".to_string());

        let review = assemble_review("Slotsville", &sections);
        let general = review.find("**General**").unwrap();
        let bonuses = review.find("**Bonuses**").unwrap();
        assert!(review.starts_with("Slotsville review\n"));
        assert!(general < bonuses);
        assert!(review.contains("**Payments**\n[Section generation failed]"));
    }

    #[tokio::test]
    async fn generate_places_every_section() {
        let service = ReviewService::new(
            Arc::new(full_templates()),
            backend(Some("claude wrote this")),
            backend(Some("grok wrote this")),
        );
        let sheet = CasinoSheet::from_rows("Slotsville".to_string(), &[]);

        let review = service.generate(&sheet, "1 BTC = $100.00").await.unwrap();
        assert!(review.contains("**General**\nclaude wrote this"));
        assert!(review.contains("**Responsible Gambling**\ngrok wrote this"));
        assert!(review.contains("**Bonuses**\nclaude wrote this"));
    }

    #[tokio::test]
    async fn provider_failure_leaves_placeholder() {
        let service = ReviewService::new(
            Arc::new(full_templates()),
            backend(None),
            backend(Some("grok wrote this")),
        );
        let sheet = CasinoSheet::from_rows("Slotsville".to_string(), &[]);

        let review = service.generate(&sheet, "").await.unwrap();
        assert!(review.contains("[General generation failed: provider unavailable]"));
        // The one grok-backed section still succeeds.
        assert!(review.contains("**Responsible Gambling**\ngrok wrote this"));
    }

    #[tokio::test]
    async fn missing_prompt_template_aborts() {
        let service = ReviewService::new(
            Arc::new(StaticTemplates(HashMap::new())),
            backend(Some("x")),
            backend(Some("x")),
        );
        let sheet = CasinoSheet::from_rows("Slotsville".to_string(), &[]);

        let err = service.generate(&sheet, "").await.unwrap_err();
        assert!(matches!(err, ReviewError::PromptTemplate(_)));
    }

    #[tokio::test]
    async fn missing_section_template_marks_only_that_section() {
        let mut map = HashMap::new();
        map.insert("PromptTemplate", "p");
        map.insert("BaseGuidelinesClaude", "g");
        map.insert("StructureTemplateGeneral", "s");
        map.insert("StructureTemplatePayments", "s");
        map.insert("StructureTemplateGames", "s");
        map.insert("StructureTemplateBonuses", "s");
        // Grok guidelines + responsible structure missing.
        let service = ReviewService::new(
            Arc::new(StaticTemplates(map)),
            backend(Some("ok")),
            backend(Some("ok")),
        );
        let sheet = CasinoSheet::from_rows("Slotsville".to_string(), &[]);

        let review = service.generate(&sheet, "").await.unwrap();
        assert!(review
            .contains("[Could not fetch required files for section Responsible Gambling]"));
        assert!(review.contains("**General**\nok"));
    }
}
