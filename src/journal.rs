//! Markdown journal output.

use crate::pipeline::RunResult;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for a run, e.g. `2026-10-18_213000_kst.md`
pub fn file_name(result: &RunResult) -> String {
    let timestamp = &result.meta.timestamp;
    format!(
        "{}_{}.md",
        timestamp.format("%Y-%m-%d_%H%M%S"),
        timestamp.format("%Z").to_string().to_lowercase()
    )
}

/// Render the full journal document
pub fn render(result: &RunResult) -> String {
    let meta = &result.meta;
    let mut md = vec![
        "---".to_string(),
        "title: Philosophical Journal".to_string(),
        format!("created: {}", meta.timestamp.to_rfc3339()),
        format!("timezone: {}", meta.timezone.name()),
        format!("models_tried: [{}]", meta.models_tried.join(", ")),
        format!("dry_run: {}", meta.dry_run),
        "---\n".to_string(),
        "# Question (English)\n".to_string(),
        format!("{}\n", result.question_en),
    ];

    for block in &result.blocks {
        md.push(format!("## {}", block.language));
        md.push(format!(
            "**Translated prompt:**\n\n{}\n",
            block.question_translated
        ));
        md.push(format!(
            "**Answer in {}:**\n\n{}\n",
            block.language, block.answer_in_language
        ));
        md.push(format!(
            "**Back-translation (English):**\n\n{}\n",
            block.answer_back_to_english
        ));
    }

    md.push("## Synthesis (English)\n".to_string());
    md.push(format!("{}\n", result.synthesis_en));

    md.join("\n")
}

/// Write the journal into `output_dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn save(result: &RunResult, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    let path = output_dir.join(file_name(result));
    fs::write(&path, render(result))
        .with_context(|| format!("Failed to write journal {}", path.display()))?;

    info!("Saved journal to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{LanguageBlock, RunMetadata};
    use chrono::TimeZone;

    fn sample_result() -> RunResult {
        let timezone = chrono_tz::Asia::Seoul;
        RunResult {
            question_en: "What is freedom?".to_string(),
            meta: RunMetadata {
                timestamp: timezone.with_ymd_and_hms(2026, 10, 18, 21, 30, 5).unwrap(),
                timezone,
                models_tried: vec!["gpt-5".to_string(), "gpt-4.1".to_string()],
                dry_run: true,
            },
            blocks: vec![
                LanguageBlock {
                    language: "English".to_string(),
                    code: "en".to_string(),
                    question_translated: "What is freedom?".to_string(),
                    answer_in_language: "Freedom is responsibility.".to_string(),
                    answer_back_to_english: "Freedom is responsibility.".to_string(),
                },
                LanguageBlock {
                    language: "German".to_string(),
                    code: "de".to_string(),
                    question_translated: "Was ist Freiheit?".to_string(),
                    answer_in_language: "Freiheit ist Verantwortung.".to_string(),
                    answer_back_to_english: "Freedom is responsibility.".to_string(),
                },
            ],
            synthesis_en: "Both agree.".to_string(),
        }
    }

    #[test]
    fn test_file_name_uses_local_time_and_zone() {
        assert_eq!(file_name(&sample_result()), "2026-10-18_213005_kst.md");
    }

    #[test]
    fn test_file_name_other_zone() {
        let mut result = sample_result();
        let timezone = chrono_tz::Tz::UTC;
        result.meta.timestamp = timezone.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        result.meta.timezone = timezone;
        assert_eq!(file_name(&result), "2026-01-02_030405_utc.md");
    }

    #[test]
    fn test_render_front_matter() {
        let md = render(&sample_result());
        assert!(md.starts_with("---\ntitle: Philosophical Journal\n"));
        assert!(md.contains("created: 2026-10-18T21:30:05+09:00"));
        assert!(md.contains("timezone: Asia/Seoul"));
        assert!(md.contains("models_tried: [gpt-5, gpt-4.1]"));
        assert!(md.contains("dry_run: true"));
    }

    #[test]
    fn test_render_sections_in_order() {
        let md = render(&sample_result());

        let question = md.find("# Question (English)\n\nWhat is freedom?").unwrap();
        let english = md.find("## English").unwrap();
        let german = md.find("## German").unwrap();
        let synthesis = md.find("## Synthesis (English)\n\nBoth agree.").unwrap();

        assert!(question < english);
        assert!(english < german);
        assert!(german < synthesis);
    }

    #[test]
    fn test_render_block_fields() {
        let md = render(&sample_result());
        assert!(md.contains("**Translated prompt:**\n\nWas ist Freiheit?\n"));
        assert!(md.contains("**Answer in German:**\n\nFreiheit ist Verantwortung.\n"));
        assert!(md.contains("**Back-translation (English):**\n\nFreedom is responsibility.\n"));
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("nested").join("journal");

        let path = save(&sample_result(), &output_dir).unwrap();

        assert_eq!(path, output_dir.join("2026-10-18_213005_kst.md"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&sample_result()));
    }
}
