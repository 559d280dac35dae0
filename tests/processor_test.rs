//! End-to-end tests for the processing pipeline.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use pmstd::content::ContentExtractor;
use pmstd::{
    BatchSummary, ConverterRegistry, PatternKind, ProcessOptions, ProcessedDocument, Processor,
    SectionType, StandardType,
};

const INTRO: &str = "# Introduction\nThis is the intro.\n\n## 1.1 Background\n\
    Some background text with more than ten words in total for scoring purposes here now.";

fn sample_document() -> String {
    let mut text = String::from("PMBOK Guide Seventh Edition\nVersion 7.0\n\n");
    text.push_str("# Chapter 1 Introduction\n");
    text.push_str("The standard describes principles. See Section 2.1 and Appendix X.\n\n");
    text.push_str("## 2.1 Stakeholder Performance Domain\n");
    text.push_str(
        "The stakeholder performance domain addresses activities and functions \
         associated with stakeholders.\n",
    );
    text.push_str("See Section 4.2, Figure 2-1 and Table 2-2.\n");
    text.push_str("| Stakeholder | Role |\n| --- | --- |\n| Sponsor | Funding |\n\n");
    text.push_str("### 2.1.1 Engagement\nShort.\n");
    text.push_str("# Appendix X1 Contributors\nNames of the contributors and reviewers.\n");
    text.push_str("# Glossary\nTerm: definition of the term used across the standard.\n");
    text.push_str("# Introduction\nRepeated title with different content.\n");
    text
}

fn process(name: &str, text: &str, options: ProcessOptions) -> ProcessedDocument {
    Processor::new(options).unwrap().process_text(name, text, 12)
}

#[test]
fn test_introduction_and_background() {
    let doc = process("guide.md", INTRO, ProcessOptions::default());

    assert_eq!(doc.metadata.standard_type, StandardType::Unknown);
    assert_eq!(doc.sections.len(), 2);

    let first = &doc.sections[0].metadata;
    assert_eq!(first.level, 1);
    assert_eq!(first.section_type, SectionType::Section);
    assert!(first.section_id.starts_with("unknown000"));

    // "1.1 Background" has a single period, so it is not a subsection
    let second = &doc.sections[1].metadata;
    assert_eq!(second.level, 2);
    assert_eq!(second.title, "1.1 Background");
    assert_eq!(second.section_type, SectionType::Section);
    assert_eq!(second.section_id, "unknown00111_background");
}

#[test]
fn test_table_and_figure_body() {
    let extractor = ContentExtractor::new().unwrap();
    let body = "| A | B |\n| 1 | 2 |\n\nFigure 3: A diagram";

    let tables = extractor.tables(body);
    let figures = extractor.figures(body);

    assert_eq!(tables.len(), 1);
    assert_eq!(figures.len(), 1);
    assert_eq!(figures[0].number, "3");
    assert_eq!(figures[0].description, "A diagram");
}

#[test]
fn test_whitespace_only_body() {
    let doc = process("guide.md", "# Blank Section\n   \n\t", ProcessOptions::default());

    assert_eq!(doc.sections.len(), 1);
    let section = &doc.sections[0];
    assert_eq!(section.quality_score, 0.0);
    assert!(section.content.is_empty());
    assert!(section.tables.is_empty());
    assert!(section.figures.is_empty());
}

#[test]
fn test_zero_blocks() {
    let doc = process("guide.md", "no headers in this export\nat all", ProcessOptions::default());

    assert!(doc.sections.is_empty());
    assert!(doc.table_of_contents.is_empty());
    let stats = &doc.processing_stats;
    assert_eq!(stats.total_sections, 0);
    assert_eq!(stats.valid_sections, 0);
    assert_eq!(stats.average_quality_score, 0.0);
    assert_eq!(stats.success_rate, 0.0);
}

#[test]
fn test_pmbok_document_structure() {
    let doc = process("PMBOK_Guide_7th.pdf", &sample_document(), ProcessOptions::default());

    assert_eq!(doc.metadata.standard_type, StandardType::Pmbok);
    assert_eq!(doc.metadata.title, "PMBOK Guide Seventh Edition");
    assert_eq!(doc.metadata.version, "7.0");
    assert_eq!(doc.metadata.total_pages, 12);
    assert_eq!(doc.metadata.organizational_pattern, "domain_based");
    assert!(doc
        .metadata
        .extraction_challenges
        .contains(&"Performance domain cross-references need mapping".to_string()));

    let types: Vec<SectionType> = doc.sections.iter().map(|s| s.metadata.section_type).collect();
    assert_eq!(
        types,
        vec![
            SectionType::Chapter,
            SectionType::Table,
            SectionType::Subsection,
            SectionType::Appendix,
            SectionType::Glossary,
            SectionType::Section,
        ]
    );

    let domain = &doc.sections[1];
    assert_eq!(domain.metadata.level, 2);
    assert_eq!(domain.metadata.section_number.as_deref(), Some("2.1"));
    assert_eq!(domain.metadata.pattern_kind, Some(PatternKind::NumberedSection));
    assert_eq!(domain.metadata.cross_references, vec!["2-1", "2-2", "4.2"]);
    assert_eq!(domain.tables.len(), 1);
    assert_eq!(domain.tables[0].row_count(), 3);

    let chapter = &doc.sections[0];
    assert_eq!(chapter.metadata.pattern_kind, Some(PatternKind::Chapter));
    assert_eq!(chapter.metadata.section_number.as_deref(), Some("Chapter 1"));
    assert_eq!(chapter.metadata.cross_references, vec!["2.1", "X"]);

    assert_eq!(doc.processing_stats.total_tables, 1);
    assert_eq!(doc.processing_stats.skipped_blocks, 0);
}

#[test]
fn test_parent_and_pages_are_never_set() {
    let doc = process("PMBOK.md", &sample_document(), ProcessOptions::default());
    for section in &doc.sections {
        assert_eq!(section.metadata.parent_section_id, None);
        assert_eq!(section.metadata.page_start, None);
        assert_eq!(section.metadata.page_end, None);
    }
}

#[test]
fn test_toc_is_subset_of_sections() {
    let doc = process("PMBOK.md", &sample_document(), ProcessOptions::default());

    assert!(doc.table_of_contents.len() <= doc.sections.len());
    for entry in &doc.table_of_contents {
        let section = doc.section(&entry.section_id).expect("toc entry has a section");
        assert!(section.metadata.section_type.is_outline());
        assert!(section.quality_score > 0.3);
    }
}

#[test]
fn test_scores_are_bounded() {
    let doc = process("PMBOK.md", &sample_document(), ProcessOptions::default());
    for section in &doc.sections {
        assert!((0.0..=1.0).contains(&section.quality_score));
        if section.content.trim().is_empty() {
            assert_eq!(section.quality_score, 0.0);
        }
    }
}

#[test]
fn test_section_ids_unique() {
    let doc = process("PMBOK.md", &sample_document(), ProcessOptions::default());

    let ids: HashSet<&str> = doc
        .sections
        .iter()
        .map(|s| s.metadata.section_id.as_str())
        .collect();
    assert_eq!(ids.len(), doc.sections.len());

    let repeated: Vec<_> = doc
        .sections
        .iter()
        .filter(|s| s.metadata.title == "Introduction")
        .collect();
    assert_eq!(repeated.len(), 1);
    assert_eq!(repeated[0].metadata.section_id, "pmbok005introduction");
}

#[test]
fn test_repeated_titles_get_distinct_ids() {
    let doc = process("notes.md", "# Scope\nFirst.\n# Scope\nSecond.", ProcessOptions::default());

    assert_eq!(doc.sections[0].metadata.section_id, "unknown000scope");
    assert_eq!(doc.sections[1].metadata.section_id, "unknown001scope");
}

#[test]
fn test_processing_is_deterministic() {
    let text = sample_document();
    let first = process("PMBOK.md", &text, ProcessOptions::default());
    let second = process("PMBOK.md", &text, ProcessOptions::default());

    assert_eq!(first.sections, second.sections);
    assert_eq!(first.table_of_contents, second.table_of_contents);
    assert_eq!(first.processing_stats, second.processing_stats);
}

#[test]
fn test_parallel_matches_sequential() {
    let text = sample_document().repeat(20);
    let sequential = process("PMBOK.md", &text, ProcessOptions::new().sequential());
    let parallel = process("PMBOK.md", &text, ProcessOptions::new().with_parallel(true));

    assert_eq!(sequential.sections, parallel.sections);
    assert_eq!(sequential.table_of_contents, parallel.table_of_contents);
    assert_eq!(sequential.processing_stats, parallel.processing_stats);
}

#[test]
fn test_json_field_names() {
    let doc = process("guide.md", INTRO, ProcessOptions::default());
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["metadata"]["standard_type"], "UNKNOWN");
    assert!(value["metadata"]["processing_date"].is_string());
    assert_eq!(value["sections"][0]["metadata"]["section_type"], "section");
    assert!(value["sections"][0]["metadata"]["parent_section_id"].is_null());
    assert_eq!(value["processing_stats"]["total_sections"], 2);
    assert!(value["table_of_contents"].is_array());
}

#[test]
fn test_batch_continues_past_failed_document() {
    let dir = tempfile::tempdir().unwrap();
    let pmbok = dir.path().join("pmbok7.md");
    let iso = dir.path().join("iso21502.md");
    fs::write(&pmbok, "# Scope\nThe guide covers delivery.\n# Terms\nNone.").unwrap();
    fs::write(&iso, "# 4 Governance\nSee Clause 4.2.").unwrap();

    let paths: Vec<PathBuf> = vec![pmbok.clone(), dir.path().join("missing.md"), iso.clone()];
    let processor = Processor::new(ProcessOptions::default()).unwrap();
    let entries = processor.process_batch(&paths, &ConverterRegistry::with_defaults());

    let outcomes: Vec<bool> = entries.iter().map(|e| e.is_success()).collect();
    assert_eq!(outcomes, vec![true, false, true]);
    let order: Vec<&PathBuf> = entries.iter().map(|e| &e.path).collect();
    assert_eq!(order, paths.iter().collect::<Vec<_>>());

    let standards: Vec<StandardType> = entries
        .iter()
        .filter_map(|e| e.result.as_ref().ok())
        .map(|doc| doc.metadata.standard_type)
        .collect();
    assert_eq!(standards, vec![StandardType::Pmbok, StandardType::Iso]);

    let summary = BatchSummary::from_entries(&entries);
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total_sections, 3);
}
