use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use tracing::info;

use crate::domain::SkillsReport;
use crate::error::CleanupError;
use crate::normalize::skill::SkillNormalizer;

/// Column consumed from the input file and written to the output file.
pub const SKILLS_COLUMN: &str = "skills";

/// Reads raw skills from `input`, deduplicates them, and writes the sorted
/// unique set to `output`.
///
/// The output file is only created once the whole input has been read and
/// processed, so a failing run leaves no partial output behind. A missing
/// `skills` column is a fatal error for this job.
pub fn run_skills_cleanup(
    input: &Path,
    output: &Path,
    normalizer: &SkillNormalizer,
) -> anyhow::Result<SkillsReport> {
    let started = Instant::now();
    info!(input = %input.display(), "Starting skills cleanup");

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("Failed to open input file '{}'", input.display()))?;

    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|header| header == SKILLS_COLUMN)
        .ok_or_else(|| CleanupError::MissingColumn(SKILLS_COLUMN.to_string()))?;

    let mut raw_skills = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Short rows read as an empty skill, which the validity filter drops
        raw_skills.push(record.get(column).unwrap_or("").to_string());
    }
    let total_rows = raw_skills.len() as u64;
    info!(total_rows, "Read raw skills from input");

    let mut unique = normalizer.dedupe(&raw_skills);
    unique.sort();
    info!(
        unique_skills = unique.len(),
        dropped = total_rows - unique.len() as u64,
        "Deduplicated skills"
    );

    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create output file '{}'", output.display()))?;
    writer.write_record([SKILLS_COLUMN])?;
    for skill in &unique {
        writer.write_record([skill.as_str()])?;
    }
    writer.flush()?;

    let report = SkillsReport {
        total_rows,
        unique_skills: unique.len() as u64,
        execution_time: started.elapsed().as_secs_f64(),
        output_file: output.display().to_string(),
    };
    info!(
        unique_skills = report.unique_skills,
        output = %report.output_file,
        "Skills cleanup finished"
    );
    Ok(report)
}
