//! Extract the parts of a job description that the skills field is
//! compared against.

const SKILL_MARKERS: &[&str] = &["skills", "technologies", "requirements", "experience with"];

/// Lines of the job description mentioning skills or technologies.
/// Falls back to the full text when no line qualifies.
pub fn skills_section(job_description: &str) -> String {
    section(job_description, SKILL_MARKERS)
}

fn section(text: &str, markers: &[&str]) -> String {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            markers.iter().any(|m| lower.contains(m))
        })
        .collect();
    if lines.is_empty() {
        text.to_string()
    } else {
        lines.join("\n")
    }
}
