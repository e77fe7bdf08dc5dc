//! Card and row fragments.

use crate::render::{escape, CandidateCardView, ResultCardView, SkillList};
use crate::session::{FileRow, FileStatus};

fn skills_section(title: &str, skills: &SkillList) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let mut tags: String = skills
        .shown
        .iter()
        .map(|s| format!(r#"<span class="skill-tag">{}</span>"#, escape(s)))
        .collect();
    if skills.more > 0 {
        tags.push_str(&format!(
            r#"<span class="skill-tag">+{} more</span>"#,
            skills.more
        ));
    }

    format!(
        r#"<div class="skills-section"><h4>{title}</h4><div class="skills-list">{tags}</div></div>"#
    )
}

fn experience_row(experience: &str) -> String {
    format!(
        r#"<div class="candidate-details"><div class="detail-item"><span class="detail-label">Experience:</span> <span class="detail-value">{}</span></div></div>"#,
        escape(experience)
    )
}

pub fn result_card(view: &ResultCardView) -> String {
    format!(
        r#"<div class="result-card">
    <div class="result-header">
        <div class="candidate-name">#{rank} {name}</div>
        <div class="score-badge">{score}/100</div>
    </div>
    {experience}
    {technical}
    {soft}
    <div class="justification"><strong>Why this match:</strong> {justification}</div>
</div>"#,
        rank = view.rank,
        name = escape(&view.name),
        score = view.score,
        experience = experience_row(&view.experience),
        technical = skills_section("Technical Skills", &view.technical),
        soft = skills_section("Soft Skills", &view.soft),
        justification = escape(&view.justification),
    )
}

pub fn candidate_card(view: &CandidateCardView) -> String {
    format!(
        r#"<div class="candidate-card">
    <h3>{name}</h3>
    <div class="candidate-summary">{summary}</div>
    {experience}
    {technical}
    {soft}
</div>"#,
        name = escape(&view.name),
        summary = escape(&view.summary),
        experience = experience_row(&view.experience),
        technical = skills_section("Technical Skills", &view.technical),
        soft = skills_section("Soft Skills", &view.soft),
    )
}

pub fn file_row(row: &FileRow) -> String {
    let (icon, class, status) = match row.status {
        FileStatus::Success => ("&#128196;", "status-success", "success"),
        FileStatus::Error => ("&#9888;", "status-error", "error"),
    };
    format!(
        r#"<div class="file-item">
    <div class="file-info">
        <span class="file-icon">{icon}</span>
        <div class="file-details"><h4>{name}</h4><p>{message}</p></div>
    </div>
    <span class="file-status {class}" title="{at}">{status}</span>
</div>"#,
        name = escape(&row.file_name),
        message = escape(&row.message),
        at = row.at.format("%H:%M:%S UTC"),
    )
}
