//! The full console page.

use tokio::time::Instant;
use uuid::Uuid;

use crate::controller::matching::{DEFAULT_TOP_N, MAX_TOP_N};
use crate::render::cards::{candidate_card, file_row, result_card};
use crate::render::{escape, CandidateCardView, ResultCardView};
use crate::session::notifications::{Severity, DISPLAY_FOR, REMOVE_AFTER_EXIT};
use crate::session::progress::ProgressSnapshot;
use crate::session::stats::SessionStats;
use crate::session::{FileRow, Session};

const NO_CANDIDATES: &str = "No candidates uploaded yet.";
const NO_MATCHES: &str = "No matches found for this task.";

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationView {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub elapsed_ms: u128,
}

/// Everything the page shows, detached from the session lock.
#[derive(Debug, Clone)]
pub struct PageView {
    pub stats: SessionStats,
    pub progress: ProgressSnapshot,
    pub file_rows: Vec<FileRow>,
    pub candidates: Vec<CandidateCardView>,
    pub results: Option<Vec<ResultCardView>>,
    pub notifications: Vec<NotificationView>,
    pub task_description: String,
    pub top_n: u32,
}

impl PageView {
    /// Expired notifications are pruned from the session as a side effect.
    pub fn build(session: &mut Session, progress: ProgressSnapshot, now: Instant) -> Self {
        let notifications = session
            .notifications
            .live(now)
            .into_iter()
            .map(|n| NotificationView {
                id: n.id,
                severity: n.severity,
                elapsed_ms: n.elapsed(now).as_millis(),
                message: n.message,
            })
            .collect();

        let (task_description, top_n) = session
            .last_task
            .as_ref()
            .map(|t| (t.task_description.clone(), t.top_n))
            .unwrap_or_else(|| (String::new(), DEFAULT_TOP_N));

        Self {
            stats: session.stats,
            progress,
            file_rows: session.file_rows.clone(),
            candidates: session.candidates.iter().map(CandidateCardView::new).collect(),
            results: session.results.as_ref().map(|matches| {
                matches
                    .iter()
                    .enumerate()
                    .map(|(i, m)| ResultCardView::new(m, i + 1))
                    .collect()
            }),
            notifications,
            task_description,
            top_n,
        }
    }
}

pub fn stats_bar(stats: &SessionStats) -> String {
    format!(
        r#"<section class="stats">
    <div class="stat"><span id="uploadCount" class="stat-value">{}</span><span class="stat-label">Resumes uploaded</span></div>
    <div class="stat"><span id="taskCount" class="stat-value">{}</span><span class="stat-label">Tasks matched</span></div>
    <div class="stat"><span id="avgScore" class="stat-value">{}</span><span class="stat-label">Average score</span></div>
</section>"#,
        stats.upload_count, stats.task_count, stats.avg_score
    )
}

pub fn candidates_grid(candidates: &[CandidateCardView]) -> String {
    if candidates.is_empty() {
        return format!(r#"<p class="loading">{NO_CANDIDATES}</p>"#);
    }
    candidates.iter().map(candidate_card).collect()
}

/// `None` before the first match keeps the results section out of the page.
pub fn results_section(results: Option<&[ResultCardView]>) -> String {
    let Some(results) = results else {
        return String::new();
    };
    let grid: String = if results.is_empty() {
        format!(r#"<p class="loading">{NO_MATCHES}</p>"#)
    } else {
        results.iter().map(result_card).collect()
    };
    format!(
        r#"<section id="results" class="panel"><h2>Best matches</h2><div id="resultsGrid" class="grid">{grid}</div></section>"#
    )
}

fn progress_block(progress: &ProgressSnapshot) -> String {
    let hidden = if progress.visible() { "" } else { " hidden" };
    format!(
        r#"<div id="uploadProgress" class="progress"{hidden}><div class="progress-bar"><div id="progressFill" class="progress-fill" style="width: {}%"></div></div><p id="progressText">{}</p></div>"#,
        progress.percent,
        escape(&progress.label)
    )
}

fn busy_overlay(progress: &ProgressSnapshot) -> String {
    let (hidden, text) = match &progress.busy {
        Some(text) => ("", escape(text)),
        None => (" hidden", String::new()),
    };
    format!(
        r#"<div id="loadingModal" class="modal"{hidden}><div class="modal-content"><div class="spinner"></div><p id="loadingText">{text}</p></div></div>"#
    )
}

/// The exit animation is offset by the time already elapsed, so a notification
/// rendered again resumes its slide instead of restarting it.
fn notification(view: &NotificationView) -> String {
    format!(
        r#"<div id="notification-{}" class="notification notification-{}" style="animation-duration: {}ms; animation-delay: -{}ms">{}</div>"#,
        view.id,
        view.severity.as_str(),
        (DISPLAY_FOR + REMOVE_AFTER_EXIT).as_millis(),
        view.elapsed_ms,
        escape(&view.message)
    )
}

pub fn render_page(view: &PageView) -> String {
    let notifications: String = view.notifications.iter().map(notification).collect();
    let file_rows: String = view.file_rows.iter().map(file_row).collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Console</title>
    <style>{css}</style>
</head>
<body>
    <header><nav><a href="/" class="logo">Resume Match Console</a><a href="#upload">Upload</a><a href="#match">Match</a><a href="#candidates">Candidates</a></nav></header>
    <div id="notifications">{notifications}</div>
    <main>
        {stats}
        <section id="upload" class="panel">
            <h2>Upload resumes</h2>
            <form id="uploadForm" action="/upload" method="post" enctype="multipart/form-data">
                <label id="uploadArea" class="upload-area">
                    <input id="fileInput" type="file" name="files" multiple accept=".pdf,.docx,application/pdf,application/vnd.openxmlformats-officedocument.wordprocessingml.document">
                    <span>Drop PDF or DOCX files here, or click to browse</span>
                </label>
                <button type="submit">Upload</button>
            </form>
            {progress}
            <div id="uploadedFiles">{file_rows}</div>
        </section>
        <section id="match" class="panel">
            <h2>Find matches</h2>
            <form id="matchForm" action="/match" method="post">
                <textarea id="taskDescription" name="task_description" rows="5" placeholder="Describe the task...">{task}</textarea>
                <label>Candidates to return <input id="topN" type="number" name="top_n" min="1" max="{max_top_n}" value="{top_n}"></label>
                <button id="findMatchesBtn" type="submit">Find matches</button>
            </form>
        </section>
        {results}
        <section id="candidates" class="panel">
            <h2>Candidates</h2>
            <form action="/candidates/refresh" method="post"><button type="submit">Refresh</button></form>
            <div id="candidatesGrid" class="grid">{candidates}</div>
        </section>
    </main>
    {busy}
    <script>{script}</script>
</body>
</html>"##,
        css = CSS,
        notifications = notifications,
        stats = stats_bar(&view.stats),
        progress = progress_block(&view.progress),
        file_rows = file_rows,
        task = escape(&view.task_description),
        max_top_n = MAX_TOP_N,
        top_n = view.top_n,
        results = results_section(view.results.as_deref()),
        candidates = candidates_grid(&view.candidates),
        busy = busy_overlay(&view.progress),
        script = SCRIPT,
    )
}

/// Drag-and-drop onto the upload area, plus polling `/api/progress` while a form is in flight.
const SCRIPT: &str = r#"
(function () {
    var area = document.getElementById('uploadArea');
    var input = document.getElementById('fileInput');
    var form = document.getElementById('uploadForm');
    area.addEventListener('dragover', function (e) { e.preventDefault(); area.classList.add('dragover'); });
    area.addEventListener('dragleave', function () { area.classList.remove('dragover'); });
    area.addEventListener('drop', function (e) {
        e.preventDefault();
        area.classList.remove('dragover');
        input.files = e.dataTransfer.files;
        form.requestSubmit();
    });
    input.addEventListener('change', function () { if (input.files.length) { form.requestSubmit(); } });

    function poll() {
        fetch('/api/progress').then(function (r) { return r.json(); }).then(function (p) {
            var modal = document.getElementById('loadingModal');
            var bar = document.getElementById('uploadProgress');
            modal.hidden = !p.busy;
            document.getElementById('loadingText').textContent = p.busy || '';
            bar.hidden = p.percent <= 0;
            document.getElementById('progressFill').style.width = p.percent + '%';
            document.getElementById('progressText').textContent = p.label;
        }).catch(function () {}).finally(function () { setTimeout(poll, 250); });
    }
    document.querySelectorAll('form').forEach(function (f) {
        f.addEventListener('submit', function () { setTimeout(poll, 100); });
    });
})();
"#;

const CSS: &str = r#"
:root { --accent: #667eea; --muted: #666; --ok: #38a169; --err: #e53e3e; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: #f5f6fa; color: #222; }
header nav { display: flex; gap: 1.5rem; padding: 1rem 2rem; background: var(--accent); }
header a { color: #fff; text-decoration: none; }
header .logo { font-weight: 700; margin-right: auto; }
main { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
.panel { background: #fff; border-radius: 10px; padding: 1.5rem; margin-bottom: 1.5rem; box-shadow: 0 2px 8px rgba(0,0,0,.06); }
.stats { display: flex; gap: 1rem; margin-bottom: 1.5rem; }
.stat { flex: 1; background: #fff; border-radius: 10px; padding: 1rem; text-align: center; }
.stat-value { display: block; font-size: 2rem; font-weight: 700; color: var(--accent); }
.stat-label { color: var(--muted); }
.upload-area { display: block; border: 2px dashed var(--accent); border-radius: 10px; padding: 2rem; text-align: center; cursor: pointer; margin-bottom: 1rem; }
.upload-area.dragover { background: #eef0ff; }
.progress-bar { height: 8px; background: #eee; border-radius: 4px; overflow: hidden; }
.progress-fill { height: 100%; background: var(--accent); transition: width .3s; }
.file-item { display: flex; justify-content: space-between; align-items: center; padding: .5rem 0; border-bottom: 1px solid #eee; }
.file-info { display: flex; gap: .75rem; align-items: center; }
.file-details h4, .file-details p { margin: 0; }
.status-success { color: var(--ok); }
.status-error { color: var(--err); }
textarea { width: 100%; font: inherit; padding: .5rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1rem; }
.result-card, .candidate-card { border: 1px solid #eee; border-radius: 10px; padding: 1rem; }
.result-header { display: flex; justify-content: space-between; }
.candidate-name { font-weight: 700; }
.score-badge { background: var(--accent); color: #fff; border-radius: 999px; padding: 0 .75rem; }
.skill-tag { display: inline-block; background: #eef0ff; border-radius: 999px; padding: .1rem .6rem; margin: .15rem; font-size: .85rem; }
.justification { margin-top: .75rem; color: var(--muted); }
.loading { color: var(--muted); }
.modal { position: fixed; inset: 0; background: rgba(0,0,0,.35); display: flex; align-items: center; justify-content: center; }
.modal[hidden], .progress[hidden] { display: none; }
.modal-content { background: #fff; padding: 2rem; border-radius: 10px; text-align: center; }
#notifications { position: fixed; top: 20px; right: 20px; z-index: 3000; display: flex; flex-direction: column; gap: .5rem; }
.notification { padding: 1rem 1.5rem; border-radius: 10px; color: #fff; font-weight: 600; max-width: 300px;
    box-shadow: 0 5px 15px rgba(0,0,0,.2); transform: translateX(120%);
    animation-name: notification-slide; animation-timing-function: ease; animation-fill-mode: forwards; }
.notification-success { background: linear-gradient(135deg, #48bb78 0%, #38a169 100%); }
.notification-error { background: linear-gradient(135deg, #f56565 0%, #e53e3e 100%); }
@keyframes notification-slide {
    0% { transform: translateX(120%); }
    3% { transform: translateX(120%); }
    12% { transform: translateX(0); }
    91% { transform: translateX(0); }
    100% { transform: translateX(120%); }
}
"#;
