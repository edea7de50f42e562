//! Console rendering of a session.

use storyboard::{
    Animatic, BatchReport, SceneSession, SessionEvent, SessionObserver, ShotStatus,
};

/// Prints one line per finished shot and per batch step.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressPrinter;

impl SessionObserver for ProgressPrinter {
    fn on_event(&self, event: &SessionEvent, session: &SceneSession) {
        match event {
            SessionEvent::GenerationSucceeded { ticket, .. } => {
                println!("  ✓ {}", ticket.shot_id());
            }
            SessionEvent::GenerationFailed { message, .. } => {
                println!("  ✗ {}", message);
            }
            SessionEvent::BatchProgressed { completed, total } => {
                println!("  [{}/{}] {:.0}%", completed, total, session.progress());
            }
            _ => {}
        }
    }
}

/// Print the story one segment per paragraph, tagged with its shot.
pub fn print_story(session: &SceneSession) {
    println!("\n=== Story ===\n");
    for segment in session.narrative() {
        match (segment.resolve(session.shots()), segment.shot_ref()) {
            (Some(shot), _) => println!("[{} · {}]", shot.id(), shot.title()),
            (None, Some(id)) => println!("[{} · unknown shot]", id),
            (None, None) => {}
        }
        println!("{}\n", segment.text());
    }
}

/// Print the shot table.
pub fn print_shots(session: &SceneSession) {
    println!("=== Shotlist ===\n");
    println!(
        "{:<8} {:<10} {:<22} {:<20} {:>6}",
        "ID", "STATUS", "TITLE", "TYPE", "SECS"
    );
    for shot in session.shots() {
        println!(
            "{:<8} {:<10} {:<22} {:<20} {:>6.1}",
            shot.id(),
            status_label(*shot.status()),
            truncate(shot.title(), 22),
            truncate(shot.shot_type(), 20),
            shot.duration_seconds()
        );
    }
    println!();
}

/// Print the outcome of a batch run.
pub fn print_report(report: &BatchReport, session: &SceneSession) {
    println!(
        "\nGenerated {} of {} shots ({} failed)",
        report.succeeded(),
        report.attempted(),
        report.failed()
    );
    if let Some(error) = session.error() {
        println!("Last error: {}", error);
    }
    let animatic = Animatic::from_shots(session.shots());
    if !animatic.is_empty() {
        println!(
            "Animatic: {} frames, {:.1}s",
            animatic.len(),
            animatic.total_duration().as_secs_f64()
        );
    }
}

fn status_label(status: ShotStatus) -> &'static str {
    match status {
        ShotStatus::Pending => "pending",
        ShotStatus::Generating => "running",
        ShotStatus::Success => "done",
        ShotStatus::Failed => "failed",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
