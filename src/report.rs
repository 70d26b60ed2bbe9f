// ============================================================================
// REPORT.RS - Terminal Rendering
// ============================================================================
//
// Text versions of the editor view and the walkthrough panels, shared by
// both binaries. Everything returns a String; printing is left to the caller.
// ============================================================================

use crate::animation::AnimationController;
use crate::editor::EditorSession;

const BAR_WIDTH: usize = 30;

/// "x[n] = [1.000, 2.000, 1.000]"
pub fn signal_line(symbol: &str, values: &[f64]) -> String {
    let body: Vec<String> = values.iter().map(|v| format!("{:.3}", v)).collect();
    format!("{} = [{}]", symbol, body.join(", "))
}

/// The three signals, the selection marker, and the status line
pub fn render_editor(session: &EditorSession) -> String {
    let marker = |selected: bool| if selected { ">" } else { " " };
    let editing_x = session.current == crate::editor::SignalId::X;

    format!(
        "{} {}\n{} {}\n  {}   (length {})\n  {}",
        marker(editing_x),
        signal_line("x[n]", session.x()),
        marker(!editing_x),
        signal_line("h[n]", session.h()),
        signal_line("y[n]", session.y()),
        session.y().len(),
        session.status
    )
}

/// "[###########-------------------] 37%"
pub fn progress_bar(percent: usize) -> String {
    let filled = percent.min(100) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent.min(100)
    )
}

/// The current walkthrough step: label, equations, products, and the output
/// so far with pending samples shown as dots.
pub fn render_step(anim: &AnimationController) -> String {
    let frame = anim.frame();
    let n = frame.n;

    let kernel: Vec<String> = frame
        .kernel
        .iter()
        .map(|(k, v)| format!("k={}: {:.3}", k, v))
        .collect();

    let products: Vec<String> = frame
        .state
        .contributing()
        .iter()
        .map(|(k, p)| format!("k={}: {:.3}", k, p))
        .collect();

    let mut output: Vec<String> = frame
        .computed
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i == n {
                format!("*{:.3}*", v)
            } else {
                format!("{:.3}", v)
            }
        })
        .collect();
    output.extend(((n + 1)..frame.output_length).map(|_| ".".to_string()));

    let mut lines = vec![
        frame.step_label(),
        format!("  {}", signal_line("x[k]", anim.x())),
        format!("  h[{}-k]: {}", n, kernel.join(", ")),
    ];
    if products.is_empty() {
        lines.push("  products: (no overlap)".to_string());
    } else {
        lines.push(format!("  products: {}", products.join(", ")));
    }
    lines.push(format!("  {}", frame.expanded_equation(anim.x(), anim.h())));
    lines.push(format!("  y[n] so far: [{}]", output.join(", ")));
    lines.push(format!("  {}", progress_bar(anim.progress_percent())));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_line_uses_three_decimals() {
        assert_eq!(signal_line("h[n]", &[0.5, 0.25]), "h[n] = [0.500, 0.250]");
        assert_eq!(signal_line("y[n]", &[]), "y[n] = []");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), format!("[{}] 0%", "-".repeat(30)));
        assert_eq!(progress_bar(50), format!("[{}{}] 50%", "#".repeat(15), "-".repeat(15)));
        assert_eq!(progress_bar(250), format!("[{}] 100%", "#".repeat(30)));
    }

    #[test]
    fn editor_view_marks_selection() {
        let mut session = EditorSession::default();
        let text = render_editor(&session);
        assert!(text.starts_with("> x[n] = [1.000, 2.000, 1.000"));
        assert!(text.contains("(length 13)"));

        session.select(crate::editor::SignalId::H);
        let text = render_editor(&session);
        assert!(text.contains("> h[n] = [0.500"));
    }

    #[test]
    fn step_view_highlights_current_and_hides_pending() {
        let mut anim = AnimationController::new(&[1.0, 2.0, 1.0], &[0.5, 0.3, 0.2]);
        anim.go_to(1);
        let text = render_step(&anim);

        assert!(text.starts_with("Step 2/5: Computing y[1]"));
        assert!(text.contains("products: k=0: 0.300, k=1: 1.000"));
        assert!(text.contains("y[n] so far: [0.500, *1.300*, ., ., .]"));
        assert!(text.contains("] 25%"));
    }
}
