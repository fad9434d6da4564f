use siglost_morse::{MarkKind, RenderableMark};

use crate::panel::RadioPanel;

const BAR_GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
/// Trail cells kept on screen; older marks scroll off the left.
const TRAIL_CELLS: usize = 40;

/// One console line: lamp, Morse trail, bar meter and static row.
pub fn render_line(panel: &RadioPanel) -> String {
    let display = panel.display();
    let lamp = match display.active_mark() {
        Some(MarkKind::Dot) => '•',
        Some(MarkKind::Dash) => '▬',
        None if display.is_gated() => 'x',
        None => '○',
    };

    let marks: Vec<RenderableMark> = display.renderable_marks().collect();
    format!(
        "{:6.2}s {:3.0}% [{}] {:<width$} |{}| {}",
        panel.time(),
        panel.strength() * 100.0,
        lamp,
        trail(&marks),
        bars(panel.meter()),
        static_row(panel),
        width = TRAIL_CELLS,
    )
}

/// Marks drawn with their configured width (in cells), brightest last.
fn trail(marks: &[RenderableMark]) -> String {
    let mut cells: Vec<char> = Vec::new();
    for mark in marks {
        let glyph = match (mark.kind, mark.alpha * mark.strength) {
            (_, shade) if shade < 0.2 => '·',
            (MarkKind::Dot, _) => '.',
            (MarkKind::Dash, _) => '-',
        };
        let width = mark.width.round().clamp(1.0, TRAIL_CELLS as f32) as usize;
        cells.extend(std::iter::repeat(glyph).take(width));
        cells.push(' ');
    }
    let skip = cells.len().saturating_sub(TRAIL_CELLS);
    cells[skip..].iter().collect()
}

fn bars(levels: &[f32]) -> String {
    let top = (BAR_GLYPHS.len() - 1) as f32;
    levels
        .iter()
        .map(|&level| BAR_GLYPHS[(level.clamp(0.0, 1.0) * top).round() as usize])
        .collect()
}

fn static_row(panel: &RadioPanel) -> String {
    let field = panel.field();
    let trace = panel.wave_trace();
    (0..field.width())
        .map(|x| {
            if let Some(offset) = trace.as_ref().and_then(|t| t.get(x as usize)) {
                if *offset > 0.0 {
                    return '~';
                }
            }
            match field.pixel(x, 0, panel.strength()) {
                Some(alpha) if alpha > 0.4 => '#',
                Some(_) => ':',
                None => ' ',
            }
        })
        .collect()
}
