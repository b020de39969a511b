//! # Tasbih Ticker
//!
//! Decorative marquee along the bottom edge cycling dhikr phrases. The
//! scroll position is a pure function of wall-clock time, so the panel
//! just repaints and never holds animation state.

use eframe::egui;

use crate::ui::components::theme::colors;

const TASBIH_PHRASES: [&str; 12] = [
    "سبحان الله",
    "الحمد لله",
    "لا إله إلا الله",
    "الله أكبر",
    "سبحان الله وبحمده",
    "سبحان الله العظيم",
    "أستغفر الله العظيم وأتوب إليه",
    "لا حول ولا قوة إلا بالله العلي العظيم",
    "اللهم صل وسلم على نبينا محمد",
    "رضيت بالله رباً وبالإسلام ديناً وبمحمد صلى الله عليه وسلم نبياً",
    "اللهم إنك عفو تحب العفو فاعف عنا",
    "ربنا آتنا في الدنيا حسنة وفي الآخرة حسنة وقنا عذاب النار",
];

const SCROLL_SPEED: f32 = 30.0; // points per second

pub fn render_ticker(ui: &mut egui::Ui) {
    let rect = ui.max_rect();
    let painter = ui.painter_at(rect);

    let text = TASBIH_PHRASES.join("  ۞  ");
    let galley = painter.layout_no_wrap(
        text,
        egui::FontId::new(15.0, egui::FontFamily::Proportional),
        colors::AMBER_LIGHT,
    );
    let band = galley.size().x + 80.0;

    let time = ui.input(|i| i.time) as f32;
    let offset = (time * SCROLL_SPEED) % band;

    // Arabic reads right to left, so the band drifts rightwards. Two
    // copies make the loop seamless.
    let y = rect.center().y - galley.size().y / 2.0;
    for copy in 0..2 {
        let x = rect.right() - band + offset - (copy as f32) * band;
        painter.galley(egui::pos2(x, y), galley.clone(), colors::AMBER_LIGHT);
    }

    ui.ctx().request_repaint();
}
