use crate::context::WindowUi;

impl WindowUi<'_> {
    /// A static line of text.
    pub fn text(&mut self, text: &str) {
        let size = self.painter.measure_text(text, self.style.font_size);
        let rect = self.allocate(size);
        let color = self.style.text_color;
        self.painter.text(text, self.style.font_size, color, rect.origin);
    }
}
