#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE_STEP: u16 = 10;

#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    fn jump(&mut self, position: u16) {
        self.position = position.min(self.max_position());
        self.scrollbar_state = self.scrollbar_state.position(self.position);
    }

    pub fn up(&mut self) {
        self.jump(self.position.saturating_sub(1));
    }

    pub fn up_page(&mut self) {
        self.jump(self.position.saturating_sub(PAGE_STEP));
    }

    pub fn down(&mut self) {
        self.jump(self.position.saturating_add(1));
    }

    pub fn down_page(&mut self) {
        self.jump(self.position.saturating_add(PAGE_STEP));
    }

    /// Called whenever a bubble is added or resolved so the newest message
    /// stays in view.
    pub fn last(&mut self) {
        self.jump(self.max_position());
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length)
            .viewport_content_length(viewport_length);

        // A shrinking list can leave the position past the end.
        self.jump(self.position);
    }
}
