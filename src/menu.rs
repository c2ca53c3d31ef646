use crate::input::Key;
use crate::render::{Color, Point, Rect, Renderer};

pub type PageId = usize;

pub const MENU_COLOR: Color = Color::rgb(0xCC, 0x22, 0x33);

/// What a widget asks its owner to do when triggered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    OpenPage(PageId),
    Back,
    Quit,
    SetGridSize(i32),
    SetPeriod(u32),
    Resume,
    MainMenu,
}

#[derive(Clone, Debug)]
pub enum Widget {
    Button {
        label: String,
        action: Action,
    },
    /// Cycles through its options; each trigger emits the new option's action.
    Selector {
        label: String,
        options: Vec<(String, Action)>,
        selected: Option<usize>,
    },
}

impl Widget {
    pub fn button(label: &str, action: Action) -> Self {
        Widget::Button { label: label.to_string(), action }
    }

    pub fn selector(label: &str, options: Vec<(String, Action)>, selected: Option<usize>) -> Self {
        assert!(!options.is_empty(), "selector {} has no options", label);
        Widget::Selector { label: label.to_string(), options, selected }
    }

    pub fn text(&self) -> String {
        match self {
            Widget::Button { label, .. } => label.clone(),
            Widget::Selector { label, options, selected } => {
                let choice = selected.map_or("Custom", |i| options[i].0.as_str());
                format!("{}: {}", label, choice)
            }
        }
    }

    pub fn trigger(&mut self) -> Action {
        match self {
            Widget::Button { action, .. } => *action,
            Widget::Selector { options, selected, .. } => {
                let next = selected.map_or(0, |i| (i + 1) % options.len());
                *selected = Some(next);
                options[next].1
            }
        }
    }
}

/// One screen of widgets, optionally preceded by lines of plain text.
#[derive(Clone, Debug, Default)]
pub struct MenuPage {
    lines: Vec<String>,
    widgets: Vec<Widget>,
    selection: usize,
}

impl MenuPage {
    pub fn new() -> Self {
        MenuPage::default()
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.lines.extend(text.lines().map(str::to_string));
        self
    }

    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    #[cfg(test)]
    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Up/Down move the selection around, Enter triggers it.
    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        let count = self.widgets.len();
        if count == 0 {
            return None;
        }

        match key {
            Key::Up => self.selection = (self.selection + count - 1) % count,
            Key::Down => self.selection = (self.selection + 1) % count,
            Key::Enter => return Some(self.widgets[self.selection].trigger()),
            _ => {}
        }
        None
    }

    pub fn render(&self, r: &mut dyn Renderer, origin: Point) {
        let lh = r.line_height();

        for (i, line) in self.lines.iter().enumerate() {
            r.draw_text(line, Point::new(origin.x, origin.y + i as i32 * lh), MENU_COLOR, false);
        }

        let top = if self.lines.is_empty() {
            origin.y
        } else {
            origin.y + (self.lines.len() as i32 + 1) * lh
        };

        for (i, widget) in self.widgets.iter().enumerate() {
            r.draw_text(&widget.text(), Point::new(origin.x, top + i as i32 * lh), MENU_COLOR, false);
        }

        if !self.widgets.is_empty() {
            let marker = Rect::new(origin.x - 2 * lh, top + self.selection as i32 * lh, lh, lh);
            r.fill_rect(marker, MENU_COLOR);
        }
    }
}

/// Pages live in an arena; navigation is a stack of indices into it. The
/// root page is pushed at construction and can't be popped.
#[derive(Clone, Debug)]
pub struct Menu {
    pages: Vec<MenuPage>,
    stack: Vec<PageId>,
}

impl Menu {
    pub fn new(root: MenuPage) -> Self {
        Menu { pages: vec![root], stack: vec![0] }
    }

    pub fn add_page(&mut self, page: MenuPage) -> PageId {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Needed when a page links to one that is only added later.
    pub fn page_mut(&mut self, id: PageId) -> &mut MenuPage {
        &mut self.pages[id]
    }

    pub fn push_page(&mut self, id: PageId) {
        assert!(id < self.pages.len(), "no menu page {}", id);
        self.stack.push(id);
    }

    /// Returns false, leaving the stack alone, when only the root is left.
    pub fn pop_page(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    pub fn current_id(&self) -> PageId {
        self.stack[self.stack.len() - 1]
    }

    pub fn current(&self) -> &MenuPage {
        &self.pages[self.current_id()]
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn handle_key(&mut self, key: Key) -> Option<Action> {
        let id = self.current_id();
        self.pages[id].handle_key(key)
    }

    pub fn render(&self, r: &mut dyn Renderer, origin: Point) {
        self.current().render(r, origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::RecordingRenderer;

    fn three_buttons() -> MenuPage {
        MenuPage::new()
            .with_widget(Widget::button("One", Action::Start))
            .with_widget(Widget::button("Two", Action::Back))
            .with_widget(Widget::button("Three", Action::Quit))
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut page = three_buttons();
        assert_eq!(page.handle_key(Key::Up), None);
        assert_eq!(page.selection(), 2);
        page.handle_key(Key::Down);
        assert_eq!(page.selection(), 0);
        page.handle_key(Key::Down);
        page.handle_key(Key::Down);
        page.handle_key(Key::Down);
        assert_eq!(page.selection(), 0);
    }

    #[test]
    fn enter_triggers_selected_button() {
        let mut page = three_buttons();
        page.handle_key(Key::Down);
        assert_eq!(page.handle_key(Key::Enter), Some(Action::Back));
        assert_eq!(page.handle_key(Key::Left), None);
    }

    #[test]
    fn empty_page_ignores_keys() {
        let mut page = MenuPage::new().with_text("nothing here");
        assert_eq!(page.handle_key(Key::Down), None);
        assert_eq!(page.handle_key(Key::Enter), None);
    }

    #[test]
    fn selector_cycles_and_emits_option_action() {
        let options = vec![
            ("Slow".to_string(), Action::SetPeriod(400)),
            ("Fast".to_string(), Action::SetPeriod(100)),
        ];
        let mut selector = Widget::selector("Speed", options, Some(0));
        assert_eq!(selector.text(), "Speed: Slow");

        assert_eq!(selector.trigger(), Action::SetPeriod(100));
        assert_eq!(selector.text(), "Speed: Fast");
        assert_eq!(selector.trigger(), Action::SetPeriod(400));
        assert_eq!(selector.text(), "Speed: Slow");
    }

    #[test]
    fn unmatched_selector_shows_custom_then_starts_at_first() {
        let options = vec![("Small".to_string(), Action::SetGridSize(10))];
        let mut selector = Widget::selector("Area Size", options, None);
        assert_eq!(selector.text(), "Area Size: Custom");
        assert_eq!(selector.trigger(), Action::SetGridSize(10));
        assert_eq!(selector.text(), "Area Size: Small");
    }

    #[test]
    fn page_stack_never_pops_root() {
        let mut menu = Menu::new(three_buttons());
        let sub = menu.add_page(MenuPage::new().with_widget(Widget::button("Back", Action::Back)));

        assert!(!menu.pop_page());
        assert_eq!(menu.current_id(), 0);

        menu.push_page(sub);
        assert_eq!(menu.current_id(), sub);
        assert_eq!(menu.depth(), 2);
        assert_eq!(menu.handle_key(Key::Enter), Some(Action::Back));

        assert!(menu.pop_page());
        assert_eq!(menu.current_id(), 0);
        assert!(!menu.pop_page());
        assert_eq!(menu.depth(), 1);
    }

    #[test]
    fn pages_keep_their_selection_across_navigation() {
        let mut menu = Menu::new(three_buttons());
        let sub = menu.add_page(three_buttons());
        menu.handle_key(Key::Down);
        menu.push_page(sub);
        assert_eq!(menu.current().selection(), 0);
        menu.pop_page();
        assert_eq!(menu.current().selection(), 1);
    }

    #[test]
    fn render_draws_text_widgets_and_marker() {
        let page = MenuPage::new()
            .with_text("Controls:\nESC pauses")
            .with_widget(Widget::button("Back", Action::Back));
        let mut r = RecordingRenderer::new(48);

        page.render(&mut r, Point::new(10, 4));

        assert_eq!(r.texts(), vec!["Controls:", "ESC pauses", "Back"]);
        // Two text lines plus a blank one before the first widget.
        assert_eq!(r.fills(), vec![(Rect::new(6, 10, 2, 2), MENU_COLOR)]);
    }
}
