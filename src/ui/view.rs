use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

use crate::core::Picker;

const PROMPT: &str = ": ";
const PLACEHOLDER: &str = "Search";
const NO_MATCHES: &str = "no matches";

/// Styles and display settings for the picker frame.
#[derive(Debug, Clone)]
pub struct Theme {
    pub prompt: Style,
    pub placeholder: Style,
    pub name: Style,
    pub path: Style,
    pub marker: &'static str,
    /// Collapsed to `~` when shown at the start of a path.
    pub home: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            prompt: Style::new(),
            placeholder: Style::new().dim(),
            name: Style::new().bold(),
            path: Style::new().dim(),
            marker: "> ",
            home: None,
        }
    }
}

impl Theme {
    pub fn with_home(mut self, home: Option<String>) -> Self {
        self.home = home;
        self
    }

    fn blank_marker(&self) -> String {
        " ".repeat(self.marker.chars().count())
    }
}

/// Shows `path` with a leading home directory replaced by `~`.
pub fn collapse_home(path: &str, home: Option<&str>) -> String {
    let Some(home) = home.map(|h| h.trim_end_matches('/')).filter(|h| !h.is_empty()) else {
        return path.to_string();
    };
    match path.strip_prefix(home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

/// Builds the frame for `picker`: the prompt line, then one row per match.
/// Empty once the picker has exited.
pub fn render(picker: &Picker, theme: &Theme) -> Text<'static> {
    if picker.is_exited() {
        return Text::default();
    }

    let query = picker.query().as_str();
    let prompt = if query.is_empty() {
        Line::from(vec![
            Span::styled(PROMPT, theme.prompt),
            Span::styled(PLACEHOLDER, theme.placeholder),
        ])
    } else {
        Line::from(vec![
            Span::styled(PROMPT, theme.prompt),
            Span::raw(query.to_string()),
        ])
    };

    let mut lines = vec![prompt];
    if picker.ranked().is_empty() {
        lines.push(Line::from(vec![
            Span::raw(theme.blank_marker()),
            Span::styled(NO_MATCHES, theme.placeholder),
        ]));
    }

    let blank = theme.blank_marker();
    for (i, ranked) in picker.ranked().iter().enumerate() {
        let marker = if i == picker.cursor() {
            theme.marker.to_string()
        } else {
            blank.clone()
        };
        let candidate = &ranked.candidate;
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(candidate.name.clone(), theme.name),
            Span::raw(" "),
            Span::styled(
                collapse_home(&candidate.path, theme.home.as_deref()),
                theme.path,
            ),
        ]));
    }

    Text::from(lines)
}

/// Draws [`render`] output, keeping the prompt pinned to the top row and
/// scrolling the list so the cursor row stays visible.
pub struct PickerView<'a> {
    picker: &'a Picker,
    theme: &'a Theme,
}

impl<'a> PickerView<'a> {
    pub fn new(picker: &'a Picker, theme: &'a Theme) -> Self {
        PickerView { picker, theme }
    }

    /// Where the terminal caret goes, inside the prompt line.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if self.picker.is_exited() || area.is_empty() {
            return None;
        }
        let typed = Line::from(self.picker.query().before_caret()).width();
        let x = area.x as usize + PROMPT.len() + typed;
        let max_x = area.right().saturating_sub(1) as usize;
        Some(Position::new(x.min(max_x) as u16, area.y))
    }

    fn scroll(&self, rows: u16) -> u16 {
        let cursor = u16::try_from(self.picker.cursor()).unwrap_or(u16::MAX);
        if rows == 0 || cursor < rows {
            0
        } else {
            cursor - (rows - 1)
        }
    }
}

impl Widget for PickerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut text = render(self.picker, self.theme);
        if text.lines.is_empty() || area.is_empty() {
            return;
        }

        let prompt = text.lines.remove(0);
        let prompt_area = Rect { height: 1, ..area };
        Paragraph::new(prompt).render(prompt_area, buf);

        let list_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        let offset = self.scroll(list_area.height);
        Paragraph::new(text)
            .scroll((offset, 0))
            .render(list_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Candidate, Input, WrapPolicy};
    use ratatui::style::Modifier;

    fn picker(query: &str) -> Picker {
        Picker::new(
            vec![
                Candidate::new("Projects", "/home/u/Projects"),
                Candidate::new("Photos", "/home/u/Photos"),
                Candidate::new("tmp", "/tmp"),
            ],
            query,
            WrapPolicy::default(),
        )
    }

    fn theme() -> Theme {
        Theme::default().with_home(Some("/home/u".to_string()))
    }

    fn plain(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_render_lists_all_with_marker() {
        let text = render(&picker(""), &theme());
        assert_eq!(
            plain(&text),
            vec![
                ": Search",
                "> Projects ~/Projects",
                "  Photos ~/Photos",
                "  tmp /tmp",
            ]
        );
    }

    #[test]
    fn test_render_follows_cursor() {
        let mut p = picker("");
        p.handle(Input::MoveDown);
        let lines = plain(&render(&p, &theme()));
        assert_eq!(lines[1], "  Projects ~/Projects");
        assert_eq!(lines[2], "> Photos ~/Photos");
    }

    #[test]
    fn test_render_query_and_no_matches() {
        let text = render(&picker("qqq"), &theme());
        assert_eq!(plain(&text), vec![": qqq", "  no matches"]);
    }

    #[test]
    fn test_render_exited_is_empty() {
        let mut p = picker("");
        p.handle(Input::Cancel);
        assert!(render(&p, &theme()).lines.is_empty());
    }

    #[test]
    fn test_render_styles() {
        let text = render(&picker(""), &theme());
        let row = &text.lines[1];
        assert!(row.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert!(row.spans[3].style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_render_does_not_touch_paths() {
        let p = picker("pro");
        let _ = render(&p, &theme());
        assert_eq!(p.ranked()[0].candidate.path, "/home/u/Projects");
    }

    #[test]
    fn test_collapse_home() {
        assert_eq!(collapse_home("/home/u", Some("/home/u")), "~");
        assert_eq!(collapse_home("/home/u/x", Some("/home/u/")), "~/x");
        assert_eq!(collapse_home("/home/user2/x", Some("/home/u")), "/home/user2/x");
        assert_eq!(collapse_home("/srv/home/u", Some("/home/u")), "/srv/home/u");
        assert_eq!(collapse_home("/home/u/x", None), "/home/u/x");
        assert_eq!(collapse_home("/x", Some("/")), "/x");
    }

    #[test]
    fn test_widget_renders_into_buffer() {
        let p = picker("");
        let t = theme();
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 3));
        PickerView::new(&p, &t).render(buf.area, &mut buf);

        assert_eq!(
            buffer_lines(&buf),
            vec![
                ": Search                ",
                "> Projects ~/Projects   ",
                "  Photos ~/Photos       ",
            ]
        );
        assert!(buf[(2, 1)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_widget_scrolls_to_cursor() {
        let mut p = picker("");
        p.handle(Input::MoveDown);
        p.handle(Input::MoveDown);
        let t = theme();
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 3));
        PickerView::new(&p, &t).render(buf.area, &mut buf);

        let lines = buffer_lines(&buf);
        assert_eq!(lines[0], ": Search    ");
        assert_eq!(lines[2], "> tmp /tmp  ");
    }

    #[test]
    fn test_scroll_saturates_on_huge_lists() {
        let candidates = (0..70_000)
            .map(|i| Candidate::new(format!("dir{i}"), format!("/d/{i}")))
            .collect();
        let mut p = Picker::new(candidates, "", WrapPolicy::default());
        p.handle(Input::MoveUp);
        assert_eq!(p.cursor(), 69_999);

        let t = theme();
        let view = PickerView::new(&p, &t);
        assert_eq!(view.scroll(10), u16::MAX - 9);
        assert_eq!(view.scroll(1), u16::MAX);
    }

    #[test]
    fn test_cursor_position_tracks_caret() {
        let mut p = picker("ab");
        let t = theme();
        let view = PickerView::new(&p, &t);
        assert_eq!(
            view.cursor_position(Rect::new(0, 5, 20, 4)),
            Some(Position::new(4, 5))
        );

        p.handle(Input::CaretHome);
        let view = PickerView::new(&p, &t);
        assert_eq!(
            view.cursor_position(Rect::new(0, 0, 20, 4)),
            Some(Position::new(2, 0))
        );
    }
}
