use ratatui::{prelude::*, widgets::*};
use reader_core::profile::AuthorProfile;

use super::format_list_line;
use crate::layout::centered_column;

pub struct ProfileView {
    pub profile: AuthorProfile,
    pub scroll: u16,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            profile: AuthorProfile::sample(),
            scroll: 0,
        }
    }
}

impl ProfileView {
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let p = &self.profile;
        let name = if p.verified {
            format!("{} ✓", p.display_name)
        } else {
            p.display_name.clone()
        };
        let mut lines = vec![
            Line::from(name).bold(),
            Line::from(p.handle.clone()).dim(),
            Line::from(format!("Level {} · Rank #{} · {}", p.level, p.rank, p.author_rank)),
            Line::default(),
            Line::from(format!(
                "Total sales: {}   Revenue: {} USDC",
                p.total_sales, p.total_revenue
            )),
            Line::default(),
            Line::from("Achievements").bold(),
        ];
        for a in &p.achievements {
            lines.push(Line::from(format_list_line(&a.title, &a.unlocked_at, width)));
            lines.push(Line::from(format!("  {}", a.description)).dim());
        }
        lines.push(Line::default());
        lines.push(Line::from("Published books").bold());
        for t in &p.published {
            let right = format!("{} sold · {} USDC", t.sales, t.revenue);
            lines.push(Line::from(format_list_line(&t.title, &right, width)));
        }
        lines
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, column_width: u16) {
        let centered = centered_column(area, column_width);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Profile (j/k scroll, Esc back)");
        let inner = block.inner(centered);
        f.render_widget(Clear, centered);
        f.render_widget(
            Paragraph::new(self.lines(inner.width as usize))
                .block(block)
                .scroll((self.scroll, 0)),
            centered,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_achievements_and_titles() {
        let view = ProfileView::default();
        let lines: Vec<String> = view.lines(40).iter().map(|l| l.to_string()).collect();
        assert_eq!(lines[0], "John Doe ✓");
        assert!(lines.contains(&"Level 5 · Rank #3 · Master Storyteller".to_string()));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("The Great Adventure") && l.ends_with("75 sold · 1500 USDC")));
        assert!(lines.iter().any(|l| l == "  Reached 100+ book sales"));
    }
}
