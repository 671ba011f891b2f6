//! Plain-text table and page controls

use std::fmt::Write;

use crate::domain::Post;
use crate::shared::PageView;

const TITLE_WIDTH: usize = 40;
const BODY_WIDTH: usize = 60;

/// Render the visible posts as an ID / Title / Body table.
pub fn render_table(view: &PageView<'_, Post>) -> String {
    if view.is_empty() {
        return "No posts.\n".to_string();
    }

    let rows: Vec<(String, String, String)> = view
        .items
        .iter()
        .map(|post| {
            (
                post.id.to_string(),
                truncate(&single_line(&post.title), TITLE_WIDTH),
                truncate(&single_line(&post.body), BODY_WIDTH),
            )
        })
        .collect();

    let id_w = column_width("ID", rows.iter().map(|r| &r.0));
    let title_w = column_width("Title", rows.iter().map(|r| &r.1));
    let body_w = column_width("Body", rows.iter().map(|r| &r.2));

    let mut out = String::new();
    let rule = format!(
        "+-{}-+-{}-+-{}-+\n",
        "-".repeat(id_w),
        "-".repeat(title_w),
        "-".repeat(body_w)
    );

    out.push_str(&rule);
    push_row(&mut out, ("ID", "Title", "Body"), (id_w, title_w, body_w));
    out.push_str(&rule);
    for (id, title, body) in &rows {
        push_row(&mut out, (id.as_str(), title.as_str(), body.as_str()), (id_w, title_w, body_w));
    }
    out.push_str(&rule);
    out
}

/// Render page numbers with the active one in brackets, plus a summary line.
///
/// `<` and `>` mark that a previous or next page exists.
pub fn render_pager(view: &PageView<'_, Post>) -> String {
    if view.total_pages == 0 {
        return "Page 0/0\n".to_string();
    }

    let mut out = String::new();
    let last_index = view.first_index() + view.items.len() - 1;
    let _ = writeln!(
        out,
        "Page {}/{} (posts {}-{} of {})",
        view.page,
        view.total_pages,
        view.first_index(),
        last_index,
        view.total
    );

    let mut controls: Vec<String> = Vec::with_capacity(view.total_pages + 2);
    if view.has_prev() {
        controls.push("<".to_string());
    }
    controls.extend((1..=view.total_pages).map(|page| {
        if page == view.page {
            format!("[{}]", page)
        } else {
            page.to_string()
        }
    }));
    if view.has_next() {
        controls.push(">".to_string());
    }
    out.push_str(&controls.join(" "));
    out.push('\n');
    out
}

pub fn render_view(view: &PageView<'_, Post>) -> String {
    format!("{}{}", render_table(view), render_pager(view))
}

fn push_row(out: &mut String, cells: (&str, &str, &str), widths: (usize, usize, usize)) {
    let _ = writeln!(
        out,
        "| {} | {} | {} |",
        pad(cells.0, widths.0),
        pad(cells.1, widths.1),
        pad(cells.2, widths.2)
    );
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a String>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

/// First line only, with a marker when more lines follow
fn single_line(value: &str) -> String {
    let mut lines = value.lines();
    let first = lines.next().unwrap_or("");
    if lines.next().is_some() {
        format!("{} ...", first)
    } else {
        first.to_string()
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PaginationParams;

    fn posts() -> Vec<Post> {
        vec![
            Post::new(1, "A", "a"),
            Post::new(2, "B", "first\nsecond"),
            Post::new(3, "C", "c"),
        ]
    }

    #[test]
    fn table_lists_visible_posts() {
        let posts = posts();
        let view = PageView::new(&posts, PaginationParams::new(1, 2));

        let table = render_table(&view);

        assert!(table.contains("| ID | Title | Body      |"));
        assert!(table.contains("| 1  | A     | a         |"));
        assert!(table.contains("| 2  | B     | first ... |"));
        assert!(!table.contains("| 3 "));
    }

    #[test]
    fn pager_marks_active_page() {
        let posts = posts();
        let view = PageView::new(&posts, PaginationParams::new(2, 2));

        assert_eq!(render_pager(&view), "Page 2/2 (posts 3-3 of 3)\n< 1 [2]\n");
    }

    #[test]
    fn pager_arrows_follow_neighbouring_pages() {
        let posts: Vec<Post> = (1..=5).map(|id| Post::new(id, "T", "b")).collect();

        let first = PageView::new(&posts, PaginationParams::new(1, 2));
        assert!(render_pager(&first).ends_with("\n[1] 2 3 >\n"));

        let middle = PageView::new(&posts, PaginationParams::new(2, 2));
        assert!(render_pager(&middle).ends_with("\n< 1 [2] 3 >\n"));

        let single = PageView::new(&posts, PaginationParams::new(1, 10));
        assert!(render_pager(&single).ends_with("\n[1]\n"));
    }

    #[test]
    fn empty_view_renders_placeholder() {
        let posts: Vec<Post> = Vec::new();
        let view = PageView::new(&posts, PaginationParams::new(1, 10));

        assert_eq!(render_view(&view), "No posts.\nPage 0/0\n");
    }

    #[test]
    fn long_text_is_truncated_by_chars() {
        let long = "é".repeat(50);
        let cut = truncate(&long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with("..."));
    }
}
