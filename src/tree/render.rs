use crate::tree::TreeRow;

/// Renders flattened rows as an indented plain-text outline
///
/// Each line carries a selection marker (`[x]`, `[-]`, `[ ]`), an expansion
/// marker for nodes with children, the segment name, and the URL counts.
/// Excluded rows are tagged `(excluded)`, rows hiding URLs behind the limit
/// are tagged `(limited)`.
pub fn render_rows(rows: &[TreeRow]) -> String {
    let mut out = String::new();

    for row in rows {
        let selection = if row.is_selected {
            "[x]"
        } else if row.is_partially_selected {
            "[-]"
        } else {
            "[ ]"
        };

        let expander = match (row.has_children, row.is_expanded) {
            (false, _) => " ",
            (true, true) => "v",
            (true, false) => ">",
        };

        let counts = if row.is_limited {
            format!("{}/{}", row.limited_url_count, row.total_url_count)
        } else {
            row.total_url_count.to_string()
        };

        out.push_str(&format!(
            "{}{} {} {} ({})",
            "  ".repeat(row.depth),
            selection,
            expander,
            row.name,
            counts
        ));

        if !row.is_included {
            out.push_str(" (excluded)");
        } else if row.is_limited {
            out.push_str(" (limited)");
        }
        out.push('\n');
    }

    out
}
