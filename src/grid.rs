use crate::dom;
use kuchiki::NodeRef;

/// Logical row/column matrix recovered from a table section after
/// expanding `colspan` and `rowspan`. A spanned source element occupies
/// every slot it covers; the slots hold handles to the same node, never
/// copies of it. Empty slots are an explicit sentinel so malformed
/// markup still produces a total result.
#[derive(Default)]
pub(crate) struct LogicalGrid {
    rows: Vec<Vec<Option<NodeRef>>>,
}

impl LogicalGrid {
    pub fn rows(&self) -> &[Vec<Option<NodeRef>>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column count of the first row. Meaningful after `validate_header`,
    /// where every row has this length.
    pub fn width(&self) -> usize {
        self.rows.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn append(&mut self, other: LogicalGrid) {
        self.rows.extend(other.rows);
    }
}

/// `colspan`/`rowspan` value with HTML's forgiving parse: missing,
/// non-numeric, or <= 1 all mean "spans one".
fn span_value(cell: &NodeRef, attribute: &str) -> usize {
    dom::get_attribute(cell, attribute)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Build the logical grid for a `thead`/`tbody`/`tfoot` element from its
/// direct `tr` children.
pub(crate) fn build_grid(section: &NodeRef) -> LogicalGrid {
    let mut raw_rows = Vec::new();
    for tr in dom::children_with_tags(section, &["tr"]) {
        let cells = dom::children_with_tags(&tr, &["td", "th"]);
        raw_rows.push(expand_colspan(&cells));
    }
    expand_rowspan(&raw_rows)
}

/// Duplicate each cell handle `colspan` times, immediately after its
/// original position. Iterates the unexpanded row, so inserted
/// duplicates are never re-expanded.
fn expand_colspan(row: &[NodeRef]) -> Vec<NodeRef> {
    let mut expanded = Vec::with_capacity(row.len());
    for cell in row {
        let span = span_value(cell, "colspan");
        for _ in 0..span {
            expanded.push(cell.clone());
        }
    }
    expanded
}

/// Lay the colspan-expanded rows out top to bottom. Each cell lands on
/// the first free column at or after its natural offset, skipping
/// columns already filled by a rowspan descending from an earlier row;
/// a cell with `rowspan` k also claims that column in the next k-1
/// rows, creating and padding rows as needed.
fn expand_rowspan(rows: &[Vec<NodeRef>]) -> LogicalGrid {
    let mut grid: Vec<Vec<Option<NodeRef>>> = Vec::new();
    for (row_index, cells) in rows.iter().enumerate() {
        if grid.len() <= row_index {
            grid.push(Vec::new());
        }
        let mut skip_offset = 0usize;
        for (cell_index, cell) in cells.iter().enumerate() {
            let mut column = cell_index + skip_offset;
            {
                let row = &mut grid[row_index];
                while column < row.len() && row[column].is_some() {
                    skip_offset += 1;
                    column = cell_index + skip_offset;
                }
                if row.len() <= column {
                    row.resize(column + 1, None);
                }
                row[column] = Some(cell.clone());
            }
            let rowspan = span_value(cell, "rowspan");
            if rowspan > 1 {
                for below in 1..rowspan {
                    let target = row_index + below;
                    while grid.len() <= target {
                        grid.push(Vec::new());
                    }
                    while grid[target].len() < column {
                        grid[target].push(None);
                    }
                    grid[target].push(Some(cell.clone()));
                }
            }
        }
    }
    LogicalGrid { rows: grid }
}

/// A header grid gates column association only when it is rectangular:
/// non-empty, no empty rows, all rows the same length.
pub(crate) fn validate_header(header: &LogicalGrid) -> bool {
    if header.is_empty() {
        return false;
    }
    let mut length = None;
    for row in header.rows() {
        if row.is_empty() {
            return false;
        }
        match length {
            None => length = Some(row.len()),
            Some(expected) if row.len() != expected => return false,
            Some(_) => {}
        }
    }
    true
}

/// Ids of the `th` cells occupying `column` across all header rows, top
/// to bottom. Runs after the header pass, which has already given every
/// header `th` an id.
pub(crate) fn ids_for_column(header: &LogicalGrid, column: usize) -> Vec<String> {
    let mut ids = Vec::new();
    for row in header.rows() {
        let Some(Some(cell)) = row.get(column) else {
            continue;
        };
        if dom::tag_name(cell).as_deref() == Some("TH") {
            if let Some(id) = dom::get_attribute(cell, "id") {
                ids.push(id);
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_document, select_first, set_attribute};

    fn section(html: &str) -> NodeRef {
        let doc = parse_document(html);
        select_first(&doc, "thead, tbody, tfoot").expect("table section")
    }

    fn grid_text(grid: &LogicalGrid) -> Vec<Vec<Option<String>>> {
        grid.rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|slot| {
                        slot.as_ref()
                            .map(|cell| cell.text_contents().trim().to_string())
                    })
                    .collect()
            })
            .collect()
    }

    fn text_rows(rows: &[&[&str]]) -> Vec<Vec<Option<String>>> {
        rows.iter()
            .map(|row| row.iter().map(|s| Some(s.to_string())).collect())
            .collect()
    }

    #[test]
    fn colspan_expands_in_place() {
        let tbody = section(r#"<table><tbody><tr><td colspan="2">A</td><td>B</td></tr></tbody></table>"#);
        let grid = build_grid(&tbody);
        assert_eq!(grid_text(&grid), text_rows(&[&["A", "A", "B"]]));
    }

    #[test]
    fn consecutive_colspans_do_not_drift() {
        let tbody = section(
            r#"<table><tbody><tr><td colspan="3">A</td><td colspan="2">B</td></tr></tbody></table>"#,
        );
        let grid = build_grid(&tbody);
        assert_eq!(grid_text(&grid), text_rows(&[&["A", "A", "A", "B", "B"]]));
    }

    #[test]
    fn rowspan_descends_into_later_rows() {
        let tbody = section(
            r#"<table><tbody><tr><td rowspan="2">A</td><td>B</td></tr><tr><td>C</td></tr></tbody></table>"#,
        );
        let grid = build_grid(&tbody);
        assert_eq!(grid_text(&grid), text_rows(&[&["A", "B"], &["A", "C"]]));
    }

    #[test]
    fn rowspan_slots_reference_the_same_element() {
        let tbody = section(
            r#"<table><tbody><tr><td rowspan="2">A</td><td>B</td></tr><tr><td>C</td></tr></tbody></table>"#,
        );
        let grid = build_grid(&tbody);
        let first = grid.rows()[0][0].as_ref().expect("slot 0,0");
        let second = grid.rows()[1][0].as_ref().expect("slot 1,0");
        assert!(first == second, "spanned slots must share one node handle");
    }

    #[test]
    fn rowspan_creates_missing_rows() {
        let tbody = section(
            r#"<table><tbody><tr><td>A</td><td rowspan="3">B</td></tr></tbody></table>"#,
        );
        let grid = build_grid(&tbody);
        assert_eq!(
            grid_text(&grid),
            vec![
                vec![Some("A".to_string()), Some("B".to_string())],
                vec![None, Some("B".to_string())],
                vec![None, Some("B".to_string())],
            ]
        );
    }

    #[test]
    fn later_cells_skip_columns_filled_by_earlier_rowspans() {
        let tbody = section(
            r#"<table><tbody>
                <tr><td rowspan="2">A</td><td>B</td></tr>
                <tr><td>C</td><td>D</td></tr>
            </tbody></table>"#,
        );
        let grid = build_grid(&tbody);
        assert_eq!(
            grid_text(&grid),
            text_rows(&[&["A", "B"], &["A", "C", "D"]])
        );
    }

    #[test]
    fn combined_spans_expand_both_ways() {
        let tbody = section(
            r#"<table><tbody>
                <tr><td colspan="2" rowspan="2">A</td><td>B</td></tr>
                <tr><td>C</td></tr>
            </tbody></table>"#,
        );
        let grid = build_grid(&tbody);
        assert_eq!(
            grid_text(&grid),
            text_rows(&[&["A", "A", "B"], &["A", "A", "C"]])
        );
    }

    #[test]
    fn invalid_span_values_mean_span_one() {
        let tbody = section(
            r#"<table><tbody><tr><td colspan="banana">A</td><td colspan="0">B</td><td rowspan="-3">C</td></tr></tbody></table>"#,
        );
        let grid = build_grid(&tbody);
        assert_eq!(grid_text(&grid), text_rows(&[&["A", "B", "C"]]));
    }

    #[test]
    fn ragged_header_is_rejected() {
        let thead = section(
            r#"<table><thead>
                <tr><th>H1</th><th>H2</th></tr>
                <tr><th>H3</th><th>H4</th><th>H5</th></tr>
            </thead></table>"#,
        );
        assert!(!validate_header(&build_grid(&thead)));
    }

    #[test]
    fn rectangular_header_is_accepted() {
        let thead = section(
            r#"<table><thead>
                <tr><th>H1</th><th>H2</th></tr>
                <tr><th>H3</th><th>H4</th></tr>
            </thead></table>"#,
        );
        let grid = build_grid(&thead);
        assert!(validate_header(&grid));
        assert_eq!(grid.width(), 2);
    }

    #[test]
    fn empty_and_empty_rowed_headers_are_rejected() {
        let empty = section(r#"<table><thead></thead></table>"#);
        assert!(!validate_header(&build_grid(&empty)));

        let empty_row = section(r#"<table><thead><tr></tr><tr><th>H</th></tr></thead></table>"#);
        assert!(!validate_header(&build_grid(&empty_row)));
    }

    #[test]
    fn ids_for_column_walks_header_rows_top_to_bottom() {
        let thead = section(
            r#"<table><thead>
                <tr><th id="a">A</th><th id="b">B</th></tr>
                <tr><th id="c">C</th><td id="d">D</td></tr>
            </thead></table>"#,
        );
        let grid = build_grid(&thead);
        assert_eq!(ids_for_column(&grid, 0), vec!["a", "c"]);
        // td in a header row contributes nothing
        assert_eq!(ids_for_column(&grid, 1), vec!["b"]);
        assert!(ids_for_column(&grid, 5).is_empty());
    }

    #[test]
    fn colspan_header_repeats_its_id_across_columns() {
        let thead = section(
            r#"<table><thead><tr><th colspan="2">Wide</th></tr></thead></table>"#,
        );
        let grid = build_grid(&thead);
        let cell = grid.rows()[0][0].as_ref().expect("cell").clone();
        set_attribute(&cell, "id", "wide");
        assert_eq!(ids_for_column(&grid, 0), vec!["wide"]);
        assert_eq!(ids_for_column(&grid, 1), vec!["wide"]);
    }
}
