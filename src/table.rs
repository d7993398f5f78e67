use crate::debug::DebugLogger;
use crate::dom;
use crate::grid::{self, LogicalGrid};
use crate::idgen::IdGenerator;
use crate::tokens;
use kuchiki::NodeRef;

/// Writes header/data cell associations back into table markup: ids and
/// `scope` on header cells, `headers` token lists on the cells they
/// describe. Total over arbitrary markup; malformed tables degrade to
/// fewer annotations, never to an error.
pub(crate) struct TableAssociation<'a> {
    document: &'a NodeRef,
    ids: IdGenerator,
    debug: Option<&'a DebugLogger>,
}

impl<'a> TableAssociation<'a> {
    pub fn new(document: &'a NodeRef, debug: Option<&'a DebugLogger>) -> Self {
        Self {
            document,
            ids: IdGenerator::new("table"),
            debug,
        }
    }

    /// Run both association passes on one table, idempotently.
    pub fn fix_table(&self, table: &NodeRef) {
        let header = dom::children_with_tags(table, &["thead"]).into_iter().next();
        let body = dom::children_with_tags(table, &["tbody"]).into_iter().next();
        let footer = dom::children_with_tags(table, &["tfoot"]).into_iter().next();

        if let Some(header) = &header {
            self.fix_header(header);
            let header_grid = grid::build_grid(header);
            if body.is_some() && grid::validate_header(&header_grid) {
                let mut data = LogicalGrid::default();
                if let Some(body) = &body {
                    data.append(grid::build_grid(body));
                }
                if let Some(footer) = &footer {
                    data.append(grid::build_grid(footer));
                }
                self.associate_columns(&header_grid, &data);
            }
        }
        if let Some(body) = &body {
            self.associate_row_headers(body);
        }
        if let Some(footer) = &footer {
            self.associate_row_headers(footer);
        }
        if let Some(log) = self.debug {
            log.increment("table.fixed", 1);
        }
    }

    /// Every `table` in the document, minus opted-out subtrees.
    pub fn fix_tables(&self) {
        for table in dom::select_all(self.document, "table") {
            if dom::is_remediable(&table) {
                self.fix_table(&table);
            }
        }
    }

    /// Header pass: every `th` under `thead > tr` gets an id and
    /// `scope="col"`.
    fn fix_header(&self, header: &NodeRef) {
        for tr in dom::children_with_tags(header, &["tr"]) {
            for th in dom::children_with_tags(&tr, &["th"]) {
                self.ids.ensure_id(self.document, &th);
                dom::set_attribute(&th, "scope", "col");
            }
        }
    }

    /// Column association: rows whose length matches the header width
    /// exactly get the column's header ids unioned into each cell's
    /// `headers`. Other rows are skipped, not errors.
    fn associate_columns(&self, header: &LogicalGrid, data: &LogicalGrid) {
        let width = header.width();
        for row in data.rows() {
            if row.len() != width {
                continue;
            }
            for (column, slot) in row.iter().enumerate() {
                let Some(cell) = slot else {
                    continue;
                };
                for id in grid::ids_for_column(header, column) {
                    tokens::append_to_attribute(cell, "headers", &id);
                }
            }
        }
    }

    /// Row-local association, independent of header validity: `th` cells
    /// inside a body/footer row label the `td` cells of that row.
    fn associate_row_headers(&self, section: &NodeRef) {
        let section_grid = grid::build_grid(section);
        for row in section_grid.rows() {
            let mut row_header_ids = Vec::new();
            for slot in row.iter().flatten() {
                if dom::tag_name(slot).as_deref() == Some("TH") {
                    self.ids.ensure_id(self.document, slot);
                    dom::set_attribute(slot, "scope", "row");
                    if let Some(id) = dom::get_attribute(slot, "id") {
                        row_header_ids.push(id);
                    }
                }
            }
            if row_header_ids.is_empty() {
                continue;
            }
            for slot in row.iter().flatten() {
                if dom::tag_name(slot).as_deref() == Some("TD") {
                    // Span duplicates revisit the same element; the token
                    // set semantics absorb the repeats.
                    for id in &row_header_ids {
                        tokens::append_to_attribute(slot, "headers", id);
                    }
                }
            }
        }
    }
}
