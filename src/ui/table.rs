use eframe::egui::{self, Align, Layout, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

/// A table column: header text plus an optional hover description.
pub struct TableColumn<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> TableColumn<'a> {
    pub fn plain(name: &'a str) -> Self {
        TableColumn {
            name,
            description: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Generic striped table
// ---------------------------------------------------------------------------

/// Render `n_rows` rows, asking `cell(row, column)` for each text.
///
/// With `fill_height` the table takes the remaining height and scrolls on
/// its own; otherwise it grows with its content so several tables can share
/// an outer scroll area.
pub fn data_table(
    ui: &mut Ui,
    id: &str,
    columns: &[TableColumn<'_>],
    n_rows: usize,
    fill_height: bool,
    cell: impl Fn(usize, usize) -> String,
) {
    ScrollArea::horizontal()
        .id_salt(("table_scroll", id))
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .id_salt(id)
                .striped(true)
                .resizable(true)
                .vscroll(fill_height)
                .auto_shrink([false, !fill_height])
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(40.0), columns.len())
                .header(HEADER_HEIGHT, |mut header| {
                    for column in columns {
                        header.col(|ui: &mut Ui| {
                            let label = ui.strong(column.name);
                            if let Some(desc) = column.description {
                                label.on_hover_text(desc);
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, n_rows, |mut row| {
                        let r = row.index();
                        for c in 0..columns.len() {
                            row.col(|ui: &mut Ui| {
                                ui.add(egui::Label::new(cell(r, c)).truncate());
                            });
                        }
                    });
                });
        });
}
