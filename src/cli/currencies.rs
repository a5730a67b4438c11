use super::ui;
use crate::core::currency::CATALOG;
use comfy_table::{Cell, CellAlignment};

pub fn render() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
    ]);

    for (i, currency) in CATALOG.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(currency.code),
            Cell::new(currency.name),
        ]);
    }

    table.to_string()
}

pub fn run() {
    println!("{}", ui::style_text("Supported currencies", ui::StyleType::Title));
    println!("{}", render());
}
