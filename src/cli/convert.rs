use crate::cli::ui::{self, StyleType};
use crate::core::currency;
use crate::core::rates::{self, RateTable};

fn currency_label(code: &str) -> String {
    format!("{} {}", currency::flag_for(code), code)
}

/// Renders the single-conversion view. An unparsable amount leaves the
/// converted cell empty instead of failing, mirroring live-typing UX.
pub fn display(table: &RateTable, amount_input: &str, from: &str, to: &str) {
    let amount = rates::parse_amount(amount_input);
    let converted = amount.map(|a| table.convert(a, from, to));

    let mut out = ui::new_styled_table();
    out.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Amount")]);
    out.add_row(vec![
        comfy_table::Cell::new(currency_label(from)),
        ui::amount_cell(&amount.map_or_else(|| amount_input.to_string(), rates::format_amount)),
    ]);
    out.add_row(vec![
        comfy_table::Cell::new(currency_label(to)),
        ui::amount_cell(&converted.map_or_else(String::new, rates::format_amount)),
    ]);
    println!("{out}");

    let unit_rate = format!("1 {from} = {} {to}", rates::format_rate(table.rate(from, to)));
    println!("{}", ui::style_text(&unit_rate, StyleType::Subtle));
}
