use crate::cli::ui::{self, StyleType};
use crate::core::currency;
use crate::core::rates::{self, MultiConversion, RateTable};

/// Renders the multi-currency view: a base row followed by quote rows
/// derived from it. `rotations` cyclic shifts are applied first, each one
/// promoting the former last row to the new base.
pub fn display(
    table: &RateTable,
    base: &str,
    amount_input: &str,
    quotes: &[String],
    rotations: u32,
) {
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell("Amount"),
    ]);

    match rates::parse_amount(amount_input) {
        Some(amount) => {
            let mut multi = MultiConversion::new(base, amount, quotes);
            multi.recalculate(table);
            for _ in 0..rotations {
                multi.rotate();
                multi.recalculate(table);
            }
            for row in multi.rows() {
                out.add_row(vec![
                    comfy_table::Cell::new(format!(
                        "{} {}",
                        currency::flag_for(&row.code),
                        row.code
                    )),
                    comfy_table::Cell::new(currency::name_for(&row.code)),
                    ui::amount_cell(&rates::format_amount(row.amount)),
                ]);
            }
        }
        None => {
            // Soft-fail: keep the list visible, drop the dependent amounts.
            for code in std::iter::once(base).chain(quotes.iter().map(String::as_str)) {
                out.add_row(vec![
                    comfy_table::Cell::new(format!("{} {}", currency::flag_for(code), code)),
                    comfy_table::Cell::new(currency::name_for(code)),
                    ui::amount_cell(""),
                ]);
            }
        }
    }

    println!("{out}");

    let first = multi_base(base, quotes, rotations);
    let note = format!("base: {first}");
    println!("{}", ui::style_text(&note, StyleType::Subtle));
}

/// The code ending up in the base position after `rotations` shifts.
fn multi_base(base: &str, quotes: &[String], rotations: u32) -> String {
    let mut codes: Vec<&str> = std::iter::once(base)
        .chain(quotes.iter().map(String::as_str))
        .collect();
    let len = codes.len();
    if len > 0 {
        codes.rotate_right(rotations as usize % len);
    }
    codes[0].to_string()
}
