//! Terminal rendering with comfy-table.

use comfy_table::Cell as TableCell;
use comfy_table::Color;
use comfy_table::ColumnConstraint;
use comfy_table::ContentArrangement;
use comfy_table::Table;
use comfy_table::Width;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use kari_admin_lib::adapters::Tone;
use kari_admin_lib::adapters::format_count;
use kari_admin_lib::aggregate::AggregationBucket;
use kari_admin_lib::table::Cell;
use kari_admin_lib::table::ColumnWidth;
use kari_admin_lib::table::PageMarker;
use kari_admin_lib::table::TableView;

const BAR_WIDTH: usize = 30;

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Green => Color::Green,
        Tone::Yellow => Color::Yellow,
        Tone::Gray => Color::Grey,
        Tone::Blue => Color::Blue,
        Tone::Red => Color::Red,
        Tone::Purple => Color::Magenta,
        Tone::Indigo => Color::DarkBlue,
        Tone::Orange => Color::DarkYellow,
    }
}

fn table_cell(cell: &Cell) -> TableCell {
    match cell.tone {
        Some(tone) => TableCell::new(&cell.text).fg(tone_color(tone)),
        None => TableCell::new(&cell.text),
    }
}

pub fn print_heading(title: &str) {
    println!();
    println!("{}", title);
}

/// Prints a list page: the table, the page window and the summary line.
pub fn print_table_view(title: &str, view: &TableView) {
    print_heading(title);
    match view {
        TableView::Empty { message } => println!("{}", message),
        TableView::Rows {
            headers,
            rows,
            window,
            current_page,
            summary,
            ..
        } => {
            let mut table = Table::new();
            apply_table_style(&mut table);
            table.set_header(headers.iter().map(|h| TableCell::new(&h.text)));
            for row in rows {
                table.add_row(row.cells.iter().map(table_cell));
            }
            for (index, header) in headers.iter().enumerate() {
                let width = match header.width {
                    Some(ColumnWidth::Chars(chars)) => Width::Fixed(chars),
                    Some(ColumnWidth::Percent(percent)) => Width::Percentage(percent),
                    None => continue,
                };
                if let Some(column) = table.column_mut(index) {
                    column.set_constraint(ColumnConstraint::UpperBoundary(width));
                }
            }
            println!("{table}");
            println!("{}", summary);
            println!("Páginas: {}", window_line(window, *current_page));
        }
    }
}

/// `1 … 3 4 [5] 6 7 … 10`
pub fn window_line(window: &[PageMarker], current: usize) -> String {
    window
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(n) if *n == current => format!("[{}]", n),
            PageMarker::Page(n) => n.to_string(),
            PageMarker::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Horizontal bar for `value` scaled against `max`.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round().max(1.0) as usize;
    "█".repeat(filled.min(width))
}

/// Prints buckets as a bar chart, with one extra column per named series.
pub fn print_buckets(title: &str, value_header: &str, buckets: &[AggregationBucket], series: &[(&str, &str)]) {
    print_heading(title);
    if buckets.iter().all(|b| b.value == 0) && series.is_empty() {
        println!("Nenhum dado encontrado");
        return;
    }

    let max = buckets.iter().map(|b| b.value).max().unwrap_or(0);
    let mut table = Table::new();
    apply_table_style(&mut table);

    let mut header = vec!["".to_string(), value_header.to_string(), "".to_string()];
    header.extend(series.iter().map(|(_, label)| label.to_string()));
    table.set_header(header);

    for bucket in buckets {
        let mut row = vec![
            bucket.label.clone(),
            format_count(bucket.value),
            bar(bucket.value, max, BAR_WIDTH),
        ];
        row.extend(
            series
                .iter()
                .map(|(name, _)| format_count(bucket.series_value(name).unwrap_or(0))),
        );
        table.add_row(row);
    }
    println!("{table}");
}

/// Prints label/value pairs as a two-column table.
pub fn print_pairs(title: &str, pairs: &[(&str, String)]) {
    print_heading(title);
    let mut table = Table::new();
    apply_table_style(&mut table);
    for (label, value) in pairs {
        table.add_row(vec![label.to_string(), value.clone()]);
    }
    println!("{table}");
}

/// Prints a plain table with the given header.
pub fn print_rows(title: &str, header: &[&str], rows: Vec<Vec<String>>) {
    print_heading(title);
    if rows.is_empty() {
        println!("Nenhum dado encontrado");
        return;
    }
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(header.to_vec());
    for row in rows {
        table.add_row(row);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_line_marks_current_page() {
        let window = vec![
            PageMarker::Page(1),
            PageMarker::Ellipsis,
            PageMarker::Page(4),
            PageMarker::Page(5),
            PageMarker::Page(6),
            PageMarker::Ellipsis,
            PageMarker::Page(10),
        ];
        assert_eq!(window_line(&window, 5), "1 … 4 [5] 6 … 10");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10, 10), "");
        assert_eq!(bar(10, 10, 10), "█".repeat(10));
        assert_eq!(bar(5, 10, 10), "█".repeat(5));
        // Small but non-zero values stay visible.
        assert_eq!(bar(1, 1000, 10), "█");
    }
}
