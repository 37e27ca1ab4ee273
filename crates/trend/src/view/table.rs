use colored::Colorize;

/// One column: its header and how a row turns into a cell.
pub struct Column<T> {
    pub label: &'static str,
    pub cell: fn(&T) -> String,
    pub emphasis: bool,
}

pub const LOADING: &str = "Loading...";

/// Render `rows` as a numbered, left-aligned table. The row numbers are what
/// `open <row>` refers to.
pub fn render<T>(columns: &[Column<T>], rows: &[T], loading: bool, empty_message: &str) -> String {
    if loading {
        return LOADING.to_string();
    }
    if rows.is_empty() {
        return empty_message.dimmed().to_string();
    }

    let labels: Vec<String> = columns.iter().map(|c| c.label.to_uppercase()).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| (c.cell)(row)).collect())
        .collect();

    let number_width = rows.len().to_string().len();
    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(label.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    // pad before colouring; escape codes would throw the widths off
    let header = labels
        .iter()
        .zip(&widths)
        .map(|(label, width)| format!("{label:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![format!(
        "{:>number_width$}  {}",
        "#",
        header.trim_end().bold()
    )];
    for (i, row) in cells.iter().enumerate() {
        let line = row
            .iter()
            .zip(columns)
            .zip(&widths)
            .map(|((cell, column), width)| {
                let padded = format!("{cell:<width$}");
                if column.emphasis {
                    padded.blue().bold().to_string()
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(format!("{:>number_width$}  {}", i + 1, line.trim_end()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, u32);

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column {
                label: "Name",
                cell: |r| r.0.to_string(),
                emphasis: true,
            },
            Column {
                label: "Qty",
                cell: |r| r.1.to_string(),
                emphasis: false,
            },
        ]
    }

    #[test]
    fn aligns_columns_and_numbers_rows() {
        colored::control::set_override(false);
        let table = render(&columns(), &[Row("apple", 3), Row("fig", 12)], false, "none");
        assert_eq!(table, "#  NAME   QTY\n1  apple  3\n2  fig    12");
    }

    #[test]
    fn loading_and_empty_states() {
        colored::control::set_override(false);
        assert_eq!(render(&columns(), &[Row("apple", 3)], true, "none"), LOADING);
        assert_eq!(render(&columns(), &[], false, "nothing here"), "nothing here");
    }
}
