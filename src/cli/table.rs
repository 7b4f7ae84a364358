//! Render API replies as ASCII tables. List endpoints return JSON arrays of
//! objects; stats endpoints return one flat object. Column widths adapt to
//! the terminal so wide entity rows stay readable.

use serde_json::Value;

/// Print a JSON array of objects as a table, one column per key.
/// Columns are the union of keys across all rows, sorted for stability.
pub fn print_object_list(title: &str, rows: &[Value]) {
    println!("{}:", title);
    if rows.is_empty() {
        println!("  (none)");
        return;
    }

    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for k in map.keys() {
                if !columns.contains(k) {
                    columns.push(k.clone());
                }
            }
        }
    }
    if columns.is_empty() {
        // not object-shaped; fall back to pretty JSON
        for row in rows {
            println!("{}", serde_json::to_string_pretty(row).unwrap_or_else(|_| row.to_string()));
        }
        return;
    }
    columns.sort();

    let cap = column_cap(columns.len());
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| cell_string(row.get(c).unwrap_or(&Value::Null), cap))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count().min(cap)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            let w = cell.chars().count();
            if w > widths[i] {
                widths[i] = w.min(cap);
            }
        }
    }

    let sep = build_separator(&widths);
    println!("{}", sep);
    println!("{}", build_row(&columns.iter().map(|c| truncate(c, cap)).collect::<Vec<_>>(), &widths));
    println!("{}", sep);
    for row in &cells {
        println!("{}", build_row(row, &widths));
    }
    println!("{}", sep);
    println!("rows: {}", rows.len());
}

/// Print one flat object as a two-column key/value table (stats views).
pub fn print_kv(title: &str, val: &Value) {
    println!("{}:", title);
    let Value::Object(map) = val else {
        println!("{}", serde_json::to_string_pretty(val).unwrap_or_else(|_| val.to_string()));
        return;
    };
    if map.is_empty() {
        println!("  (empty)");
        return;
    }
    let cap = column_cap(2);
    let key_w = map.keys().map(|k| k.chars().count()).max().unwrap_or(3).min(cap);
    for (k, v) in map {
        println!("  {:key_w$}  {}", truncate(k, cap), cell_string(v, cap), key_w = key_w);
    }
}

fn column_cap(ncols: usize) -> usize {
    let term_w = terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(120);
    // per-column budget after borders and padding
    let avail = term_w.saturating_sub(3 * ncols + 1);
    (avail / ncols.max(1)).clamp(8, 48)
}

fn cell_string(v: &Value, cap: usize) -> String {
    let s = match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    truncate(&s, cap)
}

fn truncate(s: &str, cap: usize) -> String {
    if s.chars().count() <= cap {
        return s.to_string();
    }
    let mut out: String = s.chars().take(cap.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn build_separator(widths: &[usize]) -> String {
    let mut out = String::from("+");
    for w in widths {
        out.push_str(&"-".repeat(w + 2));
        out.push('+');
    }
    out
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = w.saturating_sub(cell.chars().count());
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad + 1));
        out.push('|');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncate_marks_overflow() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-much-longer-cell", 8), "a-much-…");
    }

    #[test]
    fn separator_and_row_align() {
        let widths = vec![2, 4];
        assert_eq!(build_separator(&widths), "+----+------+");
        assert_eq!(build_row(&["ab".into(), "cd".into()], &widths), "| ab | cd   |");
    }

    #[test]
    fn cell_string_handles_non_strings() {
        assert_eq!(cell_string(&json!(42), 10), "42");
        assert_eq!(cell_string(&Value::Null, 10), "");
    }
}
